//! Process execution helpers.
//!
//! External commands are considered "world-touching" and must go through the HAL so the
//! status service can be tested without spawning real processes.

use crate::HalResult;
use std::process::Output;
use std::time::Duration;

/// Process execution trait (external command runner).
pub trait ProcessOps {
    fn command_output(&self, program: &str, args: &[&str], timeout: Duration) -> HalResult<Output>;

    /// Runs `program` and returns its trimmed stdout, failing on a non-zero exit.
    fn command_stdout(&self, program: &str, args: &[&str], timeout: Duration) -> HalResult<String> {
        let output = self.command_output(program, args, timeout)?;
        if !output.status.success() {
            return Err(crate::HalError::CommandFailed {
                program: program.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8(output.stdout)?.trim().to_string())
    }
}
