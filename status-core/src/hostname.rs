//! Hostname validation.

use crate::errors::{StatusError, StatusResult};

const MAX_HOSTNAME_LEN: usize = 255;

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Validates a candidate hostname and hands it back unchanged.
///
/// A hostname is at most 255 bytes, does not start with `-`, and every
/// `.`-separated label is non-empty and made of `[A-Za-z0-9-]`.
///
/// The empty string is accepted: it has no labels to reject.
pub fn validate_hostname(hostname: &str) -> StatusResult<&str> {
    if hostname.len() > MAX_HOSTNAME_LEN {
        return Err(StatusError::InvalidHostname);
    }
    if hostname.is_empty() {
        return Ok(hostname);
    }
    if hostname.starts_with('-') || !hostname.split('.').all(is_valid_label) {
        return Err(StatusError::InvalidHostname);
    }
    Ok(hostname)
}
