//! Parsing helpers for `/proc/uptime`.

/// Whole seconds since boot, taken from the first field of `/proc/uptime`.
pub fn parse_uptime_secs(content: &str) -> Option<u64> {
    let secs: f64 = content.split_whitespace().next()?.parse().ok()?;
    if !secs.is_finite() || secs < 0.0 {
        return None;
    }
    Some(secs.trunc() as u64)
}
