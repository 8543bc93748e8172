//! Parsing helpers for `/proc/meminfo`.

/// Extracts `MemTotal` from `/proc/meminfo`.
///
/// Returns the value in KiB.
pub fn parse_mem_total_kb(content: &str) -> Option<u64> {
    content.lines().find_map(|line| {
        line.strip_prefix("MemTotal:")?
            .split_whitespace()
            .next()
            .and_then(|num| num.parse().ok())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_mem_total_reads_first_field() {
        let data = "MemTotal:        1016084 kB\nMemFree:          529600 kB\nMemAvailable:     800000 kB\n";
        assert_eq!(parse_mem_total_kb(data), Some(1016084));
    }

    #[test]
    fn parse_mem_total_missing_is_none() {
        let data = "MemFree: 529600 kB\n";
        assert_eq!(parse_mem_total_kb(data), None);
    }
}
