//! Device path to storage alias mapping.
//!
//! SD: /dev/mmcblk0, /dev/mmcblk0p1
//! USB: /dev/sda, /dev/sda1
//!
//! The device pattern is searched anywhere in the path; the partition pattern
//! collects every match inside the part captured after the device prefix.
//! Word and digit classes are ASCII-only.

use once_cell::sync::Lazy;
use regex::Regex;

pub const UNKNOWN_ALIAS: &str = "UNKNOWN";

static DEFAULT_RULES: Lazy<Vec<DiskAliasRule>> =
    Lazy::new(|| default_rules().unwrap_or_default());

fn default_rules() -> Result<Vec<DiskAliasRule>, regex::Error> {
    Ok(vec![
        DiskAliasRule::new("System", "/dev/root", None)?,
        DiskAliasRule::new("SD", r"/dev/mmcblk((?-u:\w)+)", Some(r"^[0-9]+|[0-9]+$"))?,
        DiskAliasRule::new("USB", r"/dev/sd((?-u:\w)+)", Some(r"^[a-z]+|[0-9]+$"))?,
    ])
}

/// One storage class: an alias, the device pattern, and an optional partition pattern.
///
/// If `device` has a capture group, the partition pattern runs over the first
/// group; otherwise over the whole match.
#[derive(Debug, Clone)]
pub struct DiskAliasRule {
    alias: String,
    device: Regex,
    part: Option<Regex>,
}

impl DiskAliasRule {
    pub fn new(alias: &str, device: &str, part: Option<&str>) -> Result<Self, regex::Error> {
        Ok(Self {
            alias: alias.to_string(),
            device: Regex::new(device)?,
            part: part.map(Regex::new).transpose()?,
        })
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    fn resolve(&self, device_path: &str) -> Option<String> {
        let caps = self.device.captures(device_path)?;
        let Some(part) = &self.part else {
            return Some(self.alias.clone());
        };
        let matched = caps.get(1).or_else(|| caps.get(0))?.as_str();

        let tokens: Vec<&str> = part.find_iter(matched).map(|m| m.as_str()).collect();
        if tokens.is_empty() {
            return Some(self.alias.clone());
        }
        Some(format!("{}-{}", self.alias, tokens.join("-")))
    }
}

/// Ordered rule list; the first matching rule names the device.
#[derive(Debug, Clone)]
pub struct DiskAliaser {
    rules: Vec<DiskAliasRule>,
}

impl Default for DiskAliaser {
    fn default() -> Self {
        Self::with_rules(DEFAULT_RULES.clone())
    }
}

impl DiskAliaser {
    /// System, SD and USB rules, in that order.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: Vec<DiskAliasRule>) -> Self {
        Self { rules }
    }

    /// Appends a rule with the lowest priority.
    pub fn push_rule(&mut self, rule: DiskAliasRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[DiskAliasRule] {
        &self.rules
    }

    /// Maps a device path such as `/dev/mmcblk0p1` to an alias such as `SD-0-1`.
    ///
    /// Never fails; unmatched paths are [`UNKNOWN_ALIAS`].
    pub fn resolve_alias(&self, device_path: &str) -> String {
        self.rules
            .iter()
            .find_map(|rule| rule.resolve(device_path))
            .unwrap_or_else(|| UNKNOWN_ALIAS.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alias(device: &str) -> String {
        DiskAliaser::new().resolve_alias(device)
    }

    #[test]
    fn default_rules_are_ordered() {
        let aliaser = DiskAliaser::new();
        let names: Vec<&str> = aliaser.rules().iter().map(|r| r.alias()).collect();
        assert_eq!(names, vec!["System", "SD", "USB"]);
    }

    #[test]
    fn root_device_is_system() {
        assert_eq!(alias("/dev/root"), "System");
    }

    #[test]
    fn system_rule_is_a_search() {
        assert_eq!(alias("/dev/rootfs"), "System");
        assert_eq!(alias("overlay:/dev/root"), "System");
    }

    #[test]
    fn sd_card_aliases() {
        assert_eq!(alias("/dev/mmcblk0"), "SD-0");
        assert_eq!(alias("/dev/mmcblk0p1"), "SD-0-1");
        assert_eq!(alias("/dev/mmcblk1p12"), "SD-1-12");
        assert_eq!(alias("/dev/mmcblk12"), "SD-12");
    }

    #[test]
    fn usb_aliases() {
        assert_eq!(alias("/dev/sda"), "USB-a");
        assert_eq!(alias("/dev/sda1"), "USB-a-1");
        assert_eq!(alias("/dev/sdb2"), "USB-b-2");
        assert_eq!(alias("/dev/sdaa15"), "USB-aa-15");
    }

    #[test]
    fn unmatched_devices_are_unknown() {
        assert_eq!(alias("/dev/nvme0n1"), UNKNOWN_ALIAS);
        assert_eq!(alias(""), UNKNOWN_ALIAS);
        assert_eq!(alias("/dev/mmcblk"), UNKNOWN_ALIAS);
    }

    #[test]
    fn non_ascii_characters_are_not_word_or_digit() {
        // U+0663 ARABIC-INDIC DIGIT THREE
        assert_eq!(alias("/dev/mmcblk0p\u{663}"), "SD-0");
        assert_eq!(alias("/dev/sda\u{663}"), "USB-a");
        assert_eq!(alias("/dev/mmcblk\u{e9}"), UNKNOWN_ALIAS);
    }

    #[test]
    fn no_tokens_yields_bare_alias() {
        assert_eq!(alias("/dev/mmcblkX"), "SD");
        assert_eq!(alias("/dev/sdX"), "USB");
    }

    #[test]
    fn resolve_is_idempotent() {
        let aliaser = DiskAliaser::new();
        for dev in ["/dev/root", "/dev/mmcblk0p1", "/dev/sdb2", "/dev/nvme0n1"] {
            assert_eq!(aliaser.resolve_alias(dev), aliaser.resolve_alias(dev));
        }
    }

    #[test]
    fn appended_rule_has_lowest_priority() {
        let mut aliaser = DiskAliaser::new();
        aliaser.push_rule(DiskAliasRule::new("NVMe", r"/dev/nvme(\w+)", Some(r"\d+")).unwrap());
        assert_eq!(aliaser.resolve_alias("/dev/nvme0n1p2"), "NVMe-0-1-2");
        assert_eq!(aliaser.resolve_alias("/dev/sda1"), "USB-a-1");
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        assert!(DiskAliasRule::new("Bad", "(", None).is_err());
    }
}
