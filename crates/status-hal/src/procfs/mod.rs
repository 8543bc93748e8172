//! Parsers for `/proc` files. Pure functions over file content.

pub mod meminfo;
pub mod mounts;
pub mod uptime;
