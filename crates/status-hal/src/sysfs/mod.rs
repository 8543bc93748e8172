//! Helpers for `/sys`.

pub mod net;
