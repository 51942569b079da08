//! Shared plumbing for simclock crates.

pub mod logging;
