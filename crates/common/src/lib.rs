//! Shared pieces used by both user API flavors: response envelopes and logging setup.

pub mod types;
pub mod utils;
