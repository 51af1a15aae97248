//! Utilities shared between the Quorum server binary and its tests.

pub mod logger;
pub mod time;
