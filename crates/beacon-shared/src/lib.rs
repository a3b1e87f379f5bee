//! # beacon-shared
//!
//! Identity newtypes, geographic primitives and application-wide constants
//! shared by the Beacon store and client crates.

pub mod constants;
pub mod types;
