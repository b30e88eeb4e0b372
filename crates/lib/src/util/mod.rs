//! Shared utilities.
//!
//! Test helpers shared by the unit tests of several modules.

#[cfg(test)]
pub mod testutil;
