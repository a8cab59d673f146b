//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//! Manual mocks are explicit and easy to debug: we control exactly what they
//! return without macro magic.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
