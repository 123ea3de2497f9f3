//! Backend test support utilities
//!
//! Unified logging initialization shared by unit and integration
//! tests.

pub mod logging;
