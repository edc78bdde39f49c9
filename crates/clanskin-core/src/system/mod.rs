//! # System Module
//!
//! Store metrics for status reporting.

mod metrics;

pub use metrics::*;
