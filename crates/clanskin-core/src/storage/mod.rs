//! # Storage
//!
//! Durable backing for the profile store: one JSON data file per
//! installation, read whole at startup and written whole on flush.

mod datafile;

pub use datafile::{DataFile, LoadOutcome};
