//! # clanskin
//!
//! The host bridge for `clanskin-core`.
//!
//! The game host calls the HTTP API from its hooks (equip, chat command,
//! clan/team lifecycle); the CLI inspects and maintains the data file offline.
//!
//! - `api` - axum router, handlers, auth and rate limiting
//! - `cli` - clap commands
//! - `config` - TOML configuration
//! - `host` - the clan roster and permission table handed to the engine
//! - `messages` - reply text catalog

pub mod api;
pub mod cli;
pub mod config;
pub mod host;
pub mod messages;
