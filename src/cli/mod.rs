//! CLI module
//!
//! Command-line interface over [`DcTrackClient`](crate::DcTrackClient).
//!
//! # Commands
//!
//! - `check` - Log in and report success
//! - `search` - Free-text item search
//! - `list` - Installed items at a location, by vendor
//! - `item` - One item in detail
//! - `power` - Power statistics for a location

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
