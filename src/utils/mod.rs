//! Utility functions shared by the loader, the rules and the binary
//!
//! - [`date`]: date parsing and calendar arithmetic
//! - [`logging`]: logging helpers and console tables

pub mod date;
pub mod logging;

pub use logging::{log_load_anomalies, log_load_complete, log_load_start, log_rule_summary};
