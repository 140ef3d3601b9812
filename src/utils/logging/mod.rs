//! Logging utilities for output
//!
//! This module provides utilities for logging and console output.

pub mod console;
pub mod log;

// Re-export commonly used functions for convenience
pub use console::{print_table, render_table};
pub use log::{log_load_anomalies, log_load_complete, log_load_start, log_rule_summary};
