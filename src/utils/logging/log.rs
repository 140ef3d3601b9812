//! Logging helpers for the load and evaluation passes
//!
//! Messages carry the source path and record counts so a run can be followed
//! from the log alone.

use std::path::Path;
use std::time::Duration;

/// Log that a GEDCOM source is about to be read
pub fn log_load_start(path: &Path) {
    log::info!("Reading GEDCOM records from {}", path.display());
}

/// Log the record counts of a finished load
pub fn log_load_complete(path: &Path, individuals: usize, families: usize, elapsed: Duration) {
    log::info!(
        "{}: assembled {individuals} individuals and {families} families in {elapsed:?}",
        path.display()
    );
}

/// Log the anomalies a load recorded. Nothing is logged for a clean file.
pub fn log_load_anomalies(path: &Path, duplicate_ids: usize, illegitimate_dates: usize) {
    if duplicate_ids == 0 && illegitimate_dates == 0 {
        return;
    }
    log::warn!(
        "{}: {duplicate_ids} redeclared identifiers and {illegitimate_dates} illegitimate dates, see US22 and US42",
        path.display()
    );
}

/// Log the outcome of a rule evaluation pass
pub fn log_rule_summary(rules: usize, diagnostics: usize, elapsed: Duration) {
    log::info!("Evaluated {rules} rules producing {diagnostics} diagnostics in {elapsed:?}");
}
