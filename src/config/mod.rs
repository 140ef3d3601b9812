//! Configuration for `GedcomReader`.

use std::fmt;

/// Configuration for the `GedcomReader`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Emit the sorted diagnostics through the reader's sink as part of opening a file.
    /// When disabled they are only available for programmatic inspection.
    pub emit_diagnostics: bool,
    /// Build the derived summary tables (individuals, families, recent deaths, survivors)
    pub build_tables: bool,
}

impl ReaderConfig {
    /// Configuration for programmatic use: no side effects, no tables
    #[must_use]
    pub const fn quiet() -> Self {
        Self {
            emit_diagnostics: false,
            build_tables: false,
        }
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            emit_diagnostics: true,
            build_tables: true,
        }
    }
}

impl fmt::Display for ReaderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Reader Configuration:")?;
        writeln!(f, "  Emit Diagnostics: {}", self.emit_diagnostics)?;
        writeln!(f, "  Build Tables: {}", self.build_tables)
    }
}
