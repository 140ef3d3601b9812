//! Diagnostic sinks
//!
//! Diagnostics are passed to a sink rather than printed directly, so callers
//! choose where they go.

use std::io::{self, Write};

use super::Diagnostic;

/// Receives diagnostics one at a time
pub trait DiagnosticSink {
    /// Accept one diagnostic
    fn emit(&mut self, diagnostic: &Diagnostic) -> io::Result<()>;

    /// Accept a batch, in order
    fn emit_all<'a>(
        &mut self,
        diagnostics: impl IntoIterator<Item = &'a Diagnostic>,
    ) -> io::Result<()>
    where
        Self: Sized,
    {
        for diagnostic in diagnostics {
            self.emit(diagnostic)?;
        }
        Ok(())
    }
}

/// Writes one diagnostic per line to any writer
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> DiagnosticSink for WriterSink<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        writeln!(self.writer, "{diagnostic}")
    }
}

/// Collects diagnostics in memory
impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        self.push(diagnostic.clone());
        Ok(())
    }
}
