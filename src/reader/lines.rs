//! Line classification
//!
//! Splits each raw GEDCOM line into at most three space-separated fields:
//! level, tag and payload. The payload keeps any further spaces, so names and
//! dates survive intact.

use std::borrow::Cow;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use log::warn;

use crate::error::{GedcomError, Result};

/// One classified line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GedcomLine {
    /// 1-based position in the source
    pub line_number: usize,
    /// First field, normally the level number
    pub level: String,
    /// Second field; empty for a line with a single field
    pub tag: String,
    /// Remainder of the line after the tag
    pub payload: Option<String>,
}

impl GedcomLine {
    /// Classify a raw line. Surrounding whitespace is stripped first.
    #[must_use]
    pub fn parse(line_number: usize, raw: &str) -> Self {
        let mut fields = raw.trim().splitn(3, ' ');
        let level = fields.next().unwrap_or_default().to_string();
        let tag = fields.next().unwrap_or_default().to_string();
        let payload = fields.next().map(str::to_string);
        Self {
            line_number,
            level,
            tag,
            payload,
        }
    }

    /// Level as a number, if the first field is one
    #[must_use]
    pub fn level_number(&self) -> Option<u8> {
        self.level.parse().ok()
    }
}

/// Lazy, finite sequence of classified lines over any buffered source.
///
/// Bytes that are not UTF-8 are replaced, never rejected. A read failure is
/// yielded once and ends the sequence.
pub struct GedcomLines<R> {
    source: R,
    path: PathBuf,
    line_number: usize,
    failed: bool,
}

impl<R: BufRead> GedcomLines<R> {
    /// Wrap a buffered source; `path` is only used for error context
    pub fn new(source: R, path: impl AsRef<Path>) -> Self {
        Self {
            source,
            path: path.as_ref().to_path_buf(),
            line_number: 0,
            failed: false,
        }
    }
}

impl<R: BufRead> Iterator for GedcomLines<R> {
    type Item = Result<GedcomLine>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let mut buffer = Vec::new();
        match self.source.read_until(b'\n', &mut buffer) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;
                let text = String::from_utf8_lossy(&buffer);
                if matches!(text, Cow::Owned(_)) {
                    warn!("Line {}: replaced bytes that are not UTF-8", self.line_number);
                }
                Some(Ok(GedcomLine::parse(self.line_number, &text)))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(GedcomError::io(
                    &self.path,
                    format!("Failed to read line {}", self.line_number + 1),
                    e,
                )))
            }
        }
    }
}
