//! Three-state date field
//!
//! Every date-like field of an individual or family is either a valid calendar
//! date, a date that was present in the file but could not be parsed, or absent.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// A date field as recorded in the source file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub enum GedDate {
    /// Parsed calendar date
    Valid(NaiveDate),
    /// Present but unparsable; holds the raw payload
    Invalid(String),
    /// No date recorded
    #[default]
    Missing,
}

impl GedDate {
    /// The calendar date, if the field holds a valid one
    #[must_use]
    pub const fn valid(&self) -> Option<NaiveDate> {
        match self {
            Self::Valid(date) => Some(*date),
            Self::Invalid(_) | Self::Missing => None,
        }
    }

    /// Whether any date (valid or not) was recorded
    #[must_use]
    pub const fn is_present(&self) -> bool {
        !matches!(self, Self::Missing)
    }

    #[must_use]
    pub const fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

impl From<NaiveDate> for GedDate {
    fn from(date: NaiveDate) -> Self {
        Self::Valid(date)
    }
}

impl fmt::Display for GedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Invalid(_) => f.write_str("INVALID"),
            Self::Missing => f.write_str("NA"),
        }
    }
}
