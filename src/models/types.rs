//! Common domain type definitions
//!
//! This module contains common enum types used across the domain models and
//! the record assembler.

use serde::Serialize;
use std::fmt;

/// Sex code of an individual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Sex {
    /// `M`
    Male,
    /// `F`
    Female,
    /// Missing or any other code
    #[default]
    Unknown,
}

impl From<&str> for Sex {
    fn from(s: &str) -> Self {
        match s.trim() {
            "M" => Self::Male,
            "F" => Self::Female,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Unknown => "NA",
        };
        f.write_str(code)
    }
}

/// The tags the assembler recognizes. Everything else is `Other` and skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Head,
    Trailer,
    Note,
    Individual,
    Family,
    Name,
    Sex,
    ChildOf,
    SpouseOf,
    Husband,
    Wife,
    Child,
    Birth,
    Death,
    Marriage,
    Divorce,
    Date,
    Other,
}

impl From<&str> for Tag {
    fn from(s: &str) -> Self {
        match s {
            "HEAD" => Self::Head,
            "TRLR" => Self::Trailer,
            "NOTE" => Self::Note,
            "INDI" => Self::Individual,
            "FAM" => Self::Family,
            "NAME" => Self::Name,
            "SEX" => Self::Sex,
            "FAMC" => Self::ChildOf,
            "FAMS" => Self::SpouseOf,
            "HUSB" => Self::Husband,
            "WIFE" => Self::Wife,
            "CHIL" => Self::Child,
            "BIRT" => Self::Birth,
            "DEAT" => Self::Death,
            "MARR" => Self::Marriage,
            "DIV" => Self::Divorce,
            "DATE" => Self::Date,
            _ => Self::Other,
        }
    }
}

impl Tag {
    /// The date kind introduced by this tag, if it introduces one
    #[must_use]
    pub const fn date_kind(self) -> Option<DateKind> {
        match self {
            Self::Birth => Some(DateKind::Birth),
            Self::Death => Some(DateKind::Death),
            Self::Marriage => Some(DateKind::Marriage),
            Self::Divorce => Some(DateKind::Divorce),
            _ => None,
        }
    }

    /// Whether this tag is a level-0 header-like line that is skipped outright
    #[must_use]
    pub const fn is_ignored_record(self) -> bool {
        matches!(self, Self::Head | Self::Trailer | Self::Note)
    }
}

/// The four date kinds carried by individuals and families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DateKind {
    Birth,
    Death,
    Marriage,
    Divorce,
}

impl DateKind {
    /// Whether this kind of date belongs on an individual (as opposed to a family)
    #[must_use]
    pub const fn is_individual(self) -> bool {
        matches!(self, Self::Birth | Self::Death)
    }
}

impl fmt::Display for DateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Birth => "Birth",
            Self::Death => "Death",
            Self::Marriage => "Marriage",
            Self::Divorce => "Divorce",
        };
        f.write_str(name)
    }
}

/// The two kinds of record a GEDCOM file is assembled into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityKind {
    Individual,
    Family,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Individual => f.write_str("INDIVIDUAL"),
            Self::Family => f.write_str("FAMILY"),
        }
    }
}
