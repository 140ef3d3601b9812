//! Fixed constants of the rule catalogue

/// Maximum age, in years, before an individual is considered implausible
pub const MAX_AGE_YEARS: i32 = 150;

/// Minimum age, in years, of either spouse on the marriage date
pub const MIN_MARRIAGE_AGE: i32 = 14;

/// Months after a divorce or a father's death within which a birth is still plausible
pub const GESTATION_MONTHS: u32 = 9;

/// Maximum age gap between a mother and her child
pub const MAX_MOTHER_AGE_GAP: i32 = 60;

/// Maximum age gap between a father and his child
pub const MAX_FATHER_AGE_GAP: i32 = 80;

/// Sibling births closer than this many days count as the same delivery
pub const TWIN_WINDOW_DAYS: i64 = 2;

/// Non-twin sibling births must be at least this many months apart
pub const SIBLING_SPACING_MONTHS: u32 = 8;

/// Families with this many children or more are flagged
pub const MAX_SIBLINGS: usize = 15;

/// More children than this sharing one birth date are flagged
pub const MAX_MULTIPLE_BIRTHS: usize = 5;

/// Upper bound (exclusive) of an orphan's age
pub const ORPHAN_AGE_LIMIT: i32 = 18;

/// Age above which a living unmarried individual is listed as single
pub const SINGLE_AGE_THRESHOLD: i32 = 30;

/// Trailing window for recent births and deaths
pub const RECENT_DAYS: u64 = 30;

/// Leading window for birthdays and anniversaries
pub const UPCOMING_DAYS: i64 = 30;
