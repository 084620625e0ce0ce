//! Common validation utilities.

use chrono::{Datelike, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

/// Oldest plausible participant in years.
const MAX_AGE_YEARS: i32 = 120;

/// Minimum full name length in characters.
pub const MIN_FULL_NAME_LEN: usize = 2;

/// Maximum full name length in characters.
pub const MAX_FULL_NAME_LEN: usize = 120;

lazy_static! {
    // Letters (including accented ones), spaces, apostrophes and hyphens.
    static ref FULL_NAME_RE: Regex = Regex::new(r"^[\p{L}][\p{L} '\-.]*$").unwrap();
}

/// Validates a participant's full name: length bounds and letter-like
/// characters only.
pub fn validate_full_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    let char_count = trimmed.chars().count();

    if char_count < MIN_FULL_NAME_LEN {
        let mut err = ValidationError::new("full_name_too_short");
        err.message = Some("Full name must have at least 2 characters".into());
        return Err(err);
    }

    if char_count > MAX_FULL_NAME_LEN {
        let mut err = ValidationError::new("full_name_too_long");
        err.message = Some("Full name must have at most 120 characters".into());
        return Err(err);
    }

    if !FULL_NAME_RE.is_match(trimmed) {
        let mut err = ValidationError::new("full_name_charset");
        err.message = Some("Full name contains invalid characters".into());
        return Err(err);
    }

    Ok(())
}

/// Validates a birth date: not in the future and not implausibly old.
pub fn validate_birth_date(birth_date: NaiveDate) -> Result<(), ValidationError> {
    let today = Utc::now().date_naive();

    if birth_date > today {
        let mut err = ValidationError::new("birth_date_future");
        err.message = Some("Birth date cannot be in the future".into());
        return Err(err);
    }

    if age_on(birth_date, today) > MAX_AGE_YEARS {
        let mut err = ValidationError::new("birth_date_implausible");
        err.message = Some("Birth date is too far in the past".into());
        return Err(err);
    }

    Ok(())
}

/// Calendar-aware age in whole years on the given reference date.
///
/// Counts a year only once the birthday has passed, matching how the
/// registration form computed it.
pub fn age_on(birth_date: NaiveDate, on: NaiveDate) -> i32 {
    let mut age = on.year() - birth_date.year();
    if (on.month(), on.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

/// Current calendar age for a birth date.
pub fn current_age(birth_date: NaiveDate) -> i32 {
    age_on(birth_date, Utc::now().date_naive())
}
