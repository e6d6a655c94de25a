//! Age and date-of-birth coherence.
//!
//! Every age written next to a date of birth must equal
//! [`derive_age`] of that date as of the engine's reference day.

use chrono::{Datelike, Days, NaiveDate};
use rand::{Rng, RngCore};

use datagen_core::AgeRange;

/// Sampling attempts before falling back to the deterministic DOB.
pub const MAX_DOB_ATTEMPTS: u32 = 20;
/// Ages above this are treated as malformed input.
pub const MAX_PLAUSIBLE_AGE: i64 = 150;

const DAYS_PER_YEAR: u64 = 365;

/// Where a date of birth came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DobSource {
    Sampled { attempts: u32 },
    Fallback,
    /// Read from an existing record field.
    Provided,
}

/// Coherent age/date-of-birth pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeDob {
    pub age: u32,
    pub dob: NaiveDate,
    pub source: DobSource,
}

impl AgeDob {
    pub fn used_fallback(&self) -> bool {
        self.source == DobSource::Fallback
    }
}

/// Whole years between `dob` and `today`; a birthday not yet reached this
/// year reduces the count by one.
pub fn derive_age(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

/// Date of birth such that `derive_age(result, today) == age`.
pub fn derive_dob_for_age(age: u32, today: NaiveDate, rng: &mut dyn RngCore) -> NaiveDate {
    sample_dob_for_age(age, today, MAX_DOB_ATTEMPTS, rng).0
}

/// Sample inside the one-year window `[today - (age+1)*365d, today - age*365d]`
/// up to `max_attempts` times, then fall back to a deterministic date.
pub fn sample_dob_for_age(
    age: u32,
    today: NaiveDate,
    max_attempts: u32,
    rng: &mut dyn RngCore,
) -> (NaiveDate, DobSource) {
    let target = age as i32;
    let window_end = days_before(today, u64::from(age) * DAYS_PER_YEAR);
    let window_start = days_before(today, (u64::from(age) + 1) * DAYS_PER_YEAR);
    let span = (window_end - window_start).num_days().max(0) as u64;

    for attempt in 1..=max_attempts {
        let offset = rng.random_range(0..=span);
        let candidate = window_start
            .checked_add_days(Days::new(offset))
            .unwrap_or(window_end);
        if derive_age(candidate, today) == target {
            return (candidate, DobSource::Sampled { attempts: attempt });
        }
    }

    (fallback_dob(target, window_end, today), DobSource::Fallback)
}

/// Pick an age uniformly from `range`, then a matching date of birth.
pub fn random_age_and_dob(
    range: AgeRange,
    today: NaiveDate,
    max_attempts: u32,
    rng: &mut dyn RngCore,
) -> AgeDob {
    let (min, max) = if range.min <= range.max {
        (range.min, range.max)
    } else {
        (range.max, range.min)
    };
    let age = rng.random_range(min..=max);
    let (dob, source) = sample_dob_for_age(age, today, max_attempts, rng);
    AgeDob { age, dob, source }
}

/// Parse a stored age, rejecting values no person can have.
pub fn plausible_age(value: i64) -> Option<u32> {
    if (0..=MAX_PLAUSIBLE_AGE).contains(&value) {
        u32::try_from(value).ok()
    } else {
        None
    }
}

/// Shift the window end back by the residual year difference. A Feb 29 that
/// does not exist in the target year becomes Mar 1.
fn fallback_dob(target: i32, window_end: NaiveDate, today: NaiveDate) -> NaiveDate {
    let residual = target - derive_age(window_end, today);
    let shifted = with_year_or_march_first(window_end, window_end.year() - residual);
    if derive_age(shifted, today) == target {
        return shifted;
    }

    // Birthday falling on today's month/day, in the year `target` years back.
    let year = today.year() - target;
    NaiveDate::from_ymd_opt(year, today.month(), today.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
        .unwrap_or(shifted)
}

fn with_year_or_march_first(date: NaiveDate, year: i32) -> NaiveDate {
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(date)
}

fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days))
        .unwrap_or(NaiveDate::MIN)
}

/// Same month/day `years` later; Feb 29 becomes Mar 1 in common years.
pub(crate) fn add_years(date: NaiveDate, years: i32) -> NaiveDate {
    with_year_or_march_first(date, date.year() + years)
}
