//! Values computed from the record's age or date of birth.

use chrono::{Days, NaiveDate};
use rand::{Rng, RngCore};

use crate::age::add_years;
use crate::generators::pick;
use crate::model::ClassYearRule;

pub const CLASS_YEARS: &[&str] = &["Freshman", "Sophomore", "Junior", "Senior", "Graduate"];

const SCHOOL_PREFIXES: &[&str] = &[
    "Lincoln",
    "Washington",
    "Maplewood",
    "Riverside",
    "Oak Hill",
    "Cedar Grove",
    "Lakeview",
    "Jefferson",
    "Sunnyvale",
    "Franklin",
    "Hillcrest",
    "Westfield",
];

/// Minimum working age used as the lower bound of a hire date.
const WORKING_AGE: i32 = 18;

/// School grade for an age, clamped to 1..=12.
pub fn grade_for_age(age: u32) -> i64 {
    (i64::from(age) - 4).clamp(1, 12)
}

/// School tier for an age bracket.
pub fn school_tier(age: u32) -> &'static str {
    match age {
        0..=10 => "Elementary School",
        11..=14 => "Middle School",
        _ => "High School",
    }
}

pub fn school_name(age: u32, rng: &mut dyn RngCore) -> String {
    let prefix = pick(SCHOOL_PREFIXES, rng);
    format!("{prefix} {}", school_tier(age))
}

pub fn class_year(rule: ClassYearRule, age: u32, rng: &mut dyn RngCore) -> &'static str {
    match rule {
        ClassYearRule::Random => CLASS_YEARS[rng.random_range(0..CLASS_YEARS.len())],
        ClassYearRule::FromAge => {
            let index = age.saturating_sub(18).min(4) as usize;
            CLASS_YEARS[index]
        }
    }
}

/// Hire date between the 18th birthday and `today`, inclusive.
pub fn hire_date(dob: NaiveDate, today: NaiveDate, rng: &mut dyn RngCore) -> NaiveDate {
    let earliest = add_years(dob, WORKING_AGE).min(today);
    let span = (today - earliest).num_days().max(0) as u64;
    let offset = rng.random_range(0..=span);
    earliest.checked_add_days(Days::new(offset)).unwrap_or(today)
}
