use rand::{Rng, RngCore};

use crate::generators::money;

pub const COLLEGES: &[&str] = &[
    "Northbridge University",
    "Westlake College",
    "Harborview State University",
    "Summit Institute of Technology",
    "Pinecrest University",
    "Eastfield Community College",
    "Redwood Valley University",
    "Granite Peak College",
];

pub const MAJORS: &[&str] = &[
    "Computer Science",
    "Biology",
    "Economics",
    "Psychology",
    "Mechanical Engineering",
    "History",
    "Mathematics",
    "Nursing",
    "Business Administration",
    "English Literature",
];

/// GPA uniform in [2.0, 4.0], two decimals.
pub fn gpa(rng: &mut dyn RngCore) -> f64 {
    money(2.0, 4.0, rng)
}

pub fn student_id(rng: &mut dyn RngCore) -> String {
    format!("S{:07}", rng.random_range(0..=9_999_999))
}
