use fake::Fake;
use fake::faker::company::en::CompanyName;
use fake::faker::job::en::Title;
use rand::{Rng, RngCore};

use crate::generators::money;

pub const DEPARTMENTS: &[&str] = &[
    "Engineering",
    "Finance",
    "Human Resources",
    "Marketing",
    "Sales",
    "Operations",
    "Legal",
    "Customer Support",
];

pub fn job_title(rng: &mut dyn RngCore) -> String {
    Title().fake_with_rng(rng)
}

pub fn company(rng: &mut dyn RngCore) -> String {
    CompanyName().fake_with_rng(rng)
}

/// Salary uniform in [30000, 200000], two decimals.
pub fn salary(rng: &mut dyn RngCore) -> f64 {
    money(30_000.0, 200_000.0, rng)
}

pub fn employee_id(rng: &mut dyn RngCore) -> String {
    format!("EMP-{:05}", rng.random_range(0..=99_999))
}
