use rand::{Rng, RngCore};

use crate::generators::money;

pub const BANKS: &[&str] = &[
    "First National Bank",
    "Summit Savings Bank",
    "Riverside Credit Union",
    "Harbor Trust",
    "Pioneer Federal Bank",
    "Evergreen Bank",
    "Capital City Bank",
    "Union Commerce Bank",
];

pub const ACCOUNT_TYPES: &[&str] = &["Checking", "Savings", "Money Market", "Certificate of Deposit"];

/// Balance uniform in [1000, 100000], two decimals.
pub fn balance(rng: &mut dyn RngCore) -> f64 {
    money(1_000.0, 100_000.0, rng)
}

/// Nine digits, zero padded.
pub fn routing_number(rng: &mut dyn RngCore) -> String {
    format!("{:09}", rng.random_range(0..=999_999_999_u32))
}

/// Ten digits, zero padded.
pub fn account_number(rng: &mut dyn RngCore) -> String {
    format!("{:010}", rng.random_range(0..=9_999_999_999_u64))
}
