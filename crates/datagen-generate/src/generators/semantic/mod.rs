//! Person and contact values backed by the `fake` catalog.

use fake::Fake;
use fake::faker::address::en::{BuildingNumber, CityName, CountryName, StateName, StreetName, ZipCode};
use fake::faker::internet::en::{SafeEmail, Username};
use fake::faker::lorem::en::Word;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use rand::RngCore;

pub const GENDERS: &[&str] = &["Female", "Male", "Non-binary"];

const DEFAULT_PLACEHOLDER: &str = "sample";

pub fn first_name(rng: &mut dyn RngCore) -> String {
    FirstName().fake_with_rng(rng)
}

pub fn last_name(rng: &mut dyn RngCore) -> String {
    LastName().fake_with_rng(rng)
}

pub fn full_name(rng: &mut dyn RngCore) -> String {
    let first = first_name(rng);
    let last = last_name(rng);
    format!("{first} {last}")
}

pub fn email(rng: &mut dyn RngCore) -> String {
    SafeEmail().fake_with_rng(rng)
}

pub fn username(rng: &mut dyn RngCore) -> String {
    Username().fake_with_rng(rng)
}

pub fn phone(rng: &mut dyn RngCore) -> String {
    PhoneNumber().fake_with_rng(rng)
}

pub fn street_address(rng: &mut dyn RngCore) -> String {
    let number: String = BuildingNumber().fake_with_rng(rng);
    let street: String = StreetName().fake_with_rng(rng);
    format!("{number} {street}")
}

pub fn city(rng: &mut dyn RngCore) -> String {
    CityName().fake_with_rng(rng)
}

pub fn state(rng: &mut dyn RngCore) -> String {
    StateName().fake_with_rng(rng)
}

pub fn zip_code(rng: &mut dyn RngCore) -> String {
    ZipCode().fake_with_rng(rng)
}

pub fn country(rng: &mut dyn RngCore) -> String {
    CountryName().fake_with_rng(rng)
}

/// Single lowercase word used for fields no rule recognises.
pub fn placeholder_word(rng: &mut dyn RngCore) -> String {
    let word: String = Word().fake_with_rng(rng);
    let word = word.trim().to_lowercase();
    if word.is_empty() {
        DEFAULT_PLACEHOLDER.to_string()
    } else {
        word
    }
}
