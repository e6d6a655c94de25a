use std::fmt;

use serde::{Deserialize, Serialize};

/// Inclusive age bounds for an entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: u32,
    pub max: u32,
}

impl AgeRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, age: i64) -> bool {
        age >= i64::from(self.min) && age <= i64::from(self.max)
    }
}

/// Fixed set of record categories a batch can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    MinorStudent,
    PostSecondaryStudent,
    BankCustomer,
    Employee,
    Generic,
}

const MINOR_STUDENT_FIELDS: &[&str] = &["Name", "Age", "DOB", "Grade", "School Name"];
const POST_SECONDARY_FIELDS: &[&str] = &[
    "Name",
    "Age",
    "DOB",
    "College Name",
    "Major",
    "GPA",
    "Class Year",
];
const BANK_CUSTOMER_FIELDS: &[&str] = &[
    "Name",
    "Age",
    "DOB",
    "Email",
    "Bank Name",
    "Account Number",
    "Routing Number",
    "Balance",
];
const EMPLOYEE_FIELDS: &[&str] = &["Name", "Age", "DOB", "Email", "Job Title", "Company", "Salary"];
const GENERIC_FIELDS: &[&str] = &["Name"];

impl EntityType {
    pub const ALL: [EntityType; 5] = [
        EntityType::MinorStudent,
        EntityType::PostSecondaryStudent,
        EntityType::BankCustomer,
        EntityType::Employee,
        EntityType::Generic,
    ];

    /// Canonical entity key, as produced by [`crate::resolve_entity`].
    pub fn key(self) -> &'static str {
        match self {
            EntityType::MinorStudent => "student",
            EntityType::PostSecondaryStudent => "college student",
            EntityType::BankCustomer => "bank customer",
            EntityType::Employee => "employee",
            EntityType::Generic => "generic",
        }
    }

    /// Map a canonical entity key to its type. Unknown keys degrade to `Generic`.
    pub fn from_key(key: &str) -> Self {
        EntityType::ALL
            .into_iter()
            .find(|entity| entity.key() == key)
            .unwrap_or(EntityType::Generic)
    }

    pub fn age_range(self) -> AgeRange {
        match self {
            EntityType::MinorStudent => AgeRange::new(5, 18),
            EntityType::PostSecondaryStudent => AgeRange::new(18, 25),
            EntityType::BankCustomer => AgeRange::new(18, 80),
            EntityType::Employee => AgeRange::new(22, 65),
            EntityType::Generic => AgeRange::new(5, 80),
        }
    }

    /// Field labels used when a request names no fields. Returns an owned copy.
    pub fn default_fields(self) -> Vec<String> {
        let fields = match self {
            EntityType::MinorStudent => MINOR_STUDENT_FIELDS,
            EntityType::PostSecondaryStudent => POST_SECONDARY_FIELDS,
            EntityType::BankCustomer => BANK_CUSTOMER_FIELDS,
            EntityType::Employee => EMPLOYEE_FIELDS,
            EntityType::Generic => GENERIC_FIELDS,
        };
        fields.iter().map(|field| field.to_string()).collect()
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
