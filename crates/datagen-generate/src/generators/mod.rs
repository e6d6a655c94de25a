use chrono::NaiveDate;
use rand::{Rng, RngCore};

use datagen_core::{EntityType, FieldValue, resolve_field};

use crate::model::ClassYearRule;

pub mod derive;
pub mod domain;
pub mod semantic;

/// Recognised attribute kinds. Anything else is a [`Attribute::Placeholder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Name,
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    City,
    State,
    ZipCode,
    Country,
    Gender,
    Username,
    Id,
    Age,
    Dob,
    Grade,
    SchoolName,
    StudentId,
    Gpa,
    CollegeName,
    Major,
    ClassYear,
    Balance,
    AccountNumber,
    RoutingNumber,
    BankName,
    AccountType,
    JobTitle,
    Company,
    Department,
    Salary,
    EmployeeId,
    HireDate,
    Placeholder,
}

const KEYED: &[(Attribute, &str)] = &[
    (Attribute::Name, "name"),
    (Attribute::FirstName, "first name"),
    (Attribute::LastName, "last name"),
    (Attribute::Email, "email"),
    (Attribute::Phone, "phone"),
    (Attribute::Address, "address"),
    (Attribute::City, "city"),
    (Attribute::State, "state"),
    (Attribute::ZipCode, "zip code"),
    (Attribute::Country, "country"),
    (Attribute::Gender, "gender"),
    (Attribute::Username, "username"),
    (Attribute::Id, "id"),
    (Attribute::Age, "age"),
    (Attribute::Dob, "dob"),
    (Attribute::Grade, "grade"),
    (Attribute::SchoolName, "school name"),
    (Attribute::StudentId, "student id"),
    (Attribute::Gpa, "gpa"),
    (Attribute::CollegeName, "college name"),
    (Attribute::Major, "major"),
    (Attribute::ClassYear, "class year"),
    (Attribute::Balance, "balance"),
    (Attribute::AccountNumber, "account number"),
    (Attribute::RoutingNumber, "routing number"),
    (Attribute::BankName, "bank name"),
    (Attribute::AccountType, "account type"),
    (Attribute::JobTitle, "job title"),
    (Attribute::Company, "company"),
    (Attribute::Department, "department"),
    (Attribute::Salary, "salary"),
    (Attribute::EmployeeId, "employee id"),
    (Attribute::HireDate, "hire date"),
];

impl Attribute {
    /// Attribute for a canonical key; unknown keys map to `Placeholder`.
    pub fn from_key(key: &str) -> Self {
        KEYED
            .iter()
            .find(|(_, candidate)| *candidate == key)
            .map(|(attribute, _)| *attribute)
            .unwrap_or(Attribute::Placeholder)
    }

    pub fn key(self) -> &'static str {
        KEYED
            .iter()
            .find(|(attribute, _)| *attribute == self)
            .map(|(_, key)| *key)
            .unwrap_or("placeholder")
    }

    /// Resolve a free-text label for an entity type. Attributes that do not
    /// belong to the entity degrade to `Placeholder`.
    pub fn resolve(label: &str, entity: EntityType) -> Self {
        let attribute = Attribute::from_key(&resolve_field(label));
        if attribute.applies_to(entity) {
            attribute
        } else {
            Attribute::Placeholder
        }
    }

    pub fn applies_to(self, entity: EntityType) -> bool {
        use Attribute::*;
        match self {
            Age | Dob | Placeholder => true,
            Name | FirstName | LastName | Email | Phone | Address | City | State | ZipCode
            | Country | Gender | Username | Id => entity != EntityType::Generic,
            Grade | SchoolName => entity == EntityType::MinorStudent,
            StudentId | Gpa => matches!(
                entity,
                EntityType::MinorStudent | EntityType::PostSecondaryStudent
            ),
            CollegeName | Major | ClassYear => entity == EntityType::PostSecondaryStudent,
            Balance | AccountNumber | RoutingNumber | BankName | AccountType => {
                entity == EntityType::BankCustomer
            }
            JobTitle | Company | Department | Salary | EmployeeId | HireDate => {
                entity == EntityType::Employee
            }
        }
    }

    /// Attributes whose value is computed from the record's age or DOB.
    pub fn derives_from_age(self, class_year: ClassYearRule) -> bool {
        match self {
            Attribute::Grade | Attribute::SchoolName | Attribute::HireDate => true,
            Attribute::ClassYear => class_year == ClassYearRule::FromAge,
            _ => false,
        }
    }
}

/// Per-record context shared by every attribute rule.
#[derive(Debug, Clone, Copy)]
pub struct AttributeContext {
    pub entity: EntityType,
    pub age: u32,
    pub dob: NaiveDate,
    pub today: NaiveDate,
    pub class_year: ClassYearRule,
}

/// Produce one value for `attribute`.
pub fn synthesize(
    attribute: Attribute,
    ctx: &AttributeContext,
    rng: &mut dyn RngCore,
) -> FieldValue {
    use domain::{education, finance, workforce};

    match attribute {
        Attribute::Name => FieldValue::Text(semantic::full_name(rng)),
        Attribute::FirstName => FieldValue::Text(semantic::first_name(rng)),
        Attribute::LastName => FieldValue::Text(semantic::last_name(rng)),
        Attribute::Email => FieldValue::Text(semantic::email(rng)),
        Attribute::Phone => FieldValue::Text(semantic::phone(rng)),
        Attribute::Address => FieldValue::Text(semantic::street_address(rng)),
        Attribute::City => FieldValue::Text(semantic::city(rng)),
        Attribute::State => FieldValue::Text(semantic::state(rng)),
        Attribute::ZipCode => FieldValue::Text(semantic::zip_code(rng)),
        Attribute::Country => FieldValue::Text(semantic::country(rng)),
        Attribute::Gender => FieldValue::Text(pick(semantic::GENDERS, rng)),
        Attribute::Username => FieldValue::Text(semantic::username(rng)),
        Attribute::Id => FieldValue::Int(rng.random_range(1..=99_999)),
        Attribute::Age => FieldValue::Int(i64::from(ctx.age)),
        Attribute::Dob => FieldValue::Date(ctx.dob),
        Attribute::Grade => FieldValue::Int(derive::grade_for_age(ctx.age)),
        Attribute::SchoolName => FieldValue::Text(derive::school_name(ctx.age, rng)),
        Attribute::StudentId => FieldValue::Text(education::student_id(rng)),
        Attribute::Gpa => FieldValue::Float(education::gpa(rng)),
        Attribute::CollegeName => FieldValue::Text(pick(education::COLLEGES, rng)),
        Attribute::Major => FieldValue::Text(pick(education::MAJORS, rng)),
        Attribute::ClassYear => {
            FieldValue::Text(derive::class_year(ctx.class_year, ctx.age, rng).to_string())
        }
        Attribute::Balance => FieldValue::Float(finance::balance(rng)),
        Attribute::AccountNumber => FieldValue::Text(finance::account_number(rng)),
        Attribute::RoutingNumber => FieldValue::Text(finance::routing_number(rng)),
        Attribute::BankName => FieldValue::Text(pick(finance::BANKS, rng)),
        Attribute::AccountType => FieldValue::Text(pick(finance::ACCOUNT_TYPES, rng)),
        Attribute::JobTitle => FieldValue::Text(workforce::job_title(rng)),
        Attribute::Company => FieldValue::Text(workforce::company(rng)),
        Attribute::Department => FieldValue::Text(pick(workforce::DEPARTMENTS, rng)),
        Attribute::Salary => FieldValue::Float(workforce::salary(rng)),
        Attribute::EmployeeId => FieldValue::Text(workforce::employee_id(rng)),
        Attribute::HireDate => FieldValue::Date(derive::hire_date(ctx.dob, ctx.today, rng)),
        Attribute::Placeholder => FieldValue::Text(semantic::placeholder_word(rng)),
    }
}

pub(crate) fn pick(values: &[&str], rng: &mut dyn RngCore) -> String {
    if values.is_empty() {
        return String::new();
    }
    let idx = rng.random_range(0..values.len());
    values[idx].to_string()
}

/// Uniform value in `[min, max]` rounded to two decimals.
pub(crate) fn money(min: f64, max: f64, rng: &mut dyn RngCore) -> f64 {
    let value = rng.random_range(min..=max);
    (value * 100.0).round() / 100.0
}
