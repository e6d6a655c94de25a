//! Alias resolution for free-text field and entity labels.
//!
//! Resolution is case-insensitive and side-effect free. Field labels that
//! match no alias resolve to their normalised form; entity labels that match
//! no alias resolve to [`crate::UNKNOWN_ENTITY`].

use crate::UNKNOWN_ENTITY;

const FIELD_ALIASES: &[(&str, &str)] = &[
    ("name", "name"),
    ("full name", "name"),
    ("fullname", "name"),
    ("student name", "name"),
    ("customer name", "name"),
    ("employee name", "name"),
    ("first name", "first name"),
    ("firstname", "first name"),
    ("given name", "first name"),
    ("last name", "last name"),
    ("lastname", "last name"),
    ("surname", "last name"),
    ("family name", "last name"),
    ("email", "email"),
    ("e mail", "email"),
    ("email address", "email"),
    ("mail", "email"),
    ("phone", "phone"),
    ("phone number", "phone"),
    ("mobile", "phone"),
    ("mobile number", "phone"),
    ("contact", "phone"),
    ("contact number", "phone"),
    ("address", "address"),
    ("street address", "address"),
    ("home address", "address"),
    ("city", "city"),
    ("town", "city"),
    ("state", "state"),
    ("province", "state"),
    ("zip", "zip code"),
    ("zipcode", "zip code"),
    ("zip code", "zip code"),
    ("postal code", "zip code"),
    ("postcode", "zip code"),
    ("country", "country"),
    ("gender", "gender"),
    ("sex", "gender"),
    ("username", "username"),
    ("user name", "username"),
    ("login", "username"),
    ("id", "id"),
    ("age", "age"),
    ("years old", "age"),
    ("dob", "dob"),
    ("d o b", "dob"),
    ("date of birth", "dob"),
    ("birth date", "dob"),
    ("birthdate", "dob"),
    ("birthday", "dob"),
    ("born", "dob"),
    ("grade", "grade"),
    ("grade level", "grade"),
    ("class", "grade"),
    ("standard", "grade"),
    ("school", "school name"),
    ("school name", "school name"),
    ("student id", "student id"),
    ("roll number", "student id"),
    ("roll no", "student id"),
    ("enrollment number", "student id"),
    ("gpa", "gpa"),
    ("cgpa", "gpa"),
    ("grade point average", "gpa"),
    ("college", "college name"),
    ("college name", "college name"),
    ("university", "college name"),
    ("university name", "college name"),
    ("institution", "college name"),
    ("major", "major"),
    ("course", "major"),
    ("field of study", "major"),
    ("year", "class year"),
    ("class year", "class year"),
    ("academic year", "class year"),
    ("year of study", "class year"),
    ("balance", "balance"),
    ("account balance", "balance"),
    ("account number", "account number"),
    ("account no", "account number"),
    ("acct number", "account number"),
    ("routing number", "routing number"),
    ("routing", "routing number"),
    ("routing no", "routing number"),
    ("aba", "routing number"),
    ("bank", "bank name"),
    ("bank name", "bank name"),
    ("account type", "account type"),
    ("job", "job title"),
    ("job title", "job title"),
    ("title", "job title"),
    ("designation", "job title"),
    ("position", "job title"),
    ("role", "job title"),
    ("company", "company"),
    ("company name", "company"),
    ("employer", "company"),
    ("organization", "company"),
    ("department", "department"),
    ("dept", "department"),
    ("salary", "salary"),
    ("annual salary", "salary"),
    ("income", "salary"),
    ("employee id", "employee id"),
    ("emp id", "employee id"),
    ("staff id", "employee id"),
    ("hire date", "hire date"),
    ("joining date", "hire date"),
    ("date of joining", "hire date"),
    ("start date", "hire date"),
];

const ENTITY_ALIASES: &[(&str, &str)] = &[
    ("student", "student"),
    ("school student", "student"),
    ("pupil", "student"),
    ("kid", "student"),
    ("child", "student"),
    ("children", "student"),
    ("college student", "college student"),
    ("university student", "college student"),
    ("undergrad", "college student"),
    ("undergraduate", "college student"),
    ("grad student", "college student"),
    ("graduate student", "college student"),
    ("bank customer", "bank customer"),
    ("customer", "bank customer"),
    ("bank account", "bank customer"),
    ("account holder", "bank customer"),
    ("client", "bank customer"),
    ("employee", "employee"),
    ("worker", "employee"),
    ("staff", "employee"),
    ("staff member", "employee"),
    ("personnel", "employee"),
    ("generic", "generic"),
    ("record", "generic"),
];

/// Lowercase, trim, treat `_`/`-` as spaces and collapse whitespace runs.
fn normalize(raw: &str) -> String {
    raw.to_lowercase()
        .replace(['_', '-', '.'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, canonical)| *canonical)
}

/// Resolve a free-text field label to its canonical key.
pub fn resolve_field(raw: &str) -> String {
    let normalized = normalize(raw);
    lookup(FIELD_ALIASES, &normalized)
        .map(str::to_string)
        .unwrap_or(normalized)
}

/// Resolve a free-text entity label (singular or plural) to its canonical key.
pub fn resolve_entity(raw: &str) -> String {
    let normalized = normalize(raw);
    if let Some(canonical) = lookup(ENTITY_ALIASES, &normalized) {
        return canonical.to_string();
    }
    singular_forms(&normalized)
        .into_iter()
        .find_map(|candidate| lookup(ENTITY_ALIASES, &candidate))
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_ENTITY.to_string())
}

/// Candidate singular forms of the last word of `label`.
fn singular_forms(label: &str) -> Vec<String> {
    let (head, last) = match label.rsplit_once(' ') {
        Some((head, last)) => (format!("{head} "), last),
        None => (String::new(), label),
    };
    let mut forms = Vec::new();
    if let Some(stem) = last.strip_suffix("ies") {
        forms.push(format!("{head}{stem}y"));
    }
    if let Some(stem) = last.strip_suffix("es") {
        forms.push(format!("{head}{stem}"));
    }
    if let Some(stem) = last.strip_suffix('s') {
        forms.push(format!("{head}{stem}"));
    }
    forms
}

/// Title-case each whitespace-separated word. Cosmetic only.
pub fn title_case(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
