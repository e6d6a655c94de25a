use chrono::NaiveDate;

use datagen_core::{EntityType, FieldValue, Record};
use datagen_generate::age::derive_age;
use datagen_generate::{GenerateOptions, GenerationRequest, RecordEngine, Session};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
}

fn engine(seed: u64) -> RecordEngine {
    let mut options = GenerateOptions::default();
    options.seed = Some(seed);
    options.today = Some(today());
    options.max_records = 5_000;
    RecordEngine::new(options)
}

fn request(count: u32, entity: &str, fields: &[&str]) -> GenerationRequest {
    GenerationRequest::new(
        count,
        entity,
        fields.iter().map(|field| field.to_string()).collect(),
    )
}

fn age_of(record: &Record, label: &str) -> i64 {
    record
        .get(label)
        .and_then(FieldValue::as_i64)
        .unwrap_or_else(|| panic!("missing numeric {label}"))
}

fn dob_of(record: &Record, label: &str) -> NaiveDate {
    record
        .get(label)
        .and_then(|value| value.to_date(label).ok())
        .unwrap_or_else(|| panic!("missing date {label}"))
}

#[test]
fn age_and_dob_agree_for_every_entity_type() {
    let entities = [
        ("students", EntityType::MinorStudent),
        ("college students", EntityType::PostSecondaryStudent),
        ("bank customers", EntityType::BankCustomer),
        ("employees", EntityType::Employee),
        ("widgets", EntityType::Generic),
    ];
    let mut engine = engine(2024);
    let mut session = Session::new();

    for (raw, entity) in entities {
        let report = engine
            .generate(&mut session, &request(1200, raw, &["Age", "DOB"]))
            .expect("generate batch");
        assert_eq!(report.records, 1200);
        let batch = session.batch().expect("batch stored");
        assert_eq!(batch.entity, entity);

        let range = entity.age_range();
        for record in &batch.records {
            let age = age_of(record, "Age");
            let dob = dob_of(record, "DOB");
            assert_eq!(i64::from(derive_age(dob, today())), age, "{raw}");
            assert!(range.contains(age), "{raw}: age {age} outside range");
        }
    }
}

#[test]
fn minor_student_grade_tracks_age() {
    let mut engine = engine(7);
    let mut session = Session::new();
    engine
        .generate(&mut session, &request(3, "student", &["Name", "Age", "DOB", "Grade"]))
        .expect("generate students");

    let batch = session.batch().expect("batch stored");
    assert_eq!(batch.len(), 3);
    for record in &batch.records {
        let age = age_of(record, "Age");
        let grade = age_of(record, "Grade");
        assert!((1..=12).contains(&grade));
        assert_eq!(grade, (age - 4).clamp(1, 12));
        assert_eq!(i64::from(derive_age(dob_of(record, "DOB"), today())), age);
        assert!(matches!(record.get("Name"), Some(FieldValue::Text(name)) if !name.is_empty()));
    }
}

#[test]
fn school_aliases_share_the_tiered_rule() {
    let mut engine = engine(99);
    let mut session = Session::new();
    engine
        .generate(&mut session, &request(50, "students", &["Age", "School", "School Name"]))
        .expect("generate students");

    let batch = session.batch().expect("batch stored");
    for record in &batch.records {
        let age = age_of(record, "Age") as u32;
        let tier = datagen_generate::generators::derive::school_tier(age);
        for label in ["School", "School Name"] {
            let name = record
                .get(label)
                .and_then(FieldValue::as_str)
                .expect("school name");
            assert!(name.ends_with(tier), "{name} should end with {tier}");
        }
    }
}

#[test]
fn labels_keep_requested_casing_and_order() {
    let mut engine = engine(3);
    let mut session = Session::new();
    let report = engine
        .generate(
            &mut session,
            &request(2, "Bank Customers", &["bank NAME", "Routing Number", "balance", "dob"]),
        )
        .expect("generate customers");

    assert!(report.placeholder_fields.is_empty());
    let record = &session.batch().expect("batch stored").records[0];
    assert_eq!(
        record.labels().collect::<Vec<_>>(),
        vec!["bank NAME", "Routing Number", "balance", "dob"]
    );
    let routing = record
        .get("Routing Number")
        .and_then(FieldValue::as_str)
        .expect("routing number");
    assert_eq!(routing.len(), 9);
    assert!(routing.chars().all(|ch| ch.is_ascii_digit()));
    let balance = record
        .get("balance")
        .and_then(FieldValue::as_f64)
        .expect("balance");
    assert!((1_000.0..=100_000.0).contains(&balance));
    assert_eq!((balance * 100.0).round() / 100.0, balance);
}

#[test]
fn gpa_stays_in_range() {
    let mut engine = engine(17);
    let mut session = Session::new();
    engine
        .generate(&mut session, &request(300, "college students", &["GPA", "Class Year"]))
        .expect("generate college students");

    for record in &session.batch().expect("batch stored").records {
        let gpa = record.get("GPA").and_then(FieldValue::as_f64).expect("gpa");
        assert!((2.0..=4.0).contains(&gpa));
        let year = record
            .get("Class Year")
            .and_then(FieldValue::as_str)
            .expect("class year");
        assert!(datagen_generate::generators::derive::CLASS_YEARS.contains(&year));
    }
}

#[test]
fn unknown_entity_uses_name_and_placeholders() {
    let mut engine = engine(5);
    let mut session = Session::new();
    let report = engine
        .generate(&mut session, &request(4, "spaceships", &[]))
        .expect("generate unknown");

    assert_eq!(report.entity, "generic");
    assert_eq!(report.fields, vec!["Name".to_string()]);
    assert!(report.placeholder_fields.contains("Name"));
    for record in &session.batch().expect("batch stored").records {
        let word = record.get("Name").and_then(FieldValue::as_str).expect("word");
        assert!(!word.is_empty());
        assert!(!word.contains(' '));
    }
}

#[test]
fn empty_field_list_uses_entity_defaults() {
    let mut engine = engine(8);
    let mut session = Session::new();
    let report = engine
        .generate(&mut session, &request(2, "employees", &[]))
        .expect("generate employees");
    assert_eq!(report.fields, EntityType::Employee.default_fields());
}

#[test]
fn unrecognised_fields_are_reported_as_placeholders() {
    let mut engine = engine(12);
    let mut session = Session::new();
    let report = engine
        .generate(&mut session, &request(2, "employees", &["Name", "Favourite Colour", "GPA"]))
        .expect("generate employees");
    assert!(report.placeholder_fields.contains("Favourite Colour"));
    assert!(report.placeholder_fields.contains("GPA"));
    assert!(!report.placeholder_fields.contains("Name"));
}

#[test]
fn same_seed_generates_same_batch() {
    let fields = ["Name", "Email", "Age", "DOB", "Salary"];
    let mut first = Session::new();
    let mut second = Session::new();
    engine(42)
        .generate(&mut first, &request(10, "employees", &fields))
        .expect("first run");
    engine(42)
        .generate(&mut second, &request(10, "employees", &fields))
        .expect("second run");

    assert_eq!(
        first.batch().expect("first batch").records,
        second.batch().expect("second batch").records
    );
}

#[test]
fn zero_count_is_rejected_without_touching_session() {
    let mut engine = engine(1);
    let mut session = Session::new();
    let result = engine.generate(&mut session, &request(0, "students", &[]));
    assert!(result.is_err());
    assert!(session.is_empty());
}

#[test]
fn new_generation_replaces_previous_batch() {
    let mut engine = engine(1);
    let mut session = Session::new();
    engine
        .generate(&mut session, &request(2, "students", &[]))
        .expect("first batch");
    engine
        .generate(&mut session, &request(5, "employees", &[]))
        .expect("second batch");
    let batch = session.batch().expect("batch stored");
    assert_eq!(batch.entity, EntityType::Employee);
    assert_eq!(batch.len(), 5);
}
