use chrono::NaiveDate;
use rand::RngCore;
use tracing::debug;

use datagen_core::{FieldValue, Record, resolve_field, title_case};

use crate::age::{AgeDob, plausible_age};
use crate::entity::{EntityGenerator, FieldPlan};
use crate::generators::{Attribute, synthesize};
use crate::model::{GenerationReport, SiblingBackfill, UpdateRequest};

const AGE_KEY: &str = "age";
const DOB_KEY: &str = "dob";

/// Applies add/remove-field deltas to a batch while keeping age and DOB coherent.
#[derive(Debug, Clone, Copy)]
pub struct BatchUpdater {
    generator: EntityGenerator,
    backfill: SiblingBackfill,
}

impl BatchUpdater {
    pub fn new(generator: EntityGenerator, backfill: SiblingBackfill) -> Self {
        Self {
            generator,
            backfill,
        }
    }

    /// Apply the same delta to every record.
    pub fn apply(
        &self,
        records: &mut [Record],
        request: &UpdateRequest,
        rng: &mut dyn RngCore,
        report: &mut GenerationReport,
    ) {
        let additions = self.plan_additions(&request.add);
        for plan in &additions {
            if plan.attribute == Attribute::Placeholder {
                report.record_placeholder(&plan.label);
            }
        }

        for record in records.iter_mut() {
            for label in &request.remove {
                if let Some(removed) = remove_field(record, label) {
                    report.record_removed(&removed);
                }
            }
            self.add_fields(record, &additions, rng, report);
        }
    }

    /// Title-case raw labels and resolve them; duplicates keep the first occurrence.
    fn plan_additions(&self, raw: &[String]) -> Vec<FieldPlan> {
        let mut plans: Vec<FieldPlan> = Vec::new();
        for label in raw {
            let label = title_case(label);
            if label.is_empty()
                || plans
                    .iter()
                    .any(|plan| plan.label.eq_ignore_ascii_case(&label))
            {
                continue;
            }
            let attribute = Attribute::resolve(&label, self.generator.entity());
            plans.push(FieldPlan { label, attribute });
        }
        plans
    }

    fn add_fields(
        &self,
        record: &mut Record,
        additions: &[FieldPlan],
        rng: &mut dyn RngCore,
        report: &mut GenerationReport,
    ) {
        if additions.is_empty() {
            return;
        }

        let existing_age = existing_age(record);
        let existing_dob = existing_dob(record, self.generator.today());
        let prior_age = existing_dob
            .map(|dob| self.generator.anchor_on_dob(dob).age)
            .or(existing_age);

        let age_plan = additions
            .iter()
            .find(|plan| plan.attribute == Attribute::Age);
        let dob_plan = additions
            .iter()
            .find(|plan| plan.attribute == Attribute::Dob);

        let anchor = match (age_plan, dob_plan) {
            (Some(age_plan), Some(dob_plan)) => {
                let pair = match (existing_dob, existing_age) {
                    (Some(dob), _) => self.generator.anchor_on_dob(dob),
                    (None, Some(age)) => self.generator.anchor_on_age(age, rng),
                    (None, None) => self.generator.draw_age_dob(rng),
                };
                write_field(record, age_plan, FieldValue::Int(i64::from(pair.age)));
                write_field(record, dob_plan, FieldValue::Date(pair.dob));
                Some((pair, true))
            }
            (Some(age_plan), None) => {
                let pair = match (existing_dob, existing_age) {
                    (Some(dob), _) => self.generator.anchor_on_dob(dob),
                    (None, Some(age)) => self.generator.anchor_on_age(age, rng),
                    (None, None) => self.generator.draw_age_dob(rng),
                };
                write_field(record, age_plan, FieldValue::Int(i64::from(pair.age)));
                let dob_written = existing_dob.is_none()
                    && self.backfill_sibling(record, DOB_KEY, FieldValue::Date(pair.dob));
                Some((pair, dob_written))
            }
            (None, Some(dob_plan)) => {
                let pair = match (existing_age, existing_dob) {
                    (Some(age), _) => self.generator.anchor_on_age(age, rng),
                    (None, Some(dob)) => self.generator.anchor_on_dob(dob),
                    (None, None) => self.generator.draw_age_dob(rng),
                };
                write_field(record, dob_plan, FieldValue::Date(pair.dob));
                if existing_age.is_none() {
                    self.backfill_sibling(record, AGE_KEY, FieldValue::Int(i64::from(pair.age)));
                }
                Some((pair, true))
            }
            (None, None) => None,
        };

        if let Some((pair, dob_written)) = anchor {
            if pair.used_fallback() {
                report.record_fallback();
            }
            let age_changed = prior_age != Some(pair.age);
            let dob_changed = dob_written && existing_dob != Some(pair.dob);
            if age_changed || dob_changed {
                self.rederive_dependents(record, additions, pair, age_changed, rng);
            }
        }
        let anchor = anchor.map(|(pair, _)| pair);

        let generic: Vec<&FieldPlan> = additions
            .iter()
            .filter(|plan| !matches!(plan.attribute, Attribute::Age | Attribute::Dob))
            .collect();
        if generic.is_empty() {
            return;
        }

        let pair = match anchor {
            Some(pair) => pair,
            None => match (existing_dob, existing_age) {
                (Some(dob), _) => self.generator.anchor_on_dob(dob),
                (None, Some(age)) => self.generator.anchor_on_age(age, rng),
                (None, None) => self.generator.draw_age_dob(rng),
            },
        };
        if anchor.is_none() && pair.used_fallback() {
            report.record_fallback();
        }
        for plan in generic {
            let single = self
                .generator
                .generate_with(std::slice::from_ref(plan), pair, rng);
            if let Some(value) = single.get(&plan.label) {
                write_field(record, plan, value.clone());
            }
        }
    }

    /// Overwrite an existing sibling slot whose value could not be used.
    /// Returns whether a value was written.
    fn backfill_sibling(&self, record: &mut Record, key: &str, value: FieldValue) -> bool {
        if self.backfill != SiblingBackfill::ExistingSlot {
            return false;
        }
        let Some(label) = record.find_by_key(key).map(|(label, _)| label.to_string()) else {
            return false;
        };
        debug!(field = %label, "back-filling unusable sibling field");
        record.insert(label, value);
        true
    }

    /// Recompute fields already on the record that derive from the anchor.
    /// Only the hire date depends on the DOB alone; the rest follow the age.
    fn rederive_dependents(
        &self,
        record: &mut Record,
        additions: &[FieldPlan],
        pair: AgeDob,
        age_changed: bool,
        rng: &mut dyn RngCore,
    ) {
        let entity = self.generator.entity();
        let class_year = self.generator.class_year();
        let dependents: Vec<(String, Attribute)> = record
            .labels()
            .filter(|label| {
                !additions
                    .iter()
                    .any(|plan| plan.label.eq_ignore_ascii_case(label))
            })
            .map(|label| (label.to_string(), Attribute::resolve(label, entity)))
            .filter(|(_, attribute)| {
                attribute.derives_from_age(class_year)
                    && (age_changed || *attribute == Attribute::HireDate)
            })
            .collect();

        let ctx = self.generator.context(pair);
        for (label, attribute) in dependents {
            record.insert(label, synthesize(attribute, &ctx, rng));
        }
    }
}

/// Remove by case-insensitive label, then by canonical key. Returns the
/// removed label; absence is not an error.
fn remove_field(record: &mut Record, label: &str) -> Option<String> {
    if let Some(existing) = record.find_label(label).map(str::to_string) {
        record.remove(&existing);
        return Some(existing);
    }
    record
        .remove_by_key(&resolve_field(label))
        .map(|(existing, _)| existing)
}

/// Write under an existing slot for the same label or key, else append.
fn write_field(record: &mut Record, plan: &FieldPlan, value: FieldValue) {
    let key = resolve_field(&plan.label);
    let label = record
        .find_label(&plan.label)
        .or_else(|| record.find_by_key(&key).map(|(label, _)| label))
        .map(str::to_string)
        .unwrap_or_else(|| plan.label.clone());
    record.insert(label, value);
}

fn existing_age(record: &Record) -> Option<u32> {
    let (label, value) = record.find_by_key(AGE_KEY)?;
    let age = value.as_i64().and_then(plausible_age);
    if age.is_none() {
        debug!(field = %label, value = %value, "ignoring malformed age");
    }
    age
}

fn existing_dob(record: &Record, today: NaiveDate) -> Option<NaiveDate> {
    let (label, value) = record.find_by_key(DOB_KEY)?;
    match value.to_date(label) {
        Ok(dob) if dob <= today => Some(dob),
        Ok(dob) => {
            debug!(field = %label, dob = %dob, "ignoring date of birth in the future");
            None
        }
        Err(err) => {
            debug!(error = %err, "ignoring malformed date of birth");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datagen_core::EntityType;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::age::{MAX_DOB_ATTEMPTS, derive_age};
    use crate::model::ClassYearRule;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
    }

    fn updater(entity: EntityType, backfill: SiblingBackfill) -> BatchUpdater {
        let generator =
            EntityGenerator::new(entity, today(), ClassYearRule::Random, MAX_DOB_ATTEMPTS);
        BatchUpdater::new(generator, backfill)
    }

    fn report() -> GenerationReport {
        GenerationReport::new("test".to_string(), "update", "student")
    }

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn adding_dob_derives_from_existing_age() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut records = vec![Record::from_iter([
            ("Name".to_string(), FieldValue::Text("Ana".to_string())),
            ("Age".to_string(), FieldValue::Int(12)),
        ])];
        updater(EntityType::MinorStudent, SiblingBackfill::ExistingSlot).apply(
            &mut records,
            &UpdateRequest::add(labels(&["dob"])),
            &mut rng,
            &mut report(),
        );

        let record = &records[0];
        assert_eq!(record.get("Age"), Some(&FieldValue::Int(12)));
        let dob = record
            .get("Dob")
            .and_then(|value| value.to_date("Dob").ok())
            .expect("dob added");
        assert_eq!(derive_age(dob, today()), 12);
        assert_eq!(record.get("Name"), Some(&FieldValue::Text("Ana".to_string())));
    }

    #[test]
    fn malformed_sibling_is_backfilled_only_when_enabled() {
        let base = Record::from_iter([(
            "DOB".to_string(),
            FieldValue::Text("not a date".to_string()),
        )]);

        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut records = vec![base.clone()];
        updater(EntityType::BankCustomer, SiblingBackfill::ExistingSlot).apply(
            &mut records,
            &UpdateRequest::add(labels(&["age"])),
            &mut rng,
            &mut report(),
        );
        let age = records[0].get("Age").and_then(FieldValue::as_i64).expect("age");
        let dob = records[0]
            .get("DOB")
            .and_then(|value| value.to_date("DOB").ok())
            .expect("dob backfilled");
        assert_eq!(i64::from(derive_age(dob, today())), age);

        let mut records = vec![base];
        updater(EntityType::BankCustomer, SiblingBackfill::Never).apply(
            &mut records,
            &UpdateRequest::add(labels(&["age"])),
            &mut rng,
            &mut report(),
        );
        assert!(records[0].get("Age").is_some());
        assert_eq!(
            records[0].get("DOB"),
            Some(&FieldValue::Text("not a date".to_string()))
        );
    }

    #[test]
    fn lone_age_addition_does_not_create_dob() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let mut records = vec![Record::from_iter([(
            "Name".to_string(),
            FieldValue::Text("Bo".to_string()),
        )])];
        updater(EntityType::Employee, SiblingBackfill::ExistingSlot).apply(
            &mut records,
            &UpdateRequest::add(labels(&["age"])),
            &mut rng,
            &mut report(),
        );
        assert_eq!(records[0].labels().collect::<Vec<_>>(), vec!["Name", "Age"]);
        let age = records[0].get("Age").and_then(FieldValue::as_i64).expect("age");
        assert!(EntityType::Employee.age_range().contains(age));
    }

    #[test]
    fn grade_follows_a_newly_written_age() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        for _ in 0..50 {
            let mut records = vec![Record::from_iter([
                ("Name".to_string(), FieldValue::Text("Di".to_string())),
                ("Grade".to_string(), FieldValue::Int(99)),
            ])];
            updater(EntityType::MinorStudent, SiblingBackfill::ExistingSlot).apply(
                &mut records,
                &UpdateRequest::add(labels(&["age"])),
                &mut rng,
                &mut report(),
            );
            let age = records[0].get("Age").and_then(FieldValue::as_i64).expect("age");
            assert_eq!(
                records[0].get("Grade"),
                Some(&FieldValue::Int((age - 4).clamp(1, 12)))
            );
        }
    }

    #[test]
    fn existing_dob_keeps_dependents_untouched() {
        let mut rng = ChaCha8Rng::seed_from_u64(22);
        let mut records = vec![Record::from_iter([
            ("School".to_string(), FieldValue::Text("Lincoln Middle School".to_string())),
            ("DOB".to_string(), FieldValue::Text("2012-01-15".to_string())),
        ])];
        updater(EntityType::MinorStudent, SiblingBackfill::ExistingSlot).apply(
            &mut records,
            &UpdateRequest::add(labels(&["age"])),
            &mut rng,
            &mut report(),
        );
        assert_eq!(records[0].get("Age"), Some(&FieldValue::Int(14)));
        assert_eq!(
            records[0].get("School"),
            Some(&FieldValue::Text("Lincoln Middle School".to_string()))
        );
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn future_dob_is_backfilled_when_age_is_added() {
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        let mut records = vec![Record::from_iter([
            ("Age".to_string(), FieldValue::Int(30)),
            ("DOB".to_string(), FieldValue::Text("2099-01-01".to_string())),
        ])];
        updater(EntityType::BankCustomer, SiblingBackfill::ExistingSlot).apply(
            &mut records,
            &UpdateRequest::add(labels(&["age"])),
            &mut rng,
            &mut report(),
        );

        assert_eq!(records[0].get("Age"), Some(&FieldValue::Int(30)));
        let dob = records[0]
            .get("DOB")
            .and_then(|value| value.to_date("DOB").ok())
            .expect("dob");
        assert_eq!(derive_age(dob, today()), 30);
        assert_eq!(records[0].labels().collect::<Vec<_>>(), vec!["Age", "DOB"]);
    }

    #[test]
    fn malformed_age_is_backfilled_when_dob_is_added() {
        let mut rng = ChaCha8Rng::seed_from_u64(32);
        let mut records = vec![Record::from_iter([
            ("Age".to_string(), FieldValue::Text("thirty".to_string())),
            ("DOB".to_string(), FieldValue::Text("1990-03-04".to_string())),
        ])];
        updater(EntityType::BankCustomer, SiblingBackfill::ExistingSlot).apply(
            &mut records,
            &UpdateRequest::add(labels(&["dob"])),
            &mut rng,
            &mut report(),
        );

        assert_eq!(records[0].get("DOB"), Some(&FieldValue::Date(date(1990, 3, 4))));
        assert_eq!(records[0].get("Age"), Some(&FieldValue::Int(36)));
    }

    #[test]
    fn unusable_sibling_is_kept_when_backfill_is_off() {
        let mut rng = ChaCha8Rng::seed_from_u64(33);
        let mut records = vec![Record::from_iter([
            ("Age".to_string(), FieldValue::Int(30)),
            ("DOB".to_string(), FieldValue::Text("2099-01-01".to_string())),
        ])];
        updater(EntityType::BankCustomer, SiblingBackfill::Never).apply(
            &mut records,
            &UpdateRequest::add(labels(&["age"])),
            &mut rng,
            &mut report(),
        );

        assert_eq!(records[0].get("Age"), Some(&FieldValue::Int(30)));
        assert_eq!(
            records[0].get("DOB"),
            Some(&FieldValue::Text("2099-01-01".to_string()))
        );
    }

    #[test]
    fn hire_date_follows_a_newly_written_dob() {
        let mut rng = ChaCha8Rng::seed_from_u64(34);
        for _ in 0..50 {
            let mut records = vec![Record::from_iter([
                ("Age".to_string(), FieldValue::Int(30)),
                ("Hire Date".to_string(), FieldValue::Date(date(2000, 1, 1))),
            ])];
            updater(EntityType::Employee, SiblingBackfill::ExistingSlot).apply(
                &mut records,
                &UpdateRequest::add(labels(&["dob"])),
                &mut rng,
                &mut report(),
            );

            let dob = records[0]
                .get("Dob")
                .and_then(|value| value.to_date("Dob").ok())
                .expect("dob");
            assert_eq!(derive_age(dob, today()), 30);
            let hired = records[0]
                .get("Hire Date")
                .and_then(|value| value.to_date("Hire Date").ok())
                .expect("hire date");
            assert!(hired >= crate::age::add_years(dob, 18));
            assert!(hired <= today());
        }
    }

    #[test]
    fn removal_falls_back_to_canonical_key() {
        let mut record = Record::from_iter([
            ("DOB".to_string(), FieldValue::Text("2012-01-15".to_string())),
            ("Name".to_string(), FieldValue::Text("Cy".to_string())),
        ]);
        assert_eq!(remove_field(&mut record, "date of birth").as_deref(), Some("DOB"));
        assert_eq!(remove_field(&mut record, "Zipcode"), None);
        assert_eq!(record.labels().collect::<Vec<_>>(), vec!["Name"]);
    }
}
