use chrono::NaiveDate;
use rand::RngCore;

use datagen_core::{EntityType, Record};

use crate::age::{AgeDob, DobSource, derive_age, random_age_and_dob, sample_dob_for_age};
use crate::generators::{Attribute, AttributeContext, synthesize};
use crate::model::ClassYearRule;

/// A requested label and the attribute it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPlan {
    pub label: String,
    pub attribute: Attribute,
}

/// Resolve requested labels for `entity`, falling back to its default list.
/// Duplicate labels (case-insensitive) keep their first occurrence.
pub fn plan_fields(entity: EntityType, labels: &[String]) -> Vec<FieldPlan> {
    let labels = if labels.iter().all(|label| label.trim().is_empty()) {
        entity.default_fields()
    } else {
        labels.to_vec()
    };

    let mut plans: Vec<FieldPlan> = Vec::with_capacity(labels.len());
    for label in labels {
        let label = label.trim().to_string();
        if label.is_empty()
            || plans
                .iter()
                .any(|plan| plan.label.eq_ignore_ascii_case(&label))
        {
            continue;
        }
        let attribute = Attribute::resolve(&label, entity);
        plans.push(FieldPlan { label, attribute });
    }
    plans
}

/// Record generated for one entity, with the fallback flag of its DOB draw.
#[derive(Debug, Clone)]
pub struct GeneratedRecord {
    pub record: Record,
    pub dob_fallback: bool,
}

/// Builds records for one entity type under its age range and derivation rules.
#[derive(Debug, Clone, Copy)]
pub struct EntityGenerator {
    entity: EntityType,
    today: NaiveDate,
    class_year: ClassYearRule,
    max_dob_attempts: u32,
}

impl EntityGenerator {
    pub fn new(
        entity: EntityType,
        today: NaiveDate,
        class_year: ClassYearRule,
        max_dob_attempts: u32,
    ) -> Self {
        Self {
            entity,
            today,
            class_year,
            max_dob_attempts,
        }
    }

    pub fn entity(&self) -> EntityType {
        self.entity
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn class_year(&self) -> ClassYearRule {
        self.class_year
    }

    /// Fresh coherent pair within the entity's age range.
    pub fn draw_age_dob(&self, rng: &mut dyn RngCore) -> AgeDob {
        random_age_and_dob(
            self.entity.age_range(),
            self.today,
            self.max_dob_attempts,
            rng,
        )
    }

    /// Pair anchored on a known date of birth.
    pub fn anchor_on_dob(&self, dob: NaiveDate) -> AgeDob {
        let age = derive_age(dob, self.today).max(0) as u32;
        AgeDob {
            age,
            dob,
            source: DobSource::Provided,
        }
    }

    /// Pair anchored on a known age.
    pub fn anchor_on_age(&self, age: u32, rng: &mut dyn RngCore) -> AgeDob {
        let (dob, source) = sample_dob_for_age(age, self.today, self.max_dob_attempts, rng);
        AgeDob { age, dob, source }
    }

    /// One record with a freshly drawn age/DOB pair shared by every field.
    pub fn generate_record(&self, fields: &[FieldPlan], rng: &mut dyn RngCore) -> GeneratedRecord {
        let pair = self.draw_age_dob(rng);
        GeneratedRecord {
            record: self.generate_with(fields, pair, rng),
            dob_fallback: pair.used_fallback(),
        }
    }

    /// One record whose age-derived fields follow `pair`.
    pub fn generate_with(
        &self,
        fields: &[FieldPlan],
        pair: AgeDob,
        rng: &mut dyn RngCore,
    ) -> Record {
        let ctx = self.context(pair);
        let mut record = Record::new();
        for plan in fields {
            record.insert(plan.label.clone(), synthesize(plan.attribute, &ctx, rng));
        }
        record
    }

    pub fn context(&self, pair: AgeDob) -> AttributeContext {
        AttributeContext {
            entity: self.entity,
            age: pair.age,
            dob: pair.dob,
            today: self.today,
            class_year: self.class_year,
        }
    }
}
