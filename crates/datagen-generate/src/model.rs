use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::age::MAX_DOB_ATTEMPTS;

/// How an update fills the age/DOB sibling of a field that was added alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiblingBackfill {
    /// Never touch the sibling field.
    Never,
    /// Overwrite the sibling only when the record already holds a slot for it.
    #[default]
    ExistingSlot,
}

/// How a post-secondary class year is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassYearRule {
    /// Uniform over Freshman..Graduate, independent of age.
    #[default]
    Random,
    /// 18 Freshman, 19 Sophomore, 20 Junior, 21 Senior, 22+ Graduate.
    FromAge,
}

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Seed for the engine RNG. A random seed is drawn when absent.
    pub seed: Option<u64>,
    /// Reference date for age computations. Defaults to the local date.
    pub today: Option<NaiveDate>,
    /// Upper bound on records per generation request.
    pub max_records: u32,
    /// Sampling attempts before the deterministic DOB fallback.
    pub max_dob_attempts: u32,
    pub sibling_backfill: SiblingBackfill,
    pub class_year: ClassYearRule,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            seed: None,
            today: None,
            max_records: 1000,
            max_dob_attempts: MAX_DOB_ATTEMPTS,
            sibling_backfill: SiblingBackfill::default(),
            class_year: ClassYearRule::default(),
        }
    }
}

/// Structured generation request produced by the command parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub count: u32,
    pub entity: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

impl GenerationRequest {
    pub fn new(count: u32, entity: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            count,
            entity: entity.into(),
            fields,
        }
    }
}

/// Field delta applied to the session batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRequest {
    #[serde(default)]
    pub add: Vec<String>,
    #[serde(default)]
    pub remove: Vec<String>,
}

impl UpdateRequest {
    pub fn add(fields: Vec<String>) -> Self {
        Self {
            add: fields,
            remove: Vec::new(),
        }
    }

    pub fn remove(fields: Vec<String>) -> Self {
        Self {
            add: Vec::new(),
            remove: fields,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }
}

/// Report for a generate or update operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub batch_id: String,
    pub operation: String,
    pub entity: String,
    pub records: u64,
    pub fields: Vec<String>,
    /// Labels whose values came from the placeholder rule.
    pub placeholder_fields: BTreeSet<String>,
    /// Labels removed from at least one record.
    pub removed_fields: BTreeSet<String>,
    pub dob_fallbacks: u64,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(batch_id: String, operation: &str, entity: &str) -> Self {
        Self {
            batch_id,
            operation: operation.to_string(),
            entity: entity.to_string(),
            records: 0,
            fields: Vec::new(),
            placeholder_fields: BTreeSet::new(),
            removed_fields: BTreeSet::new(),
            dob_fallbacks: 0,
            duration_ms: 0,
        }
    }

    pub fn record_placeholder(&mut self, label: &str) {
        self.placeholder_fields.insert(label.to_string());
    }

    pub fn record_removed(&mut self, label: &str) {
        self.removed_fields.insert(label.to_string());
    }

    pub fn record_fallback(&mut self) {
        self.dob_fallbacks += 1;
    }
}
