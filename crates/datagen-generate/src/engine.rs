use std::time::Instant;

use chrono::NaiveDate;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use datagen_core::{EntityType, Error as CoreError, UNKNOWN_ENTITY, resolve_entity};

use crate::entity::{EntityGenerator, plan_fields};
use crate::errors::GenerationError;
use crate::generators::Attribute;
use crate::model::{GenerateOptions, GenerationReport, GenerationRequest, UpdateRequest};
use crate::session::{Batch, Session};
use crate::update::BatchUpdater;

/// Result of an update against the session.
#[derive(Debug, Clone)]
pub enum UpdateOutcome {
    Updated(GenerationReport),
    /// No batch to update; the session was left untouched.
    NoSession,
}

/// Entry point for generating and updating record batches.
#[derive(Debug, Clone)]
pub struct RecordEngine {
    options: GenerateOptions,
    seed: u64,
    rng: ChaCha8Rng,
}

impl RecordEngine {
    pub fn new(options: GenerateOptions) -> Self {
        let seed = options.seed.unwrap_or_else(|| rand::rng().random());
        debug!(seed, today = ?options.today, "record engine initialised");
        Self {
            options,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Reference date for age computations: the configured date, or the
    /// local date at the time of the call.
    pub fn today(&self) -> NaiveDate {
        self.options
            .today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    fn generator(&self, entity: EntityType) -> EntityGenerator {
        EntityGenerator::new(
            entity,
            self.today(),
            self.options.class_year,
            self.options.max_dob_attempts,
        )
    }

    /// Generate a fresh batch and store it in `session`, replacing any previous one.
    pub fn generate(
        &mut self,
        session: &mut Session,
        request: &GenerationRequest,
    ) -> Result<GenerationReport, GenerationError> {
        let start = Instant::now();
        if request.count == 0 {
            return Err(CoreError::InvalidRequest("record count must be positive".to_string()).into());
        }
        if request.count > self.options.max_records {
            return Err(CoreError::InvalidRequest(format!(
                "record count {} exceeds the limit of {}",
                request.count, self.options.max_records
            ))
            .into());
        }

        let entity_key = resolve_entity(&request.entity);
        if entity_key == UNKNOWN_ENTITY {
            warn!(
                entity = %request.entity,
                "unrecognised entity type; every field uses placeholder values"
            );
        }
        let entity = EntityType::from_key(&entity_key);
        let fields = plan_fields(entity, &request.fields);
        let generator = self.generator(entity);

        let mut records = Vec::with_capacity(request.count as usize);
        let mut fallbacks = 0_u64;
        for _ in 0..request.count {
            let generated = generator.generate_record(&fields, &mut self.rng);
            if generated.dob_fallback {
                fallbacks += 1;
            }
            records.push(generated.record);
        }

        let batch = Batch::new(entity, records);
        let mut report = GenerationReport::new(batch.id.to_string(), "generate", entity.key());
        for plan in &fields {
            if plan.attribute == Attribute::Placeholder {
                report.record_placeholder(&plan.label);
            }
        }
        report.dob_fallbacks = fallbacks;
        report.records = batch.len() as u64;
        report.fields = fields.into_iter().map(|plan| plan.label).collect();
        report.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            batch_id = %report.batch_id,
            entity = %report.entity,
            records = report.records,
            fields = report.fields.len(),
            placeholders = report.placeholder_fields.len(),
            dob_fallbacks = report.dob_fallbacks,
            duration_ms = report.duration_ms,
            "batch generated"
        );

        if let Some(previous) = session.replace(batch) {
            debug!(batch_id = %previous.id, "previous batch discarded");
        }
        Ok(report)
    }

    /// Apply an add/remove delta to the session batch.
    pub fn update(&mut self, session: &mut Session, request: &UpdateRequest) -> UpdateOutcome {
        let start = Instant::now();
        let Some(batch) = session.batch_mut() else {
            warn!("update requested with no batch in session");
            return UpdateOutcome::NoSession;
        };

        let updater = BatchUpdater::new(
            self.generator(batch.entity),
            self.options.sibling_backfill,
        );
        let mut report =
            GenerationReport::new(batch.id.to_string(), "update", batch.entity.key());
        updater.apply(&mut batch.records, request, &mut self.rng, &mut report);

        report.records = batch.len() as u64;
        report.fields = batch.columns();
        report.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            batch_id = %report.batch_id,
            entity = %report.entity,
            records = report.records,
            added = request.add.len(),
            removed = report.removed_fields.len(),
            placeholders = report.placeholder_fields.len(),
            duration_ms = report.duration_ms,
            "batch updated"
        );
        UpdateOutcome::Updated(report)
    }
}
