use datagen_core::{EntityType, Record};

/// Batch produced by one generation command.
#[derive(Debug, Clone)]
pub struct Batch {
    pub id: uuid::Uuid,
    pub entity: EntityType,
    pub records: Vec<Record>,
}

impl Batch {
    pub fn new(entity: EntityType, records: Vec<Record>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            entity,
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Union of labels across records, in first-seen order.
    pub fn columns(&self) -> Vec<String> {
        columns(&self.records)
    }
}

pub(crate) fn columns(records: &[Record]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for label in record.labels() {
            if !columns.iter().any(|existing| existing == label) {
                columns.push(label.to_string());
            }
        }
    }
    columns
}

/// Holds at most one batch, owned by the embedding application.
///
/// Not shared across threads; callers serving several clients keep one
/// session per client.
#[derive(Debug, Default)]
pub struct Session {
    batch: Option<Batch>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batch(&self) -> Option<&Batch> {
        self.batch.as_ref()
    }

    pub fn batch_mut(&mut self) -> Option<&mut Batch> {
        self.batch.as_mut()
    }

    pub fn entity(&self) -> Option<EntityType> {
        self.batch.as_ref().map(|batch| batch.entity)
    }

    pub fn is_empty(&self) -> bool {
        self.batch.is_none()
    }

    /// Store `batch`, returning the one it replaces.
    pub fn replace(&mut self, batch: Batch) -> Option<Batch> {
        self.batch.replace(batch)
    }

    pub fn clear(&mut self) -> Option<Batch> {
        self.batch.take()
    }
}
