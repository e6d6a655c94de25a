//! Record generation engine for Datagen.
//!
//! This crate turns structured generation requests into batches of coherent
//! synthetic records, keeps the latest batch in a [`Session`], applies
//! add/remove-field updates and exports batches to CSV, JSON and Markdown.

pub mod age;
pub mod engine;
pub mod entity;
pub mod errors;
pub mod generators;
pub mod model;
pub mod output;
pub mod session;
pub mod update;

pub use engine::{RecordEngine, UpdateOutcome};
pub use errors::GenerationError;
pub use model::{
    ClassYearRule, GenerateOptions, GenerationReport, GenerationRequest, SiblingBackfill,
    UpdateRequest,
};
pub use output::{ExportFormat, export_records, export_session};
pub use session::{Batch, Session};
