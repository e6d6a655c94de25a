//! Core contracts and helpers for Datagen.
//!
//! This crate defines the entity and record types shared by the generation
//! engine and the CLI, plus the alias resolver that maps free-text labels to
//! canonical keys.

pub mod alias;
pub mod error;
pub mod record;
pub mod types;

pub use alias::{resolve_entity, resolve_field, title_case};
pub use error::{Error, Result};
pub use record::{FieldValue, Record};
pub use types::{AgeRange, EntityType};

/// Canonical entity key returned for entity labels that match no alias.
pub const UNKNOWN_ENTITY: &str = "unknown";
