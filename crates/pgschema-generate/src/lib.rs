//! Sample-row synthesis for pgschema (fixture data).
//!
//! This crate walks the schema of every registered table and produces one
//! deterministic example row per table, conforming to each column's declared
//! type, format and constraints.

pub mod dataset;
pub mod errors;
pub mod generators;

pub use dataset::{SampleDataset, SampleRow, synthesize_dataset};
pub use errors::GenerationError;
pub use generators::{sample_uuid, synthesize, synthesize_row};
