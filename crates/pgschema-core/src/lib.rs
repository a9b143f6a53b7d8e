//! Core contracts for pgschema.
//!
//! This crate turns `x-pg` annotated JSON Schema documents into an immutable
//! table registry and checks the relational constraints declared on it.

pub mod constraints;
pub mod diagnostics;
pub mod node;
pub mod registry;
pub mod schema;
pub mod validation;

pub use constraints::{ForeignKey, Index, PgExtension, UniqueConstraint};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use node::{
    ArraySchema, BooleanSchema, IntegerSchema, NumberSchema, NumericBounds, ObjectSchema,
    Property, SchemaKind, SchemaNode, StringSchema,
};
pub use registry::{RawDocument, Registry, RegistryBuild, build_registry};
pub use schema::TableSchema;
pub use validation::{is_plain_column, validate};

/// Key of the relational-metadata extension block in a schema document.
pub const EXTENSION_KEY: &str = "x-pg";
