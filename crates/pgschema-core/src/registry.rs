use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::EXTENSION_KEY;
use crate::constraints::PgExtension;
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::schema::TableSchema;

/// A schema document as handed over by the loader: parsed, or the reason it
/// could not be.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub source: String,
    pub parsed: Result<Value, String>,
}

impl RawDocument {
    pub fn parsed(source: impl Into<String>, value: Value) -> Self {
        Self {
            source: source.into(),
            parsed: Ok(value),
        }
    }

    pub fn failed(source: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            parsed: Err(error.into()),
        }
    }
}

/// Immutable table-name keyed registry. Iterates in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    tables: Vec<TableSchema>,
    positions: HashMap<String, usize>,
}

impl Registry {
    pub fn get(&self, name: &str) -> Option<&TableSchema> {
        self.positions
            .get(name)
            .and_then(|position| self.tables.get(*position))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableSchema> {
        self.tables.iter()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    fn with_table(mut self, table: TableSchema) -> Self {
        self.positions.insert(table.name.clone(), self.tables.len());
        self.tables.push(table);
        self
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a TableSchema;
    type IntoIter = std::slice::Iter<'a, TableSchema>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}

/// Registry plus the input defects found while building it.
#[derive(Debug, Clone, Default)]
pub struct RegistryBuild {
    pub registry: Registry,
    pub diagnostics: Vec<Diagnostic>,
}

/// Fold documents, in the order supplied, into a registry.
///
/// Parse failures, non-string table names and duplicate table names are
/// reported and skipped; the first definition of a table wins. Documents
/// without a table name carry no relational semantics and are ignored.
pub fn build_registry<I>(documents: I) -> RegistryBuild
where
    I: IntoIterator<Item = RawDocument>,
{
    documents
        .into_iter()
        .fold(RegistryBuild::default(), |build, document| {
            build.absorb(document)
        })
}

impl RegistryBuild {
    fn absorb(self, document: RawDocument) -> Self {
        let RawDocument { source, parsed } = document;
        let value = match parsed {
            Ok(value) => value,
            Err(error) => {
                return self.report(Diagnostic::new(
                    DiagnosticKind::ParseFailure,
                    format!("Failed to parse {source}: {error}"),
                ));
            }
        };

        let Some(block) = value.get(EXTENSION_KEY) else {
            debug!(source = %source, "document has no relational metadata");
            return self;
        };
        if !declares_table(block) {
            debug!(source = %source, "document has no table name");
            return self;
        }

        let extension = match serde_json::from_value::<PgExtension>(block.clone()) {
            Ok(extension) => extension,
            Err(error) => {
                return self.report(Diagnostic::new(
                    DiagnosticKind::InvalidMetadata,
                    format!("Invalid {EXTENSION_KEY} metadata in {source}: {error}"),
                ));
            }
        };
        let Some(name) = extension.table.clone() else {
            return self;
        };

        if let Some(existing) = self.registry.get(&name) {
            let message = format!(
                "Duplicate table definition for \"{name}\" in {source} and {}",
                existing.source
            );
            return self.report(Diagnostic::new(DiagnosticKind::DuplicateTable, message));
        }

        debug!(table = %name, source = %source, "registered table");
        let table = TableSchema::new(name, source, &value, extension);
        Self {
            registry: self.registry.with_table(table),
            diagnostics: self.diagnostics,
        }
    }

    fn report(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }
}

/// Empty, `null` and `false` table names mean "no table".
fn declares_table(block: &Value) -> bool {
    match block.get("table") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(name)) => !name.is_empty(),
        Some(_) => true,
    }
}
