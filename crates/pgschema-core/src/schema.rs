use serde_json::Value;

use crate::constraints::{ForeignKey, Index, PgExtension, UniqueConstraint};
use crate::node::{properties, Property};

/// One table described by a schema document: columns plus declared constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    pub name: String,
    /// Identifier of the originating document, used in diagnostics.
    pub source: String,
    /// Columns in document declaration order.
    pub columns: Vec<Property>,
    pub primary_key: Vec<String>,
    pub unique: Vec<UniqueConstraint>,
    pub indexes: Vec<Index>,
    pub foreign_keys: Vec<ForeignKey>,
}

impl TableSchema {
    /// Assemble a table from a parsed document and its decoded extension block.
    pub fn new(name: String, source: String, document: &Value, extension: PgExtension) -> Self {
        Self {
            name,
            source,
            columns: properties(document.get("properties")),
            primary_key: extension.primary_key,
            unique: extension.unique,
            indexes: extension.indexes,
            foreign_keys: extension.foreign_keys,
        }
    }

    pub fn column(&self, name: &str) -> Option<&Property> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }
}
