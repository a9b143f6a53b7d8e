use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

use pgschema_core::Registry;

use crate::errors::GenerationError;
use crate::generators::synthesize_row;

/// One synthesized row: column name to value, in column declaration order.
pub type SampleRow = Map<String, Value>;

/// Sample rows keyed by table name, ordered lexicographically by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SampleDataset {
    tables: BTreeMap<String, Vec<SampleRow>>,
}

impl SampleDataset {
    pub fn get(&self, table: &str) -> Option<&[SampleRow]> {
        self.tables.get(table).map(Vec::as_slice)
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Indented JSON terminated by a newline.
    pub fn to_json_string(&self) -> Result<String, GenerationError> {
        let mut rendered = serde_json::to_string_pretty(self)?;
        rendered.push('\n');
        Ok(rendered)
    }
}

/// Build one sample row for every registered table.
pub fn synthesize_dataset(registry: &Registry) -> SampleDataset {
    let tables: BTreeMap<String, Vec<SampleRow>> = registry
        .iter()
        .map(|table| (table.name.clone(), vec![synthesize_row(table)]))
        .collect();
    info!(tables = tables.len(), "sample dataset synthesized");
    SampleDataset { tables }
}
