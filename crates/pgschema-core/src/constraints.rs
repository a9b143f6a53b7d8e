use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decoded `x-pg` extension block of a schema document.
///
/// Only a non-string `table` fails decoding. Misshapen constraint sections
/// decode to empty or partial constraints so the validator can report them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PgExtension {
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default, deserialize_with = "column_list")]
    pub primary_key: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub unique: Vec<UniqueConstraint>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub indexes: Vec<Index>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub foreign_keys: Vec<ForeignKey>,
}

/// Unique constraint definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UniqueConstraint {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "column_list")]
    pub columns: Vec<String>,
}

/// Index definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Index {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "column_list")]
    pub columns: Vec<String>,
}

/// Foreign key definition preserving column ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawForeignKey")]
pub struct ForeignKey {
    pub name: Option<String>,
    pub columns: Vec<String>,
    pub referenced_table: Option<String>,
    pub referenced_columns: Vec<String>,
}

#[derive(Deserialize)]
struct RawForeignKey {
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(default, deserialize_with = "column_list")]
    columns: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    references: Option<RawReference>,
}

#[derive(Deserialize)]
struct RawReference {
    #[serde(default, deserialize_with = "lenient")]
    table: Option<String>,
    #[serde(default, deserialize_with = "column_list")]
    columns: Vec<String>,
}

impl From<RawForeignKey> for ForeignKey {
    fn from(raw: RawForeignKey) -> Self {
        let (referenced_table, referenced_columns) = match raw.references {
            Some(reference) => (
                reference.table.filter(|table| !table.is_empty()),
                reference.columns,
            ),
            None => (None, Vec::new()),
        };
        Self {
            name: raw.name,
            columns: raw.columns,
            referenced_table,
            referenced_columns,
        }
    }
}

/// Column references are either bare names or `{ "column": "<name>" }`
/// objects. Anything else, including a non-list value, contributes nothing.
fn column_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(entries) = value else {
        return Ok(Vec::new());
    };
    Ok(entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::String(name) => Some(name),
            Value::Object(mut object) => match object.remove("column") {
                Some(Value::String(name)) => Some(name),
                _ => None,
            },
            _ => None,
        })
        .collect())
}

/// A value of the wrong shape decodes as `T::default()`.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// A non-list decodes as empty; each misshapen entry decodes as `T::default()`.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let Value::Array(entries) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(entries
        .into_iter()
        .map(|entry| serde_json::from_value(entry).unwrap_or_default())
        .collect())
}
