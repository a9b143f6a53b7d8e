use std::fmt;

use serde::Serialize;

/// Category of a reported inconsistency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A document could not be read or parsed.
    ParseFailure,
    /// A document names a table but its `x-pg` block cannot be decoded.
    InvalidMetadata,
    /// A second document declares an already registered table.
    DuplicateTable,
    /// A constraint names a column the table does not declare.
    MissingColumn,
    MissingReferencedTable,
    UnknownTable,
    MissingReferencedColumns,
    /// A foreign key targets a column the referenced table does not declare.
    MissingReferencedColumn,
}

impl DiagnosticKind {
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticKind::ParseFailure => "parse_failure",
            DiagnosticKind::InvalidMetadata => "invalid_metadata",
            DiagnosticKind::DuplicateTable => "duplicate_table",
            DiagnosticKind::MissingColumn => "missing_column",
            DiagnosticKind::MissingReferencedTable => "missing_referenced_table",
            DiagnosticKind::UnknownTable => "unknown_table",
            DiagnosticKind::MissingReferencedColumns => "missing_referenced_columns",
            DiagnosticKind::MissingReferencedColumn => "missing_referenced_column",
        }
    }
}

/// Human-readable finding. Collected, never raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
