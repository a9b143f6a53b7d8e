use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::constraints::ForeignKey;
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::registry::Registry;
use crate::schema::TableSchema;

fn plain_column_regex() -> Option<&'static Regex> {
    static PLAIN_COLUMN: OnceLock<Option<Regex>> = OnceLock::new();
    PLAIN_COLUMN
        .get_or_init(|| Regex::new(r"(?i)^[a-z_][a-z0-9_]*$").ok())
        .as_ref()
}

/// Returns true when `reference` is a bare column identifier rather than an
/// expression such as `lower(email)`.
pub fn is_plain_column(reference: &str) -> bool {
    plain_column_regex().is_some_and(|re| re.is_match(reference))
}

/// Check every declared constraint of every table against the registry.
///
/// This checks:
/// - primary key, unique, index and foreign key columns exist on the table
/// - foreign keys name a referenced table that is registered
/// - referenced columns exist on the referenced table
///
/// Every finding is collected; an empty list means the corpus is consistent.
pub fn validate(registry: &Registry) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for table in registry {
        let columns = column_index(table);

        if !table.primary_key.is_empty() {
            check_columns(
                &columns,
                &table.primary_key,
                &format!("Primary key on table {}", table.name),
                table,
                DiagnosticKind::MissingColumn,
                &mut diagnostics,
            );
        }

        for unique in &table.unique {
            check_columns(
                &columns,
                &unique.columns,
                &format!(
                    "Unique constraint {}on table {}",
                    name_prefix(unique.name.as_deref()),
                    table.name
                ),
                table,
                DiagnosticKind::MissingColumn,
                &mut diagnostics,
            );
        }

        for index in &table.indexes {
            check_columns(
                &columns,
                &index.columns,
                &format!(
                    "Index {}on table {}",
                    name_prefix(index.name.as_deref()),
                    table.name
                ),
                table,
                DiagnosticKind::MissingColumn,
                &mut diagnostics,
            );
        }

        for fk in &table.foreign_keys {
            validate_foreign_key(registry, table, &columns, fk, &mut diagnostics);
        }
    }

    diagnostics
}

fn validate_foreign_key(
    registry: &Registry,
    table: &TableSchema,
    columns: &HashSet<&str>,
    fk: &ForeignKey,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let label = format!(
        "Foreign key {}on table {}",
        name_prefix(fk.name.as_deref()),
        table.name
    );
    check_columns(
        columns,
        &fk.columns,
        &label,
        table,
        DiagnosticKind::MissingColumn,
        diagnostics,
    );

    let Some(referenced_name) = fk.referenced_table.as_deref() else {
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::MissingReferencedTable,
            format!("{label} in {} is missing referenced table", table.source),
        ));
        return;
    };

    let Some(referenced) = registry.get(referenced_name) else {
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::UnknownTable,
            format!(
                "{label} in {} references unknown table \"{referenced_name}\"",
                table.source
            ),
        ));
        return;
    };

    if fk.referenced_columns.is_empty() {
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::MissingReferencedColumns,
            format!("{label} in {} is missing referenced columns", table.source),
        ));
        return;
    }

    check_columns(
        &column_index(referenced),
        &fk.referenced_columns,
        &format!("Foreign key from {} to {}", table.name, referenced.name),
        referenced,
        DiagnosticKind::MissingReferencedColumn,
        diagnostics,
    );
}

/// Report each plain reference in `references` that `columns` lacks.
/// Expression references are skipped.
fn check_columns(
    columns: &HashSet<&str>,
    references: &[String],
    context: &str,
    owner: &TableSchema,
    kind: DiagnosticKind,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for reference in references {
        if is_plain_column(reference) && !columns.contains(reference.as_str()) {
            diagnostics.push(Diagnostic::new(
                kind,
                format!(
                    "{context}: column \"{reference}\" is not defined in {}",
                    owner.source
                ),
            ));
        }
    }
}

fn column_index(table: &TableSchema) -> HashSet<&str> {
    table
        .columns
        .iter()
        .map(|column| column.name.as_str())
        .collect()
}

fn name_prefix(name: Option<&str>) -> String {
    match name {
        Some(name) if !name.is_empty() => format!("{name} "),
        _ => String::new(),
    }
}
