//! Column normalization and logical field resolution.
//!
//! Resolution is a pure function of the normalized column list so the
//! name-matching heuristic can change without touching filtering or
//! aggregation.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::UnresolvedFields;

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Trim, lowercase, and replace spaces with `_`.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

pub fn normalize_columns<S: AsRef<str>>(columns: &[S]) -> Vec<String> {
    columns
        .iter()
        .map(|c| normalize_column_name(c.as_ref()))
        .collect()
}

// ---------------------------------------------------------------------------
// Logical fields
// ---------------------------------------------------------------------------

/// The four semantic columns the dashboard needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogicalField {
    StateOfResidence,
    Month,
    SexOfInfant,
    Births,
}

impl LogicalField {
    /// Priority order used when classifying a column.
    pub const ALL: [LogicalField; 4] = [
        LogicalField::StateOfResidence,
        LogicalField::Month,
        LogicalField::SexOfInfant,
        LogicalField::Births,
    ];

    /// Canonical key, also used as the table header.
    pub fn key(self) -> &'static str {
        match self {
            LogicalField::StateOfResidence => "state_of_residence",
            LogicalField::Month => "month",
            LogicalField::SexOfInfant => "sex_of_infant",
            LogicalField::Births => "births",
        }
    }

    /// Substring heuristic over a normalized column name.
    pub fn matches(self, column: &str) -> bool {
        match self {
            LogicalField::StateOfResidence => {
                column.contains("state") && column.contains("residence")
            }
            LogicalField::Month => column.contains("month"),
            LogicalField::SexOfInfant => column.contains("sex"),
            LogicalField::Births => column.contains("birth"),
        }
    }
}

impl fmt::Display for LogicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The logical field a column belongs to, if any. A column is claimed by
/// the first field in priority order whose heuristic matches.
pub fn classify_column(column: &str) -> Option<LogicalField> {
    LogicalField::ALL.into_iter().find(|f| f.matches(column))
}

// ---------------------------------------------------------------------------
// FieldMap
// ---------------------------------------------------------------------------

/// A source column chosen for a logical field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumn {
    pub index: usize,
    pub name: String,
}

/// One resolved column per logical field. Only constructed when all four
/// fields are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    columns: [ResolvedColumn; 4],
}

impl FieldMap {
    pub fn column(&self, field: LogicalField) -> &ResolvedColumn {
        &self.columns[field as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (LogicalField, &ResolvedColumn)> {
        LogicalField::ALL.into_iter().zip(self.columns.iter())
    }
}

/// Map normalized column names to logical fields. First match in column
/// order wins; there is no scoring between candidates.
pub fn resolve_fields(columns: &[String]) -> Result<FieldMap, UnresolvedFields> {
    let mut found: BTreeMap<LogicalField, ResolvedColumn> = BTreeMap::new();
    for (index, name) in columns.iter().enumerate() {
        if let Some(field) = classify_column(name) {
            found.entry(field).or_insert_with(|| ResolvedColumn {
                index,
                name: name.clone(),
            });
        }
    }

    let missing: Vec<LogicalField> = LogicalField::ALL
        .into_iter()
        .filter(|f| !found.contains_key(f))
        .collect();

    match LogicalField::ALL.map(|f| found.remove(&f)) {
        [Some(state), Some(month), Some(sex), Some(births)] => Ok(FieldMap {
            columns: [state, month, sex, births],
        }),
        _ => Err(UnresolvedFields {
            missing,
            available: columns.to_vec(),
        }),
    }
}
