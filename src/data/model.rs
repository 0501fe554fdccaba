use std::collections::BTreeSet;
use std::fmt;

use super::schema::{FieldMap, LogicalField};

// ---------------------------------------------------------------------------
// FieldValue – a single cell of the source table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common dataframe dtypes.
/// Used as a `BTreeSet` / `BTreeMap` key downstream, so it must be `Ord`;
/// equality and hashing follow that order.
#[derive(Debug, Clone)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl FieldValue {
    /// Convenience constructor for string cells.
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::String(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Coerce the value to a number the way a dataframe `to_numeric` with
    /// `errors="coerce"` does. `None` means the cell is missing after coercion.
    pub fn to_number(&self) -> Option<f64> {
        let n = match self {
            FieldValue::Integer(i) => *i as f64,
            FieldValue::Float(v) => *v,
            FieldValue::Bool(b) => f64::from(u8::from(*b)),
            FieldValue::String(s) => s.trim().parse::<f64>().ok()?,
            FieldValue::Null => return None,
        };
        (!n.is_nan()).then_some(n)
    }
}

/// Collapse `-0.0` onto `0.0` and every NaN payload onto one NaN, so floats
/// that print the same compare and hash the same.
fn canonical_float(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else if v.is_nan() {
        f64::NAN
    } else {
        v
    }
}

// -- Manual Eq/Ord so we can put FieldValue in BTreeSet --

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for FieldValue {}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use FieldValue::*;
        fn rank(v: &FieldValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) | Float(_) => 2,
                String(_) => 3,
            }
        }
        let ra = rank(self);
        let rb = rank(other);
        if ra != rb {
            return ra.cmp(&rb);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => canonical_float(*a).total_cmp(&canonical_float(*b)),
            // Mixed numerics compare by value; ties put the integer first.
            (Integer(a), Float(b)) => (*a as f64)
                .total_cmp(&canonical_float(*b))
                .then(std::cmp::Ordering::Less),
            (Float(a), Integer(b)) => canonical_float(*a)
                .total_cmp(&(*b as f64))
                .then(std::cmp::Ordering::Greater),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for FieldValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            FieldValue::String(s) => s.hash(state),
            FieldValue::Integer(i) => i.hash(state),
            FieldValue::Float(f) => canonical_float(*f).to_bits().hash(state),
            FieldValue::Bool(b) => b.hash(state),
            FieldValue::Null => {}
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{s}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Null => write!(f, "<null>"),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – raw loader output
// ---------------------------------------------------------------------------

/// A rectangular table as read from disk, before any schema work.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Column labels exactly as they appear in the file.
    pub columns: Vec<String>,
    /// Row-major cells; every row has `columns.len()` entries.
    pub rows: Vec<Vec<FieldValue>>,
}

// ---------------------------------------------------------------------------
// Record / Dimension
// ---------------------------------------------------------------------------

/// One birth record after field resolution and births coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub state: FieldValue,
    pub month: FieldValue,
    pub sex: FieldValue,
    pub births: f64,
}

/// The three independent filter axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Month,
    State,
    Sex,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Month, Dimension::State, Dimension::Sex];

    /// Sidebar caption for the selector.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Month => "Select Month(s)",
            Dimension::State => "Select State(s)",
            Dimension::Sex => "Select Gender(s)",
        }
    }

    pub fn value_of(self, record: &Record) -> &FieldValue {
        match self {
            Dimension::Month => &record.month,
            Dimension::State => &record.state,
            Dimension::Sex => &record.sex,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded, coerced dataset. Immutable once built.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<Record>,
    /// Normalized column names in file order.
    pub columns: Vec<String>,
    pub fields: FieldMap,
    /// Rows discarded because births could not be coerced to a number.
    pub dropped_rows: usize,
    months: BTreeSet<FieldValue>,
    states: BTreeSet<FieldValue>,
    sexes: BTreeSet<FieldValue>,
}

impl Dataset {
    /// Project the resolved columns out of `rows`, dropping rows whose births
    /// cell is not numeric.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<FieldValue>>, fields: FieldMap) -> Self {
        let cell = |row: &[FieldValue], field: LogicalField| {
            row.get(fields.column(field).index)
                .cloned()
                .unwrap_or(FieldValue::Null)
        };

        let total = rows.len();
        let records: Vec<Record> = rows
            .iter()
            .filter_map(|row| {
                let births = cell(row, LogicalField::Births).to_number()?;
                Some(Record {
                    state: cell(row, LogicalField::StateOfResidence),
                    month: cell(row, LogicalField::Month),
                    sex: cell(row, LogicalField::SexOfInfant),
                    births,
                })
            })
            .collect();
        let dropped_rows = total - records.len();

        Self::with_records(records, columns, fields, dropped_rows)
    }

    /// Build the dataset from already-coerced records.
    pub fn with_records(
        records: Vec<Record>,
        columns: Vec<String>,
        fields: FieldMap,
        dropped_rows: usize,
    ) -> Self {
        let mut months = BTreeSet::new();
        let mut states = BTreeSet::new();
        let mut sexes = BTreeSet::new();
        for r in &records {
            for (set, val) in [
                (&mut months, &r.month),
                (&mut states, &r.state),
                (&mut sexes, &r.sex),
            ] {
                if !val.is_null() {
                    set.insert(val.clone());
                }
            }
        }

        Dataset {
            records,
            columns,
            fields,
            dropped_rows,
            months,
            states,
            sexes,
        }
    }

    /// Sorted distinct non-null values observed for a filter dimension.
    pub fn distinct(&self, dimension: Dimension) -> &BTreeSet<FieldValue> {
        match dimension {
            Dimension::Month => &self.months,
            Dimension::State => &self.states,
            Dimension::Sex => &self.sexes,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
