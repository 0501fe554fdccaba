use std::collections::BTreeMap;

use super::model::{Dataset, FieldValue};

/// Summed births for one (state, sex) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRow {
    pub state: FieldValue,
    pub sex: FieldValue,
    pub births: f64,
}

/// Group the records at `indices` by (state, sex) and sum births.
///
/// Rows come back ordered by state, then sex. Records with a null state or
/// sex form no group.
pub fn aggregate_by_state_and_sex(dataset: &Dataset, indices: &[usize]) -> Vec<AggregatedRow> {
    let mut groups: BTreeMap<(&FieldValue, &FieldValue), f64> = BTreeMap::new();
    for rec in indices.iter().filter_map(|&i| dataset.records.get(i)) {
        if rec.state.is_null() || rec.sex.is_null() {
            continue;
        }
        *groups.entry((&rec.state, &rec.sex)).or_insert(0.0) += rec.births;
    }

    groups
        .into_iter()
        .map(|((state, sex), births)| AggregatedRow {
            state: state.clone(),
            sex: sex.clone(),
            births,
        })
        .collect()
}

/// Render a births total the way the table shows it: whole numbers without
/// a fractional part.
pub fn format_births(births: f64) -> String {
    if births.fract() == 0.0 && births.abs() < 1e15 {
        format!("{births:.0}")
    } else {
        format!("{births:.2}")
    }
}
