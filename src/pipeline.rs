//! The two entry points the UI drives: load once, then one render pass per
//! selection change. Neither depends on egui.

use std::io::ErrorKind;
use std::path::Path;

use crate::data::aggregate::{AggregatedRow, aggregate_by_state_and_sex};
use crate::data::filter::{FilterSelection, filtered_indices};
use crate::data::loader;
use crate::data::model::Dataset;
use crate::data::schema::{normalize_columns, resolve_fields};
use crate::error::{LoadError, RenderError};

/// Read, normalize, resolve and coerce the dataset at `path`.
pub fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    match std::fs::metadata(path) {
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }
        Err(e) => return Err(LoadError::Unreadable(e.to_string())),
        Ok(_) => {}
    }

    let table = loader::load_file(path).map_err(|e| LoadError::Unreadable(format!("{e:#}")))?;
    let columns = normalize_columns(&table.columns);
    let fields = resolve_fields(&columns)?;

    for (field, col) in fields.iter() {
        log::debug!("{field} ← column {} ('{}')", col.index, col.name);
    }

    let dataset = Dataset::from_rows(columns, table.rows, fields);
    if dataset.dropped_rows > 0 {
        log::warn!(
            "Dropped {} row(s) whose births value is not numeric",
            dataset.dropped_rows
        );
    }
    Ok(dataset)
}

/// Filter then aggregate. An empty result is `RenderError::NoData`, never an
/// empty chart.
pub fn render_pass(
    dataset: &Dataset,
    selection: &FilterSelection,
) -> Result<Vec<AggregatedRow>, RenderError> {
    let indices = filtered_indices(dataset, selection);
    if indices.is_empty() {
        return Err(RenderError::NoData);
    }

    let rows = aggregate_by_state_and_sex(dataset, &indices);
    log::debug!(
        "render pass: {} of {} records kept, {} aggregated rows",
        indices.len(),
        dataset.len(),
        rows.len()
    );
    if rows.is_empty() {
        return Err(RenderError::NoData);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::DimensionFilter;
    use crate::data::model::{Dimension, FieldValue, Record};

    fn dataset() -> Dataset {
        let columns: Vec<String> = ["state_of_residence", "month", "sex_of_infant", "births"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let fields = resolve_fields(&columns).unwrap();
        let records = vec![Record {
            state: FieldValue::text("CA"),
            month: FieldValue::text("Jan"),
            sex: FieldValue::Null,
            births: 4.0,
        }];
        Dataset::with_records(records, columns, fields, 0)
    }

    #[test]
    fn test_rows_without_group_keys_are_no_data() {
        let result = render_pass(&dataset(), &FilterSelection::default());
        assert_eq!(result, Err(RenderError::NoData));
    }

    #[test]
    fn test_unmatched_filter_is_no_data() {
        let sel = FilterSelection::default().with(
            Dimension::Month,
            DimensionFilter::only([FieldValue::text("Dec")]),
        );
        assert_eq!(render_pass(&dataset(), &sel), Err(RenderError::NoData));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = load_dataset(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
        assert_eq!(err.to_string(), "Dataset file not found in repository.");
    }
}
