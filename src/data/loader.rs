use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, UInt16Type,
    UInt32Type, UInt8Type,
};
use arrow::util::display::{ArrayFormatter, FormatOptions};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{FieldValue, Table};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a record table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` (and anything unrecognised) – comma-delimited with a header row
/// * `.tsv`     – tab-delimited with a header row
/// * `.json`    – `[{ "State of Residence": "CA", "Births": 10, ... }, ...]`
/// * `.parquet` – utf8, integer, float and boolean columns; anything else as text
pub fn load_file(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "tsv" => load_delimited(path, b'\t'),
        _ => load_delimited(path, b','),
    }
}

// ---------------------------------------------------------------------------
// Delimited loader
// ---------------------------------------------------------------------------

/// Header row with column names, one record per line. Cells are kept as
/// text until the whole column has been seen, then typed per column.
fn load_delimited(path: &Path, delimiter: u8) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .context("opening delimited file")?;

    let columns: Vec<String> = reader
        .headers()
        .context("reading header row")?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    if columns.is_empty() {
        bail!("file has no header row");
    }

    let mut raw: Vec<Vec<String>> = vec![Vec::new(); columns.len()];
    for (row_no, result) in reader.records().enumerate() {
        // Row numbers are 1-based data rows, header excluded.
        let record = result.with_context(|| format!("row {}", row_no + 1))?;
        for (col, cell) in raw.iter_mut().zip(record.iter()) {
            col.push(cell.to_string());
        }
    }

    let typed: Vec<Vec<FieldValue>> = raw.iter().map(|col| infer_column(col)).collect();
    Ok(Table {
        columns,
        rows: transpose(typed),
    })
}

/// Cell texts read as missing, the same set dataframe CSV readers use.
const NA_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(cell: &str) -> bool {
    cell.is_empty() || NA_MARKERS.contains(&cell)
}

/// Type a whole column at once: integers if every present cell is an
/// integer, floats if every present cell is numeric, text otherwise.
/// Empty cells and NA markers become `Null`.
fn infer_column(cells: &[String]) -> Vec<FieldValue> {
    let present = || cells.iter().map(|c| c.trim()).filter(|c| !is_missing(c));

    let all_int = present().all(|c| c.parse::<i64>().is_ok());
    let all_float = all_int || present().all(|c| c.parse::<f64>().is_ok());

    cells
        .iter()
        .map(|c| {
            let t = c.trim();
            if is_missing(t) {
                return FieldValue::Null;
            }
            if all_int {
                if let Ok(i) = t.parse::<i64>() {
                    return FieldValue::Integer(i);
                }
            }
            if all_float {
                if let Ok(f) = t.parse::<f64>() {
                    return FieldValue::Float(f);
                }
            }
            FieldValue::String(c.clone())
        })
        .collect()
}

fn transpose(columns: Vec<Vec<FieldValue>>) -> Vec<Vec<FieldValue>> {
    let n_rows = columns.first().map_or(0, Vec::len);
    let mut rows: Vec<Vec<FieldValue>> = (0..n_rows)
        .map(|_| Vec::with_capacity(columns.len()))
        .collect();
    for col in columns {
        for (row, val) in rows.iter_mut().zip(col) {
            row.push(val);
        }
    }
    rows
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "State of Residence": "Texas", "Month": 1, "Sex of Infant": "F", "Births": 17012 },
///   ...
/// ]
/// ```
///
/// Column order is the order keys are first seen; keys absent from a row
/// read as `Null`.
fn load_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(|rec| rec.as_object())
        .map(|obj| {
            columns
                .iter()
                .map(|col| obj.get(col).map_or(FieldValue::Null, json_to_value))
                .collect()
        })
        .collect();

    Ok(Table { columns, rows })
}

fn json_to_value(val: &JsonValue) -> FieldValue {
    match val {
        JsonValue::String(s) => FieldValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                FieldValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                FieldValue::Float(f)
            } else {
                FieldValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => FieldValue::Bool(*b),
        JsonValue::Null => FieldValue::Null,
        other => FieldValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of scalar columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let values = batch
                .columns()
                .iter()
                .map(|col| extract_value(col, row))
                .collect();
            rows.push(values);
        }
    }

    Ok(Table { columns, rows })
}

/// Extract a single cell from an Arrow column at a given row.
///
/// Types without a direct `FieldValue` counterpart (dates, timestamps,
/// decimals, dictionaries, ...) are kept as their display text so a column
/// outside the four logical fields never blocks the load.
fn extract_value(col: &Arc<dyn Array>, row: usize) -> FieldValue {
    if col.is_null(row) {
        return FieldValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => FieldValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => FieldValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Boolean => FieldValue::Bool(col.as_boolean().value(row)),
        DataType::Int8 => FieldValue::Integer(col.as_primitive::<Int8Type>().value(row).into()),
        DataType::Int16 => FieldValue::Integer(col.as_primitive::<Int16Type>().value(row).into()),
        DataType::Int32 => FieldValue::Integer(col.as_primitive::<Int32Type>().value(row).into()),
        DataType::Int64 => FieldValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::UInt8 => FieldValue::Integer(col.as_primitive::<UInt8Type>().value(row).into()),
        DataType::UInt16 => FieldValue::Integer(col.as_primitive::<UInt16Type>().value(row).into()),
        DataType::UInt32 => FieldValue::Integer(col.as_primitive::<UInt32Type>().value(row).into()),
        DataType::Float32 => FieldValue::Float(col.as_primitive::<Float32Type>().value(row).into()),
        DataType::Float64 => FieldValue::Float(col.as_primitive::<Float64Type>().value(row)),
        other => match ArrayFormatter::try_new(&**col, &FormatOptions::default()) {
            Ok(fmt) => FieldValue::String(fmt.value(row).to_string()),
            Err(_) => FieldValue::String(format!("{other:?}")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_infer_integer_column() {
        let typed = infer_column(&strings(&["1", " 2", ""]));
        assert_eq!(
            typed,
            vec![FieldValue::Integer(1), FieldValue::Integer(2), FieldValue::Null]
        );
    }

    #[test]
    fn test_infer_float_column_promotes_integers() {
        let typed = infer_column(&strings(&["1", "2.5"]));
        assert_eq!(typed, vec![FieldValue::Float(1.0), FieldValue::Float(2.5)]);
    }

    #[test]
    fn test_infer_mixed_column_stays_text() {
        let typed = infer_column(&strings(&["10", "abc", "7"]));
        assert_eq!(
            typed,
            vec![
                FieldValue::text("10"),
                FieldValue::text("abc"),
                FieldValue::text("7"),
            ]
        );
    }

    #[test]
    fn test_na_markers_are_null() {
        let typed = infer_column(&strings(&["NA", "CA", "N/A", "null", "<NA>"]));
        assert_eq!(
            typed,
            vec![
                FieldValue::Null,
                FieldValue::text("CA"),
                FieldValue::Null,
                FieldValue::Null,
                FieldValue::Null,
            ]
        );
    }

    #[test]
    fn test_na_markers_do_not_block_numeric_typing() {
        let typed = infer_column(&strings(&["3", "NaN", "12"]));
        assert_eq!(
            typed,
            vec![FieldValue::Integer(3), FieldValue::Null, FieldValue::Integer(12)]
        );
    }

    #[test]
    fn test_transpose_columns_to_rows() {
        let rows = transpose(vec![
            vec![FieldValue::Integer(1), FieldValue::Integer(2)],
            vec![FieldValue::text("a"), FieldValue::text("b")],
        ]);
        assert_eq!(
            rows,
            vec![
                vec![FieldValue::Integer(1), FieldValue::text("a")],
                vec![FieldValue::Integer(2), FieldValue::text("b")],
            ]
        );
    }

    #[test]
    fn test_json_numbers_keep_integer_type() {
        let v: JsonValue = serde_json::json!(3);
        assert_eq!(json_to_value(&v), FieldValue::Integer(3));
        let v: JsonValue = serde_json::json!(3.5);
        assert_eq!(json_to_value(&v), FieldValue::Float(3.5));
    }
}
