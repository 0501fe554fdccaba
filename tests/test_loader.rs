//! Unit tests for the file loaders

use std::sync::Arc;

use arrow::array::{Date32Array, Float64Array, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tempfile::TempDir;

use natality_dashboard::data::filter::FilterSelection;
use natality_dashboard::data::loader::load_file;
use natality_dashboard::data::model::{Dimension, FieldValue};
use natality_dashboard::data::schema::LogicalField;
use natality_dashboard::pipeline::{load_dataset, render_pass};

#[path = "common/mod.rs"]
mod common;

use common::{SCENARIO_CSV, create_temp_csv, row, write_temp_file};

#[test]
fn test_load_csv_keeps_header_order_and_types() {
    let (_dir, path) = create_temp_csv(SCENARIO_CSV);

    let table = load_file(&path).unwrap();

    assert_eq!(
        table.columns,
        vec!["State of Residence", "Month", "Sex of Infant", "Births"]
    );
    assert_eq!(table.rows.len(), 3);
    assert_eq!(
        table.rows[0],
        vec![
            FieldValue::text("CA"),
            FieldValue::text("Jan"),
            FieldValue::text("M"),
            FieldValue::Integer(10),
        ]
    );
}

#[test]
fn test_load_csv_strips_byte_order_mark() {
    let (_dir, path) = create_temp_csv(&format!("\u{feff}{SCENARIO_CSV}"));

    let table = load_file(&path).unwrap();

    assert_eq!(table.columns[0], "State of Residence");
}

#[test]
fn test_empty_cells_are_null() {
    let (_dir, path) = create_temp_csv(
        "state_of_residence,month,sex_of_infant,births\n\
         CA,,M,10\n\
         CA,Jan,F,\n",
    );

    let table = load_file(&path).unwrap();
    assert_eq!(table.rows[0][1], FieldValue::Null);
    assert_eq!(table.rows[1][3], FieldValue::Null);

    // The null births row is coerced away; the null month row survives.
    let ds = load_dataset(&path).unwrap();
    assert_eq!(ds.len(), 1);
    assert_eq!(ds.records[0].month, FieldValue::Null);
}

#[test]
fn test_load_tsv() {
    let (_dir, path) = write_temp_file(
        "natality.tsv",
        "State of Residence\tMonth\tSex of Infant\tBirths\nOhio\t3\tF\t812\n",
    );

    let ds = load_dataset(&path).unwrap();

    assert_eq!(ds.len(), 1);
    assert_eq!(ds.records[0].state, FieldValue::text("Ohio"));
    assert_eq!(ds.records[0].month, FieldValue::Integer(3));
    assert_eq!(ds.records[0].births, 812.0);
}

#[test]
fn test_load_json_records_in_key_order() {
    let (_dir, path) = write_temp_file(
        "natality.json",
        r#"[
            {"State of Residence": "Utah", "Month": 4, "Sex of Infant": "M", "Births": 1500},
            {"State of Residence": "Utah", "Month": 4, "Sex of Infant": "F", "Births": "n/a"},
            {"State of Residence": "Utah", "Month": 5, "Births": 1400.5}
        ]"#,
    );

    let table = load_file(&path).unwrap();
    assert_eq!(
        table.columns,
        vec!["State of Residence", "Month", "Sex of Infant", "Births"]
    );
    assert_eq!(table.rows[2][2], FieldValue::Null);

    let ds = load_dataset(&path).unwrap();
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.dropped_rows, 1);
    assert_eq!(ds.records[1].births, 1400.5);
}

#[test]
fn test_json_must_be_an_array() {
    let (_dir, path) = write_temp_file("natality.json", r#"{"Births": 1}"#);
    assert!(load_file(&path).is_err());
}

#[test]
fn test_load_parquet() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("natality.parquet");

    let schema = Arc::new(Schema::new(vec![
        Field::new("state_of_residence", DataType::Utf8, false),
        Field::new("month", DataType::Int32, false),
        Field::new("sex_of_infant", DataType::Utf8, false),
        Field::new("births", DataType::Float64, true),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(vec!["Iowa", "Iowa"])),
            Arc::new(Int32Array::from(vec![6, 6])),
            Arc::new(StringArray::from(vec!["F", "M"])),
            Arc::new(Float64Array::from(vec![Some(1700.0), None])),
        ],
    )
    .unwrap();

    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let ds = load_dataset(&path).unwrap();

    assert_eq!(ds.fields.column(LogicalField::Month).index, 1);
    assert_eq!(ds.len(), 1);
    assert_eq!(ds.dropped_rows, 1);
    assert_eq!(ds.records[0].month, FieldValue::Integer(6));
    assert_eq!(ds.records[0].births, 1700.0);
}

#[test]
fn test_na_markers_stay_out_of_options_and_groups() {
    let (_dir, path) = create_temp_csv(
        "state_of_residence,month,sex_of_infant,births\n\
         NA,1,F,5\n\
         CA,1,F,3\n\
         CA,N/A,NULL,4\n\
         CA,2,M,NaN\n",
    );

    let ds = load_dataset(&path).unwrap();

    // The NaN births row is coerced away; the other markers read as nulls.
    assert_eq!(ds.len(), 3);
    assert_eq!(ds.dropped_rows, 1);
    assert_eq!(ds.records[0].state, FieldValue::Null);
    assert_eq!(ds.records[2].month, FieldValue::Null);
    assert_eq!(ds.records[2].sex, FieldValue::Null);

    let states: Vec<_> = ds.distinct(Dimension::State).iter().cloned().collect();
    assert_eq!(states, vec![FieldValue::text("CA")]);
    let months: Vec<_> = ds.distinct(Dimension::Month).iter().cloned().collect();
    assert_eq!(months, vec![FieldValue::Integer(1)]);
    let sexes: Vec<_> = ds.distinct(Dimension::Sex).iter().cloned().collect();
    assert_eq!(sexes, vec![FieldValue::text("F")]);

    let rows = render_pass(&ds, &FilterSelection::default()).unwrap();
    assert_eq!(rows, vec![row("CA", "F", 3.0)]);
}

#[test]
fn test_parquet_with_unhandled_column_type_still_loads() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("natality.parquet");

    let schema = Arc::new(Schema::new(vec![
        Field::new("report_date", DataType::Date32, false),
        Field::new("state_of_residence", DataType::Utf8, false),
        Field::new("month", DataType::Int32, false),
        Field::new("sex_of_infant", DataType::Utf8, false),
        Field::new("births", DataType::Float64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            // 2025-01-15 as days since the epoch
            Arc::new(Date32Array::from(vec![20103])),
            Arc::new(StringArray::from(vec!["Iowa"])),
            Arc::new(Int32Array::from(vec![1])),
            Arc::new(StringArray::from(vec!["F"])),
            Arc::new(Float64Array::from(vec![1650.0])),
        ],
    )
    .unwrap();

    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let table = load_file(&path).unwrap();
    assert_eq!(table.rows[0][0], FieldValue::text("2025-01-15"));

    let ds = load_dataset(&path).unwrap();
    assert_eq!(ds.len(), 1);
    assert_eq!(ds.fields.column(LogicalField::StateOfResidence).index, 1);
    assert_eq!(ds.records[0].births, 1650.0);
}
