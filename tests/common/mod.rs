//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

use natality_dashboard::data::aggregate::AggregatedRow;
use natality_dashboard::data::model::FieldValue;

/// The three-row scenario used throughout: two California rows in January,
/// one New York row in February.
pub const SCENARIO_CSV: &str = "\
State of Residence,Month,Sex of Infant,Births
CA,Jan,M,10
CA,Jan,F,5
NY,Feb,M,3
";

/// Write `contents` to `name` inside a fresh temporary directory.
pub fn write_temp_file(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);

    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    drop(file);

    (temp_dir, path)
}

pub fn create_temp_csv(contents: &str) -> (TempDir, PathBuf) {
    write_temp_file("natality.csv", contents)
}

pub fn text(values: &[&str]) -> Vec<FieldValue> {
    values.iter().map(|v| FieldValue::text(*v)).collect()
}

pub fn row(state: &str, sex: &str, births: f64) -> AggregatedRow {
    AggregatedRow {
        state: FieldValue::text(state),
        sex: FieldValue::text(sex),
        births,
    }
}
