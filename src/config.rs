use std::path::PathBuf;

/// Dataset file name, resolved against the working directory.
pub const DATA_FILE: &str = "Provisional_Natality_2025_CDC.csv";

/// Fixed page settings. Nothing here is read from flags or files.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub window_title: String,
    pub title: String,
    pub subtitle: String,
    pub chart_title: String,
    pub inner_size: [f32; 2],
    pub min_inner_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DATA_FILE),
            window_title: "Natality Dashboard".to_string(),
            title: "Provisional Natality Data Dashboard".to_string(),
            subtitle: "Birth Analysis by State and Gender".to_string(),
            chart_title: "Total Births by State and Gender".to_string(),
            inner_size: [1280.0, 860.0],
            min_inner_size: [720.0, 480.0],
        }
    }
}
