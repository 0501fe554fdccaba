use std::path::PathBuf;

use thiserror::Error;

use crate::data::schema::LogicalField;

/// Logical fields that could not be matched to any column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing required logical fields: [{}]", keys(.missing))]
pub struct UnresolvedFields {
    /// Missing field keys, in resolution priority order.
    pub missing: Vec<LogicalField>,
    /// Every normalized column name of the dataset.
    pub available: Vec<String>,
}

fn keys(fields: &[LogicalField]) -> String {
    fields
        .iter()
        .map(|f| format!("'{}'", f.key()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Fatal conditions that stop the dashboard from rendering at all.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Dataset file not found in repository.")]
    NotFound(PathBuf),

    #[error("Error loading dataset: {0}")]
    Unreadable(String),

    #[error(transparent)]
    Schema(#[from] UnresolvedFields),
}

/// Recoverable outcome of a single render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("No data available for selected filters.")]
    NoData,
}
