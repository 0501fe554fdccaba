use std::path::Path;

use crate::color::ColorMap;
use crate::data::aggregate::AggregatedRow;
use crate::data::filter::FilterSelection;
use crate::data::model::{Dataset, Dimension, FieldValue};
use crate::error::{LoadError, RenderError};
use crate::pipeline;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Everything the dashboard shows, independent of rendering.
pub struct AppState {
    /// Loaded dataset, or the fatal error that stopped the load.
    pub dataset: Result<Dataset, LoadError>,

    /// Current sidebar selections.
    pub selection: FilterSelection,

    /// Outcome of the last render pass.
    pub outcome: Result<Vec<AggregatedRow>, RenderError>,

    /// Colour per infant-sex category.
    pub color_map: Option<ColorMap>,
}

impl AppState {
    /// Load the dataset at `path` and run the first render pass.
    pub fn load(path: &Path) -> Self {
        let dataset = pipeline::load_dataset(path);
        match &dataset {
            Ok(ds) => log::info!(
                "Loaded {} records from {} ({} columns)",
                ds.len(),
                path.display(),
                ds.columns.len()
            ),
            Err(e) => log::error!("Failed to load {}: {e}", path.display()),
        }
        Self::with_dataset(dataset)
    }

    pub fn with_dataset(dataset: Result<Dataset, LoadError>) -> Self {
        let color_map = dataset
            .as_ref()
            .ok()
            .map(|ds| ColorMap::new(ds.distinct(Dimension::Sex)));

        let mut state = Self {
            dataset,
            selection: FilterSelection::default(),
            outcome: Err(RenderError::NoData),
            color_map,
        };
        state.refresh();
        state
    }

    /// Recompute the aggregate from scratch for the current selection.
    pub fn refresh(&mut self) {
        if let Ok(ds) = &self.dataset {
            self.outcome = pipeline::render_pass(ds, &self.selection);
        }
    }

    /// Toggle the "All" choice of a dimension and recompute.
    pub fn set_all(&mut self, dimension: Dimension, on: bool) {
        self.selection.get_mut(dimension).set_all(on);
        self.refresh();
    }

    /// Toggle one value of a dimension and recompute.
    pub fn set_value(&mut self, dimension: Dimension, value: &FieldValue, on: bool) {
        self.selection.get_mut(dimension).set_value(value, on);
        self.refresh();
    }

    /// Restore every dimension to "All" and recompute.
    pub fn reset_filters(&mut self) {
        self.selection = FilterSelection::default();
        self.refresh();
    }
}
