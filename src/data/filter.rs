use std::collections::BTreeSet;

use super::model::{Dataset, Dimension, FieldValue};

// ---------------------------------------------------------------------------
// Per-dimension selection
// ---------------------------------------------------------------------------

/// One multi-select control: the "All" choice plus any explicit values.
///
/// While "All" is selected the dimension imposes no restriction, whatever
/// else is selected alongside it. Without "All", only the listed values
/// pass; an empty list passes nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionFilter {
    all: bool,
    values: BTreeSet<FieldValue>,
}

impl Default for DimensionFilter {
    fn default() -> Self {
        Self::all()
    }
}

impl DimensionFilter {
    /// Only "All" selected.
    pub fn all() -> Self {
        Self {
            all: true,
            values: BTreeSet::new(),
        }
    }

    /// Exactly these values, without "All".
    pub fn only<I: IntoIterator<Item = FieldValue>>(values: I) -> Self {
        Self {
            all: false,
            values: values.into_iter().collect(),
        }
    }

    /// Add "All" to the current choices.
    pub fn with_all(mut self) -> Self {
        self.all = true;
        self
    }

    pub fn includes_all(&self) -> bool {
        self.all
    }

    pub fn is_selected(&self, value: &FieldValue) -> bool {
        self.values.contains(value)
    }

    pub fn selected(&self) -> &BTreeSet<FieldValue> {
        &self.values
    }

    pub fn set_all(&mut self, on: bool) {
        self.all = on;
    }

    pub fn set_value(&mut self, value: &FieldValue, on: bool) {
        if on {
            self.values.insert(value.clone());
        } else {
            self.values.remove(value);
        }
    }

    /// Whether a row carrying `value` passes this dimension.
    pub fn allows(&self, value: &FieldValue) -> bool {
        self.all || self.values.contains(value)
    }
}

// ---------------------------------------------------------------------------
// Full selection across the three dimensions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub months: DimensionFilter,
    pub states: DimensionFilter,
    pub sexes: DimensionFilter,
}

impl FilterSelection {
    pub fn get(&self, dimension: Dimension) -> &DimensionFilter {
        match dimension {
            Dimension::Month => &self.months,
            Dimension::State => &self.states,
            Dimension::Sex => &self.sexes,
        }
    }

    pub fn get_mut(&mut self, dimension: Dimension) -> &mut DimensionFilter {
        match dimension {
            Dimension::Month => &mut self.months,
            Dimension::State => &mut self.states,
            Dimension::Sex => &mut self.sexes,
        }
    }

    /// Replace one dimension's filter, builder-style.
    pub fn with(mut self, dimension: Dimension, filter: DimensionFilter) -> Self {
        *self.get_mut(dimension) = filter;
        self
    }
}

/// Return indices of records that pass every dimension (logical AND).
pub fn filtered_indices(dataset: &Dataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            Dimension::ALL
                .iter()
                .all(|&d| selection.get(d).allows(d.value_of(rec)))
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;
    use crate::data::schema::resolve_fields;

    fn sample() -> Dataset {
        let columns: Vec<String> = ["state_of_residence", "month", "sex_of_infant", "births"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let fields = resolve_fields(&columns).unwrap();
        let rec = |state: &str, month: &str, sex: &str, births: f64| Record {
            state: FieldValue::text(state),
            month: FieldValue::text(month),
            sex: FieldValue::text(sex),
            births,
        };
        let records = vec![
            rec("CA", "Jan", "M", 10.0),
            rec("CA", "Jan", "F", 5.0),
            rec("NY", "Feb", "M", 3.0),
        ];
        Dataset::with_records(records, columns, fields, 0)
    }

    fn text(values: &[&str]) -> Vec<FieldValue> {
        values.iter().map(|v| FieldValue::text(*v)).collect()
    }

    #[test]
    fn test_default_selection_keeps_everything() {
        let ds = sample();
        assert_eq!(filtered_indices(&ds, &FilterSelection::default()), vec![0, 1, 2]);
    }

    #[test]
    fn test_explicit_values_restrict() {
        let ds = sample();
        let sel = FilterSelection::default()
            .with(Dimension::State, DimensionFilter::only(text(&["CA"])));
        assert_eq!(filtered_indices(&ds, &sel), vec![0, 1]);
    }

    #[test]
    fn test_all_overrides_other_values_in_same_dimension() {
        let ds = sample();
        let sel = FilterSelection::default().with(
            Dimension::State,
            DimensionFilter::only(text(&["NY"])).with_all(),
        );
        assert_eq!(filtered_indices(&ds, &sel), vec![0, 1, 2]);
    }

    #[test]
    fn test_dimensions_combine_conjunctively() {
        let ds = sample();
        let sel = FilterSelection::default()
            .with(Dimension::Month, DimensionFilter::only(text(&["Jan", "Feb"])))
            .with(Dimension::Sex, DimensionFilter::only(text(&["M"])));
        assert_eq!(filtered_indices(&ds, &sel), vec![0, 2]);
    }

    #[test]
    fn test_empty_selection_without_all_passes_nothing() {
        let ds = sample();
        let sel = FilterSelection::default().with(Dimension::Sex, DimensionFilter::only(Vec::new()));
        assert!(filtered_indices(&ds, &sel).is_empty());
    }

    #[test]
    fn test_toggle_values() {
        let mut f = DimensionFilter::all();
        f.set_all(false);
        f.set_value(&FieldValue::text("CA"), true);
        assert!(f.allows(&FieldValue::text("CA")));
        assert!(!f.allows(&FieldValue::text("NY")));
        f.set_value(&FieldValue::text("CA"), false);
        assert!(f.selected().is_empty());
    }
}
