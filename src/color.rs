use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::FieldValue;

/// Fixed bar colour for female infants.
pub const FEMALE: Color32 = Color32::from_rgb(239, 85, 59);
/// Fixed bar colour for male infants.
pub const MALE: Color32 = Color32::from_rgb(99, 110, 250);

/// Colour for sex codes everyone recognises, so "F" is the same red and "M"
/// the same blue in every dataset regardless of which other codes appear.
fn named_sex_color(value: &FieldValue) -> Option<Color32> {
    let FieldValue::String(s) = value else {
        return None;
    };
    match s.trim().to_ascii_lowercase().as_str() {
        "f" | "female" => Some(FEMALE),
        "m" | "male" => Some(MALE),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Palette for the remaining codes
// ---------------------------------------------------------------------------

/// `n` evenly spaced hues for the codes without a fixed colour ("U",
/// "Unknown", numeric codes, ...). Muted, and starting at green, so they stay
/// apart from the red and blue.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (120.0 + (i as f32 / n as f32) * 360.0) % 360.0;
            let rgb: Srgb = Hsl::new(hue, 0.45, 0.5).into_color();
            let (r, g, b) = rgb.into_format::<u8>().into_components();
            Color32::from_rgb(r, g, b)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Sex category → bar colour
// ---------------------------------------------------------------------------

/// Bar colour per infant-sex category. Built once from every sex value in the
/// dataset so a category keeps its colour across filter changes.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<FieldValue, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new(categories: &BTreeSet<FieldValue>) -> Self {
        let (named, others): (Vec<_>, Vec<_>) = categories
            .iter()
            .partition(|v| named_sex_color(v).is_some());

        let mut mapping: BTreeMap<FieldValue, Color32> = named
            .into_iter()
            .filter_map(|v| Some((v.clone(), named_sex_color(v)?)))
            .collect();
        let palette = generate_palette(others.len());
        mapping.extend(others.into_iter().cloned().zip(palette));

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Categories outside the dataset fall back to gray.
    pub fn color_for(&self, value: &FieldValue) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Legend rows in category order.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(v, c)| (v.to_string(), *c))
            .collect()
    }
}
