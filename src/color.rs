use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Class colours: class label → Color32
// ---------------------------------------------------------------------------

/// Distinct colour per class label, for the scatter series.
#[derive(Debug, Clone)]
pub struct ClassColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ClassColors {
    pub fn new(classes: &[String]) -> Self {
        let palette = generate_palette(classes.len());
        ClassColors {
            mapping: classes.iter().cloned().zip(palette).collect(),
            default_color: Color32::GRAY,
        }
    }

    /// Colour for `class`; [`ClassColors::other_color`] for labels outside
    /// the configured set.
    pub fn color_for(&self, class: &str) -> Color32 {
        self.mapping
            .get(class)
            .copied()
            .unwrap_or_else(|| self.other_color())
    }

    /// Colour of the series gathering unconfigured classes.
    pub fn other_color(&self) -> Color32 {
        self.default_color
    }
}
