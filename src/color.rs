use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palettes
// ---------------------------------------------------------------------------

/// Red, dark red, light coral: the journey status pie colours.
pub const STATUS_PALETTE: [Color32; 3] = [
    Color32::from_rgb(255, 0, 0),
    Color32::from_rgb(139, 0, 0),
    Color32::from_rgb(240, 128, 128),
];

/// `n` distinct reds: hues spread over ±30° around red, lightness stepping
/// down so neighbours stay apart.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let t = if n > 1 { i as f32 / (n - 1) as f32 } else { 0.0 };
            let hue = -30.0 + 60.0 * t;
            let lightness = 0.65 - 0.3 * t;
            let hsl = Hsl::new(hue, 0.75, lightness);
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
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps the labels of a categorical column (statuses, classes) to distinct
/// colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Assign generated colours to labels in the order given.
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        Self::with_base(labels, &[])
    }

    /// Use `base` colours for the first labels, generated ones after that.
    pub fn with_base<'a>(labels: impl IntoIterator<Item = &'a str>, base: &[Color32]) -> Self {
        let labels: Vec<&str> = labels.into_iter().collect();
        let extra = generate_palette(labels.len().saturating_sub(base.len()));
        let palette: Vec<Color32> = base.iter().copied().chain(extra).collect();
        let mapping = labels
            .into_iter()
            .zip(palette)
            .map(|(label, c)| (label.to_string(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a label; unknown labels are grey.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}
