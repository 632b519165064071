use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Tier;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues between
/// `start` and `end` degrees.
pub fn generate_palette(n: usize, start: f32, end: f32, lightness: f32) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    let step = if n > 1 { (end - start) / (n - 1) as f32 } else { 0.0 };
    (0..n)
        .map(|i| {
            let hue = start + step * i as f32;
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
// Tier colours: red (Low) → amber (Medium) → green (High)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct TierColors {
    strong: Vec<Color32>,
    soft: Vec<Color32>,
}

impl Default for TierColors {
    fn default() -> Self {
        let n = Tier::ALL.len();
        Self {
            strong: generate_palette(n, 0.0, 120.0, 0.45),
            soft: generate_palette(n, 0.0, 120.0, 0.85),
        }
    }
}

impl TierColors {
    /// Saturated colour for bars and text.
    pub fn strong(&self, tier: Tier) -> Color32 {
        self.strong
            .get(tier.index())
            .copied()
            .unwrap_or(Color32::GRAY)
    }

    /// Pale background for the result banner.
    pub fn soft(&self, tier: Tier) -> Color32 {
        self.soft
            .get(tier.index())
            .copied()
            .unwrap_or(Color32::LIGHT_GRAY)
    }
}
