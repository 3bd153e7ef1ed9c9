use std::collections::BTreeMap;

use eframe::egui::Color32;
use iris_explorer::Species;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
///
/// `offset` rotates the hue wheel so the first colour is not always red.
pub fn generate_palette(n: usize, offset: f32) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = offset + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.6, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Hue of the first species, a soft teal.
const SPECIES_HUE_OFFSET: f32 = 160.0;

/// Accent for single-series charts (quantile plots).
pub const ACCENT: Color32 = Color32::from_rgb(255, 165, 0);

// ---------------------------------------------------------------------------
// Color mapping: species → Color32
// ---------------------------------------------------------------------------

/// One colour per species, shared by every chart and the filter panel.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<Species, Color32>,
    default_color: Color32,
}

impl Default for ColorMap {
    fn default() -> Self {
        let palette = generate_palette(Species::ALL.len(), SPECIES_HUE_OFFSET);
        let mapping = Species::ALL.into_iter().zip(palette).collect();
        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }
}

impl ColorMap {
    /// Look up the colour for a species.
    pub fn color_for(&self, species: Species) -> Color32 {
        self.mapping
            .get(&species)
            .copied()
            .unwrap_or(self.default_color)
    }
}

/// Scale the RGB channels of `color`, keeping alpha. Used to shade the faces
/// of 3D bars.
pub fn shade(color: Color32, factor: f32) -> Color32 {
    let f = |c: u8| ((c as f32 * factor).clamp(0.0, 255.0)) as u8;
    Color32::from_rgba_unmultiplied(f(color.r()), f(color.g()), f(color.b()), color.a())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_colours() {
        let p = generate_palette(3, 0.0);
        assert_eq!(p.len(), 3);
        assert_ne!(p[0], p[1]);
        assert_ne!(p[1], p[2]);
        assert!(generate_palette(0, 0.0).is_empty());
    }

    #[test]
    fn every_species_has_its_own_colour() {
        let cm = ColorMap::default();
        let colours: Vec<Color32> = Species::ALL.iter().map(|&s| cm.color_for(s)).collect();
        assert_ne!(colours[0], colours[1]);
        assert_ne!(colours[0], colours[2]);
    }

    #[test]
    fn shading_darkens_without_touching_alpha() {
        let c = Color32::from_rgba_unmultiplied(200, 100, 50, 255);
        let d = shade(c, 0.5);
        assert_eq!((d.r(), d.g(), d.b(), d.a()), (100, 50, 25, 255));
    }
}
