use egui::{Color32, Visuals};

use crate::models::activity::RgbColor;

pub(crate) fn to_color32(colour: RgbColor) -> Color32 {
    Color32::from_rgb(colour.r, colour.g, colour.b)
}

/// Colours handed to newly added activities, cycled by position.
const SUGGESTED_COLOURS: [RgbColor; 8] = [
    RgbColor::new(0x3B, 0x82, 0xF6),
    RgbColor::new(0x10, 0xB9, 0x81),
    RgbColor::new(0xF5, 0x9E, 0x0B),
    RgbColor::new(0xEF, 0x44, 0x44),
    RgbColor::new(0x8B, 0x5C, 0xF6),
    RgbColor::new(0x14, 0xB8, 0xA6),
    RgbColor::new(0xF9, 0x73, 0x16),
    RgbColor::new(0x64, 0x74, 0x8B),
];

pub(crate) fn suggested_colour(index: usize) -> RgbColor {
    SUGGESTED_COLOURS[index % SUGGESTED_COLOURS.len()]
}

pub(crate) fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

#[derive(Clone, Copy)]
pub(crate) struct GridPalette {
    pub free: Color32,
    pub hour_line: Color32,
    pub row_line: Color32,
    pub label: Color32,
    pub header: Color32,
}

impl GridPalette {
    pub fn from_visuals(visuals: &Visuals) -> Self {
        if visuals.dark_mode {
            Self {
                free: Color32::from_gray(38),
                hour_line: Color32::from_gray(90),
                row_line: Color32::from_gray(52),
                label: Color32::from_gray(150),
                header: Color32::from_gray(210),
            }
        } else {
            Self {
                free: Color32::from_gray(246),
                hour_line: Color32::from_gray(170),
                row_line: Color32::from_gray(225),
                label: Color32::from_gray(110),
                header: Color32::from_gray(40),
            }
        }
    }

    /// Fill for a segment; the synthetic free band has no colour of its own.
    pub fn segment_fill(&self, colour: Option<RgbColor>) -> Color32 {
        colour.map(to_color32).unwrap_or(self.free)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_color32() {
        let colour = RgbColor::new(0x12, 0x34, 0x56);
        assert_eq!(to_color32(colour), Color32::from_rgb(0x12, 0x34, 0x56));
    }

    #[test]
    fn test_suggested_colour_cycles() {
        assert_eq!(suggested_colour(0), suggested_colour(SUGGESTED_COLOURS.len()));
        assert_ne!(suggested_colour(0), suggested_colour(1));
    }

    #[test]
    fn test_segment_fill_falls_back_to_free() {
        let palette = GridPalette::from_visuals(&Visuals::light());
        assert_eq!(palette.segment_fill(None), palette.free);
    }
}
