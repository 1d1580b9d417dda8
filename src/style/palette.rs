use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

use super::resolved::dash_pattern_is_valid;
use super::{BrushId, FontId, FontWeight, PenId};

const GRAPH_LINE_WIDTH_PT: f64 = 2.0;
const GRAPH_AXIS_OVERLAY_WIDTH_PT: f64 = 0.2;
const GRAPH_LABEL_FONT_SIZE_PT: f64 = 10.0;
const GRAPH_TITLE_FONT_SIZE_PT: f64 = 15.0;
const DEFAULT_FONT_FAMILY: &str = "Sans";

const SLICE_COLORS: [u32; 6] = [0x5dbc56, 0x3c5bce, 0xc9a02d, 0xb64da2, 0x4da3a0, 0xc05b48];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Platform appearance a style cache resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Appearance {
    pub theme: Theme,
    scale_factor: OrderedFloat<f64>,
}

impl Appearance {
    /// Non-finite or non-positive scale factors fall back to `1.0`.
    #[must_use]
    pub fn new(theme: Theme, scale_factor: f64) -> Self {
        let scale_factor = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor
        } else {
            1.0
        };
        Self {
            theme,
            scale_factor: OrderedFloat(scale_factor),
        }
    }

    #[must_use]
    pub fn scale_factor(self) -> f64 {
        self.scale_factor.into_inner()
    }

    #[must_use]
    pub fn with_scale_factor(self, scale_factor: f64) -> Self {
        Self::new(self.theme, scale_factor)
    }
}

impl Default for Appearance {
    fn default() -> Self {
        Self::new(Theme::Light, 1.0)
    }
}

/// Color with one value per theme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThemedColor {
    pub light: Color,
    pub dark: Color,
}

impl ThemedColor {
    #[must_use]
    pub const fn new(light: Color, dark: Color) -> Self {
        Self { light, dark }
    }

    #[must_use]
    pub const fn same(color: Color) -> Self {
        Self::new(color, color)
    }

    #[must_use]
    pub fn pick(self, theme: Theme) -> Color {
        match theme {
            Theme::Light => self.light,
            Theme::Dark => self.dark,
        }
    }

    fn validate(self) -> ChartResult<()> {
        self.light.validate()?;
        self.dark.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenSpec {
    pub width_pt: f64,
    pub color: ThemedColor,
    /// Dash lengths in points; empty for a solid line.
    #[serde(default)]
    pub dash_pt: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BrushPatternSpec {
    #[default]
    Solid,
    VerticalGradient { to: ThemedColor },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrushSpec {
    pub color: ThemedColor,
    #[serde(default)]
    pub pattern: BrushPatternSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size_pt: f64,
    #[serde(default)]
    pub weight: FontWeight,
    pub color: ThemedColor,
}

/// Renderer-defined table of every pen, brush and font a model may select.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StylePalette {
    pub pens: IndexMap<PenId, PenSpec>,
    pub brushes: IndexMap<BrushId, BrushSpec>,
    pub fonts: IndexMap<FontId, FontSpec>,
}

impl StylePalette {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            pens: IndexMap::new(),
            brushes: IndexMap::new(),
            fonts: IndexMap::new(),
        }
    }

    /// Palette used by the balance graphs, bar graphs and pie charts.
    #[must_use]
    pub fn standard() -> Self {
        let axis = ThemedColor::new(Color::from_rgb_u32(0x333333), Color::from_rgb_u32(0xcccccc));
        let overlay = ThemedColor::new(
            Color::from_rgb_u32(0x808080).with_alpha(0.6),
            Color::from_rgb_u32(0xa0a0a0).with_alpha(0.6),
        );
        let graph = ThemedColor::new(Color::from_rgb_u32(0x2e5b9a), Color::from_rgb_u32(0x82a8f0));
        let today = ThemedColor::same(Color::from_rgb_u32(0xd62728));
        let text = ThemedColor::new(Color::from_rgb_u32(0x1e1e1e), Color::from_rgb_u32(0xe8e8e8));

        let mut pens = IndexMap::new();
        pens.insert(PenId::AXIS, pen(1.0, axis));
        pens.insert(PenId::AXIS_OVERLAY, pen(GRAPH_AXIS_OVERLAY_WIDTH_PT, overlay));
        pens.insert(PenId::GRAPH, pen(GRAPH_LINE_WIDTH_PT, graph));
        pens.insert(PenId::TODAY_LINE, pen(1.0, today));
        pens.insert(PenId::BAR, pen(1.0, graph));
        pens.insert(PenId::LEGEND, pen(1.0, overlay));

        let mut brushes = IndexMap::new();
        brushes.insert(
            BrushId::GRAPH_NORMAL,
            gradient(
                ThemedColor::new(Color::from_rgb_u32(0xb3c9ee), Color::from_rgb_u32(0x3d5f94)),
                ThemedColor::new(Color::from_rgb_u32(0x6d8fcf), Color::from_rgb_u32(0x24395b)),
            ),
        );
        brushes.insert(
            BrushId::GRAPH_FUTURE,
            gradient(
                ThemedColor::new(Color::from_rgb_u32(0xd9d9d9), Color::from_rgb_u32(0x5a5a5a)),
                ThemedColor::new(Color::from_rgb_u32(0xa6a6a6), Color::from_rgb_u32(0x3a3a3a)),
            ),
        );
        brushes.insert(
            BrushId::BAR_NORMAL,
            solid(ThemedColor::new(
                Color::from_rgb_u32(0x6d8fcf),
                Color::from_rgb_u32(0x5b7fc4),
            )),
        );
        brushes.insert(
            BrushId::BAR_FUTURE,
            solid(ThemedColor::new(
                Color::from_rgb_u32(0xbfbfbf),
                Color::from_rgb_u32(0x6a6a6a),
            )),
        );
        brushes.insert(
            BrushId::LEGEND,
            solid(ThemedColor::new(
                Color::WHITE.with_alpha(0.85),
                Color::from_rgb_u32(0x202020).with_alpha(0.85),
            )),
        );
        for (index, rgb) in SLICE_COLORS.iter().enumerate() {
            brushes.insert(
                BrushId::slice(index),
                solid(ThemedColor::same(Color::from_rgb_u32(*rgb))),
            );
        }

        let mut fonts = IndexMap::new();
        fonts.insert(
            FontId::TITLE,
            font(GRAPH_TITLE_FONT_SIZE_PT, FontWeight::Bold, text),
        );
        fonts.insert(
            FontId::AXIS_LABEL,
            font(GRAPH_LABEL_FONT_SIZE_PT, FontWeight::Normal, text),
        );
        fonts.insert(
            FontId::LEGEND,
            font(GRAPH_LABEL_FONT_SIZE_PT, FontWeight::Normal, text),
        );

        Self {
            pens,
            brushes,
            fonts,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (id, spec) in &self.pens {
            if !spec.width_pt.is_finite() || spec.width_pt <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "pen {id} width must be finite and > 0"
                )));
            }
            if !dash_pattern_is_valid(&spec.dash_pt) {
                return Err(ChartError::InvalidData(format!(
                    "pen {id} dash lengths must be finite, >= 0 and not all zero"
                )));
            }
            spec.color.validate()?;
        }
        for spec in self.brushes.values() {
            spec.color.validate()?;
            if let BrushPatternSpec::VerticalGradient { to } = spec.pattern {
                to.validate()?;
            }
        }
        for (id, spec) in &self.fonts {
            if !spec.size_pt.is_finite() || spec.size_pt <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "font {id} size must be finite and > 0"
                )));
            }
            if spec.family.trim().is_empty() {
                return Err(ChartError::InvalidData(format!(
                    "font {id} family must not be empty"
                )));
            }
            spec.color.validate()?;
        }
        Ok(())
    }
}

impl Default for StylePalette {
    fn default() -> Self {
        Self::standard()
    }
}

fn pen(width_pt: f64, color: ThemedColor) -> PenSpec {
    PenSpec {
        width_pt,
        color,
        dash_pt: Vec::new(),
    }
}

fn solid(color: ThemedColor) -> BrushSpec {
    BrushSpec {
        color,
        pattern: BrushPatternSpec::Solid,
    }
}

fn gradient(from: ThemedColor, to: ThemedColor) -> BrushSpec {
    BrushSpec {
        color: from,
        pattern: BrushPatternSpec::VerticalGradient { to },
    }
}

fn font(size_pt: f64, weight: FontWeight, color: ThemedColor) -> FontSpec {
    FontSpec {
        family: DEFAULT_FONT_FAMILY.to_owned(),
        size_pt,
        weight,
        color,
    }
}

#[cfg(test)]
mod tests {
    use super::{Appearance, StylePalette, Theme};
    use crate::style::{BrushId, FontId, PenId};

    #[test]
    fn standard_palette_is_valid_and_covers_known_ids() {
        let palette = StylePalette::standard();
        palette.validate().expect("valid palette");

        assert!(palette.pens.contains_key(&PenId::TODAY_LINE));
        assert!(palette.brushes.contains_key(&BrushId::slice(5)));
        assert!(palette.fonts.contains_key(&FontId::TITLE));
        assert_eq!(palette.pens[&PenId::GRAPH].width_pt, 2.0);
        assert_eq!(palette.fonts[&FontId::AXIS_LABEL].size_pt, 10.0);
    }

    #[test]
    fn zero_length_dash_pattern_is_rejected() {
        let mut palette = StylePalette::standard();
        if let Some(pen) = palette.pens.get_mut(&PenId::AXIS) {
            pen.dash_pt = vec![0.0, 0.0];
        }
        assert!(palette.validate().is_err());

        if let Some(pen) = palette.pens.get_mut(&PenId::AXIS) {
            pen.dash_pt = vec![0.0, 3.0];
        }
        palette.validate().expect("dots with gaps are valid");
    }

    #[test]
    fn slice_brushes_cycle() {
        assert_eq!(BrushId::slice(0), BrushId::SLICE_0);
        assert_eq!(BrushId::slice(7), BrushId::SLICE_1);
    }

    #[test]
    fn invalid_scale_factor_falls_back_to_one() {
        assert_eq!(Appearance::new(Theme::Dark, 0.0).scale_factor(), 1.0);
        assert_eq!(Appearance::new(Theme::Dark, f64::NAN).scale_factor(), 1.0);
        assert_eq!(Appearance::new(Theme::Dark, 2.0).scale_factor(), 2.0);
    }

    #[test]
    fn palette_json_round_trip_keeps_ids() {
        let palette = StylePalette::standard();
        let json = serde_json::to_string(&palette).expect("serialize");
        let restored: StylePalette = serde_json::from_str(&json).expect("deserialize");
        assert!(restored.pens.keys().eq(palette.pens.keys()));
        assert!(restored.brushes.keys().eq(palette.brushes.keys()));
        assert!(restored.fonts.keys().eq(palette.fonts.keys()));
        assert_eq!(restored.pens[&PenId::GRAPH].width_pt, 2.0);
    }
}
