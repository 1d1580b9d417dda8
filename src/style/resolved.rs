use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::render::Color;

/// Dash lengths in device pixels; empty means a solid stroke.
pub type DashLengths = SmallVec<[f64; 4]>;

/// Concrete stroke ready for a canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPen {
    pub width_px: f64,
    pub color: Color,
    pub dash: DashLengths,
}

impl ResolvedPen {
    #[must_use]
    pub fn is_dashed(&self) -> bool {
        !self.dash.is_empty()
    }

    /// Whether a backend can stroke with this pen as-is.
    #[must_use]
    pub fn is_strokable(&self) -> bool {
        self.width_px.is_finite() && self.width_px >= 0.0 && dash_pattern_is_valid(&self.dash)
    }
}

/// Empty (solid) or finite non-negative lengths with at least one non-zero entry.
pub(crate) fn dash_pattern_is_valid(dash: &[f64]) -> bool {
    dash.iter().all(|len| len.is_finite() && *len >= 0.0)
        && (dash.is_empty() || dash.iter().any(|len| *len > 0.0))
}

/// Fill pattern layered over a brush's base color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillPattern {
    /// Top-to-bottom linear gradient from the brush color to `to`.
    VerticalGradient { to: Color },
}

/// Concrete fill ready for a canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBrush {
    pub color: Color,
    pub pattern: Option<FillPattern>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Concrete font ready for a canvas. `size_px` already includes the scale factor.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFont {
    pub family: String,
    pub size_px: f64,
    pub weight: FontWeight,
    pub color: Color,
}
