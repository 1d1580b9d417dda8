//! Renderer-defined style palette and the per-canvas cache that resolves
//! symbolic pen, brush and font ids into concrete drawing resources.

mod cache;
mod ids;
mod palette;
mod resolved;

pub use cache::{StyleCache, StyleCacheStats};
pub use ids::{BrushId, FontId, PenId};
pub use palette::{
    Appearance, BrushPatternSpec, BrushSpec, FontSpec, PenSpec, StylePalette, Theme, ThemedColor,
};
pub use resolved::{
    DashLengths, FillPattern, FontWeight, ResolvedBrush, ResolvedFont, ResolvedPen,
};
