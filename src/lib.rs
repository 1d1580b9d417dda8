//! chart-canvas: toolkit-independent chart rendering core.
//!
//! Chart models describe their content as ordered [`model::DrawCommand`]s in a
//! logical coordinate space with symbolic pen, brush and font ids. A
//! [`api::ChartView`] maps that space onto a device canvas, resolves the ids
//! through a per-canvas [`style::StyleCache`] and replays the commands on any
//! [`render::CanvasSurface`] implementation.

pub mod api;
pub mod core;
pub mod error;
pub mod model;
pub mod render;
pub mod style;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{ChartView, ChartViewConfig};
pub use error::{ChartError, ChartResult};
