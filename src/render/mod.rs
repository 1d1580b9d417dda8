mod canvas;
mod interpreter;
mod primitives;
mod recording;

pub use canvas::CanvasSurface;
pub use interpreter::{PassOutcome, RenderReport, SkippedCommand, render_commands};
pub use primitives::{Color, TextExtent, TextHAlign};
pub use recording::{CanvasCall, RecordingCanvas};

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoCanvas, CairoImageCanvas};
