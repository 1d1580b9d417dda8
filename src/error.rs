use std::fmt;

use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

/// Style table a [`ChartError::UnknownStyleId`] was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKind {
    Pen,
    Brush,
    Font,
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pen => "pen",
            Self::Brush => "brush",
            Self::Font => "font",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("unknown {kind} style id: {id}")]
    UnknownStyleId { kind: StyleKind, id: u16 },

    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("canvas unavailable: {0}")]
    CanvasUnavailable(String),

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl ChartError {
    /// Errors that end the current repaint pass instead of a single command.
    #[must_use]
    pub fn aborts_pass(&self) -> bool {
        matches!(self, Self::CanvasUnavailable(_))
    }
}
