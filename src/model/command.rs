use serde::{Deserialize, Serialize};

use crate::core::{LogicalPoint, LogicalRect};
use crate::render::TextHAlign;
use crate::style::{BrushId, FontId, PenId};

/// Command discriminant used in diagnostics and render reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    Line,
    FilledRect,
    PieSlice,
    Polygon,
    Text,
}

/// One ordered drawing instruction in logical coordinates.
///
/// Later commands paint over earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Line {
        from: LogicalPoint,
        to: LogicalPoint,
        pen: PenId,
    },
    FilledRect {
        rect: LogicalRect,
        #[serde(default)]
        pen: Option<PenId>,
        #[serde(default)]
        brush: Option<BrushId>,
    },
    /// Angles in degrees: 0° at 12 o'clock, positive spans clockwise.
    PieSlice {
        center: LogicalPoint,
        radius: f64,
        start_angle: f64,
        span_angle: f64,
        #[serde(default)]
        pen: Option<PenId>,
        #[serde(default)]
        brush: Option<BrushId>,
    },
    Polygon {
        points: Vec<LogicalPoint>,
        #[serde(default)]
        pen: Option<PenId>,
        #[serde(default)]
        brush: Option<BrushId>,
    },
    Text {
        text: String,
        rect: LogicalRect,
        font: FontId,
        #[serde(default)]
        align: TextHAlign,
    },
}

impl DrawCommand {
    #[must_use]
    pub fn line(from: LogicalPoint, to: LogicalPoint, pen: PenId) -> Self {
        Self::Line { from, to, pen }
    }

    #[must_use]
    pub fn filled_rect(rect: LogicalRect, pen: Option<PenId>, brush: Option<BrushId>) -> Self {
        Self::FilledRect { rect, pen, brush }
    }

    #[must_use]
    pub fn pie_slice(
        center: LogicalPoint,
        radius: f64,
        start_angle: f64,
        span_angle: f64,
        brush: BrushId,
    ) -> Self {
        Self::PieSlice {
            center,
            radius,
            start_angle,
            span_angle,
            pen: None,
            brush: Some(brush),
        }
    }

    #[must_use]
    pub fn polygon(points: Vec<LogicalPoint>, pen: Option<PenId>, brush: Option<BrushId>) -> Self {
        Self::Polygon { points, pen, brush }
    }

    #[must_use]
    pub fn text(text: impl Into<String>, rect: LogicalRect, font: FontId) -> Self {
        Self::Text {
            text: text.into(),
            rect,
            font,
            align: TextHAlign::Left,
        }
    }

    /// Builder-style alignment override; leaves non-text commands untouched.
    #[must_use]
    pub fn aligned(mut self, h_align: TextHAlign) -> Self {
        if let Self::Text { align, .. } = &mut self {
            *align = h_align;
        }
        self
    }

    #[must_use]
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Line { .. } => CommandKind::Line,
            Self::FilledRect { .. } => CommandKind::FilledRect,
            Self::PieSlice { .. } => CommandKind::PieSlice,
            Self::Polygon { .. } => CommandKind::Polygon,
            Self::Text { .. } => CommandKind::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CommandKind, DrawCommand};
    use crate::core::{LogicalPoint, LogicalRect};
    use crate::render::TextHAlign;
    use crate::style::{BrushId, FontId, PenId};

    #[test]
    fn json_uses_snake_case_kind_tag() {
        let command = DrawCommand::line(
            LogicalPoint::new(0.0, 0.0),
            LogicalPoint::new(1.0, 1.0),
            PenId::GRAPH,
        );
        let json = serde_json::to_value(&command).expect("serialize");
        assert_eq!(json["kind"], "line");
        assert_eq!(json["pen"], 3);
    }

    #[test]
    fn optional_styles_and_alignment_default_when_absent() {
        let rect: DrawCommand = serde_json::from_str(
            r#"{"kind":"filled_rect","rect":{"x":0.0,"y":0.0,"width":1.0,"height":1.0},"brush":1}"#,
        )
        .expect("rect");
        assert_eq!(
            rect,
            DrawCommand::filled_rect(LogicalRect::unit(), None, Some(BrushId::GRAPH_NORMAL))
        );

        let text: DrawCommand = serde_json::from_str(
            r#"{"kind":"text","text":"Net Worth","rect":{"x":0.0,"y":0.0,"width":1.0,"height":0.1},"font":1}"#,
        )
        .expect("text");
        assert_eq!(text.kind(), CommandKind::Text);
        assert_eq!(
            text,
            DrawCommand::text("Net Worth", LogicalRect::new(0.0, 0.0, 1.0, 0.1), FontId::TITLE)
        );
        assert_eq!(
            text.aligned(TextHAlign::Center),
            DrawCommand::Text {
                text: "Net Worth".to_owned(),
                rect: LogicalRect::new(0.0, 0.0, 1.0, 0.1),
                font: FontId::TITLE,
                align: TextHAlign::Center,
            }
        );
    }
}
