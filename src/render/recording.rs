use crate::core::{DevicePoint, DeviceRect, DeviceSize, WedgeAngles};
use crate::error::{ChartError, ChartResult};
use crate::render::{CanvasSurface, Color, TextExtent, TextHAlign};
use crate::style::{ResolvedBrush, ResolvedFont, ResolvedPen};

/// Average glyph advance relative to the font size used by [`RecordingCanvas`].
const GLYPH_ADVANCE_RATIO: f64 = 0.6;
const LINE_HEIGHT_RATIO: f64 = 1.2;

/// One primitive call captured by [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasCall {
    Line {
        from: DevicePoint,
        to: DevicePoint,
        pen: ResolvedPen,
    },
    Rect {
        rect: DeviceRect,
        pen: Option<ResolvedPen>,
        brush: Option<ResolvedBrush>,
    },
    Wedge {
        center: DevicePoint,
        radius: f64,
        angles: WedgeAngles,
        pen: Option<ResolvedPen>,
        brush: Option<ResolvedBrush>,
    },
    Polygon {
        points: Vec<DevicePoint>,
        pen: Option<ResolvedPen>,
        brush: Option<ResolvedBrush>,
    },
    Text {
        text: String,
        rect: DeviceRect,
        font: ResolvedFont,
        align: TextHAlign,
    },
}

/// Headless canvas that records every primitive instead of painting.
///
/// Used by tests and by hosts that want to inspect a chart without a real
/// drawing backend. Text is measured with a fixed per-glyph advance.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    size: DeviceSize,
    scale_factor: f64,
    calls: Vec<CanvasCall>,
    clears: Vec<Color>,
    clip: Option<DeviceRect>,
    clip_history: Vec<Option<DeviceRect>>,
    torn_down_after: Option<usize>,
}

impl RecordingCanvas {
    #[must_use]
    pub fn new(size: DeviceSize) -> Self {
        Self {
            size,
            scale_factor: 1.0,
            calls: Vec::new(),
            clears: Vec::new(),
            clip: None,
            clip_history: Vec::new(),
            torn_down_after: None,
        }
    }

    #[must_use]
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn resize(&mut self, size: DeviceSize) {
        self.size = size;
    }

    /// Simulates the platform destroying the surface: every call fails from now on.
    pub fn tear_down(&mut self) {
        self.torn_down_after = Some(self.calls.len());
    }

    /// Lets `remaining` more draw calls through, then behaves as torn down.
    pub fn tear_down_after(&mut self, remaining: usize) {
        self.torn_down_after = Some(self.calls.len() + remaining);
    }

    #[must_use]
    pub fn calls(&self) -> &[CanvasCall] {
        &self.calls
    }

    #[must_use]
    pub fn clears(&self) -> &[Color] {
        &self.clears
    }

    #[must_use]
    pub fn clip(&self) -> Option<DeviceRect> {
        self.clip
    }

    #[must_use]
    pub fn clip_history(&self) -> &[Option<DeviceRect>] {
        &self.clip_history
    }

    pub fn take_calls(&mut self) -> Vec<CanvasCall> {
        std::mem::take(&mut self.calls)
    }

    fn ensure_available(&self) -> ChartResult<()> {
        match self.torn_down_after {
            Some(limit) if self.calls.len() >= limit => Err(ChartError::CanvasUnavailable(
                "recording canvas was torn down".to_owned(),
            )),
            _ => Ok(()),
        }
    }

    fn record(&mut self, call: CanvasCall) -> ChartResult<()> {
        self.ensure_available()?;
        self.calls.push(call);
        Ok(())
    }
}

impl CanvasSurface for RecordingCanvas {
    fn device_size(&self) -> DeviceSize {
        self.size
    }

    fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    fn clear(&mut self, color: Color) -> ChartResult<()> {
        self.ensure_available()?;
        self.clears.push(color);
        Ok(())
    }

    fn set_clip(&mut self, clip: Option<DeviceRect>) -> ChartResult<()> {
        self.ensure_available()?;
        self.clip = clip;
        self.clip_history.push(clip);
        Ok(())
    }

    fn draw_line(
        &mut self,
        from: DevicePoint,
        to: DevicePoint,
        pen: &ResolvedPen,
    ) -> ChartResult<()> {
        self.record(CanvasCall::Line {
            from,
            to,
            pen: pen.clone(),
        })
    }

    fn draw_rect(
        &mut self,
        rect: DeviceRect,
        pen: Option<&ResolvedPen>,
        brush: Option<&ResolvedBrush>,
    ) -> ChartResult<()> {
        self.record(CanvasCall::Rect {
            rect,
            pen: pen.cloned(),
            brush: brush.cloned(),
        })
    }

    fn draw_wedge(
        &mut self,
        center: DevicePoint,
        radius: f64,
        angles: WedgeAngles,
        pen: Option<&ResolvedPen>,
        brush: Option<&ResolvedBrush>,
    ) -> ChartResult<()> {
        self.record(CanvasCall::Wedge {
            center,
            radius,
            angles,
            pen: pen.cloned(),
            brush: brush.cloned(),
        })
    }

    fn draw_polygon(
        &mut self,
        points: &[DevicePoint],
        pen: Option<&ResolvedPen>,
        brush: Option<&ResolvedBrush>,
    ) -> ChartResult<()> {
        self.record(CanvasCall::Polygon {
            points: points.to_vec(),
            pen: pen.cloned(),
            brush: brush.cloned(),
        })
    }

    fn draw_text(
        &mut self,
        text: &str,
        rect: DeviceRect,
        font: &ResolvedFont,
        align: TextHAlign,
    ) -> ChartResult<()> {
        self.record(CanvasCall::Text {
            text: text.to_owned(),
            rect,
            font: font.clone(),
            align,
        })
    }

    fn measure_text(&mut self, text: &str, font: &ResolvedFont) -> ChartResult<TextExtent> {
        self.ensure_available()?;
        let glyphs = text.chars().count() as f64;
        Ok(TextExtent::new(
            glyphs * font.size_px * GLYPH_ADVANCE_RATIO,
            font.size_px * LINE_HEIGHT_RATIO,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::{CanvasCall, RecordingCanvas};
    use crate::core::{DevicePoint, DeviceSize};
    use crate::error::ChartError;
    use crate::render::{CanvasSurface, Color};
    use crate::style::{FontWeight, ResolvedFont, ResolvedPen};

    fn pen() -> ResolvedPen {
        ResolvedPen {
            width_px: 1.0,
            color: Color::BLACK,
            dash: Default::default(),
        }
    }

    #[test]
    fn records_calls_in_order() {
        let mut canvas = RecordingCanvas::new(DeviceSize::new(10, 10));
        canvas
            .draw_line(DevicePoint::new(0.0, 0.0), DevicePoint::new(1.0, 1.0), &pen())
            .expect("line");
        canvas
            .draw_polygon(&[DevicePoint::new(0.0, 0.0)], Some(&pen()), None)
            .expect("polygon");

        assert!(matches!(canvas.calls()[0], CanvasCall::Line { .. }));
        assert!(matches!(canvas.calls()[1], CanvasCall::Polygon { .. }));
    }

    #[test]
    fn torn_down_canvas_rejects_calls() {
        let mut canvas = RecordingCanvas::new(DeviceSize::new(10, 10));
        canvas.tear_down();
        let err = canvas
            .draw_line(DevicePoint::new(0.0, 0.0), DevicePoint::new(1.0, 1.0), &pen())
            .expect_err("torn down");
        assert!(matches!(err, ChartError::CanvasUnavailable(_)));
        assert!(canvas.calls().is_empty());
    }

    #[test]
    fn text_measurement_scales_with_glyph_count() {
        let mut canvas = RecordingCanvas::new(DeviceSize::new(10, 10));
        let font = ResolvedFont {
            family: "Sans".to_owned(),
            size_px: 10.0,
            weight: FontWeight::Normal,
            color: Color::BLACK,
        };
        let extent = canvas.measure_text("abcd", &font).expect("measure");
        assert!((extent.width - 24.0).abs() < 1e-9);
        assert!((extent.height - 12.0).abs() < 1e-9);
    }
}
