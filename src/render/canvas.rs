use crate::core::{DevicePoint, DeviceRect, DeviceSize, WedgeAngles};
use crate::error::ChartResult;
use crate::render::{Color, TextExtent, TextHAlign};
use crate::style::{ResolvedBrush, ResolvedFont, ResolvedPen};

/// Contract implemented by any device canvas.
///
/// Coordinates are already in device pixels and styles already resolved, so
/// implementations never see chart-model concepts. Shapes taking both a pen
/// and a brush fill first and stroke second. A canvas that has been torn down
/// must return `ChartError::CanvasUnavailable`.
pub trait CanvasSurface {
    fn device_size(&self) -> DeviceSize;

    /// Device pixels per point; pen widths and font sizes are multiplied by it.
    fn scale_factor(&self) -> f64 {
        1.0
    }

    fn clear(&mut self, color: Color) -> ChartResult<()>;

    /// Restricts later drawing to `clip`, or lifts the restriction with `None`.
    fn set_clip(&mut self, clip: Option<DeviceRect>) -> ChartResult<()>;

    fn draw_line(&mut self, from: DevicePoint, to: DevicePoint, pen: &ResolvedPen)
    -> ChartResult<()>;

    fn draw_rect(
        &mut self,
        rect: DeviceRect,
        pen: Option<&ResolvedPen>,
        brush: Option<&ResolvedBrush>,
    ) -> ChartResult<()>;

    fn draw_wedge(
        &mut self,
        center: DevicePoint,
        radius: f64,
        angles: WedgeAngles,
        pen: Option<&ResolvedPen>,
        brush: Option<&ResolvedBrush>,
    ) -> ChartResult<()>;

    fn draw_polygon(
        &mut self,
        points: &[DevicePoint],
        pen: Option<&ResolvedPen>,
        brush: Option<&ResolvedBrush>,
    ) -> ChartResult<()>;

    /// Draws `text` vertically centered in `rect`, clipped to it.
    fn draw_text(
        &mut self,
        text: &str,
        rect: DeviceRect,
        font: &ResolvedFont,
        align: TextHAlign,
    ) -> ChartResult<()>;

    fn measure_text(&mut self, text: &str, font: &ResolvedFont) -> ChartResult<TextExtent>;
}
