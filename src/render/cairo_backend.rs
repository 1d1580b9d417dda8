use std::fs::File;
use std::path::Path;

use cairo::{Context, Format, ImageSurface, LinearGradient};
use pango::FontDescription;

use crate::core::{DevicePoint, DeviceRect, DeviceSize, WedgeAngles};
use crate::error::{ChartError, ChartResult};
use crate::render::{CanvasSurface, Color, TextExtent, TextHAlign};
use crate::style::{FillPattern, FontWeight, ResolvedBrush, ResolvedFont, ResolvedPen};

/// Canvas drawing into a borrowed Cairo context with Pango text.
///
/// Used directly from GTK draw callbacks, where the context already applies
/// the widget's surface scale, and by [`CairoImageCanvas`] for offscreen output.
#[derive(Debug)]
pub struct CairoCanvas {
    context: Context,
    size: DeviceSize,
    scale_factor: f64,
    clipped: bool,
}

impl CairoCanvas {
    #[must_use]
    pub fn new(context: Context, size: DeviceSize) -> Self {
        Self {
            context,
            size,
            scale_factor: 1.0,
            clipped: false,
        }
    }

    #[must_use]
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    fn apply_pen(&self, pen: &ResolvedPen) {
        apply_color(&self.context, pen.color);
        self.context.set_line_width(pen.width_px);
        self.context.set_dash(&pen.dash, 0.0);
    }

    /// Fills then strokes the current path, consuming it even on failure.
    fn fill_and_stroke(
        &self,
        bounds: DeviceRect,
        pen: Option<&ResolvedPen>,
        brush: Option<&ResolvedBrush>,
    ) -> ChartResult<()> {
        let result = self.paint_path(bounds, pen, brush);
        self.context.new_path();
        result
    }

    fn paint_path(
        &self,
        bounds: DeviceRect,
        pen: Option<&ResolvedPen>,
        brush: Option<&ResolvedBrush>,
    ) -> ChartResult<()> {
        if let Some(brush) = brush {
            self.apply_brush(brush, bounds)?;
            self.context
                .fill_preserve()
                .map_err(|err| map_backend_error("failed to fill path", err))?;
        }
        if let Some(pen) = pen {
            self.apply_pen(pen);
            self.context
                .stroke_preserve()
                .map_err(|err| map_backend_error("failed to stroke path", err))?;
        }
        Ok(())
    }

    fn apply_brush(&self, brush: &ResolvedBrush, bounds: DeviceRect) -> ChartResult<()> {
        match brush.pattern {
            None => {
                apply_color(&self.context, brush.color);
                Ok(())
            }
            Some(FillPattern::VerticalGradient { to }) => {
                let gradient = LinearGradient::new(bounds.x, bounds.y, bounds.x, bounds.bottom());
                add_stop(&gradient, 0.0, brush.color);
                add_stop(&gradient, 1.0, to);
                self.context
                    .set_source(&gradient)
                    .map_err(|err| map_backend_error("failed to set gradient source", err))
            }
        }
    }

    fn text_layout(&self, text: &str, font: &ResolvedFont) -> pango::Layout {
        let layout = pangocairo::functions::create_layout(&self.context);
        let mut description = FontDescription::new();
        description.set_family(&font.family);
        description.set_absolute_size(font.size_px * f64::from(pango::SCALE));
        description.set_weight(match font.weight {
            FontWeight::Normal => pango::Weight::Normal,
            FontWeight::Bold => pango::Weight::Bold,
        });
        layout.set_font_description(Some(&description));
        layout.set_text(text);
        layout
    }
}

impl CanvasSurface for CairoCanvas {
    fn device_size(&self) -> DeviceSize {
        self.size
    }

    fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    fn clear(&mut self, color: Color) -> ChartResult<()> {
        apply_color(&self.context, color);
        self.context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))
    }

    fn set_clip(&mut self, clip: Option<DeviceRect>) -> ChartResult<()> {
        if self.clipped {
            self.context
                .restore()
                .map_err(|err| map_backend_error("failed to restore clip", err))?;
            self.clipped = false;
        }
        if let Some(rect) = clip {
            self.context
                .save()
                .map_err(|err| map_backend_error("failed to save clip", err))?;
            self.context.rectangle(rect.x, rect.y, rect.width, rect.height);
            self.context.clip();
            self.clipped = true;
        }
        Ok(())
    }

    fn draw_line(
        &mut self,
        from: DevicePoint,
        to: DevicePoint,
        pen: &ResolvedPen,
    ) -> ChartResult<()> {
        ensure_strokable(Some(pen))?;
        self.apply_pen(pen);
        self.context.move_to(from.x, from.y);
        self.context.line_to(to.x, to.y);
        let result = self
            .context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke line", err));
        self.context.new_path();
        result
    }

    fn draw_rect(
        &mut self,
        rect: DeviceRect,
        pen: Option<&ResolvedPen>,
        brush: Option<&ResolvedBrush>,
    ) -> ChartResult<()> {
        ensure_strokable(pen)?;
        self.context.rectangle(rect.x, rect.y, rect.width, rect.height);
        self.fill_and_stroke(rect, pen, brush)
    }

    fn draw_wedge(
        &mut self,
        center: DevicePoint,
        radius: f64,
        angles: WedgeAngles,
        pen: Option<&ResolvedPen>,
        brush: Option<&ResolvedBrush>,
    ) -> ChartResult<()> {
        ensure_strokable(pen)?;
        let (start, end) = angles.to_screen_radians();
        if angles.is_full_circle() {
            self.context.new_sub_path();
            self.context.arc(center.x, center.y, radius, start, end);
            self.context.close_path();
        } else {
            self.context.move_to(center.x, center.y);
            self.context.arc(center.x, center.y, radius, start, end);
            self.context.close_path();
        }
        let bounds = DeviceRect::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0);
        self.fill_and_stroke(bounds, pen, brush)
    }

    fn draw_polygon(
        &mut self,
        points: &[DevicePoint],
        pen: Option<&ResolvedPen>,
        brush: Option<&ResolvedBrush>,
    ) -> ChartResult<()> {
        ensure_strokable(pen)?;
        let Some(bounds) = DeviceRect::bounding(points) else {
            return Ok(());
        };
        let (first, rest) = (points[0], &points[1..]);
        self.context.move_to(first.x, first.y);
        for point in rest {
            self.context.line_to(point.x, point.y);
        }
        self.context.close_path();
        self.fill_and_stroke(bounds, pen, brush)
    }

    fn draw_text(
        &mut self,
        text: &str,
        rect: DeviceRect,
        font: &ResolvedFont,
        align: TextHAlign,
    ) -> ChartResult<()> {
        let layout = self.text_layout(text, font);
        let (text_width, text_height) = layout.pixel_size();
        let (text_width, text_height) = (f64::from(text_width), f64::from(text_height));
        let x = match align {
            TextHAlign::Left => rect.x,
            TextHAlign::Center => rect.x + (rect.width - text_width) / 2.0,
            TextHAlign::Right => rect.right() - text_width,
        };
        let y = rect.y + (rect.height - text_height) / 2.0;

        self.context
            .save()
            .map_err(|err| map_backend_error("failed to save text state", err))?;
        self.context.rectangle(rect.x, rect.y, rect.width, rect.height);
        self.context.clip();
        apply_color(&self.context, font.color);
        self.context.move_to(x, y);
        pangocairo::functions::show_layout(&self.context, &layout);
        self.context
            .restore()
            .map_err(|err| map_backend_error("failed to restore text state", err))
    }

    fn measure_text(&mut self, text: &str, font: &ResolvedFont) -> ChartResult<TextExtent> {
        let (width, height) = self.text_layout(text, font).pixel_size();
        Ok(TextExtent::new(f64::from(width), f64::from(height)))
    }
}

/// Offscreen ARGB image surface wrapped in a [`CairoCanvas`].
#[derive(Debug)]
pub struct CairoImageCanvas {
    surface: ImageSurface,
    canvas: CairoCanvas,
}

impl CairoImageCanvas {
    pub fn new(size: DeviceSize) -> ChartResult<Self> {
        size.validate()?;
        let width = i32::try_from(size.width)
            .map_err(|_| ChartError::InvalidData("surface width exceeds i32".to_owned()))?;
        let height = i32::try_from(size.height)
            .map_err(|_| ChartError::InvalidData("surface height exceeds i32".to_owned()))?;
        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        Ok(Self {
            surface,
            canvas: CairoCanvas::new(context, size),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn canvas_mut(&mut self) -> &mut CairoCanvas {
        &mut self.canvas
    }

    pub fn write_png(&self, path: impl AsRef<Path>) -> ChartResult<()> {
        let path = path.as_ref();
        let mut file = File::create(path).map_err(|err| {
            ChartError::InvalidData(format!("failed to create {}: {err}", path.display()))
        })?;
        self.surface.flush();
        self.surface.write_to_png(&mut file).map_err(|err| {
            ChartError::InvalidData(format!("failed to write png {}: {err}", path.display()))
        })
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn add_stop(gradient: &LinearGradient, offset: f64, color: Color) {
    gradient.add_color_stop_rgba(offset, color.red, color.green, color.blue, color.alpha);
}

fn ensure_strokable(pen: Option<&ResolvedPen>) -> ChartResult<()> {
    match pen {
        Some(pen) if !pen.is_strokable() => Err(ChartError::DegenerateGeometry(format!(
            "pen cannot be stroked: width={} dash={:?}",
            pen.width_px, pen.dash
        ))),
        _ => Ok(()),
    }
}

/// Bad input for one draw call skips that command; anything else means the
/// surface or context is gone.
fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    match err {
        cairo::Error::InvalidDash
        | cairo::Error::InvalidMatrix
        | cairo::Error::InvalidPathData
        | cairo::Error::NoCurrentPoint
        | cairo::Error::NegativeCount
        | cairo::Error::InvalidSize
        | cairo::Error::InvalidString => {
            ChartError::DegenerateGeometry(format!("{prefix}: {err}"))
        }
        _ => ChartError::CanvasUnavailable(format!("{prefix}: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::{CairoImageCanvas, map_backend_error};
    use crate::core::{DevicePoint, DeviceRect, DeviceSize, WedgeAngles};
    use crate::error::ChartError;
    use crate::render::{CanvasSurface, Color, TextHAlign};
    use crate::style::{
        Appearance, BrushId, FontId, PenId, ResolvedPen, StyleCache, StylePalette,
    };

    #[test]
    fn unstrokable_pen_fails_one_call_and_canvas_keeps_drawing() {
        let mut image = CairoImageCanvas::new(DeviceSize::new(40, 40)).expect("surface");
        let canvas = image.canvas_mut();
        let broken = ResolvedPen {
            width_px: 1.0,
            color: Color::BLACK,
            dash: smallvec![0.0, 0.0],
        };
        let solid = ResolvedPen {
            width_px: 1.0,
            color: Color::BLACK,
            dash: smallvec![],
        };

        let err = canvas
            .draw_line(DevicePoint::new(0.0, 0.0), DevicePoint::new(40.0, 40.0), &broken)
            .expect_err("zero dash pattern");
        assert!(matches!(err, ChartError::DegenerateGeometry(_)));
        assert!(!err.aborts_pass());
        assert!(
            canvas
                .draw_rect(DeviceRect::new(5.0, 5.0, 10.0, 10.0), Some(&broken), None)
                .is_err()
        );

        canvas
            .draw_line(DevicePoint::new(0.0, 40.0), DevicePoint::new(40.0, 0.0), &solid)
            .expect("context still usable");
        assert!(canvas.context().status().is_ok());
    }

    #[test]
    fn per_call_cairo_status_does_not_abort_the_pass() {
        assert!(matches!(
            map_backend_error("stroke", cairo::Error::InvalidDash),
            ChartError::DegenerateGeometry(_)
        ));
        assert!(map_backend_error("stroke", cairo::Error::SurfaceFinished).aborts_pass());
        assert!(map_backend_error("fill", cairo::Error::NoMemory).aborts_pass());
    }

    #[test]
    fn draws_every_primitive_on_image_surface() {
        let mut image = CairoImageCanvas::new(DeviceSize::new(120, 80)).expect("surface");
        let mut styles = StyleCache::new(StylePalette::standard(), Appearance::default());
        let pen = styles.resolve_pen(PenId::GRAPH).expect("pen");
        let brush = styles.resolve_brush(BrushId::GRAPH_NORMAL).expect("brush");
        let font = styles.resolve_font(FontId::AXIS_LABEL).expect("font");
        let canvas = image.canvas_mut();

        canvas.clear(Color::WHITE).expect("clear");
        canvas
            .draw_rect(DeviceRect::new(10.0, 10.0, 50.0, 30.0), Some(&pen), Some(&brush))
            .expect("rect");
        canvas
            .draw_line(DevicePoint::new(0.0, 0.0), DevicePoint::new(120.0, 80.0), &pen)
            .expect("line");
        canvas
            .draw_wedge(
                DevicePoint::new(90.0, 40.0),
                20.0,
                WedgeAngles::new(0.0, 120.0).expect("angles"),
                None,
                Some(&brush),
            )
            .expect("wedge");
        canvas
            .draw_polygon(
                &[
                    DevicePoint::new(0.0, 80.0),
                    DevicePoint::new(60.0, 40.0),
                    DevicePoint::new(120.0, 80.0),
                ],
                Some(&pen),
                None,
            )
            .expect("polygon");
        canvas
            .set_clip(Some(DeviceRect::new(0.0, 0.0, 60.0, 80.0)))
            .expect("clip");
        canvas
            .draw_text("Net Worth", DeviceRect::new(0.0, 60.0, 120.0, 20.0), &font, TextHAlign::Center)
            .expect("text");
        canvas.set_clip(None).expect("unclip");

        let extent = canvas.measure_text("Net Worth", &font).expect("measure");
        assert!(extent.width > 0.0);
        assert!(extent.height > 0.0);
    }
}
