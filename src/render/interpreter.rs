use std::rc::Rc;

use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::core::{DevicePoint, DeviceRect, LogicalPoint, ViewportTransform, WedgeAngles};
use crate::error::{ChartError, ChartResult};
use crate::model::{CommandKind, DrawCommand};
use crate::render::CanvasSurface;
use crate::style::{BrushId, PenId, ResolvedBrush, ResolvedPen, StyleCache};

/// How a repaint pass ended.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PassOutcome {
    #[default]
    Completed,
    /// The canvas went away; commands from `at_index` on were not drawn.
    Aborted { at_index: usize, error: ChartError },
    /// No live model was attached; the canvas was only cleared.
    NoModel,
    /// The canvas reported a zero-sized surface.
    EmptyViewport,
    /// The model's logical extent could not be mapped.
    InvalidExtent(ChartError),
}

/// Command dropped from a pass, with the reason it was dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedCommand {
    pub index: usize,
    pub kind: CommandKind,
    pub error: ChartError,
}

/// Per-pass accounting returned by every repaint.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderReport {
    pub outcome: PassOutcome,
    /// Commands that produced exactly one canvas primitive.
    pub drawn: usize,
    /// Valid commands with nothing to paint (no pen and no brush, empty polygon or text).
    pub noops: usize,
    /// Commands entirely outside the repaint region.
    pub culled: usize,
    pub skipped: Vec<SkippedCommand>,
}

impl RenderReport {
    #[must_use]
    pub(crate) fn with_outcome(outcome: PassOutcome) -> Self {
        Self {
            outcome,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.outcome == PassOutcome::Completed
    }
}

enum CommandStep {
    Drawn,
    NoOp,
    Culled,
}

/// Dispatches `commands` to `canvas` in order.
///
/// Style and geometry failures skip only the offending command.
/// `ChartError::CanvasUnavailable` stops the pass. When `region` is given,
/// commands whose device bounds miss it are culled without touching the canvas.
pub fn render_commands<C: CanvasSurface + ?Sized>(
    commands: &[DrawCommand],
    canvas: &mut C,
    transform: &ViewportTransform,
    styles: &mut StyleCache,
    region: Option<DeviceRect>,
) -> RenderReport {
    let mut interpreter = CommandInterpreter {
        canvas,
        transform,
        styles,
        region,
    };
    let mut report = RenderReport::default();

    for (index, command) in commands.iter().enumerate() {
        match interpreter.dispatch(command) {
            Ok(CommandStep::Drawn) => report.drawn += 1,
            Ok(CommandStep::NoOp) => report.noops += 1,
            Ok(CommandStep::Culled) => report.culled += 1,
            Err(error) if error.aborts_pass() => {
                warn!(
                    index,
                    remaining = commands.len() - index,
                    error = %error,
                    "aborting repaint pass"
                );
                report.outcome = PassOutcome::Aborted {
                    at_index: index,
                    error,
                };
                return report;
            }
            Err(error) => {
                warn!(
                    index,
                    kind = ?command.kind(),
                    error = %error,
                    "skipping draw command"
                );
                report.skipped.push(SkippedCommand {
                    index,
                    kind: command.kind(),
                    error,
                });
            }
        }
    }

    trace!(
        drawn = report.drawn,
        noops = report.noops,
        culled = report.culled,
        skipped = report.skipped.len(),
        "render pass finished"
    );
    report
}

struct CommandInterpreter<'a, C: ?Sized> {
    canvas: &'a mut C,
    transform: &'a ViewportTransform,
    styles: &'a mut StyleCache,
    region: Option<DeviceRect>,
}

impl<C: CanvasSurface + ?Sized> CommandInterpreter<'_, C> {
    fn dispatch(&mut self, command: &DrawCommand) -> ChartResult<CommandStep> {
        match command {
            DrawCommand::Line { from, to, pen } => self.line(*from, *to, *pen),
            DrawCommand::FilledRect { rect, pen, brush } => {
                rect.validate("rectangle")?;
                if pen.is_none() && brush.is_none() {
                    return Ok(CommandStep::NoOp);
                }
                let (pen, brush) = self.resolve_pen_and_brush(*pen, *brush)?;
                let device = self.transform.rect_to_device(*rect);
                ensure_finite_rect(device)?;
                if !self.visible(device, pen.as_deref()) {
                    return Ok(CommandStep::Culled);
                }
                self.canvas
                    .draw_rect(device, pen.as_deref(), brush.as_deref())?;
                Ok(CommandStep::Drawn)
            }
            DrawCommand::PieSlice {
                center,
                radius,
                start_angle,
                span_angle,
                pen,
                brush,
            } => {
                center.validate("pie center")?;
                if !radius.is_finite() || *radius < 0.0 {
                    return Err(ChartError::DegenerateGeometry(format!(
                        "pie radius must be finite and >= 0, got {radius}"
                    )));
                }
                let angles = WedgeAngles::new(*start_angle, *span_angle)?;
                if pen.is_none() && brush.is_none() {
                    return Ok(CommandStep::NoOp);
                }
                let (pen, brush) = self.resolve_pen_and_brush(*pen, *brush)?;
                let center = self.device_point(*center)?;
                let radius = self.transform.length_to_device(*radius);
                if !radius.is_finite() {
                    return Err(ChartError::DegenerateGeometry(
                        "pie radius overflows device space".to_owned(),
                    ));
                }
                let bounds =
                    DeviceRect::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0);
                if !self.visible(bounds, pen.as_deref()) {
                    return Ok(CommandStep::Culled);
                }
                self.canvas
                    .draw_wedge(center, radius, angles, pen.as_deref(), brush.as_deref())?;
                Ok(CommandStep::Drawn)
            }
            DrawCommand::Polygon { points, pen, brush } => {
                if points.is_empty() {
                    return Ok(CommandStep::NoOp);
                }
                for point in points {
                    point.validate("polygon vertex")?;
                }
                if pen.is_none() && brush.is_none() {
                    return Ok(CommandStep::NoOp);
                }
                let (pen, brush) = self.resolve_pen_and_brush(*pen, *brush)?;
                let device = points
                    .iter()
                    .map(|point| self.device_point(*point))
                    .collect::<ChartResult<SmallVec<[DevicePoint; 16]>>>()?;
                let Some(bounds) = DeviceRect::bounding(&device) else {
                    return Ok(CommandStep::NoOp);
                };
                if !self.visible(bounds, pen.as_deref()) {
                    return Ok(CommandStep::Culled);
                }
                self.canvas
                    .draw_polygon(&device, pen.as_deref(), brush.as_deref())?;
                Ok(CommandStep::Drawn)
            }
            DrawCommand::Text {
                text,
                rect,
                font,
                align,
            } => {
                if text.is_empty() {
                    return Ok(CommandStep::NoOp);
                }
                rect.validate("text rectangle")?;
                let font = self.styles.resolve_font(*font)?;
                // Only the box follows the transform; the font size comes from the palette.
                let device = self.transform.rect_to_device(*rect);
                ensure_finite_rect(device)?;
                if !self.visible(device, None) {
                    return Ok(CommandStep::Culled);
                }
                self.canvas.draw_text(text, device, &font, *align)?;
                Ok(CommandStep::Drawn)
            }
        }
    }

    fn line(&mut self, from: LogicalPoint, to: LogicalPoint, pen: PenId) -> ChartResult<CommandStep> {
        from.validate("line start")?;
        to.validate("line end")?;
        let pen = self.styles.resolve_pen(pen)?;
        let from = self.device_point(from)?;
        let to = self.device_point(to)?;
        if !self.visible(DeviceRect::from_corners(from, to), Some(&pen)) {
            return Ok(CommandStep::Culled);
        }
        self.canvas.draw_line(from, to, &pen)?;
        Ok(CommandStep::Drawn)
    }

    fn resolve_pen_and_brush(
        &mut self,
        pen: Option<PenId>,
        brush: Option<BrushId>,
    ) -> ChartResult<(Option<Rc<ResolvedPen>>, Option<Rc<ResolvedBrush>>)> {
        let pen = pen.map(|id| self.styles.resolve_pen(id)).transpose()?;
        let brush = brush.map(|id| self.styles.resolve_brush(id)).transpose()?;
        Ok((pen, brush))
    }

    fn device_point(&self, point: LogicalPoint) -> ChartResult<DevicePoint> {
        let device = self.transform.to_device(point);
        if device.x.is_finite() && device.y.is_finite() {
            Ok(device)
        } else {
            Err(ChartError::DegenerateGeometry(format!(
                "point ({}, {}) overflows device space",
                point.x, point.y
            )))
        }
    }

    fn visible(&self, bounds: DeviceRect, pen: Option<&ResolvedPen>) -> bool {
        let Some(region) = self.region else {
            return true;
        };
        let half_stroke = pen.map_or(0.0, |pen| pen.width_px / 2.0);
        region.intersects(bounds.inflate(half_stroke))
    }
}

fn ensure_finite_rect(rect: DeviceRect) -> ChartResult<()> {
    if rect.x.is_finite() && rect.y.is_finite() && rect.width.is_finite() && rect.height.is_finite()
    {
        Ok(())
    } else {
        Err(ChartError::DegenerateGeometry(
            "rectangle overflows device space".to_owned(),
        ))
    }
}
