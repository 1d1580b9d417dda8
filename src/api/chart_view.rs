use std::rc::{Rc, Weak};

use tracing::{debug, warn};

use crate::core::{DevicePoint, DeviceRect, DeviceSize, LogicalPoint, ScalePolicy, ViewportTransform};
use crate::error::{ChartError, ChartResult};
use crate::model::ChartModel;
use crate::render::{CanvasSurface, PassOutcome, RenderReport, TextExtent, render_commands};
use crate::style::{Appearance, FontId, StyleCache, StyleCacheStats};

use super::{
    ChartViewConfig, ManualRepaint, RedrawReason, RedrawReasons, RedrawState, RedrawTrigger,
    RepaintScheduler,
};

/// Callback telling the model's owner the canvas changed size.
pub type ResizeListener = Box<dyn FnMut(DeviceSize)>;

/// Rendering core bound to one canvas.
///
/// Owns the style cache and redraw trigger, holds only a weak reference to the
/// chart model and borrows the canvas for the duration of each repaint. Every
/// concrete chart reuses this type; they differ only in the commands their
/// model emits.
pub struct ChartView<S: RepaintScheduler = ManualRepaint> {
    config: ChartViewConfig,
    styles: StyleCache,
    trigger: RedrawTrigger<S>,
    model: Option<Weak<dyn ChartModel>>,
    canvas_size: Option<DeviceSize>,
    last_transform: Option<ViewportTransform>,
    resize_listener: Option<ResizeListener>,
}

impl<S: RepaintScheduler> ChartView<S> {
    pub fn new(config: ChartViewConfig, scheduler: S) -> ChartResult<Self> {
        config.validate()?;
        let styles = StyleCache::new(config.palette.clone(), Appearance::new(config.theme, 1.0));
        Ok(Self {
            config,
            styles,
            trigger: RedrawTrigger::new(scheduler),
            model: None,
            canvas_size: None,
            last_transform: None,
            resize_listener: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartViewConfig {
        &self.config
    }

    /// Replaces the configuration; the style cache starts over with the new palette.
    pub fn set_config(&mut self, config: ChartViewConfig) -> ChartResult<()> {
        config.validate()?;
        self.styles.set_palette(config.palette.clone());
        if config.theme != self.styles.appearance().theme {
            let appearance = Appearance::new(config.theme, self.styles.appearance().scale_factor());
            self.styles.invalidate(appearance);
        }
        self.config = config;
        self.trigger.notify(RedrawReason::ConfigChanged);
        Ok(())
    }

    pub fn set_scale_policy(&mut self, policy: ScalePolicy) {
        if self.config.scale_policy == policy {
            return;
        }
        self.config.scale_policy = policy;
        self.trigger.notify(RedrawReason::ConfigChanged);
    }

    /// Attaches `model` without taking ownership. Dropping the last strong
    /// reference elsewhere detaches it implicitly.
    pub fn set_model<M: ChartModel + 'static>(&mut self, model: &Rc<M>) {
        let weak: Weak<M> = Rc::downgrade(model);
        self.model = Some(weak);
        self.trigger.notify(RedrawReason::ModelChanged);
    }

    pub fn clear_model(&mut self) {
        self.model = None;
        self.trigger.notify(RedrawReason::ModelChanged);
    }

    #[must_use]
    pub fn has_live_model(&self) -> bool {
        self.model.as_ref().is_some_and(|model| model.strong_count() > 0)
    }

    /// Entry point for the model's owner whenever chart content changes.
    pub fn model_changed(&mut self) {
        self.trigger.notify(RedrawReason::ModelChanged);
    }

    /// Runs while the view is borrowed; hosts sharing the view behind a
    /// `RefCell` should notify from outside that borrow instead.
    pub fn set_resize_listener(&mut self, listener: impl FnMut(DeviceSize) + 'static) {
        self.resize_listener = Some(Box::new(listener));
    }

    /// Called by the platform view when the canvas changes size.
    pub fn on_canvas_resized(&mut self, size: DeviceSize) {
        if self.canvas_size == Some(size) {
            return;
        }
        debug!(width = size.width, height = size.height, "canvas resized");
        self.canvas_size = Some(size);
        self.trigger.notify(RedrawReason::CanvasResized);
        if let Some(listener) = self.resize_listener.as_mut() {
            listener(size);
        }
    }

    /// Called by the platform view on theme or pixel-density changes.
    pub fn on_appearance_changed(&mut self, appearance: Appearance) {
        self.config.theme = appearance.theme;
        self.styles.invalidate(appearance);
        self.trigger.notify(RedrawReason::AppearanceChanged);
    }

    /// Repaints the whole canvas now.
    pub fn repaint_now<C: CanvasSurface + ?Sized>(&mut self, canvas: &mut C) -> RenderReport {
        self.run_pass(canvas, None)
    }

    /// Repaints only `region`; commands entirely outside it are culled.
    pub fn repaint_region<C: CanvasSurface + ?Sized>(
        &mut self,
        canvas: &mut C,
        region: DeviceRect,
    ) -> RenderReport {
        self.run_pass(canvas, Some(region))
    }

    /// Repaints only when a notification is pending.
    pub fn repaint_if_dirty<C: CanvasSurface + ?Sized>(
        &mut self,
        canvas: &mut C,
    ) -> Option<RenderReport> {
        if !self.trigger.is_dirty() {
            return None;
        }
        Some(self.repaint_now(canvas))
    }

    /// Measures `text` with a palette font, for models that lay out labels.
    pub fn measure_text<C: CanvasSurface + ?Sized>(
        &mut self,
        canvas: &mut C,
        text: &str,
        font: FontId,
    ) -> ChartResult<TextExtent> {
        self.sync_scale_factor(canvas.scale_factor());
        let font = self.styles.resolve_font(font)?;
        canvas.measure_text(text, &font)
    }

    #[must_use]
    pub fn redraw_state(&self) -> RedrawState {
        self.trigger.state()
    }

    #[must_use]
    pub fn redraw_trigger(&self) -> &RedrawTrigger<S> {
        &self.trigger
    }

    #[must_use]
    pub fn appearance(&self) -> Appearance {
        self.styles.appearance()
    }

    #[must_use]
    pub fn style_cache(&self) -> &StyleCache {
        &self.styles
    }

    pub fn style_cache_mut(&mut self) -> &mut StyleCache {
        &mut self.styles
    }

    #[must_use]
    pub fn style_cache_stats(&self) -> StyleCacheStats {
        self.styles.stats()
    }

    /// Transform used by the most recent successful pass.
    #[must_use]
    pub fn last_transform(&self) -> Option<&ViewportTransform> {
        self.last_transform.as_ref()
    }

    /// Maps a device point (e.g. a mouse position) back into model space.
    #[must_use]
    pub fn device_to_logical(&self, point: DevicePoint) -> Option<LogicalPoint> {
        self.last_transform.map(|transform| transform.to_logical(point))
    }

    fn run_pass<C: CanvasSurface + ?Sized>(
        &mut self,
        canvas: &mut C,
        region: Option<DeviceRect>,
    ) -> RenderReport {
        self.sync_scale_factor(canvas.scale_factor());
        let size = canvas.device_size();
        let report = self.paint(canvas, region);
        // Only a pass covering the whole surface completes a pending repaint.
        let covers_canvas = region.is_none_or(|region| region.contains(size.bounds()));
        let reasons = if covers_canvas {
            self.trigger.finish_repaint()
        } else {
            RedrawReasons::none()
        };
        debug!(
            ?reasons,
            covers_canvas,
            outcome = ?report.outcome,
            drawn = report.drawn,
            skipped = report.skipped.len(),
            "repaint finished"
        );
        report
    }

    fn paint<C: CanvasSurface + ?Sized>(
        &mut self,
        canvas: &mut C,
        region: Option<DeviceRect>,
    ) -> RenderReport {
        let size = canvas.device_size();
        if !size.is_valid() {
            debug!(width = size.width, height = size.height, "skipping repaint of empty canvas");
            self.last_transform = None;
            return RenderReport::with_outcome(PassOutcome::EmptyViewport);
        }

        if region.is_some() {
            if let Err(error) = canvas.set_clip(region) {
                return aborted_before_commands(error);
            }
        }
        let report = self.paint_clipped(canvas, size, region);
        if region.is_some() {
            if let Err(error) = canvas.set_clip(None) {
                warn!(error = %error, "failed to reset canvas clip");
            }
        }
        report
    }

    fn paint_clipped<C: CanvasSurface + ?Sized>(
        &mut self,
        canvas: &mut C,
        size: DeviceSize,
        region: Option<DeviceRect>,
    ) -> RenderReport {
        let background = self.config.background.pick(self.styles.appearance().theme);
        if let Err(error) = canvas.clear(background) {
            return aborted_before_commands(error);
        }

        let Some(model) = self.model.as_ref().and_then(Weak::upgrade) else {
            debug!("no live chart model; canvas cleared only");
            self.last_transform = None;
            return RenderReport::with_outcome(PassOutcome::NoModel);
        };

        let transform =
            match ViewportTransform::new(size, model.logical_extent(), self.config.scale_policy) {
                Ok(transform) => transform,
                Err(error) => {
                    warn!(error = %error, "chart model extent cannot be mapped");
                    self.last_transform = None;
                    return RenderReport::with_outcome(PassOutcome::InvalidExtent(error));
                }
            };
        self.last_transform = Some(transform);

        let commands = model.draw_commands();
        render_commands(&commands, canvas, &transform, &mut self.styles, region)
    }

    fn sync_scale_factor(&mut self, scale_factor: f64) {
        let current = self.styles.appearance();
        let next = current.with_scale_factor(scale_factor);
        if next != current {
            self.styles.invalidate(next);
        }
    }
}

fn aborted_before_commands(error: ChartError) -> RenderReport {
    warn!(error = %error, "aborting repaint before drawing");
    RenderReport::with_outcome(PassOutcome::Aborted { at_index: 0, error })
}
