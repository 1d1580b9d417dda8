use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::glib::WeakRef;
use gtk4::prelude::*;

use crate::api::{ChartView, ChartViewConfig, RepaintScheduler};
use crate::core::DeviceSize;
use crate::error::ChartResult;
use crate::model::ChartModel;
use crate::render::CairoCanvas;

type SharedResizeListener = Rc<RefCell<Option<Box<dyn FnMut(DeviceSize)>>>>;

/// Schedules repaints through `gtk::Widget::queue_draw`.
#[derive(Clone)]
pub struct GtkRepaintScheduler {
    area: WeakRef<gtk::DrawingArea>,
}

impl RepaintScheduler for GtkRepaintScheduler {
    fn schedule_repaint(&mut self) {
        if let Some(area) = self.area.upgrade() {
            area.queue_draw();
        }
    }
}

/// `gtk::DrawingArea` wired to a [`ChartView`].
///
/// GTK hands the draw callback a Cairo context already scaled for the
/// monitor, so the canvas reports a scale factor of `1.0`.
pub struct GtkChartAdapter {
    area: gtk::DrawingArea,
    view: Rc<RefCell<ChartView<GtkRepaintScheduler>>>,
    resize_listener: SharedResizeListener,
}

impl GtkChartAdapter {
    pub fn new(config: ChartViewConfig) -> ChartResult<Self> {
        let area = gtk::DrawingArea::new();
        area.set_hexpand(true);
        area.set_vexpand(true);

        let scheduler = GtkRepaintScheduler {
            area: area.downgrade(),
        };
        let view = Rc::new(RefCell::new(ChartView::new(config, scheduler)?));
        let resize_listener: SharedResizeListener = Rc::new(RefCell::new(None));

        let draw_view = Rc::clone(&view);
        area.set_draw_func(move |_area, context, width, height| {
            let mut canvas = CairoCanvas::new(context.clone(), device_size(width, height));
            draw_view.borrow_mut().repaint_now(&mut canvas);
        });

        let resize_view = Rc::clone(&view);
        let listener = Rc::clone(&resize_listener);
        area.connect_resize(move |_area, width, height| {
            let size = device_size(width, height);
            resize_view.borrow_mut().on_canvas_resized(size);
            // The view borrow is released first so the listener may call back
            // into the adapter, e.g. to report a model change.
            if let Some(listener) = listener.borrow_mut().as_mut() {
                listener(size);
            }
        });

        Ok(Self {
            area,
            view,
            resize_listener,
        })
    }

    #[must_use]
    pub fn widget(&self) -> &gtk::DrawingArea {
        &self.area
    }

    pub fn set_model<M: ChartModel + 'static>(&self, model: &Rc<M>) {
        self.view.borrow_mut().set_model(model);
    }

    /// Call after mutating the attached model.
    pub fn model_changed(&self) {
        self.view.borrow_mut().model_changed();
    }

    /// Use this instead of [`ChartView::set_resize_listener`] here: the view
    /// runs its listener inside the adapter's `RefCell` borrow, so a callback
    /// that touches the adapter would panic. This one runs after the borrow ends.
    pub fn set_resize_listener(&self, listener: impl FnMut(DeviceSize) + 'static) {
        *self.resize_listener.borrow_mut() = Some(Box::new(listener));
    }

    #[must_use]
    pub fn view(&self) -> Rc<RefCell<ChartView<GtkRepaintScheduler>>> {
        Rc::clone(&self.view)
    }
}

fn device_size(width: i32, height: i32) -> DeviceSize {
    DeviceSize::new(
        u32::try_from(width).unwrap_or(0),
        u32::try_from(height).unwrap_or(0),
    )
}
