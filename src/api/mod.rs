mod chart_view;
mod config;
mod redraw;

pub use chart_view::{ChartView, ResizeListener};
pub use config::ChartViewConfig;
pub use redraw::{
    ManualRepaint, RedrawReason, RedrawReasons, RedrawState, RedrawTrigger, RepaintScheduler,
};
