use tracing::trace;

/// Repaint scheduling state of one canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedrawState {
    #[default]
    Clean,
    Dirty,
}

/// Why a canvas became dirty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RedrawReason {
    ModelChanged,
    CanvasResized,
    AppearanceChanged,
    ConfigChanged,
}

impl RedrawReason {
    const fn bit(self) -> u8 {
        match self {
            Self::ModelChanged => 1 << 0,
            Self::CanvasResized => 1 << 1,
            Self::AppearanceChanged => 1 << 2,
            Self::ConfigChanged => 1 << 3,
        }
    }
}

/// Bitmask of reasons accumulated while a repaint was pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RedrawReasons {
    bits: u8,
}

impl RedrawReasons {
    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn from_reason(reason: RedrawReason) -> Self {
        Self { bits: reason.bit() }
    }

    #[must_use]
    pub const fn with_reason(self, reason: RedrawReason) -> Self {
        Self {
            bits: self.bits | reason.bit(),
        }
    }

    #[must_use]
    pub const fn contains(self, reason: RedrawReason) -> bool {
        (self.bits & reason.bit()) != 0
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.bits == 0
    }
}

/// Platform hook asked to run a repaint later, e.g. `gtk::Widget::queue_draw`.
pub trait RepaintScheduler {
    fn schedule_repaint(&mut self);
}

impl<F: FnMut()> RepaintScheduler for F {
    fn schedule_repaint(&mut self) {
        self()
    }
}

/// Scheduler for hosts that poll `ChartView::repaint_if_dirty` themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualRepaint;

impl RepaintScheduler for ManualRepaint {
    fn schedule_repaint(&mut self) {}
}

/// Two-state machine coalescing change notifications into one pending repaint.
#[derive(Debug)]
pub struct RedrawTrigger<S> {
    state: RedrawState,
    reasons: RedrawReasons,
    scheduler: S,
    scheduled: u64,
}

impl<S: RepaintScheduler> RedrawTrigger<S> {
    #[must_use]
    pub fn new(scheduler: S) -> Self {
        Self {
            state: RedrawState::Clean,
            reasons: RedrawReasons::none(),
            scheduler,
            scheduled: 0,
        }
    }

    /// Marks the canvas dirty. Returns `true` when this call scheduled a repaint,
    /// `false` when one was already pending.
    pub fn notify(&mut self, reason: RedrawReason) -> bool {
        self.reasons = self.reasons.with_reason(reason);
        match self.state {
            RedrawState::Dirty => {
                trace!(?reason, "repaint already pending");
                false
            }
            RedrawState::Clean => {
                self.state = RedrawState::Dirty;
                self.scheduled = self.scheduled.saturating_add(1);
                trace!(?reason, "schedule repaint");
                self.scheduler.schedule_repaint();
                true
            }
        }
    }

    /// Moves back to `Clean` and returns the reasons the finished repaint served.
    pub fn finish_repaint(&mut self) -> RedrawReasons {
        self.state = RedrawState::Clean;
        std::mem::take(&mut self.reasons)
    }

    #[must_use]
    pub fn state(&self) -> RedrawState {
        self.state
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.state == RedrawState::Dirty
    }

    #[must_use]
    pub fn pending_reasons(&self) -> RedrawReasons {
        self.reasons
    }

    /// Total repaints handed to the scheduler so far.
    #[must_use]
    pub fn scheduled_count(&self) -> u64 {
        self.scheduled
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

#[cfg(test)]
mod tests {
    use super::{ManualRepaint, RedrawReason, RedrawState, RedrawTrigger};

    #[test]
    fn first_notification_schedules_and_later_ones_coalesce() {
        let mut trigger = RedrawTrigger::new(ManualRepaint);
        assert!(trigger.notify(RedrawReason::ModelChanged));
        assert!(!trigger.notify(RedrawReason::CanvasResized));
        assert_eq!(trigger.state(), RedrawState::Dirty);
        assert_eq!(trigger.scheduled_count(), 1);

        let reasons = trigger.finish_repaint();
        assert!(reasons.contains(RedrawReason::ModelChanged));
        assert!(reasons.contains(RedrawReason::CanvasResized));
        assert!(!reasons.contains(RedrawReason::AppearanceChanged));
        assert_eq!(trigger.state(), RedrawState::Clean);
        assert!(trigger.pending_reasons().is_none());
    }

    #[test]
    fn notification_after_repaint_schedules_again() {
        let mut trigger = RedrawTrigger::new(ManualRepaint);
        trigger.notify(RedrawReason::ModelChanged);
        trigger.finish_repaint();
        assert!(trigger.notify(RedrawReason::ModelChanged));
        assert_eq!(trigger.scheduled_count(), 2);
    }
}
