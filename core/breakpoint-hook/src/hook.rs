//! Keeps a [`ResolvedState`] in step with a [`WidthSource`].
//!
//! The hook resolves once on construction, then again on every width the
//! source pushes. Each recomputation replaces the whole state and is handed
//! to every registered sink. A width equal to the last one is ignored.
//! Dropping the hook unsubscribes it from the source.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use breakpoint_core::{resolve, BreakpointConfig, ResolvedState, Result, ThresholdSet};

use crate::source::{SubscriptionId, WidthSource};

/// Handle returned by [`BreakpointHook::on_change`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SinkId(u64);

type Sink = Rc<RefCell<dyn FnMut(&ResolvedState)>>;

struct HookInner {
    thresholds: ThresholdSet,
    state: RefCell<ResolvedState>,
    sinks: RefCell<Vec<(SinkId, Sink)>>,
    next_sink: Cell<u64>,
}

impl HookInner {
    fn apply(&self, width: u32) {
        let previous = {
            let state = self.state.borrow();
            if state.width == width {
                tracing::trace!(width, "Width unchanged, skipping recompute");
                return;
            }
            state.current.clone()
        };

        let next = resolve(&self.thresholds, width);
        if next.current != previous {
            tracing::debug!(
                width,
                from = %previous,
                to = %next.current,
                "Breakpoint changed"
            );
        }
        *self.state.borrow_mut() = next.clone();

        // Snapshot so sinks may add or remove sinks while being notified.
        let sinks: Vec<Sink> = self
            .sinks
            .borrow()
            .iter()
            .map(|(_, sink)| sink.clone())
            .collect();
        for sink in sinks {
            (&mut *sink.borrow_mut())(&next);
        }
    }
}

pub struct BreakpointHook<S: WidthSource> {
    source: S,
    subscription: SubscriptionId,
    inner: Rc<HookInner>,
}

impl<S: WidthSource> BreakpointHook<S> {
    /// Merges `config` over the default thresholds and subscribes to `source`.
    pub fn new(source: S, config: &BreakpointConfig) -> Result<Self> {
        let thresholds = ThresholdSet::with_overrides(config)?;
        Ok(Self::with_thresholds(source, thresholds))
    }

    pub fn with_thresholds(source: S, thresholds: ThresholdSet) -> Self {
        // No viewport yet reads as width 0.
        let width = source.current_width().unwrap_or(0);
        let state = resolve(&thresholds, width);
        tracing::debug!(width, current = %state.current, "Breakpoint hook attached");

        let inner = Rc::new(HookInner {
            thresholds,
            state: RefCell::new(state),
            sinks: RefCell::new(Vec::new()),
            next_sink: Cell::new(0),
        });

        let weak: Weak<HookInner> = Rc::downgrade(&inner);
        let subscription = source.subscribe(Box::new(move |width| {
            if let Some(inner) = weak.upgrade() {
                inner.apply(width);
            }
        }));

        BreakpointHook {
            source,
            subscription,
            inner,
        }
    }

    /// The latest resolution.
    pub fn state(&self) -> ResolvedState {
        self.inner.state.borrow().clone()
    }

    pub fn width(&self) -> u32 {
        self.inner.state.borrow().width
    }

    pub fn thresholds(&self) -> &ThresholdSet {
        &self.inner.thresholds
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Re-reads the source's current width, for hosts that may have missed
    /// a notification.
    pub fn refresh(&self) {
        if let Some(width) = self.source.current_width() {
            self.inner.apply(width);
        }
    }

    /// Registers a sink called with every recomputed state. It is not called
    /// with the current state; read [`Self::state`] for that.
    pub fn on_change(&self, sink: impl FnMut(&ResolvedState) + 'static) -> SinkId {
        let id = SinkId(self.inner.next_sink.get());
        self.inner.next_sink.set(id.0 + 1);
        let sink: Sink = Rc::new(RefCell::new(sink));
        self.inner.sinks.borrow_mut().push((id, sink));
        id
    }

    pub fn remove_sink(&self, id: SinkId) -> bool {
        let mut sinks = self.inner.sinks.borrow_mut();
        match sinks.iter().position(|(sink, _)| *sink == id) {
            Some(pos) => {
                sinks.remove(pos);
                true
            }
            None => false,
        }
    }
}

impl<S: WidthSource> Drop for BreakpointHook<S> {
    fn drop(&mut self) {
        self.source.unsubscribe(self.subscription);
    }
}
