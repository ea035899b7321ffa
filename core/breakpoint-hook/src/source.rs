//! Width sources: where viewport widths come from.
//!
//! A source hands out the current width on demand and pushes every later
//! change to its subscribers. Delivery is single-threaded and serialized;
//! throttling fast resize streams is up to the source.

use std::cell::RefCell;
use std::rc::Rc;

/// Handle returned by [`WidthSource::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type WidthCallback = Box<dyn FnMut(u32)>;

pub trait WidthSource {
    /// `None` when no viewport exists yet (e.g. rendering off-screen).
    fn current_width(&self) -> Option<u32>;

    fn subscribe(&self, callback: WidthCallback) -> SubscriptionId;

    /// Returns false if `id` was not subscribed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

/// Negative widths become 0; values past `u32::MAX` saturate.
pub fn clamp_width(raw: i64) -> u32 {
    u32::try_from(raw.max(0)).unwrap_or(u32::MAX)
}

#[derive(Default)]
struct Inner {
    width: Option<u32>,
    next_id: u64,
    subscribers: Vec<(SubscriptionId, WidthCallback)>,
    /// Ids held by a running notification, and those removed since.
    in_flight: Vec<SubscriptionId>,
    removed_during_dispatch: Vec<SubscriptionId>,
    /// Latest width set from inside a callback, delivered after the current round.
    pending: Option<u32>,
    dispatching: bool,
}

/// In-memory width source driven by the host's own resize events.
///
/// Clones share one underlying source.
#[derive(Clone, Default)]
pub struct ManualWidthSource {
    inner: Rc<RefCell<Inner>>,
}

impl ManualWidthSource {
    /// A source with no viewport yet.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(width: u32) -> Self {
        let source = Self::default();
        source.inner.borrow_mut().width = Some(width);
        source
    }

    /// Stores `width` and notifies every subscriber.
    ///
    /// Subscribers added from inside a callback take effect after this
    /// notification finishes; removed ones are skipped from then on. A width
    /// set from inside a callback is stored at once and delivered to every
    /// subscriber when the current round ends, latest value only.
    pub fn set_width(&self, width: u32) {
        let mut subscribers = {
            let mut inner = self.inner.borrow_mut();
            inner.width = Some(width);
            if inner.dispatching {
                inner.pending = Some(width);
                return;
            }
            inner.dispatching = true;
            let subscribers = std::mem::take(&mut inner.subscribers);
            inner.in_flight = subscribers.iter().map(|(id, _)| *id).collect();
            subscribers
        };

        let mut next = Some(width);
        while let Some(width) = next {
            tracing::trace!(width, subscribers = subscribers.len(), "Dispatching width");
            for (id, callback) in subscribers.iter_mut() {
                if self.inner.borrow().removed_during_dispatch.contains(id) {
                    continue;
                }
                callback(width);
            }

            let mut inner = self.inner.borrow_mut();
            let removed = std::mem::take(&mut inner.removed_during_dispatch);
            subscribers.retain(|(id, _)| !removed.contains(id));
            inner.in_flight.retain(|id| !removed.contains(id));
            next = inner.pending.take();
        }

        let mut inner = self.inner.borrow_mut();
        inner.dispatching = false;
        inner.in_flight.clear();
        // Subscriptions made during dispatch were pushed onto the emptied list.
        subscribers.append(&mut inner.subscribers);
        inner.subscribers = subscribers;
    }

    /// Like [`Self::set_width`] for hosts that report signed pixel values.
    pub fn set_raw_width(&self, raw: i64) {
        self.set_width(clamp_width(raw));
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

impl WidthSource for ManualWidthSource {
    fn current_width(&self) -> Option<u32> {
        self.inner.borrow().width
    }

    fn subscribe(&self, callback: WidthCallback) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.subscribers.push((id, callback));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.borrow_mut();
        if let Some(pos) = inner.subscribers.iter().position(|(sub, _)| *sub == id) {
            inner.subscribers.remove(pos);
            return true;
        }
        if inner.in_flight.contains(&id) && !inner.removed_during_dispatch.contains(&id) {
            inner.removed_during_dispatch.push(id);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter(source: &ManualWidthSource) -> (Rc<Cell<u32>>, SubscriptionId) {
        let seen = Rc::new(Cell::new(0));
        let id = source.subscribe(Box::new({
            let seen = seen.clone();
            move |w| seen.set(w)
        }));
        (seen, id)
    }

    #[test]
    fn test_clamp_width() {
        assert_eq!(clamp_width(-5), 0);
        assert_eq!(clamp_width(0), 0);
        assert_eq!(clamp_width(1280), 1280);
        assert_eq!(clamp_width(i64::MAX), u32::MAX);
    }

    #[test]
    fn test_new_source_has_no_width() {
        assert_eq!(ManualWidthSource::new().current_width(), None);
        assert_eq!(ManualWidthSource::with_width(640).current_width(), Some(640));
    }

    #[test]
    fn test_set_width_notifies_subscribers() {
        let source = ManualWidthSource::new();
        let (seen, _) = counter(&source);

        source.set_width(1024);
        assert_eq!(seen.get(), 1024);
        assert_eq!(source.current_width(), Some(1024));
    }

    #[test]
    fn test_set_raw_width_clamps_negative() {
        let source = ManualWidthSource::with_width(500);
        let (seen, _) = counter(&source);

        source.set_raw_width(-20);
        assert_eq!(seen.get(), 0);
        assert_eq!(source.current_width(), Some(0));
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let source = ManualWidthSource::new();
        let (seen, id) = counter(&source);

        assert!(source.unsubscribe(id));
        assert!(!source.unsubscribe(id));
        source.set_width(900);
        assert_eq!(seen.get(), 0);
        assert_eq!(source.subscriber_count(), 0);
    }

    #[test]
    fn test_clones_share_subscribers() {
        let source = ManualWidthSource::new();
        let (seen, _) = counter(&source);

        source.clone().set_width(320);
        assert_eq!(seen.get(), 320);
    }

    #[test]
    fn test_subscribe_during_dispatch_applies_afterwards() {
        let source = ManualWidthSource::new();
        let late = Rc::new(Cell::new(0));

        source.subscribe(Box::new({
            let source = source.clone();
            let late = late.clone();
            let mut added = false;
            move |_| {
                if !added {
                    added = true;
                    let late = late.clone();
                    source.subscribe(Box::new(move |w| late.set(w)));
                }
            }
        }));

        source.set_width(100);
        assert_eq!(late.get(), 0);
        assert_eq!(source.subscriber_count(), 2);

        source.set_width(200);
        assert_eq!(late.get(), 200);
    }

    #[test]
    fn test_unsubscribe_self_during_dispatch() {
        let source = ManualWidthSource::new();
        let calls = Rc::new(Cell::new(0));
        let own_id: Rc<Cell<Option<SubscriptionId>>> = Rc::new(Cell::new(None));

        let id = source.subscribe(Box::new({
            let source = source.clone();
            let calls = calls.clone();
            let own_id = own_id.clone();
            move |_| {
                calls.set(calls.get() + 1);
                if let Some(id) = own_id.get() {
                    assert!(source.unsubscribe(id));
                }
            }
        }));
        own_id.set(Some(id));

        source.set_width(10);
        source.set_width(20);
        assert_eq!(calls.get(), 1);
        assert_eq!(source.subscriber_count(), 0);
    }
    #[test]
    fn test_width_set_inside_callback_reaches_every_subscriber() {
        let source = ManualWidthSource::new();
        let (before, _) = counter(&source);
        source.subscribe(Box::new({
            let source = source.clone();
            move |w| {
                if w < 1000 {
                    source.set_width(1000);
                }
            }
        }));
        let (after, _) = counter(&source);

        source.set_width(500);
        assert_eq!(source.current_width(), Some(1000));
        assert_eq!(before.get(), 1000);
        assert_eq!(after.get(), 1000);
        assert_eq!(source.subscriber_count(), 3);
    }

    #[test]
    fn test_only_latest_nested_width_is_redelivered() {
        let source = ManualWidthSource::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        source.subscribe(Box::new({
            let source = source.clone();
            move |w| {
                if w == 1 {
                    source.set_width(2);
                    source.set_width(3);
                }
            }
        }));
        source.subscribe(Box::new({
            let seen = seen.clone();
            move |w| seen.borrow_mut().push(w)
        }));

        source.set_width(1);
        assert_eq!(*seen.borrow(), [1, 3]);
    }

    #[test]
    fn test_unsubscribe_after_nested_set_width() {
        let source = ManualWidthSource::new();
        let calls = Rc::new(Cell::new(0));
        let own_id: Rc<Cell<Option<SubscriptionId>>> = Rc::new(Cell::new(None));

        let id = source.subscribe(Box::new({
            let source = source.clone();
            let calls = calls.clone();
            let own_id = own_id.clone();
            move |w| {
                calls.set(calls.get() + 1);
                source.set_width(w + 1);
                if let Some(id) = own_id.get() {
                    assert!(source.unsubscribe(id));
                }
            }
        }));
        own_id.set(Some(id));

        source.set_width(10);
        assert_eq!(source.current_width(), Some(11));
        source.set_width(20);
        assert_eq!(calls.get(), 1);
        assert_eq!(source.subscriber_count(), 0);
    }

    #[test]
    fn test_unsubscribe_later_subscriber_mid_round_skips_it() {
        let source = ManualWidthSource::new();
        let later: Rc<Cell<Option<SubscriptionId>>> = Rc::new(Cell::new(None));
        source.subscribe(Box::new({
            let source = source.clone();
            let later = later.clone();
            move |_| {
                if let Some(id) = later.get() {
                    source.unsubscribe(id);
                }
            }
        }));
        let (seen, id) = counter(&source);
        later.set(Some(id));

        source.set_width(42);
        assert_eq!(seen.get(), 0);
        assert_eq!(source.subscriber_count(), 1);
        assert!(!source.unsubscribe(id));
    }
}
