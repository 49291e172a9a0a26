use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

struct Subscriber {
    /// Dropped once this target is gone; `None` lives as long as the signal
    owner: Option<Weak<SignalInner>>,
    callback: Box<dyn FnMut(bool)>,
}

impl Subscriber {
    fn is_live(&self) -> bool {
        self.owner
            .as_ref()
            .map_or(true, |owner| owner.strong_count() > 0)
    }
}

struct SignalInner {
    value: Cell<bool>,
    subscribers: RefCell<Vec<Subscriber>>,
    notifying: Cell<bool>,
    queued: RefCell<VecDeque<bool>>,
}

/// Observable boolean.
///
/// Subscribers run synchronously on the thread that calls `set`, and only when
/// the value actually changes. A `set` made from inside a subscriber is queued
/// and delivered to every subscriber once the current round finishes.
#[derive(Clone)]
pub struct Signal {
    inner: Rc<SignalInner>,
}

impl Signal {
    pub fn new(initial: bool) -> Self {
        Self {
            inner: Rc::new(SignalInner {
                value: Cell::new(initial),
                subscribers: RefCell::new(Vec::new()),
                notifying: Cell::new(false),
                queued: RefCell::new(VecDeque::new()),
            }),
        }
    }

    pub fn get(&self) -> bool {
        self.inner.value.get()
    }

    pub fn set(&self, value: bool) {
        if self.inner.value.replace(value) == value {
            return;
        }
        self.notify(value);
    }

    pub fn subscribe(&self, subscriber: impl FnMut(bool) + 'static) {
        self.push(None, Box::new(subscriber));
    }

    /// Number of subscribers still attached
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .borrow()
            .iter()
            .filter(|s| s.is_live())
            .count()
    }

    fn push(&self, owner: Option<Weak<SignalInner>>, callback: Box<dyn FnMut(bool)>) {
        let mut subscribers = self.inner.subscribers.borrow_mut();
        subscribers.retain(Subscriber::is_live);
        subscribers.push(Subscriber { owner, callback });
    }

    fn downgrade(&self) -> Weak<SignalInner> {
        Rc::downgrade(&self.inner)
    }

    fn notify(&self, value: bool) {
        if self.inner.notifying.replace(true) {
            self.inner.queued.borrow_mut().push_back(value);
            return;
        }

        let mut next = Some(value);
        while let Some(value) = next {
            // Subscribers are taken out while they run so they may subscribe or set signals.
            let mut running = std::mem::take(&mut *self.inner.subscribers.borrow_mut());
            running.retain(Subscriber::is_live);
            for subscriber in running.iter_mut() {
                (subscriber.callback)(value);
            }
            let mut slot = self.inner.subscribers.borrow_mut();
            let added = std::mem::replace(&mut *slot, running);
            slot.extend(added);
            drop(slot);

            next = self.inner.queued.borrow_mut().pop_front();
        }

        self.inner.notifying.set(false);
    }
}

impl std::fmt::Debug for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("value", &self.get())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Signal that is true iff every source is true, recomputed whenever a source changes.
///
/// The sources only hold the combined signal weakly; their subscriptions are
/// dropped once it is.
pub fn all_true(sources: &[Signal]) -> Signal {
    let combined = Signal::new(sources.iter().all(Signal::get));
    let weak_sources: Vec<Weak<SignalInner>> = sources.iter().map(Signal::downgrade).collect();

    for source in sources {
        let weak_sources = weak_sources.clone();
        let target = combined.downgrade();
        source.push(
            Some(target.clone()),
            Box::new(move |_| {
                let Some(target) = target.upgrade() else {
                    return;
                };
                let value = weak_sources
                    .iter()
                    .all(|s| s.upgrade().is_some_and(|s| s.value.get()));
                Signal { inner: target }.set(value);
            }),
        );
    }

    combined
}
