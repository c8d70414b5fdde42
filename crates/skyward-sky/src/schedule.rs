//! Frame scheduler: the host's per-frame callback hook.
//!
//! Callbacks run in registration order, once per [`FrameScheduler::dispatch`].
//! Each registration returns a [`FrameSubscription`] that cancels it.

use crate::host::FrameContext;

type FrameCallback = Box<dyn FnMut(&FrameContext)>;

/// Handle returned by [`FrameScheduler::on_frame`].
///
/// Pass it back to [`FrameScheduler::cancel`] to stop the callback.
#[derive(Debug, PartialEq, Eq, Hash)]
#[must_use = "dropping the subscription loses the only way to cancel the callback"]
pub struct FrameSubscription {
    id: u64,
}

impl FrameSubscription {
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Single-threaded list of frame callbacks.
#[derive(Default)]
pub struct FrameScheduler {
    next_id: u64,
    callbacks: Vec<(u64, FrameCallback)>,
    frame_count: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback to run every frame.
    pub fn on_frame(&mut self, callback: impl FnMut(&FrameContext) + 'static) -> FrameSubscription {
        let id = self.next_id;
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        FrameSubscription { id }
    }

    /// Remove a callback. Returns `false` if it was already gone.
    pub fn cancel(&mut self, subscription: FrameSubscription) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(id, _)| *id != subscription.id);
        self.callbacks.len() != before
    }

    /// Run every registered callback for one frame.
    pub fn dispatch(&mut self, ctx: &FrameContext) {
        for (_, callback) in &mut self.callbacks {
            callback(ctx);
        }
        self.frame_count += 1;
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Frames dispatched so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl std::fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("callbacks", &self.callbacks.len())
            .field("frame_count", &self.frame_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ctx(elapsed_ms: f64) -> FrameContext {
        FrameContext {
            now_ms: elapsed_ms,
            elapsed_ms,
            player_position: Vec3::ZERO,
            camera_euler: Vec3::ZERO,
        }
    }

    #[test]
    fn test_callbacks_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scheduler = FrameScheduler::new();

        let first = Rc::clone(&log);
        let _a = scheduler.on_frame(move |c| first.borrow_mut().push(("a", c.elapsed_ms)));
        let second = Rc::clone(&log);
        let _b = scheduler.on_frame(move |c| second.borrow_mut().push(("b", c.elapsed_ms)));

        scheduler.dispatch(&ctx(1.0));
        scheduler.dispatch(&ctx(2.0));

        assert_eq!(
            *log.borrow(),
            vec![("a", 1.0), ("b", 1.0), ("a", 2.0), ("b", 2.0)]
        );
        assert_eq!(scheduler.frame_count(), 2);
    }

    #[test]
    fn test_cancel_stops_callback() {
        let hits = Rc::new(RefCell::new(0));
        let mut scheduler = FrameScheduler::new();
        let counter = Rc::clone(&hits);
        let sub = scheduler.on_frame(move |_| *counter.borrow_mut() += 1);

        scheduler.dispatch(&ctx(0.0));
        let id = sub.id();
        assert!(scheduler.cancel(sub));
        assert!(scheduler.is_empty());
        scheduler.dispatch(&ctx(16.0));

        assert_eq!(*hits.borrow(), 1);
        assert!(!scheduler.cancel(FrameSubscription { id }));
    }

    #[test]
    fn test_subscription_ids_are_unique() {
        let mut scheduler = FrameScheduler::new();
        let a = scheduler.on_frame(|_| {});
        let b = scheduler.on_frame(|_| {});
        assert_ne!(a, b);
        assert_eq!(scheduler.len(), 2);
    }
}
