use std::{
    cell::RefCell,
    rc::Rc,
    time::Duration,
};

use log::debug;

pub trait TimerHandle {
    fn cancel(self);
}

/// Schedules callbacks on the event loop.
pub trait Timers {
    type Handle: TimerHandle + 'static;

    /// `None` when the timer couldn't be scheduled.
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Option<Self::Handle>;
}

/// No event loop to schedule on.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTimers;

impl TimerHandle for () {
    fn cancel(self) {}
}

impl Timers for NoTimers {
    type Handle = ();

    fn set_timeout(&self, _delay: Duration, _callback: Box<dyn FnOnce()>) -> Option<()> {
        None
    }
}

#[cfg(feature = "csr")]
mod browser {
    use std::time::Duration;

    use leptos::leptos_dom::helpers::{set_timeout_with_handle, TimeoutHandle};
    use log::warn;

    use super::{TimerHandle, Timers};

    #[derive(Clone, Copy, Debug, Default)]
    pub struct BrowserTimers;

    impl TimerHandle for TimeoutHandle {
        fn cancel(self) {
            self.clear();
        }
    }

    impl Timers for BrowserTimers {
        type Handle = TimeoutHandle;

        fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Option<TimeoutHandle> {
            set_timeout_with_handle(move || callback(), delay)
                .map_err(|e| warn!("Unable to set timeout {e:?}"))
                .ok()
        }
    }
}

#[cfg(feature = "csr")]
pub use browser::BrowserTimers;

/// What ended a race.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    Timeout,
    HitCallback,
    Unarmed,
}

/// Runs an action exactly once, on whichever comes first: a timeout or an
/// acknowledgement callback.
pub struct NavigationRace<H: TimerHandle> {
    action: RefCell<Option<Box<dyn FnOnce()>>>,
    timeout: RefCell<Option<H>>,
}

impl<H: TimerHandle + 'static> NavigationRace<H> {
    pub fn new(action: impl FnOnce() + 'static) -> Rc<Self> {
        Rc::new(Self {
            action: RefCell::new(Some(Box::new(action))),
            timeout: RefCell::new(None),
        })
    }

    /// Schedules the timeout leg. Returns false if no timer could be set.
    pub fn arm<T>(self: &Rc<Self>, timers: &T, delay: Duration) -> bool
    where
        T: Timers<Handle = H>,
    {
        let race = Rc::clone(self);
        let handle = timers.set_timeout(
            delay,
            Box::new(move || {
                // the timer already fired, nothing to cancel
                race.timeout.borrow_mut().take();
                race.finish(Trigger::Timeout);
            }),
        );
        match handle {
            Some(handle) => {
                *self.timeout.borrow_mut() = Some(handle);
                true
            }
            None => false,
        }
    }

    /// The acknowledgement leg, to hand to the analytics call.
    pub fn hit_callback(self: &Rc<Self>) -> Box<dyn FnOnce()> {
        let race = Rc::clone(self);
        Box::new(move || {
            race.finish(Trigger::HitCallback);
        })
    }

    /// Runs the action if nothing has yet. Returns whether this call did.
    pub fn finish(&self, trigger: Trigger) -> bool {
        let Some(action) = self.action.borrow_mut().take() else {
            debug!("navigation already done, {trigger:?} ignored");
            return false;
        };
        if let Some(handle) = self.timeout.borrow_mut().take() {
            handle.cancel();
        }
        debug!("navigating after {trigger:?}");
        action();
        true
    }
}
