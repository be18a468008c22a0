// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use std::sync::Arc;
use surge_core::{Demand, Subscription};

/// One call received by a [`CustomSubscription`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionEvent {
    Requested(Demand),
    Cancelled,
}

type RequestHook = Arc<dyn Fn(Demand) + Send + Sync>;
type CancelHook = Arc<dyn Fn() + Send + Sync>;

/// Scripted subscription that records every `request` and `cancel`.
///
/// Unlike a real subscription it records repeated cancels too, which is what
/// exactly-once assertions need.
#[derive(Default)]
pub struct CustomSubscription {
    history: Mutex<Vec<SubscriptionEvent>>,
    on_request: Mutex<Option<RequestHook>>,
    on_cancel: Mutex<Option<CancelHook>>,
}

impl CustomSubscription {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn history(&self) -> Vec<SubscriptionEvent> {
        self.history.lock().clone()
    }

    pub fn cancel_count(&self) -> usize {
        self.history
            .lock()
            .iter()
            .filter(|event| matches!(event, SubscriptionEvent::Cancelled))
            .count()
    }

    /// Sum of every demand requested so far.
    pub fn requested(&self) -> Demand {
        self.history
            .lock()
            .iter()
            .fold(Demand::NONE, |total, event| match event {
                SubscriptionEvent::Requested(demand) => total + *demand,
                SubscriptionEvent::Cancelled => total,
            })
    }

    /// Runs after each recorded request, outside the history lock.
    pub fn set_on_request<F>(&self, hook: F)
    where
        F: Fn(Demand) + Send + Sync + 'static,
    {
        *self.on_request.lock() = Some(Arc::new(hook));
    }

    /// Runs after each recorded cancel, outside the history lock.
    pub fn set_on_cancel<F>(&self, hook: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        *self.on_cancel.lock() = Some(Arc::new(hook));
    }
}

impl Subscription for CustomSubscription {
    fn request(&self, demand: Demand) {
        self.history.lock().push(SubscriptionEvent::Requested(demand));
        let hook = self.on_request.lock().clone();
        if let Some(hook) = hook {
            hook(demand);
        }
    }

    fn cancel(&self) {
        self.history.lock().push(SubscriptionEvent::Cancelled);
        let hook = self.on_cancel.lock().clone();
        if let Some(hook) = hook {
            hook();
        }
    }

    fn description(&self) -> &'static str {
        "CustomSubscription"
    }
}
