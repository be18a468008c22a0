// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::custom_subscription::CustomSubscription;
use parking_lot::Mutex;
use std::sync::Arc;
use surge_core::{Completion, Demand, Publisher, Subscriber, SubscriptionRef};

type DynSubscriber<T, E> = Arc<dyn Subscriber<Input = T, Failure = E>>;

struct Scripted<T, E> {
    subscription: Option<Arc<CustomSubscription>>,
    subscriber: Mutex<Option<DynSubscriber<T, E>>>,
    subscribe_count: Mutex<usize>,
}

/// Publisher driven by hand from the test body.
///
/// On `subscribe` it hands the scripted [`CustomSubscription`] (if any) to the
/// subscriber and keeps the subscriber, so the test can push values and
/// completions with [`send`](Self::send) and [`send_completion`](Self::send_completion).
/// It ignores demand entirely: the test decides what is sent.
pub struct CustomPublisher<T, E> {
    inner: Arc<Scripted<T, E>>,
}

impl<T, E> Clone for CustomPublisher<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: 'static, E: 'static> CustomPublisher<T, E> {
    pub fn new(subscription: Arc<CustomSubscription>) -> Self {
        Self::build(Some(subscription))
    }

    /// A publisher that never hands out a subscription.
    pub fn without_subscription() -> Self {
        Self::build(None)
    }

    fn build(subscription: Option<Arc<CustomSubscription>>) -> Self {
        Self {
            inner: Arc::new(Scripted {
                subscription,
                subscriber: Mutex::new(None),
                subscribe_count: Mutex::new(0),
            }),
        }
    }

    /// Delivers `value` to the current subscriber and returns the demand it granted.
    pub fn send(&self, value: T) -> Demand {
        let subscriber = self.inner.subscriber.lock().clone();
        subscriber.map_or(Demand::NONE, |subscriber| subscriber.receive(value))
    }

    pub fn send_completion(&self, completion: Completion<E>) {
        let subscriber = self.inner.subscriber.lock().clone();
        if let Some(subscriber) = subscriber {
            subscriber.receive_completion(completion);
        }
    }

    /// Hands an extra subscription to the current subscriber, a protocol violation on purpose.
    pub fn send_subscription(&self, subscription: SubscriptionRef) {
        let subscriber = self.inner.subscriber.lock().clone();
        if let Some(subscriber) = subscriber {
            subscriber.receive_subscription(subscription);
        }
    }

    /// How many times `subscribe` was called.
    pub fn subscribe_count(&self) -> usize {
        *self.inner.subscribe_count.lock()
    }

    pub fn has_subscriber(&self) -> bool {
        self.inner.subscriber.lock().is_some()
    }
}

impl<T: 'static, E: 'static> Publisher for CustomPublisher<T, E> {
    type Output = T;
    type Failure = E;

    fn subscribe<S>(&self, subscriber: S)
    where
        S: Subscriber<Input = T, Failure = E> + 'static,
    {
        let subscriber: DynSubscriber<T, E> = Arc::new(subscriber);
        *self.inner.subscriber.lock() = Some(subscriber.clone());
        *self.inner.subscribe_count.lock() += 1;
        if let Some(subscription) = &self.inner.subscription {
            subscriber.receive_subscription(subscription.clone());
        }
    }
}
