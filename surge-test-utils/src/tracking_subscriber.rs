// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Subscriber that records every protocol message it receives.

use parking_lot::Mutex;
use std::sync::Arc;
use surge_core::{Completion, Demand, Subscriber, SubscriptionRef};

/// One recorded protocol message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<T, E> {
    /// `receive_subscription`, identified by the subscription's description.
    Subscription(&'static str),
    /// `receive`
    Value(T),
    /// `receive_completion`
    Completion(Completion<E>),
}

type OnSubscription = Box<dyn Fn(&SubscriptionRef) + Send + Sync>;
type OnValue<T> = Box<dyn Fn(&T) -> Demand + Send + Sync>;
type OnCompletion<E> = Box<dyn Fn(&Completion<E>) + Send + Sync>;

struct Tracking<T, E> {
    history: Mutex<Vec<Event<T, E>>>,
    subscriptions: Mutex<Vec<SubscriptionRef>>,
    on_subscription: Option<OnSubscription>,
    on_value: Option<OnValue<T>>,
    on_completion: Option<OnCompletion<E>>,
}

/// Recording subscriber; clones share the same history.
///
/// Hooks run after the event is recorded and outside any lock, so they may
/// call back into the subscription they were given.
pub struct TrackingSubscriber<T, E> {
    inner: Arc<Tracking<T, E>>,
}

impl<T, E> Clone for TrackingSubscriber<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T, E> Default for TrackingSubscriber<T, E> {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl<T, E> TrackingSubscriber<T, E> {
    /// Records everything and never requests anything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records everything and requests `demand` as soon as it is subscribed.
    pub fn requesting(demand: Demand) -> Self {
        Self::builder()
            .on_subscription(move |subscription| subscription.request(demand))
            .build()
    }

    pub fn builder() -> TrackingSubscriberBuilder<T, E> {
        TrackingSubscriberBuilder {
            on_subscription: None,
            on_value: None,
            on_completion: None,
        }
    }

    pub fn history(&self) -> Vec<Event<T, E>>
    where
        T: Clone,
        E: Clone,
    {
        self.inner.history.lock().clone()
    }

    pub fn values(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.inner
            .history
            .lock()
            .iter()
            .filter_map(|event| match event {
                Event::Value(value) => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn completions(&self) -> Vec<Completion<E>>
    where
        E: Clone,
    {
        self.inner
            .history
            .lock()
            .iter()
            .filter_map(|event| match event {
                Event::Completion(completion) => Some(completion.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn subscriptions(&self) -> Vec<SubscriptionRef> {
        self.inner.subscriptions.lock().clone()
    }

    /// The most recently received subscription handle.
    pub fn subscription(&self) -> Option<SubscriptionRef> {
        self.inner.subscriptions.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.inner.history.lock().clear();
    }
}

impl<T, E> Subscriber for TrackingSubscriber<T, E>
where
    T: Clone + Send,
    E: Clone + Send,
{
    type Input = T;
    type Failure = E;

    fn receive_subscription(&self, subscription: SubscriptionRef) {
        self.inner
            .history
            .lock()
            .push(Event::Subscription(subscription.description()));
        self.inner.subscriptions.lock().push(subscription.clone());
        if let Some(hook) = &self.inner.on_subscription {
            hook(&subscription);
        }
    }

    fn receive(&self, input: T) -> Demand {
        self.inner.history.lock().push(Event::Value(input.clone()));
        self.inner
            .on_value
            .as_ref()
            .map_or(Demand::NONE, |hook| hook(&input))
    }

    fn receive_completion(&self, completion: Completion<E>) {
        self.inner
            .history
            .lock()
            .push(Event::Completion(completion.clone()));
        if let Some(hook) = &self.inner.on_completion {
            hook(&completion);
        }
    }
}

/// Builder for a [`TrackingSubscriber`] with hooks.
pub struct TrackingSubscriberBuilder<T, E> {
    on_subscription: Option<OnSubscription>,
    on_value: Option<OnValue<T>>,
    on_completion: Option<OnCompletion<E>>,
}

impl<T, E> TrackingSubscriberBuilder<T, E> {
    pub fn on_subscription<F>(mut self, hook: F) -> Self
    where
        F: Fn(&SubscriptionRef) + Send + Sync + 'static,
    {
        self.on_subscription = Some(Box::new(hook));
        self
    }

    /// The hook's return value is the additional demand granted for that value.
    pub fn on_value<F>(mut self, hook: F) -> Self
    where
        F: Fn(&T) -> Demand + Send + Sync + 'static,
    {
        self.on_value = Some(Box::new(hook));
        self
    }

    pub fn on_completion<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Completion<E>) + Send + Sync + 'static,
    {
        self.on_completion = Some(Box::new(hook));
        self
    }

    pub fn build(self) -> TrackingSubscriber<T, E> {
        TrackingSubscriber {
            inner: Arc::new(Tracking {
                history: Mutex::new(Vec::new()),
                subscriptions: Mutex::new(Vec::new()),
                on_subscription: self.on_subscription,
                on_value: self.on_value,
                on_completion: self.on_completion,
            }),
        }
    }
}
