// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Synchronous, demand-respecting publisher over a fixed list of values.

use core::convert::Infallible;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use surge_core::{
    Completion, Demand, EmptySubscription, Publisher, Subscriber, Subscription,
};

type DynSubscriber<T> = Arc<dyn Subscriber<Input = T, Failure = Infallible>>;

/// Emits its values in order as demand arrives, then finishes.
///
/// Values are delivered on the thread that requests them, from inside
/// `request`. A subscriber may request more or cancel from within `receive`.
/// An empty sequence finishes right after handing out its subscription.
#[derive(Debug, Clone)]
pub struct SequencePublisher<T> {
    values: Vec<T>,
}

impl<T> SequencePublisher<T> {
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self {
            values: values.into_iter().collect(),
        }
    }
}

impl<T> Publisher for SequencePublisher<T>
where
    T: Clone + Send + 'static,
{
    type Output = T;
    type Failure = Infallible;

    fn subscribe<S>(&self, subscriber: S)
    where
        S: Subscriber<Input = T, Failure = Infallible> + 'static,
    {
        if self.values.is_empty() {
            subscriber.receive_subscription(EmptySubscription::shared());
            subscriber.receive_completion(Completion::Finished);
            return;
        }

        let subscriber: DynSubscriber<T> = Arc::new(subscriber);
        let subscription = Arc::new(SequenceSubscription {
            state: Mutex::new(SequenceState {
                remaining: self.values.iter().cloned().collect(),
                demand: Demand::NONE,
                emitting: false,
                subscriber: Some(subscriber.clone()),
            }),
        });
        subscriber.receive_subscription(subscription);
    }
}

struct SequenceState<T> {
    remaining: VecDeque<T>,
    demand: Demand,
    emitting: bool,
    subscriber: Option<DynSubscriber<T>>,
}

struct SequenceSubscription<T> {
    state: Mutex<SequenceState<T>>,
}

impl<T: Send> SequenceSubscription<T> {
    fn emit(&self) {
        loop {
            let (subscriber, value) = {
                let mut state = self.state.lock();
                let Some(subscriber) = state.subscriber.clone() else {
                    return;
                };
                if state.demand.is_none() {
                    state.emitting = false;
                    return;
                }
                let Some(value) = state.remaining.pop_front() else {
                    state.emitting = false;
                    return;
                };
                state.demand -= 1;
                (subscriber, value)
            };

            let additional = subscriber.receive(value);

            let finished = {
                let mut state = self.state.lock();
                state.demand += additional;
                if state.remaining.is_empty() {
                    state.subscriber.take()
                } else {
                    None
                }
            };
            if let Some(subscriber) = finished {
                subscriber.receive_completion(Completion::Finished);
                return;
            }
        }
    }
}

impl<T: Send> Subscription for SequenceSubscription<T> {
    fn request(&self, demand: Demand) {
        if demand.is_none() {
            return;
        }
        {
            let mut state = self.state.lock();
            if state.subscriber.is_none() {
                return;
            }
            state.demand += demand;
            if state.emitting {
                return;
            }
            state.emitting = true;
        }
        self.emit();
    }

    fn cancel(&self) {
        let mut state = self.state.lock();
        state.subscriber = None;
        state.remaining.clear();
    }

    fn description(&self) -> &'static str {
        "Sequence"
    }
}
