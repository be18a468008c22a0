// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Multicast publisher fed imperatively from the test body.

use parking_lot::Mutex;
use std::sync::Arc;
use surge_core::{Completion, Demand, EmptySubscription, Publisher, Subscriber, Subscription};

type DynSubscriber<T, E> = Arc<dyn Subscriber<Input = T, Failure = E>>;

struct SubjectState<T, E> {
    conduits: Vec<Arc<Conduit<T, E>>>,
    completion: Option<Completion<E>>,
}

/// Broadcasts each sent value to every subscriber that currently has demand.
///
/// Subscribers without outstanding demand miss the value; nothing is buffered.
/// After [`send_completion`](Self::send_completion) the subject is terminated:
/// later values are ignored and late subscribers receive the completion at once.
pub struct PassthroughSubject<T, E> {
    state: Arc<Mutex<SubjectState<T, E>>>,
}

impl<T, E> Clone for PassthroughSubject<T, E> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T, E> Default for PassthroughSubject<T, E> {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(SubjectState {
                conduits: Vec::new(),
                completion: None,
            })),
        }
    }
}

impl<T, E> core::fmt::Debug for PassthroughSubject<T, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PassthroughSubject")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl<T, E> PassthroughSubject<T, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribers that have neither cancelled nor been completed.
    pub fn subscriber_count(&self) -> usize {
        self.state
            .lock()
            .conduits
            .iter()
            .filter(|conduit| conduit.is_live())
            .count()
    }

    pub fn is_completed(&self) -> bool {
        self.state.lock().completion.is_some()
    }

    pub fn send(&self, value: T)
    where
        T: Clone,
    {
        let conduits = {
            let mut state = self.state.lock();
            if state.completion.is_some() {
                return;
            }
            state.conduits.retain(|conduit| conduit.is_live());
            state.conduits.clone()
        };
        for conduit in conduits {
            conduit.offer(value.clone());
        }
    }

    pub fn send_completion(&self, completion: Completion<E>)
    where
        E: Clone,
    {
        let conduits = {
            let mut state = self.state.lock();
            if state.completion.is_some() {
                return;
            }
            state.completion = Some(completion.clone());
            core::mem::take(&mut state.conduits)
        };
        for conduit in conduits {
            conduit.complete(completion.clone());
        }
    }
}

impl<T, E> Publisher for PassthroughSubject<T, E>
where
    T: Send + 'static,
    E: Clone + Send + 'static,
{
    type Output = T;
    type Failure = E;

    fn subscribe<S>(&self, subscriber: S)
    where
        S: Subscriber<Input = T, Failure = E> + 'static,
    {
        let completed = self.state.lock().completion.clone();
        if let Some(completion) = completed {
            subscriber.receive_subscription(EmptySubscription::shared());
            subscriber.receive_completion(completion);
            return;
        }

        let subscriber: DynSubscriber<T, E> = Arc::new(subscriber);
        let conduit = Arc::new(Conduit {
            state: Mutex::new(ConduitState {
                subscriber: Some(subscriber.clone()),
                demand: Demand::NONE,
            }),
        });
        self.state.lock().conduits.push(conduit.clone());
        subscriber.receive_subscription(conduit);
    }
}

struct ConduitState<T, E> {
    subscriber: Option<DynSubscriber<T, E>>,
    demand: Demand,
}

/// One subscriber's view of the subject, with its own demand.
struct Conduit<T, E> {
    state: Mutex<ConduitState<T, E>>,
}

impl<T, E> Conduit<T, E> {
    fn is_live(&self) -> bool {
        self.state.lock().subscriber.is_some()
    }

    fn offer(&self, value: T) {
        let subscriber = {
            let mut state = self.state.lock();
            if state.demand.is_none() {
                return;
            }
            state.demand -= 1;
            state.subscriber.clone()
        };
        let Some(subscriber) = subscriber else {
            return;
        };
        let additional = subscriber.receive(value);
        self.state.lock().demand += additional;
    }

    fn complete(&self, completion: Completion<E>) {
        let subscriber = self.state.lock().subscriber.take();
        if let Some(subscriber) = subscriber {
            subscriber.receive_completion(completion);
        }
    }
}

impl<T: Send, E: Send> Subscription for Conduit<T, E> {
    fn request(&self, demand: Demand) {
        let mut state = self.state.lock();
        if state.subscriber.is_some() {
            state.demand += demand;
        }
    }

    fn cancel(&self) {
        self.state.lock().subscriber = None;
    }

    fn description(&self) -> &'static str {
        "PassthroughSubject"
    }
}
