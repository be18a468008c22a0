// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::marker::PhantomData;
use parking_lot::{Mutex, ReentrantMutex};
use std::sync::Arc;
use surge_core::{
    Completion, Demand, Publisher, Subscriber, Subscription, SubscriptionRef, UpstreamSlot,
};

type Generation = u64;

/// The inner subscription currently allowed to reach downstream.
struct ActiveInner {
    generation: Generation,
    subscription: UpstreamSlot,
}

struct EngineState<S> {
    downstream: Option<Arc<S>>,
    outer: UpstreamSlot,
    current: Option<ActiveInner>,
    generation: Generation,
    outer_finished: bool,
    inner_finished: bool,
    pending: Demand,
    terminated: bool,
}

/// Handles released by a terminal transition, acted upon after the state lock is dropped.
struct Termination<S> {
    downstream: Option<Arc<S>>,
    outer: Option<SubscriptionRef>,
    inner: Option<SubscriptionRef>,
}

impl<S> EngineState<S> {
    fn accepts(&self, generation: Generation) -> bool {
        !self.terminated
            && !self.inner_finished
            && self
                .current
                .as_ref()
                .is_some_and(|active| active.generation == generation)
    }

    fn should_finish(&self) -> bool {
        self.outer_finished && (self.current.is_none() || self.inner_finished)
    }

    fn live_inner(&self) -> Option<SubscriptionRef> {
        self.current
            .as_ref()
            .and_then(|active| active.subscription.get())
    }

    fn terminate(&mut self) -> Termination<S> {
        self.terminated = true;
        Termination {
            downstream: self.downstream.take(),
            outer: self.outer.take(),
            inner: self
                .current
                .take()
                .and_then(|mut active| active.subscription.take()),
        }
    }
}

/// Shared state behind the three faces of a switch-to-latest subscription:
/// the outer subscriber, the per-generation inner subscribers and the
/// subscription handed to downstream.
///
/// `state` is only ever held for bookkeeping, never across a call into a
/// collaborator. `delivery` serialises every call into downstream and the
/// generation bump of a switch; it is reentrant so a callback running on the
/// delivering thread can call straight back into the engine.
pub(crate) struct Engine<S> {
    state: Mutex<EngineState<S>>,
    delivery: ReentrantMutex<()>,
}

impl<S> Engine<S>
where
    S: Subscriber + 'static,
{
    pub(crate) fn new(downstream: S) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(EngineState {
                downstream: Some(Arc::new(downstream)),
                outer: UpstreamSlot::default(),
                current: None,
                generation: 0,
                outer_finished: false,
                inner_finished: false,
                pending: Demand::NONE,
                terminated: false,
            }),
            delivery: ReentrantMutex::new(()),
        })
    }

    pub(crate) fn start<P>(self: &Arc<Self>, upstream: &P)
    where
        P: Publisher<Failure = S::Failure>,
        P::Output: Publisher<Output = S::Input, Failure = S::Failure> + 'static,
    {
        let downstream = self.state.lock().downstream.clone();
        if let Some(downstream) = downstream {
            let _delivery = self.delivery.lock();
            downstream.receive_subscription(Arc::new(EngineSubscription {
                engine: self.clone(),
            }));
        }

        if self.state.lock().terminated {
            debug!("switch_to_latest: cancelled before subscribing to the outer publisher");
            return;
        }

        upstream.subscribe(OuterSide::<S, P::Output> {
            engine: self.clone(),
            _inner: PhantomData,
        });
    }

    fn attach_outer(&self, subscription: SubscriptionRef) {
        let attached = self.state.lock().outer.attach(subscription.clone());
        match attached {
            Ok(()) => subscription.request(Demand::UNLIMITED),
            Err(error) => {
                warn!("switch_to_latest: {}", error);
                subscription.cancel();
            }
        }
    }

    fn switch_to<P>(self: &Arc<Self>, inner: P)
    where
        P: Publisher<Output = S::Input, Failure = S::Failure>,
    {
        let (generation, previous) = {
            let _delivery = self.delivery.lock();
            let mut state = self.state.lock();
            if state.terminated || state.outer_finished {
                trace!("switch_to_latest: ignoring inner publisher after termination");
                return;
            }
            state.generation += 1;
            let generation = state.generation;
            let previous = state
                .current
                .replace(ActiveInner {
                    generation,
                    subscription: UpstreamSlot::default(),
                })
                .and_then(|mut active| active.subscription.take());
            state.inner_finished = false;
            (generation, previous)
        };

        if let Some(previous) = previous {
            trace!("switch_to_latest: cancelling inner generation {}", generation - 1);
            previous.cancel();
        }

        debug!("switch_to_latest: subscribing to inner generation {}", generation);
        inner.subscribe(InnerSide {
            engine: self.clone(),
            generation,
        });
    }

    fn attach_inner(&self, generation: Generation, subscription: SubscriptionRef) {
        let attached = {
            let mut state = self.state.lock();
            let pending = state.pending;
            if state.terminated {
                None
            } else {
                state
                    .current
                    .as_mut()
                    .filter(|active| active.generation == generation)
                    .map(|active| active.subscription.attach(subscription.clone()).map(|()| pending))
            }
        };

        match attached {
            Some(Ok(pending)) => {
                if !pending.is_none() {
                    subscription.request(pending);
                }
            }
            Some(Err(error)) => {
                warn!("switch_to_latest: {}", error);
                subscription.cancel();
            }
            None => {
                trace!("switch_to_latest: cancelling superseded inner generation {}", generation);
                subscription.cancel();
            }
        }
    }

    fn deliver(&self, generation: Generation, input: S::Input) -> Demand {
        let _delivery = self.delivery.lock();

        let downstream = {
            let mut state = self.state.lock();
            if !state.accepts(generation) {
                trace!("switch_to_latest: discarding value from stale generation {}", generation);
                return Demand::NONE;
            }
            if state.pending.is_none() {
                warn!("switch_to_latest: inner generation {} sent a value without demand", generation);
                return Demand::NONE;
            }
            state.pending -= 1;
            state.downstream.clone()
        };
        let Some(downstream) = downstream else {
            return Demand::NONE;
        };

        let additional = downstream.receive(input);
        if additional.is_none() {
            return Demand::NONE;
        }

        // Downstream may have switched or cancelled while it held the value.
        let forward = {
            let mut state = self.state.lock();
            if state.terminated {
                return Demand::NONE;
            }
            state.pending += additional;
            if state.accepts(generation) {
                return additional;
            }
            state.live_inner()
        };
        if let Some(subscription) = forward {
            subscription.request(additional);
        }
        Demand::NONE
    }

    fn complete_inner(&self, generation: Generation, completion: Completion<S::Failure>) {
        let _delivery = self.delivery.lock();

        let (downstream, outer) = {
            let mut state = self.state.lock();
            if !state.accepts(generation) {
                trace!("switch_to_latest: ignoring completion of stale generation {}", generation);
                return;
            }
            if completion.is_finished() {
                state.inner_finished = true;
                if let Some(active) = state.current.as_mut() {
                    // Finished upstream, nothing left to cancel.
                    drop(active.subscription.take());
                }
                if !state.should_finish() {
                    trace!("switch_to_latest: inner generation {} finished, awaiting next", generation);
                    return;
                }
                (state.terminate().downstream, None)
            } else {
                let termination = state.terminate();
                (termination.downstream, termination.outer)
            }
        };

        debug!("switch_to_latest: terminating from inner generation {}", generation);
        if let Some(downstream) = downstream {
            downstream.receive_completion(completion);
        }
        if let Some(outer) = outer {
            outer.cancel();
        }
    }

    fn complete_outer(&self, completion: Completion<S::Failure>) {
        let _delivery = self.delivery.lock();

        let (downstream, inner) = {
            let mut state = self.state.lock();
            if state.terminated || state.outer_finished {
                trace!("switch_to_latest: ignoring repeated outer completion");
                return;
            }
            if completion.is_finished() {
                state.outer_finished = true;
                drop(state.outer.take());
                if !state.should_finish() {
                    trace!("switch_to_latest: outer finished, awaiting active inner");
                    return;
                }
                (state.terminate().downstream, None)
            } else {
                let termination = state.terminate();
                (termination.downstream, termination.inner)
            }
        };

        debug!("switch_to_latest: terminating from outer publisher");
        if let Some(downstream) = downstream {
            downstream.receive_completion(completion);
        }
        if let Some(inner) = inner {
            inner.cancel();
        }
    }

    fn request(&self, demand: Demand) {
        if demand.is_none() {
            warn!("switch_to_latest: ignoring request for zero demand");
            return;
        }

        let forward = {
            let mut state = self.state.lock();
            if state.terminated {
                trace!("switch_to_latest: ignoring request after termination");
                return;
            }
            state.pending += demand;
            state.live_inner()
        };
        if let Some(subscription) = forward {
            subscription.request(demand);
        }
    }

    fn cancel(&self) {
        let termination = {
            let mut state = self.state.lock();
            if state.terminated {
                return;
            }
            state.terminate()
        };

        debug!("switch_to_latest: cancelled by downstream");
        if let Some(inner) = termination.inner {
            inner.cancel();
        }
        if let Some(outer) = termination.outer {
            outer.cancel();
        }
    }
}

/// Subscriber attached to the outer publisher of publishers.
pub(crate) struct OuterSide<S, P> {
    engine: Arc<Engine<S>>,
    _inner: PhantomData<fn(P)>,
}

impl<S, P> Subscriber for OuterSide<S, P>
where
    S: Subscriber + 'static,
    P: Publisher<Output = S::Input, Failure = S::Failure>,
{
    type Input = P;
    type Failure = S::Failure;

    fn receive_subscription(&self, subscription: SubscriptionRef) {
        self.engine.attach_outer(subscription);
    }

    fn receive(&self, inner: P) -> Demand {
        self.engine.switch_to(inner);
        Demand::NONE
    }

    fn receive_completion(&self, completion: Completion<S::Failure>) {
        self.engine.complete_outer(completion);
    }
}

/// Subscriber attached to one inner publisher; every event it forwards carries its generation.
pub(crate) struct InnerSide<S> {
    engine: Arc<Engine<S>>,
    generation: Generation,
}

impl<S> Subscriber for InnerSide<S>
where
    S: Subscriber + 'static,
{
    type Input = S::Input;
    type Failure = S::Failure;

    fn receive_subscription(&self, subscription: SubscriptionRef) {
        self.engine.attach_inner(self.generation, subscription);
    }

    fn receive(&self, input: S::Input) -> Demand {
        self.engine.deliver(self.generation, input)
    }

    fn receive_completion(&self, completion: Completion<S::Failure>) {
        self.engine.complete_inner(self.generation, completion);
    }
}

/// The subscription downstream holds to control the engine.
pub(crate) struct EngineSubscription<S> {
    engine: Arc<Engine<S>>,
}

impl<S> Subscription for EngineSubscription<S>
where
    S: Subscriber + 'static,
{
    fn request(&self, demand: Demand) {
        self.engine.request(demand);
    }

    fn cancel(&self) {
        self.engine.cancel();
    }

    fn description(&self) -> &'static str {
        "SwitchToLatest"
    }
}
