// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Bridge from a demand-driven publisher to a pull-based [`Stream`].
//!
//! [`Values`] requests exactly one value whenever it is polled with an empty
//! buffer, so the publisher never runs ahead of the consumer. A failed
//! completion surfaces as a final `Err` item; the stream ends after it.

use crate::{Completion, Demand, Subscriber, SubscriptionRef, UpstreamSlot};
use futures::Stream;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, Waker};

struct ValuesState<T, E> {
    upstream: UpstreamSlot,
    buffer: VecDeque<T>,
    completion: Option<Completion<E>>,
    outstanding: Demand,
    waker: Option<Waker>,
    done: bool,
}

type Shared<T, E> = Arc<Mutex<ValuesState<T, E>>>;

/// Stream of the values of a publisher, see the [module documentation](self).
pub struct Values<T, E> {
    shared: Shared<T, E>,
}

pub(crate) struct ValuesSubscriber<T, E> {
    shared: Shared<T, E>,
}

impl<T, E> Values<T, E> {
    pub(crate) fn new() -> (Self, ValuesSubscriber<T, E>) {
        let shared = Arc::new(Mutex::new(ValuesState {
            upstream: UpstreamSlot::default(),
            buffer: VecDeque::new(),
            completion: None,
            outstanding: Demand::NONE,
            waker: None,
            done: false,
        }));
        (
            Self {
                shared: shared.clone(),
            },
            ValuesSubscriber { shared },
        )
    }
}

impl<T, E> Stream for Values<T, E> {
    type Item = Result<T, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            let mut state = self.shared.lock();

            if let Some(value) = state.buffer.pop_front() {
                return Poll::Ready(Some(Ok(value)));
            }
            if state.done {
                return Poll::Ready(None);
            }
            if let Some(completion) = state.completion.take() {
                state.done = true;
                return Poll::Ready(completion.failure().map(Err));
            }

            let upstream = if state.outstanding.is_none() {
                state.upstream.get()
            } else {
                None
            };

            match upstream {
                Some(subscription) => {
                    state.outstanding = Demand::max(1);
                    drop(state);
                    // Synchronous publishers deliver from inside `request`; re-check afterwards.
                    subscription.request(Demand::max(1));
                }
                None => {
                    state.waker = Some(cx.waker().clone());
                    return Poll::Pending;
                }
            }
        }
    }
}

impl<T, E> Drop for Values<T, E> {
    fn drop(&mut self) {
        let upstream = self.shared.lock().upstream.take();
        if let Some(subscription) = upstream {
            subscription.cancel();
        }
    }
}

impl<T, E> ValuesSubscriber<T, E> {
    fn wake(waker: Option<Waker>) {
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

impl<T: Send, E: Send> Subscriber for ValuesSubscriber<T, E> {
    type Input = T;
    type Failure = E;

    fn receive_subscription(&self, subscription: SubscriptionRef) {
        let (attached, waker) = {
            let mut state = self.shared.lock();
            let attached = state.upstream.attach(subscription.clone());
            (attached, state.waker.take())
        };
        if let Err(error) = attached {
            warn!("values: {}", error);
            subscription.cancel();
        }
        Self::wake(waker);
    }

    fn receive(&self, input: T) -> Demand {
        let waker = {
            let mut state = self.shared.lock();
            if state.upstream.is_released() || state.completion.is_some() {
                trace!("values: dropping value after termination");
                return Demand::NONE;
            }
            state.buffer.push_back(input);
            state.outstanding -= 1;
            state.waker.take()
        };
        Self::wake(waker);
        Demand::NONE
    }

    fn receive_completion(&self, completion: Completion<E>) {
        let waker = {
            let mut state = self.shared.lock();
            if state.upstream.take().is_none() {
                trace!("values: ignoring completion outside an active subscription");
                return;
            }
            state.completion = Some(completion);
            state.waker.take()
        };
        Self::wake(waker);
    }
}
