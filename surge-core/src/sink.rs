// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Closure-driven subscriber with unlimited demand.

use crate::cancellable::Cancellable;
use crate::{Completion, Demand, Subscriber, SubscriptionRef, UpstreamSlot};
use parking_lot::Mutex;
use std::sync::Arc;

type ValueHandler<I> = Box<dyn Fn(I) + Send + Sync>;
type CompletionHandler<E> = Box<dyn Fn(Completion<E>) + Send + Sync>;

/// Subscriber that requests unlimited demand and forwards everything to closures.
///
/// Usually created through [`PublisherExt::sink`](crate::PublisherExt::sink) or
/// [`PublisherExt::sink_with_completion`](crate::PublisherExt::sink_with_completion),
/// which also return the [`AnyCancellable`](crate::AnyCancellable) that ends the subscription.
pub struct Sink<I, E> {
    inner: Arc<SinkInner<I, E>>,
}

struct SinkInner<I, E> {
    upstream: Mutex<UpstreamSlot>,
    receive_value: ValueHandler<I>,
    receive_completion: CompletionHandler<E>,
}

impl<I, E> Sink<I, E> {
    /// Builds a sink from its two handlers.
    pub fn new<C, V>(receive_completion: C, receive_value: V) -> Self
    where
        C: Fn(Completion<E>) + Send + Sync + 'static,
        V: Fn(I) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(SinkInner {
                upstream: Mutex::new(UpstreamSlot::default()),
                receive_value: Box::new(receive_value),
                receive_completion: Box::new(receive_completion),
            }),
        }
    }

    pub(crate) fn cancellable(&self) -> Arc<dyn Cancellable>
    where
        I: 'static,
        E: 'static,
    {
        self.inner.clone()
    }
}

impl<I, E> Subscriber for Sink<I, E> {
    type Input = I;
    type Failure = E;

    fn receive_subscription(&self, subscription: SubscriptionRef) {
        let attached = self.inner.upstream.lock().attach(subscription.clone());
        match attached {
            Ok(()) => subscription.request(Demand::UNLIMITED),
            Err(error) => {
                warn!("sink: {}", error);
                subscription.cancel();
            }
        }
    }

    fn receive(&self, input: I) -> Demand {
        let live = self.inner.upstream.lock().get().is_some();
        if live {
            (self.inner.receive_value)(input);
        } else {
            trace!("sink: dropping value outside an active subscription");
        }
        Demand::NONE
    }

    fn receive_completion(&self, completion: Completion<E>) {
        let live = self.inner.upstream.lock().take().is_some();
        if live {
            (self.inner.receive_completion)(completion);
        } else {
            trace!("sink: ignoring completion outside an active subscription");
        }
    }
}

impl<I, E> Cancellable for SinkInner<I, E> {
    fn cancel(&self) {
        let upstream = self.upstream.lock().take();
        if let Some(subscription) = upstream {
            subscription.cancel();
        }
    }
}
