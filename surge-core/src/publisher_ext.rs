// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::sink::Sink;
use crate::values::Values;
use crate::{AnyCancellable, Completion, Publisher};
use core::convert::Infallible;

/// Consumers available on every [`Publisher`].
pub trait PublisherExt: Publisher {
    /// Subscribes with unlimited demand and calls `receive_value` for every value.
    ///
    /// Only available for publishers that cannot fail. Dropping or cancelling
    /// the returned handle ends the subscription.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use parking_lot::Mutex;
    /// use surge_core::PublisherExt;
    /// use surge_test_utils::SequencePublisher;
    ///
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    /// let sink_seen = seen.clone();
    /// let _cancellable = SequencePublisher::new(1..4).sink(move |value| sink_seen.lock().push(value));
    ///
    /// assert_eq!(*seen.lock(), vec![1, 2, 3]);
    /// ```
    fn sink<V>(&self, receive_value: V) -> AnyCancellable
    where
        Self: Publisher<Failure = Infallible>,
        Self::Output: 'static,
        V: Fn(Self::Output) + Send + Sync + 'static,
    {
        self.sink_with_completion(|_completion| {}, receive_value)
    }

    /// Subscribes with unlimited demand, forwarding values and the terminal event.
    fn sink_with_completion<C, V>(&self, receive_completion: C, receive_value: V) -> AnyCancellable
    where
        Self::Output: 'static,
        Self::Failure: 'static,
        C: Fn(Completion<Self::Failure>) + Send + Sync + 'static,
        V: Fn(Self::Output) + Send + Sync + 'static,
    {
        let sink = Sink::new(receive_completion, receive_value);
        let cancellable = AnyCancellable::new(sink.cancellable());
        self.subscribe(sink);
        cancellable
    }

    /// Exposes the publisher as a pull-based stream requesting one value at a time.
    fn values(&self) -> Values<Self::Output, Self::Failure>
    where
        Self::Output: Send + 'static,
        Self::Failure: Send + 'static,
    {
        let (values, subscriber) = Values::new();
        self.subscribe(subscriber);
        values
    }
}

impl<P: Publisher + ?Sized> PublisherExt for P {}
