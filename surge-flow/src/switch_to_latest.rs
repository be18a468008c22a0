// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Flattens a publisher of publishers by following only the most recent one.
//!
//! [`switch_to_latest`](SwitchToLatestExt::switch_to_latest) subscribes to an
//! *outer* publisher whose values are themselves publishers. Each time the outer
//! emits a new *inner* publisher, the subscription to the previous inner is
//! cancelled and values start flowing from the new one.
//!
//! # Behavior
//!
//! - The outer publisher is asked for unlimited demand: discovering new inner
//!   publishers is never held back by downstream.
//! - Downstream demand is accounted in one place and handed, in full, to each
//!   new inner subscription; values from the active inner consume it.
//! - Every inner subscription is tagged with a generation number. Values and
//!   completions carrying an outdated generation are discarded, so nothing
//!   from a superseded inner reaches downstream once the switch happened.
//! - Downstream completes successfully once the outer has finished and the
//!   active inner (if any) has finished too.
//! - A failure from the outer or from the active inner is forwarded once and
//!   cancels whichever side is still running.
//! - Cancelling downstream cancels the active inner and then the outer, each
//!   at most once.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use surge_core::PublisherExt;
//! use surge_flow::SwitchToLatestExt;
//! use surge_test_utils::SequencePublisher;
//!
//! let outer = SequencePublisher::new((1..5).map(|v| SequencePublisher::new(v..v + 4)));
//!
//! let history = Arc::new(Mutex::new(Vec::new()));
//! let sink_history = history.clone();
//! let cancellable = outer
//!     .switch_to_latest()
//!     .sink(move |value| sink_history.lock().push(value));
//!
//! assert_eq!(
//!     *history.lock(),
//!     vec![1, 2, 3, 4, 2, 3, 4, 5, 3, 4, 5, 6, 4, 5, 6, 7]
//! );
//! cancellable.cancel();
//! ```

mod implementation;

use implementation::Engine;
use surge_core::{Publisher, Subscriber};

/// Publisher returned by [`SwitchToLatestExt::switch_to_latest`].
#[derive(Debug, Clone)]
pub struct SwitchToLatest<P> {
    upstream: P,
}

impl<P> SwitchToLatest<P> {
    /// Wraps `upstream`, a publisher of publishers.
    pub const fn new(upstream: P) -> Self {
        Self { upstream }
    }

    /// The outer publisher.
    pub const fn upstream(&self) -> &P {
        &self.upstream
    }
}

impl<P> Publisher for SwitchToLatest<P>
where
    P: Publisher,
    P::Output: Publisher<Failure = P::Failure> + 'static,
{
    type Output = <P::Output as Publisher>::Output;
    type Failure = P::Failure;

    fn subscribe<S>(&self, subscriber: S)
    where
        S: Subscriber<Input = Self::Output, Failure = Self::Failure> + 'static,
    {
        Engine::new(subscriber).start(&self.upstream);
    }
}

/// Extension trait providing the `switch_to_latest` operator.
pub trait SwitchToLatestExt: Publisher + Sized {
    /// Republishes the values of the most recently received inner publisher.
    ///
    /// See the [module documentation](crate::switch_to_latest) for the full contract.
    fn switch_to_latest(self) -> SwitchToLatest<Self>
    where
        Self::Output: Publisher<Failure = Self::Failure> + 'static,
    {
        SwitchToLatest::new(self)
    }
}

impl<P: Publisher> SwitchToLatestExt for P {}
