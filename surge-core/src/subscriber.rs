// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Completion, Demand, SubscriptionRef};
use std::sync::Arc;

/// Receiving end of the publisher protocol.
///
/// A publisher drives its subscriber through exactly three messages:
///
/// 1. [`receive_subscription`](Self::receive_subscription), once, before anything else;
/// 2. [`receive`](Self::receive), zero or more times, never beyond the granted demand;
/// 3. [`receive_completion`](Self::receive_completion), at most once, terminal.
///
/// All callbacks take `&self`: a subscriber is shared by the publisher that
/// drives it and by whatever code calls back into it reentrantly, so any state
/// lives behind interior mutability.
pub trait Subscriber: Send + Sync {
    /// Type of the values received.
    type Input;
    /// Failure payload carried by a failed completion.
    type Failure;

    /// Hands over the control handle for this subscription.
    fn receive_subscription(&self, subscription: SubscriptionRef);

    /// Delivers one value and returns the *additional* demand the subscriber grants.
    fn receive(&self, input: Self::Input) -> Demand;

    /// Delivers the terminal event.
    fn receive_completion(&self, completion: Completion<Self::Failure>);
}

impl<S> Subscriber for Arc<S>
where
    S: Subscriber + ?Sized,
{
    type Input = S::Input;
    type Failure = S::Failure;

    fn receive_subscription(&self, subscription: SubscriptionRef) {
        (**self).receive_subscription(subscription);
    }

    fn receive(&self, input: Self::Input) -> Demand {
        (**self).receive(input)
    }

    fn receive_completion(&self, completion: Completion<Self::Failure>) {
        (**self).receive_completion(completion);
    }
}
