// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::Subscriber;
use std::sync::Arc;

/// Producer side of the protocol.
///
/// `subscribe` attaches a subscriber and, at some point, hands it a
/// [`Subscription`](crate::Subscription). Values only flow once the subscriber
/// requests them.
pub trait Publisher {
    /// Type of the values produced.
    type Output;
    /// Failure payload of a failed completion.
    type Failure;

    /// Attaches `subscriber` to this publisher.
    fn subscribe<S>(&self, subscriber: S)
    where
        S: Subscriber<Input = Self::Output, Failure = Self::Failure> + 'static;
}

impl<P> Publisher for Arc<P>
where
    P: Publisher + ?Sized,
{
    type Output = P::Output;
    type Failure = P::Failure;

    fn subscribe<S>(&self, subscriber: S)
    where
        S: Subscriber<Input = Self::Output, Failure = Self::Failure> + 'static,
    {
        (**self).subscribe(subscriber);
    }
}
