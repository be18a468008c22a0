// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The control handle a publisher gives to its subscriber.

use crate::Demand;
use std::sync::Arc;

/// Control handle linking one subscriber to one publisher.
///
/// The subscriber uses it to grant more [`Demand`] or to stop the flow. Both
/// calls may arrive reentrantly, from inside a value delivered by the same
/// publisher, and implementations must tolerate that.
///
/// # Contract
///
/// - `request` adds to the outstanding demand; the publisher never delivers
///   more values than the cumulative granted demand.
/// - `cancel` is terminal and idempotent. After the first call the publisher
///   stops delivering and releases what it holds for this subscription.
pub trait Subscription: Send + Sync {
    /// Grants `demand` more values.
    fn request(&self, demand: Demand);

    /// Stops the flow of values for good.
    fn cancel(&self);

    /// Short human-readable name, used by tracking subscribers in tests and logs.
    fn description(&self) -> &'static str {
        "Subscription"
    }
}

/// Shared subscription handle as passed through [`Subscriber::receive_subscription`](crate::Subscriber::receive_subscription).
pub type SubscriptionRef = Arc<dyn Subscription>;

/// Subscription that ignores every request.
///
/// Publishers hand it to subscribers that arrive after they already
/// terminated, right before delivering the terminal completion.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptySubscription;

impl EmptySubscription {
    /// Returns a shareable empty subscription handle.
    #[must_use]
    pub fn shared() -> SubscriptionRef {
        Arc::new(Self)
    }
}

impl Subscription for EmptySubscription {
    fn request(&self, _demand: Demand) {}

    fn cancel(&self) {}

    fn description(&self) -> &'static str {
        "Empty"
    }
}
