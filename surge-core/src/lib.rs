// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core traits and types of the Surge demand-driven publisher protocol.
//!
//! Three roles talk to each other through three messages each:
//!
//! - a [`Publisher`] accepts a [`Subscriber`] and hands it a [`Subscription`];
//! - the [`Subscriber`] receives the subscription, then values, then at most
//!   one [`Completion`];
//! - the [`Subscription`] lets the subscriber grant [`Demand`] or cancel.
//!
//! Nothing flows without demand. Calls are synchronous and may be reentrant:
//! a subscriber can request more, or cancel, from inside the callback that
//! delivers a value.
//!
//! Operators (see the `surge-flow` crate) are subscribers upstream and
//! publishers downstream at the same time; [`UpstreamSlot`] is the shared piece
//! of bookkeeping they use for the subscription they receive.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

pub mod cancellable;
pub mod completion;
pub mod demand;
pub mod error;
pub mod publisher;
pub mod publisher_ext;
pub mod sink;
pub mod subscriber;
pub mod subscription;
pub mod upstream_slot;
pub mod values;

pub use self::cancellable::{AnyCancellable, Cancellable};
pub use self::completion::Completion;
pub use self::demand::Demand;
pub use self::error::{Result, SurgeError};
pub use self::publisher::Publisher;
pub use self::publisher_ext::PublisherExt;
pub use self::sink::Sink;
pub use self::subscriber::Subscriber;
pub use self::subscription::{EmptySubscription, Subscription, SubscriptionRef};
pub use self::upstream_slot::UpstreamSlot;
pub use self::values::Values;
