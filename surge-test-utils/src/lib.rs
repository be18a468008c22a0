// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Scripted collaborators for testing Surge publishers and operators.
//!
//! Everything here is synchronous and deterministic. It is designed for use in
//! development and testing only, not for production code.
//!
//! # Key Types
//!
//! - [`TrackingSubscriber`] records every message it receives as an [`Event`]
//!   and can be scripted to request demand or cancel from its callbacks.
//! - [`CustomSubscription`] records every `request` and `cancel` it receives.
//! - [`CustomPublisher`] hands a [`CustomSubscription`] to its subscriber and lets
//!   the test push values and completions by hand.
//! - [`SequencePublisher`] emits a fixed list of values as demand arrives.
//! - [`PassthroughSubject`] broadcasts values to subscribers that have demand.
//!
//! # Example
//!
//! ```rust
//! use surge_core::{Completion, Demand, Publisher};
//! use surge_test_utils::{Event, SequencePublisher, TrackingSubscriber};
//! use std::convert::Infallible;
//!
//! let subscriber = TrackingSubscriber::<i32, Infallible>::requesting(Demand::max(2));
//! SequencePublisher::new([1, 2, 3]).subscribe(subscriber.clone());
//!
//! assert_eq!(
//!     subscriber.history(),
//!     vec![
//!         Event::Subscription("Sequence"),
//!         Event::Value(1),
//!         Event::Value(2),
//!     ]
//! );
//!
//! subscriber.subscription().expect("subscribed").request(Demand::max(1));
//! assert_eq!(subscriber.values(), vec![1, 2, 3]);
//! assert_eq!(subscriber.completions(), vec![Completion::Finished]);
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod custom_publisher;
pub mod custom_subscription;
pub mod passthrough_subject;
pub mod sequence;
pub mod test_error;
pub mod tracking_subscriber;

pub use custom_publisher::CustomPublisher;
pub use custom_subscription::{CustomSubscription, SubscriptionEvent};
pub use passthrough_subject::PassthroughSubject;
pub use sequence::SequencePublisher;
pub use test_error::TestError;
pub use tracking_subscriber::{Event, TrackingSubscriber, TrackingSubscriberBuilder};
