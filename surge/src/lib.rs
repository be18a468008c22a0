// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Surge
//!
//! Demand-driven publishers and subscribers with backpressure.
//!
//! ## Overview
//!
//! A [`Publisher`] produces values only as fast as its [`Subscriber`] asks for
//! them through [`Demand`]. Operators such as
//! [`switch_to_latest`](SwitchToLatestExt::switch_to_latest) sit between the
//! two and keep that contract intact: they never deliver more than was
//! requested, never deliver after cancellation and always terminate exactly once.
//!
//! The crate is a facade over:
//!
//! - `surge-core`: the protocol traits, [`Demand`], [`Completion`], the
//!   closure-driven [`Sink`] and the [`Values`] stream bridge;
//! - `surge-flow`: the operators.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use surge::prelude::*;
//! use surge_test_utils::PassthroughSubject;
//!
//! let searches = PassthroughSubject::<PassthroughSubject<String, SurgeError>, SurgeError>::new();
//! let results = Arc::new(Mutex::new(Vec::new()));
//! let sink_results = results.clone();
//!
//! let _cancellable = searches.clone().switch_to_latest().sink_with_completion(
//!     |_completion| {},
//!     move |result| sink_results.lock().push(result),
//! );
//!
//! let slow = PassthroughSubject::new();
//! let fast = PassthroughSubject::new();
//! searches.send(slow.clone());
//! searches.send(fast.clone());
//!
//! slow.send("stale".to_string());
//! fast.send("fresh".to_string());
//!
//! assert_eq!(*results.lock(), vec!["fresh".to_string()]);
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` events for subscriptions, switches, dropped
//!   values and terminations.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

// Re-export the protocol
pub use surge_core::{
    AnyCancellable, Cancellable, Completion, Demand, EmptySubscription, Publisher, PublisherExt,
    Result, Sink, Subscriber, Subscription, SubscriptionRef, SurgeError, UpstreamSlot, Values,
};

// Re-export the operators
pub use surge_flow::{SwitchToLatest, SwitchToLatestExt};

/// Prelude module for convenient imports
pub mod prelude {
    pub use surge_core::SurgeError;
    pub use surge_flow::prelude::*;
}
