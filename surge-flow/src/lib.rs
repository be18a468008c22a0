// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Demand-aware operators for Surge publishers.
//!
//! Every operator here is a [`Subscriber`](surge_core::Subscriber) towards its
//! upstream and a [`Publisher`](surge_core::Publisher) towards its downstream,
//! with its own [`Subscription`](surge_core::Subscription) mediating between
//! the two. Operators are exposed as extension traits so they chain onto any
//! publisher.
//!
//! ## Operators
//!
//! - **[`switch_to_latest`](SwitchToLatestExt::switch_to_latest)**: flattens a
//!   publisher of publishers, following only the most recent inner publisher

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

pub mod prelude;
pub mod switch_to_latest;

pub use self::switch_to_latest::{SwitchToLatest, SwitchToLatestExt};
