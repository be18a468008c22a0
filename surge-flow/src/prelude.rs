// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Convenience re-exports for building pipelines.
//!
//! ```
//! use surge_flow::prelude::*;
//! ```

pub use crate::switch_to_latest::{SwitchToLatest, SwitchToLatestExt};
pub use surge_core::{
    AnyCancellable, Cancellable, Completion, Demand, Publisher, PublisherExt, Subscriber,
    Subscription, SubscriptionRef,
};
