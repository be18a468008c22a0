// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Holder for the subscription an operator receives from its upstream.
//!
//! Every operator is a subscriber to something, and every one of them has to
//! answer the same questions: did the upstream handle arrive yet, is this a
//! duplicate, and who cancels it (exactly once) when the operator goes away.
//! [`UpstreamSlot`] encodes that lifecycle as three states:
//!
//! ```text
//! Awaiting ──attach──▶ Subscribed(handle) ──take──▶ Released
//!     └───────────────────────take──────────────────────▲
//! ```
//!
//! The slot is plain data; operators keep it inside their own lock and perform
//! the actual `request`/`cancel` calls after releasing that lock.

use crate::{Result, SubscriptionRef, SurgeError};

/// Lifecycle of an upstream subscription handle.
#[derive(Default)]
pub enum UpstreamSlot {
    /// No handle received yet.
    #[default]
    Awaiting,
    /// The live upstream handle.
    Subscribed(SubscriptionRef),
    /// The handle was cancelled, completed or never needed; nothing will be accepted anymore.
    Released,
}

impl UpstreamSlot {
    /// Stores the first handle.
    ///
    /// # Errors
    /// Returns [`SurgeError::ProtocolViolation`] if the slot already held or
    /// released a handle. The rejected handle is dropped here; the caller is
    /// expected to cancel its own clone of it.
    pub fn attach(&mut self, subscription: SubscriptionRef) -> Result<()> {
        match self {
            Self::Awaiting => {
                *self = Self::Subscribed(subscription);
                Ok(())
            }
            Self::Subscribed(_) => Err(SurgeError::protocol_violation(format!(
                "duplicate upstream subscription {}",
                subscription.description()
            ))),
            Self::Released => Err(SurgeError::protocol_violation(format!(
                "upstream subscription {} arrived after release",
                subscription.description()
            ))),
        }
    }

    /// Moves to `Released` and returns the live handle, if there was one.
    ///
    /// Only the first call after `attach` yields the handle, which makes it the
    /// single place a cancellation can originate from.
    pub fn take(&mut self) -> Option<SubscriptionRef> {
        match core::mem::replace(self, Self::Released) {
            Self::Subscribed(subscription) => Some(subscription),
            Self::Awaiting | Self::Released => None,
        }
    }

    /// Clones the live handle without changing state.
    #[must_use]
    pub fn get(&self) -> Option<SubscriptionRef> {
        match self {
            Self::Subscribed(subscription) => Some(subscription.clone()),
            Self::Awaiting | Self::Released => None,
        }
    }

    /// Returns `true` while no handle has arrived and the slot is still open.
    #[must_use]
    pub const fn is_awaiting(&self) -> bool {
        matches!(self, Self::Awaiting)
    }

    /// Returns `true` once the slot no longer accepts or holds a handle.
    #[must_use]
    pub const fn is_released(&self) -> bool {
        matches!(self, Self::Released)
    }
}

impl core::fmt::Debug for UpstreamSlot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Awaiting => f.write_str("Awaiting"),
            Self::Subscribed(subscription) => {
                write!(f, "Subscribed({})", subscription.description())
            }
            Self::Released => f.write_str("Released"),
        }
    }
}
