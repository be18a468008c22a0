// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::SubscriptionRef;
use parking_lot::Mutex;
use std::sync::Arc;

/// Something that can be stopped.
pub trait Cancellable: Send + Sync {
    /// Stops the associated activity. Calling it more than once has no further effect.
    fn cancel(&self);
}

/// Type-erased cancellation handle that cancels when dropped.
///
/// Returned by [`sink`](crate::PublisherExt::sink): keep it alive for as long
/// as values should flow.
///
/// ```
/// use std::sync::Arc;
/// use surge_core::{AnyCancellable, Demand, Subscription};
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// struct Counting(AtomicUsize);
///
/// impl Subscription for Counting {
///     fn request(&self, _demand: Demand) {}
///     fn cancel(&self) {
///         self.0.fetch_add(1, Ordering::SeqCst);
///     }
/// }
///
/// let inner = Arc::new(Counting(AtomicUsize::new(0)));
/// let handle = AnyCancellable::from_subscription(inner.clone());
/// handle.cancel();
/// drop(handle);
/// assert_eq!(inner.0.load(Ordering::SeqCst), 1);
/// ```
pub struct AnyCancellable {
    inner: Mutex<Option<Arc<dyn Cancellable>>>,
}

impl AnyCancellable {
    /// Wraps `cancellable`.
    pub fn new(cancellable: Arc<dyn Cancellable>) -> Self {
        Self {
            inner: Mutex::new(Some(cancellable)),
        }
    }

    /// Cancels `subscription` when this handle is cancelled or dropped.
    pub fn from_subscription(subscription: SubscriptionRef) -> Self {
        Self::new(Arc::new(SubscriptionCancellable(subscription)))
    }

    /// Wraps a closure that runs once on cancellation.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self::new(Arc::new(OnceFn(Mutex::new(Some(Box::new(f))))))
    }

    /// Cancels the wrapped activity; later calls and the eventual drop are no-ops.
    pub fn cancel(&self) {
        let taken = self.inner.lock().take();
        if let Some(cancellable) = taken {
            cancellable.cancel();
        }
    }

    /// Moves this handle into `bag`, tying its lifetime to the bag's.
    pub fn store(self, bag: &mut Vec<AnyCancellable>) {
        bag.push(self);
    }
}

impl Drop for AnyCancellable {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl core::fmt::Debug for AnyCancellable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AnyCancellable")
            .field("active", &self.inner.lock().is_some())
            .finish()
    }
}

type BoxedOnce = Box<dyn FnOnce() + Send>;

struct OnceFn(Mutex<Option<BoxedOnce>>);

impl Cancellable for OnceFn {
    fn cancel(&self) {
        let taken = self.0.lock().take();
        if let Some(f) = taken {
            f();
        }
    }
}

struct SubscriptionCancellable(SubscriptionRef);

impl Cancellable for SubscriptionCancellable {
    fn cancel(&self) {
        self.0.cancel();
    }
}
