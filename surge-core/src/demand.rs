// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Demand accounting for backpressure.
//!
//! A [`Demand`] is the number of additional values a subscriber is willing to
//! receive. It is either a finite count or [`Demand::UNLIMITED`]. Arithmetic
//! saturates in both directions: adding to an unlimited demand (or overflowing a
//! finite one) yields unlimited, subtracting never goes below zero.
//!
//! ```
//! use surge_core::Demand;
//!
//! let mut demand = Demand::max(2);
//! demand += Demand::max(3);
//! assert_eq!(demand, Demand::max(5));
//!
//! demand -= 7;
//! assert_eq!(demand, Demand::NONE);
//!
//! assert_eq!(Demand::UNLIMITED - 1, Demand::UNLIMITED);
//! assert!(Demand::max(usize::MAX) < Demand::UNLIMITED);
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

/// Number of values a subscriber permits a publisher to deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Demand {
    /// At most this many further values.
    Max(usize),
    /// Any number of values.
    Unlimited,
}

impl Demand {
    /// No additional values.
    pub const NONE: Self = Self::Max(0);

    /// No limit on delivered values.
    pub const UNLIMITED: Self = Self::Unlimited;

    /// A finite demand of `count` values.
    #[must_use]
    pub const fn max(count: usize) -> Self {
        Self::Max(count)
    }

    /// Returns `true` if no value may be delivered.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::Max(0))
    }

    /// Returns `true` if this demand has no upper bound.
    #[must_use]
    pub const fn is_unlimited(&self) -> bool {
        matches!(self, Self::Unlimited)
    }

    /// The finite count, or `None` for unlimited demand.
    #[must_use]
    pub const fn as_finite(&self) -> Option<usize> {
        match self {
            Self::Max(count) => Some(*count),
            Self::Unlimited => None,
        }
    }
}

impl Default for Demand {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for Demand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Max(count) => write!(f, "max({count})"),
            Self::Unlimited => write!(f, "unlimited"),
        }
    }
}

impl PartialOrd for Demand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Demand {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Max(a), Self::Max(b)) => a.cmp(b),
            (Self::Max(_), Self::Unlimited) => Ordering::Less,
            (Self::Unlimited, Self::Max(_)) => Ordering::Greater,
            (Self::Unlimited, Self::Unlimited) => Ordering::Equal,
        }
    }
}

impl Add for Demand {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Max(a), Self::Max(b)) => a.checked_add(b).map_or(Self::Unlimited, Self::Max),
            _ => Self::Unlimited,
        }
    }
}

impl Add<usize> for Demand {
    type Output = Self;

    fn add(self, rhs: usize) -> Self {
        self + Self::Max(rhs)
    }
}

impl AddAssign for Demand {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl AddAssign<usize> for Demand {
    fn add_assign(&mut self, rhs: usize) {
        *self = *self + rhs;
    }
}

impl Sub for Demand {
    type Output = Self;

    /// Unlimited minus anything stays unlimited; removing unlimited from a
    /// finite demand leaves nothing.
    fn sub(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Unlimited, _) => Self::Unlimited,
            (Self::Max(_), Self::Unlimited) => Self::NONE,
            (Self::Max(a), Self::Max(b)) => Self::Max(a.saturating_sub(b)),
        }
    }
}

impl Sub<usize> for Demand {
    type Output = Self;

    fn sub(self, rhs: usize) -> Self {
        self - Self::Max(rhs)
    }
}

impl SubAssign for Demand {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl SubAssign<usize> for Demand {
    fn sub_assign(&mut self, rhs: usize) {
        *self = *self - rhs;
    }
}

impl From<usize> for Demand {
    fn from(count: usize) -> Self {
        Self::Max(count)
    }
}
