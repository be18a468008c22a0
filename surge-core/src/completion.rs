// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Terminal signal of a subscription: either normal completion or a failure payload.
///
/// At most one completion is delivered per subscription, and no value follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Completion<E> {
    /// The publisher finished without error.
    Finished,
    /// The publisher terminated with a failure.
    Failure(E),
}

impl<E> Completion<E> {
    /// Returns `true` if this is `Finished`.
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Finished)
    }

    /// Returns `true` if this is a `Failure`.
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Converts into the failure payload, discarding `Finished`.
    pub fn failure(self) -> Option<E> {
        match self {
            Self::Finished => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// Maps the failure payload, leaving `Finished` untouched.
    pub fn map_failure<F, O>(self, f: O) -> Completion<F>
    where
        O: FnOnce(E) -> F,
    {
        match self {
            Self::Finished => Completion::Finished,
            Self::Failure(error) => Completion::Failure(f(error)),
        }
    }
}
