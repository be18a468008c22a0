// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::error::Error;
use std::io;
use surge_core::{Completion, SurgeError};

#[test]
fn test_error_display() {
    let err = SurgeError::stream_error("processing failed");
    assert_eq!(
        err.to_string(),
        "Stream processing error: processing failed"
    );

    let err = SurgeError::protocol_violation("value without demand");
    assert_eq!(err.to_string(), "Protocol violation: value without demand");
}

#[test]
fn test_is_permanent() {
    assert!(SurgeError::stream_error("test").is_permanent());
    assert!(SurgeError::user_error(io::Error::other("test")).is_permanent());
    assert!(!SurgeError::protocol_violation("test").is_permanent());
}

#[test]
fn test_user_error_keeps_source() {
    let err = SurgeError::user_error(io::Error::other("disk"));
    assert_eq!(err.to_string(), "User error: disk");
    assert!(err.source().is_some());
}

#[test]
fn test_clone_user_error_keeps_message() {
    let err = SurgeError::user_error(io::Error::other("disk"));

    let cloned = err.clone();

    assert!(matches!(cloned, SurgeError::StreamProcessingError { .. }));
    assert!(cloned.to_string().contains("disk"));
}

#[test]
fn test_completion_accessors() {
    let failure: Completion<SurgeError> = Completion::Failure(SurgeError::stream_error("x"));
    assert!(failure.is_failure());
    assert!(!failure.is_finished());

    let mapped = failure.map_failure(|err| err.to_string());
    assert_eq!(
        mapped.failure(),
        Some("Stream processing error: x".to_string())
    );

    let finished: Completion<SurgeError> = Completion::Finished;
    assert!(finished.failure().is_none());
}

#[test]
fn test_error_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SurgeError>();
}
