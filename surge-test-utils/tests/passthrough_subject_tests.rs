// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use surge_core::{Completion, Demand, Publisher};
use surge_test_utils::{Event, PassthroughSubject, TestError, TrackingSubscriber};

#[test]
fn test_subject_drops_values_without_demand() {
    // Arrange
    let subject = PassthroughSubject::<i32, TestError>::new();
    let eager = TrackingSubscriber::<i32, TestError>::requesting(Demand::UNLIMITED);
    let lazy = TrackingSubscriber::<i32, TestError>::requesting(Demand::max(1));
    subject.subscribe(eager.clone());
    subject.subscribe(lazy.clone());

    // Act
    subject.send(1);
    subject.send(2);

    // Assert
    assert_eq!(eager.values(), vec![1, 2]);
    assert_eq!(lazy.values(), vec![1]);
}

#[test]
fn test_subject_completion_reaches_every_subscriber_once() {
    let subject = PassthroughSubject::<i32, TestError>::new();
    let first = TrackingSubscriber::<i32, TestError>::new();
    let second = TrackingSubscriber::<i32, TestError>::new();
    subject.subscribe(first.clone());
    subject.subscribe(second.clone());

    subject.send_completion(Completion::Failure(TestError::Oops));
    subject.send_completion(Completion::Finished);
    subject.send(3);

    for subscriber in [first, second] {
        assert_eq!(
            subscriber.history(),
            vec![
                Event::Subscription("PassthroughSubject"),
                Event::Completion(Completion::Failure(TestError::Oops)),
            ]
        );
    }
    assert_eq!(subject.subscriber_count(), 0);
}

#[test]
fn test_subject_late_subscriber_gets_completion() {
    let subject = PassthroughSubject::<i32, TestError>::new();
    subject.send_completion(Completion::Finished);

    let late = TrackingSubscriber::<i32, TestError>::new();
    subject.subscribe(late.clone());

    assert_eq!(
        late.history(),
        vec![
            Event::Subscription("Empty"),
            Event::Completion(Completion::Finished),
        ]
    );
}

#[test]
fn test_subject_cancelled_subscriber_stops_receiving() -> anyhow::Result<()> {
    let subject = PassthroughSubject::<i32, TestError>::new();
    let subscriber = TrackingSubscriber::<i32, TestError>::requesting(Demand::UNLIMITED);
    subject.subscribe(subscriber.clone());
    assert_eq!(subject.subscriber_count(), 1);

    subject.send(1);
    subscriber
        .subscription()
        .ok_or_else(|| anyhow::anyhow!("no subscription"))?
        .cancel();
    subject.send(2);

    assert_eq!(subscriber.values(), vec![1]);
    assert_eq!(subject.subscriber_count(), 0);
    Ok(())
}
