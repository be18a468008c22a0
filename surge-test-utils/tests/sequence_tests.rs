// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use std::convert::Infallible;
use std::sync::Arc;
use surge_core::{Completion, Demand, Publisher, SubscriptionRef};
use surge_test_utils::{Event, SequencePublisher, TrackingSubscriber};

#[test]
fn test_sequence_respects_demand() -> anyhow::Result<()> {
    // Arrange
    let subscriber = TrackingSubscriber::<i32, Infallible>::new();
    SequencePublisher::new(1..=5).subscribe(subscriber.clone());
    let subscription = subscriber
        .subscription()
        .ok_or_else(|| anyhow::anyhow!("no subscription"))?;

    // Act
    subscription.request(Demand::max(2));

    // Assert
    assert_eq!(subscriber.values(), vec![1, 2]);
    assert!(subscriber.completions().is_empty());

    // Act
    subscription.request(Demand::max(3));

    // Assert
    assert_eq!(subscriber.values(), vec![1, 2, 3, 4, 5]);
    assert_eq!(subscriber.completions(), vec![Completion::Finished]);
    Ok(())
}

#[test]
fn test_sequence_empty_finishes_immediately() {
    let subscriber = TrackingSubscriber::<i32, Infallible>::new();
    SequencePublisher::new(Vec::new()).subscribe(subscriber.clone());

    assert_eq!(
        subscriber.history(),
        vec![
            Event::Subscription("Empty"),
            Event::Completion(Completion::Finished)
        ]
    );
}

#[test]
fn test_sequence_additional_demand_from_receive() {
    let subscriber = TrackingSubscriber::<i32, Infallible>::builder()
        .on_subscription(|subscription| subscription.request(Demand::max(1)))
        .on_value(|_| Demand::max(1))
        .build();

    SequencePublisher::new(0..3).subscribe(subscriber.clone());

    assert_eq!(subscriber.values(), vec![0, 1, 2]);
    assert_eq!(subscriber.completions(), vec![Completion::Finished]);
}

#[test]
fn test_sequence_cancel_from_receive_stops_emission() {
    let held: Arc<Mutex<Option<SubscriptionRef>>> = Arc::new(Mutex::new(None));
    let held_on_subscription = held.clone();
    let subscriber = TrackingSubscriber::<i32, Infallible>::builder()
        .on_subscription(move |subscription| {
            *held_on_subscription.lock() = Some(subscription.clone());
            subscription.request(Demand::UNLIMITED);
        })
        .on_value(move |value| {
            if *value == 2 {
                let subscription = held.lock().clone();
                if let Some(subscription) = subscription {
                    subscription.cancel();
                }
            }
            Demand::NONE
        })
        .build();

    SequencePublisher::new(1..=4).subscribe(subscriber.clone());

    assert_eq!(subscriber.values(), vec![1, 2]);
    assert!(subscriber.completions().is_empty());
}

#[test]
fn test_sequence_each_subscription_starts_over() {
    let publisher = SequencePublisher::new(["a", "b"]);
    let first = TrackingSubscriber::<&str, Infallible>::requesting(Demand::UNLIMITED);
    let second = TrackingSubscriber::<&str, Infallible>::requesting(Demand::UNLIMITED);

    publisher.subscribe(first.clone());
    publisher.subscribe(second.clone());

    assert_eq!(first.values(), vec!["a", "b"]);
    assert_eq!(second.values(), vec!["a", "b"]);
}
