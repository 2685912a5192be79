use facesync_context::*;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Snapshot(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
struct Notice(u64);

#[tokio::test]
async fn snapshot_consumers_see_latest_value() {
    let bus = ContextBus::new();
    bus.provide(Snapshot(1)).unwrap();

    let rx = bus.consume::<Snapshot>().unwrap();
    bus.publish(Snapshot(2)).unwrap();
    bus.publish(Snapshot(3)).unwrap();

    assert_eq!(rx.borrow().0, 3);
    assert_eq!(bus.current::<Snapshot>().unwrap().0, 3);
}

#[tokio::test]
async fn snapshot_recv_waits_for_change() {
    let bus = ContextBus::new();
    bus.provide(Snapshot(0)).unwrap();
    let mut rx = bus.consume::<Snapshot>().unwrap();

    let publisher = bus.clone();
    tokio::spawn(async move {
        publisher.publish(Snapshot(7)).unwrap();
    });

    let received = rx.recv().await.unwrap();
    assert_eq!(*received, Snapshot(7));
}

#[tokio::test]
async fn publish_arc_keeps_identity() {
    let bus = ContextBus::new();
    bus.provide(Snapshot(0)).unwrap();

    let value = Arc::new(Snapshot(5));
    bus.publish_arc(value.clone()).unwrap();

    assert!(Arc::ptr_eq(&value, &bus.current::<Snapshot>().unwrap()));
}

#[tokio::test]
async fn consume_before_provide_fails() {
    let bus = ContextBus::new();
    let result = bus.consume::<Snapshot>();
    assert!(matches!(result, Err(ContextError::NotProvided { .. })));

    let result = bus.publish(Snapshot(1));
    assert!(matches!(result, Err(ContextError::NotProvided { .. })));
}

#[tokio::test]
async fn provide_twice_fails() {
    let bus = ContextBus::new();
    bus.provide(Snapshot(1)).unwrap();
    let result = bus.provide(Snapshot(2));
    assert!(matches!(result, Err(ContextError::AlreadyProvided { .. })));
    assert_eq!(bus.current::<Snapshot>().unwrap().0, 1);
}

#[tokio::test]
async fn notifications_fan_out() {
    let bus = ContextBus::new();
    let mut a = bus.listen::<Notice>().unwrap();
    let mut b = bus.listen::<Notice>().unwrap();

    assert_eq!(bus.notify(Notice(9)).unwrap(), 2);

    assert_eq!(ContextReceiverExt::recv(&mut a).await.unwrap().0, 9);
    assert_eq!(ContextReceiverExt::recv(&mut b).await.unwrap().0, 9);
}

#[tokio::test]
async fn notify_without_listeners_is_not_an_error() {
    let bus = ContextBus::new();
    assert_eq!(bus.notify(Notice(1)).unwrap(), 0);
}

#[tokio::test]
async fn lagged_listener_recovers() {
    let bus = ContextBus::new();
    let mut rx = bus.listen_with_capacity::<Notice>(2).unwrap();

    for i in 0..10 {
        bus.notify(Notice(i)).unwrap();
    }

    let first = ContextReceiverExt::recv(&mut rx).await.unwrap();
    assert!(first.0 >= 8, "expected the fresh tail, got {}", first.0);
}

#[tokio::test]
async fn kinds_cannot_be_mixed() {
    let bus = ContextBus::new();
    bus.provide(Snapshot(1)).unwrap();
    let result = bus.listen::<Snapshot>();
    assert!(matches!(result, Err(ContextError::ChannelKindMismatch { .. })));

    bus.notify(Notice(1)).unwrap();
    let result = bus.provide(Notice(2));
    assert!(matches!(result, Err(ContextError::ChannelKindMismatch { .. })));
}

#[tokio::test]
async fn invalid_capacity_rejected() {
    let bus = ContextBus::new();
    let result = bus.listen_with_capacity::<Notice>(0);
    assert!(matches!(result, Err(ContextError::InvalidCapacity { .. })));
}

#[tokio::test]
async fn shutdown_closes_channels() {
    let bus = ContextBus::new();
    bus.provide(Snapshot(1)).unwrap();
    let mut snapshots = bus.consume::<Snapshot>().unwrap();
    let mut notices = bus.listen::<Notice>().unwrap();

    assert_eq!(bus.shutdown(), 2);

    assert!(ContextReceiverExt::recv(&mut snapshots).await.is_none());
    assert!(ContextReceiverExt::recv(&mut notices).await.is_none());
    assert_eq!(snapshots.borrow().0, 1, "last snapshot stays readable");
}
