use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use perchdom::{Signal, SubscriptionSet};

fn recorder() -> (Arc<Mutex<Vec<i32>>>, impl Fn(&i32) + Send + Sync + 'static) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let slot = {
        let seen = Arc::clone(&seen);
        move |value: &i32| {
            if let Ok(mut seen) = seen.lock() {
                seen.push(*value);
            }
        }
    };
    (seen, slot)
}

#[test]
fn test_emit_reaches_connected_slots_in_order() {
    let signal = Signal::<i32>::new();
    let order = Arc::new(Mutex::new(Vec::new()));

    let first = {
        let order = Arc::clone(&order);
        signal.connect(move |v| order.lock().unwrap().push(("first", *v)))
    };
    let second = {
        let order = Arc::clone(&order);
        signal.connect(move |v| order.lock().unwrap().push(("second", *v)))
    };

    signal.emit(&7);

    assert_eq!(*order.lock().unwrap(), vec![("first", 7), ("second", 7)]);
    assert!(signal.is_connected(first.id()));
    assert!(signal.is_connected(second.id()));
}

#[test]
fn test_dropping_subscription_disconnects() {
    let signal = Signal::<i32>::new();
    let (seen, slot) = recorder();

    let subscription = signal.connect(slot);
    signal.emit(&1);
    drop(subscription);
    signal.emit(&2);

    assert_eq!(*seen.lock().unwrap(), vec![1]);
    assert_eq!(signal.connection_count(), 0);
}

#[test]
fn test_unsubscribe_and_disconnect() {
    let signal = Signal::<i32>::new();
    let a = signal.connect(|_| {});
    let b = signal.connect(|_| {});
    let b_id = b.id();

    a.unsubscribe();
    assert_eq!(signal.connection_count(), 1);

    assert!(signal.disconnect(b_id));
    assert!(!signal.disconnect(b_id));
    assert_eq!(signal.connection_count(), 0);

    // Dropping a subscription whose slot is already gone is a no-op.
    drop(b);
}

#[test]
fn test_clones_share_slots() {
    let signal = Signal::<i32>::new();
    let emitter = signal.clone();
    let (seen, slot) = recorder();
    let _sub = signal.connect(slot);

    emitter.emit(&3);

    assert_eq!(*seen.lock().unwrap(), vec![3]);
    assert_eq!(emitter.connection_count(), 1);
}

#[test]
fn test_subscription_outliving_signal_is_harmless() {
    let signal = Signal::<i32>::new();
    let subscription = signal.connect(|_| {});
    drop(signal);
    drop(subscription);
}

#[test]
fn test_slot_disconnected_mid_emit_is_skipped() {
    let signal = Signal::<()>::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let victim: Arc<Mutex<Option<perchdom::Subscription>>> = Arc::new(Mutex::new(None));

    let _killer = {
        let victim = Arc::clone(&victim);
        signal.connect(move |_| {
            victim.lock().unwrap().take();
        })
    };
    let counted = {
        let calls = Arc::clone(&calls);
        signal.connect(move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
        })
    };
    *victim.lock().unwrap() = Some(counted);

    signal.emit(&());

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(signal.connection_count(), 1);
}

#[test]
fn test_subscription_set_releases_all() {
    let scroll = Signal::<i32>::new();
    let resize = Signal::<()>::new();

    let mut set: SubscriptionSet = [scroll.connect(|_| {}), scroll.connect(|_| {})]
        .into_iter()
        .collect();
    set.add(resize.connect(|_| {}));
    assert_eq!(set.len(), 3);

    assert_eq!(set.release_all(), 3);
    assert!(set.is_empty());
    assert_eq!(scroll.connection_count(), 0);
    assert_eq!(resize.connection_count(), 0);
}

#[test]
fn test_dropping_subscription_set_releases_all() {
    let signal = Signal::<i32>::new();
    let mut set = SubscriptionSet::new();
    set.extend([signal.connect(|_| {}), signal.connect(|_| {})]);

    drop(set);

    assert_eq!(signal.connection_count(), 0);
}
