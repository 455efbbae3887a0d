//! Broadcaster behavior as seen by dashboard subscribers: full-collection
//! deliveries, independent per-subscriber cycles, and idempotent
//! unsubscribe.
//!
//! Deliveries triggered by distinct writes are not guaranteed to arrive in
//! write order; these tests assert convergence on the final state rather
//! than a strict delivery sequence.

mod common {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use flexpool::store::MemoryStore;
    use flexpool::{SyncBroadcaster, Worker};

    pub(crate) fn build_broadcaster() -> (SyncBroadcaster, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (SyncBroadcaster::new(store.clone()), store)
    }

    /// Collects every delivery a subscriber receives.
    #[derive(Default, Clone)]
    pub(crate) struct Deliveries {
        snapshots: Arc<Mutex<Vec<Vec<Worker>>>>,
    }

    impl Deliveries {
        pub(crate) fn record(&self) -> impl Fn(Vec<Worker>) + Send + 'static {
            let snapshots = self.snapshots.clone();
            move |workers| snapshots.lock().expect("lock").push(workers)
        }

        pub(crate) fn count(&self) -> usize {
            self.snapshots.lock().expect("lock").len()
        }

        pub(crate) fn latest(&self) -> Option<Vec<Worker>> {
            self.snapshots.lock().expect("lock").last().cloned()
        }
    }

    /// Poll until `condition` holds, failing the test after two seconds.
    pub(crate) async fn wait_until(description: &str, condition: impl Fn() -> bool) {
        let deadline = Duration::from_secs(2);
        let poll = async {
            while !condition() {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        };
        tokio::time::timeout(deadline, poll)
            .await
            .unwrap_or_else(|_| panic!("timed out waiting until {description}"));
    }

    pub(crate) fn worker_row(name: &str) -> serde_json::Value {
        serde_json::json!({
            "name": name,
            "email": format!("{name}@x.nl"),
            "phone": "+31600000000",
            "skills": [],
            "rating": 4.0,
        })
    }
}

use std::time::Duration;

use common::*;
use flexpool::store::StoreAdapter;
use flexpool::{Collection, Worker};

#[tokio::test]
async fn subscriber_receives_initial_snapshot_then_refetches_on_change() {
    let (broadcaster, store) = build_broadcaster();
    store.insert(Collection::Workers, worker_row("Jan"));

    let deliveries = Deliveries::default();
    let handle = broadcaster.subscribe::<Worker, _>(Collection::Workers, deliveries.record());

    wait_until("initial snapshot arrives", || deliveries.count() >= 1).await;
    assert_eq!(deliveries.latest().expect("snapshot").len(), 1);

    store.insert(Collection::Workers, worker_row("Sanne"));
    wait_until("refetch after write arrives", || {
        deliveries.latest().is_some_and(|workers| workers.len() == 2)
    })
    .await;

    // Always the complete current list, never a delta.
    let latest = deliveries.latest().expect("delivery");
    let names: Vec<_> = latest.iter().map(|worker| worker.name.as_str()).collect();
    assert_eq!(names, vec!["Jan", "Sanne"]);

    handle.unsubscribe();
}

#[tokio::test]
async fn independent_subscribers_each_get_their_own_cycle() {
    let (broadcaster, store) = build_broadcaster();

    let first = Deliveries::default();
    let second = Deliveries::default();
    let first_handle = broadcaster.subscribe::<Worker, _>(Collection::Workers, first.record());
    let second_handle = broadcaster.subscribe::<Worker, _>(Collection::Workers, second.record());

    store.insert(Collection::Workers, worker_row("Jan"));

    wait_until("both subscribers observe the write", || {
        first.latest().is_some_and(|w| w.len() == 1)
            && second.latest().is_some_and(|w| w.len() == 1)
    })
    .await;

    first_handle.unsubscribe();
    second_handle.unsubscribe();
}

#[tokio::test]
async fn panicking_subscriber_does_not_block_the_others() {
    let (broadcaster, store) = build_broadcaster();

    let broken = broadcaster.subscribe::<Worker, _>(Collection::Workers, |_| {
        panic!("subscriber bug");
    });
    let healthy = Deliveries::default();
    let healthy_handle = broadcaster.subscribe::<Worker, _>(Collection::Workers, healthy.record());

    store.insert(Collection::Workers, worker_row("Jan"));

    wait_until("healthy subscriber observes the write", || {
        healthy.latest().is_some_and(|w| w.len() == 1)
    })
    .await;

    broken.unsubscribe();
    healthy_handle.unsubscribe();
}

#[tokio::test]
async fn unsubscribe_stops_deliveries_and_is_idempotent() {
    let (broadcaster, store) = build_broadcaster();

    let deliveries = Deliveries::default();
    let handle = broadcaster.subscribe::<Worker, _>(Collection::Workers, deliveries.record());
    wait_until("initial snapshot arrives", || deliveries.count() >= 1).await;

    handle.unsubscribe();
    handle.unsubscribe(); // safe to call again

    let seen = deliveries.count();
    store.insert(Collection::Workers, worker_row("Jan"));
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(deliveries.count(), seen, "no deliveries after unsubscribe");
    assert!(!handle.is_active());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn no_delivery_begins_after_unsubscribe_returns() {
    let (broadcaster, store) = build_broadcaster();

    // Hammer the unsubscribe/delivery race: the count observed the moment
    // unsubscribe returns must be final, even when a write landed just
    // before.
    for round in 0..50 {
        let deliveries = Deliveries::default();
        let handle = broadcaster.subscribe::<Worker, _>(Collection::Workers, deliveries.record());
        store.insert(Collection::Workers, worker_row("Jan"));
        handle.unsubscribe();

        let seen = deliveries.count();
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(
            deliveries.count(),
            seen,
            "round {round}: a delivery began after unsubscribe returned"
        );
    }
}

#[tokio::test]
async fn dropping_the_handle_unsubscribes() {
    let (broadcaster, store) = build_broadcaster();

    let deliveries = Deliveries::default();
    {
        let _handle = broadcaster.subscribe::<Worker, _>(Collection::Workers, deliveries.record());
        wait_until("initial snapshot arrives", || deliveries.count() >= 1).await;
    }

    let seen = deliveries.count();
    store.insert(Collection::Workers, worker_row("Jan"));
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(deliveries.count(), seen);
}

#[tokio::test]
async fn rapid_writes_converge_on_the_final_state() {
    let (broadcaster, store) = build_broadcaster();

    let deliveries = Deliveries::default();
    let handle = broadcaster.subscribe::<Worker, _>(Collection::Workers, deliveries.record());

    for name in ["Jan", "Sanne", "Piet", "Anna", "Marco"] {
        store.insert(Collection::Workers, worker_row(name));
    }

    // Intermediate deliveries may coalesce or arrive out of write order; the
    // last one must reflect the complete final collection.
    wait_until("subscriber converges on all five workers", || {
        deliveries.latest().is_some_and(|workers| workers.len() == 5)
    })
    .await;

    handle.unsubscribe();
}

#[tokio::test]
async fn mutations_on_other_collections_do_not_disturb_subscribers() {
    let (broadcaster, store) = build_broadcaster();

    let deliveries = Deliveries::default();
    let handle = broadcaster.subscribe::<Worker, _>(Collection::Workers, deliveries.record());
    wait_until("initial snapshot arrives", || deliveries.count() >= 1).await;

    let seen = deliveries.count();
    store.insert(
        Collection::Applications,
        serde_json::json!({ "name": "Marco" }),
    );
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(deliveries.count(), seen);

    handle.unsubscribe();
}
