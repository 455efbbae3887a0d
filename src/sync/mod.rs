//! Synchronization broadcaster: turns the store's "something changed"
//! signals into full-collection refreshes for dashboard subscribers.
//!
//! Every subscriber owns its own re-fetch-and-deliver cycle on a dedicated
//! task, so a slow or panicking callback cannot starve the others, and each
//! caller keeps its own cache of the collection rather than sharing a
//! process-wide one. Deliveries are always the complete current list, never a
//! delta. Re-fetches triggered by distinct writes are not guaranteed to
//! arrive in write order; subscribers converge on the final state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::store::{Collection, StoreAdapter};

pub struct SyncBroadcaster {
    store: Arc<dyn StoreAdapter>,
}

impl SyncBroadcaster {
    pub fn new(store: Arc<dyn StoreAdapter>) -> Self {
        Self { store }
    }

    /// Subscribe a callback to a collection. The callback first receives the
    /// current snapshot, then the full re-fetched collection after every
    /// change signal, until the handle is unsubscribed or dropped.
    ///
    /// Must be called from within a tokio runtime.
    pub fn subscribe<T, F>(&self, collection: Collection, callback: F) -> SubscriptionHandle
    where
        T: DeserializeOwned + Send + 'static,
        F: Fn(Vec<T>) + Send + 'static,
    {
        let store = self.store.clone();
        let active = Arc::new(AtomicBool::new(true));
        let delivery = Arc::new(Mutex::new(()));
        let guard = active.clone();
        let gate = delivery.clone();
        let mut changes = store.watch(collection);

        let task = tokio::spawn(async move {
            deliver(&*store, collection, &callback, &guard, &gate);

            loop {
                match changes.recv().await {
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        // Signals carry no payload, so the next re-fetch
                        // covers everything that was skipped.
                        tracing::debug!(
                            collection = collection.table(),
                            skipped,
                            "change signals lagged"
                        );
                    }
                    Err(RecvError::Closed) => break,
                }

                if !guard.load(Ordering::Acquire) {
                    break;
                }
                deliver(&*store, collection, &callback, &guard, &gate);
            }
        });

        SubscriptionHandle {
            active,
            delivery,
            task,
        }
    }
}

fn deliver<T, F>(
    store: &dyn StoreAdapter,
    collection: Collection,
    callback: &F,
    guard: &AtomicBool,
    gate: &Mutex<()>,
)
where
    T: DeserializeOwned,
    F: Fn(Vec<T>),
{
    // Held across the whole delivery so unsubscribe can wait it out. A
    // panicking callback poisons the lock; the delivery cycle itself holds no
    // state worth protecting, so poison is cleared.
    let _delivery = gate.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    if !guard.load(Ordering::Acquire) {
        return;
    }

    let entities: Vec<T> = store
        .list(collection)
        .into_iter()
        .filter_map(|row| match serde_json::from_value(row) {
            Ok(entity) => Some(entity),
            Err(error) => {
                tracing::warn!(
                    collection = collection.table(),
                    %error,
                    "skipping row that does not decode"
                );
                None
            }
        })
        .collect();

    // Re-checked after the fetch: an unsubscribe now blocked on the gate has
    // already flipped the flag, and this delivery must not reach the
    // callback.
    if !guard.load(Ordering::Acquire) {
        return;
    }
    callback(entities);
}

/// Handle for one subscription. Unsubscribing is idempotent; dropping the
/// handle unsubscribes as well, so a forgotten handle cannot leak its task.
pub struct SubscriptionHandle {
    active: Arc<AtomicBool>,
    delivery: Arc<Mutex<()>>,
    task: JoinHandle<()>,
}

impl SubscriptionHandle {
    /// Stop deliveries. Blocks until any in-flight delivery finishes, so no
    /// callback invocation begins after this returns. Must not be called
    /// from inside the subscriber callback.
    pub fn unsubscribe(&self) {
        self.active.store(false, Ordering::Release);
        self.task.abort();
        // Synchronize with a delivery that already passed the flag check.
        drop(
            self.delivery
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        );
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
