use super::subscription::{DocumentSet, Subscription};
use super::{DocumentStore, TransactionBody, TransactionOps};
use crate::errors::{Error, Result};
use crate::query::{QueryDescription, execute};
use async_trait::async_trait;
use bson::Document as BsonDocument;
use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use uuid::Uuid;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Tuning for the in-memory store.
#[derive(Debug, Clone)]
pub struct MemoryStoreOptions {
    /// Attempts before a contended transaction fails as `Transient`.
    pub max_txn_attempts: u32,
    /// Base sleep between attempts; grows linearly with the attempt number.
    pub retry_backoff: Duration,
    /// Buffered snapshots per subscription before delivery backpressures.
    pub subscription_buffer: usize,
}

impl Default for MemoryStoreOptions {
    fn default() -> Self {
        Self {
            max_txn_attempts: 5,
            retry_backoff: Duration::from_millis(10),
            subscription_buffer: 16,
        }
    }
}

struct Versioned {
    version: u64,
    doc: BsonDocument,
}

struct Inner {
    collections: RwLock<HashMap<String, HashMap<String, Versioned>>>,
    // Commit notifications carry the touched collection path.
    events: broadcast::Sender<String>,
    options: MemoryStoreOptions,
}

/// A versioned in-memory document store with optimistic transactions and
/// live query subscriptions. Cloning shares the underlying state.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(MemoryStoreOptions::default())
    }

    #[must_use]
    pub fn with_options(options: MemoryStoreOptions) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                collections: RwLock::new(HashMap::new()),
                events,
                options,
            }),
        }
    }

    /// Direct write outside any transaction, creating or replacing the
    /// document and bumping its version.
    pub fn insert(&self, collection: &str, id: &str, doc: BsonDocument) {
        {
            let mut cols = self.inner.collections.write();
            let col = cols.entry(collection.to_string()).or_default();
            let version = col.get(id).map_or(0, |v| v.version) + 1;
            col.insert(id.to_string(), Versioned { version, doc });
        }
        self.notify(collection);
    }

    /// Current `(id, document)` pairs of one collection.
    #[must_use]
    pub fn snapshot(&self, collection: &str) -> DocumentSet {
        let cols = self.inner.collections.read();
        cols.get(collection).map_or_else(Vec::new, |col| {
            col.iter().map(|(id, v)| (id.clone(), v.doc.clone())).collect()
        })
    }

    fn notify(&self, collection: &str) {
        // No receivers is fine; subscriptions come and go.
        let _ = self.inner.events.send(collection.to_string());
    }

    /// Validates every recorded read against current versions and, if all
    /// still hold, applies the buffered writes as one unit.
    fn try_commit(&self, attempt: Attempt<'_>) -> bool {
        let mut touched: BTreeSet<String> = BTreeSet::new();
        {
            let mut cols = self.inner.collections.write();
            for (collection, id, seen) in &attempt.reads {
                let current =
                    cols.get(collection).and_then(|col| col.get(id)).map_or(0, |v| v.version);
                if current != *seen {
                    return false;
                }
            }
            for (collection, id, doc) in attempt.writes {
                let col = cols.entry(collection.clone()).or_default();
                let version = col.get(&id).map_or(0, |v| v.version) + 1;
                col.insert(id, Versioned { version, doc });
                touched.insert(collection);
            }
        }
        for collection in touched {
            self.notify(&collection);
        }
        true
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Read set and write buffer of one attempt.
struct Attempt<'a> {
    store: &'a MemoryStore,
    // (collection, id, version seen; 0 = absent)
    reads: Vec<(String, String, u64)>,
    writes: Vec<(String, String, BsonDocument)>,
}

impl<'a> Attempt<'a> {
    fn new(store: &'a MemoryStore) -> Self {
        Self { store, reads: Vec::new(), writes: Vec::new() }
    }
}

impl TransactionOps for Attempt<'_> {
    fn get(&mut self, collection: &str, id: &str) -> Result<BsonDocument> {
        let cols = self.store.inner.collections.read();
        match cols.get(collection).and_then(|col| col.get(id)) {
            Some(v) => {
                self.reads.push((collection.to_string(), id.to_string(), v.version));
                Ok(v.doc.clone())
            }
            None => {
                self.reads.push((collection.to_string(), id.to_string(), 0));
                Err(Error::NotFound(format!("{collection}/{id}")))
            }
        }
    }

    fn set(&mut self, collection: &str, id: &str, doc: BsonDocument) {
        self.writes.push((collection.to_string(), id.to_string(), doc));
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<BsonDocument> {
        let cols = self.inner.collections.read();
        cols.get(collection)
            .and_then(|col| col.get(id))
            .map(|v| v.doc.clone())
            .ok_or_else(|| Error::NotFound(format!("{collection}/{id}")))
    }

    async fn put(&self, collection: &str, id: &str, doc: BsonDocument) -> Result<()> {
        self.insert(collection, id, doc);
        Ok(())
    }

    fn subscribe(&self, query: &QueryDescription) -> Subscription {
        let (tx, rx) = mpsc::channel(self.inner.options.subscription_buffer);
        let mut events = self.inner.events.subscribe();
        let store = self.clone();
        let query = query.clone();
        let feed = tokio::spawn(async move {
            let initial = execute(&query, store.snapshot(&query.collection));
            if tx.send(initial).await.is_err() {
                return;
            }
            loop {
                match events.recv().await {
                    Ok(collection) if collection == query.collection => {
                        let snap = execute(&query, store.snapshot(&query.collection));
                        if tx.send(snap).await.is_err() {
                            return;
                        }
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        // Snapshots are recomputed from current state, so a
                        // lagged receiver only skips intermediate sets.
                        log::warn!("subscription on {} lagged {missed} events", query.collection);
                    }
                    Err(broadcast::error::RecvError::Closed) => return,
                }
            }
        });
        Subscription::new(rx, feed)
    }

    fn new_document_id(&self, _collection: &str) -> String {
        Uuid::new_v4().to_string()
    }

    async fn run_transaction(&self, body: &mut TransactionBody<'_>) -> Result<()> {
        let max_attempts = self.inner.options.max_txn_attempts.max(1);
        for attempt_no in 1..=max_attempts {
            let mut attempt = Attempt::new(self);
            body(&mut attempt)?;
            if self.try_commit(attempt) {
                if attempt_no > 1 {
                    log::debug!("transaction committed on attempt {attempt_no}");
                }
                return Ok(());
            }
            log::warn!("transaction conflict on attempt {attempt_no}/{max_attempts}");
            if attempt_no < max_attempts {
                tokio::time::sleep(self.inner.options.retry_backoff * attempt_no).await;
            }
        }
        Err(Error::Transient(format!("transaction contention: {max_attempts} attempts exhausted")))
    }
}
