use crate::errors::Result;
use crate::query::QueryDescription;
use async_trait::async_trait;
use bson::Document as BsonDocument;

mod memory;
mod subscription;

pub use memory::{MemoryStore, MemoryStoreOptions};
pub use subscription::{DocumentSet, Subscription};

/// Reads and buffered writes scoped to one transaction attempt. Reads see
/// a consistent view and record the version observed; writes apply only if
/// the attempt commits.
pub trait TransactionOps {
    /// # Errors
    /// Returns `NotFound` when the document does not exist. The absent
    /// read is still validated at commit, so a concurrently created
    /// document forces a retry rather than a stale abort.
    fn get(&mut self, collection: &str, id: &str) -> Result<BsonDocument>;

    /// Buffers a full-document write under `collection/id`.
    fn set(&mut self, collection: &str, id: &str, doc: BsonDocument);
}

/// The read-compute-write body of a transaction. May run several times
/// when the store detects conflicting concurrent commits, so it must
/// recompute from the reads of the current attempt.
pub type TransactionBody<'a> = dyn FnMut(&mut dyn TransactionOps) -> Result<()> + Send + 'a;

/// A transactional collection-of-documents backend. The core holds no
/// authoritative copy of any entity; everything goes through this seam.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// One-shot read of a single document.
    ///
    /// # Errors
    /// Returns `NotFound` when the document does not exist.
    async fn get(&self, collection: &str, id: &str) -> Result<BsonDocument>;

    /// Non-transactional full-document write, creating or replacing.
    async fn put(&self, collection: &str, id: &str, doc: BsonDocument) -> Result<()>;

    /// Live-updating result feed for a composed query. Delivery starts
    /// with the current matching set and continues until cancelled.
    fn subscribe(&self, query: &QueryDescription) -> Subscription;

    /// Pre-allocates an identifier for a document yet to be written.
    fn new_document_id(&self, collection: &str) -> String;

    /// Runs `body` with commit-or-retry semantics: all writes of a
    /// successful attempt become visible together, or none do.
    ///
    /// # Errors
    /// Propagates the body's error without retrying, and returns
    /// `Transient` once the conflict retry budget is exhausted.
    async fn run_transaction(&self, body: &mut TransactionBody<'_>) -> Result<()>;
}
