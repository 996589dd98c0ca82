use bson::Document as BsonDocument;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// One delivered snapshot: the matching `(id, document)` pairs in query
/// order, already bounded by the query limit.
pub type DocumentSet = Vec<(String, BsonDocument)>;

/// Handle to a live query feed. Cancelling (or dropping) stops further
/// delivery; it never affects store state or other subscriptions.
pub struct Subscription {
    rx: mpsc::Receiver<DocumentSet>,
    feed: JoinHandle<()>,
    cancelled: bool,
}

impl Subscription {
    pub(crate) fn new(rx: mpsc::Receiver<DocumentSet>, feed: JoinHandle<()>) -> Self {
        Self { rx, feed, cancelled: false }
    }

    /// Waits for the next snapshot. Returns `None` after cancellation or
    /// once the backing store has gone away.
    pub async fn next(&mut self) -> Option<DocumentSet> {
        if self.cancelled {
            return None;
        }
        self.rx.recv().await
    }

    /// Stops delivery. Purely a resource release; idempotent.
    pub fn cancel(&mut self) {
        if !self.cancelled {
            self.cancelled = true;
            self.feed.abort();
            self.rx.close();
        }
    }

    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.feed.abort();
    }
}
