use eatery::Directory;
use eatery::errors::Error;
use eatery::model::{Rating, UserRef};
use eatery::query::Filters;
use eatery::store::{DocumentSet, MemoryStore, Subscription};
use std::sync::Arc;
use std::time::Duration;

async fn next_until(sub: &mut Subscription, pred: impl Fn(&DocumentSet) -> bool) -> DocumentSet {
    loop {
        let snap = tokio::time::timeout(Duration::from_secs(2), sub.next())
            .await
            .expect("snapshot timed out")
            .expect("feed closed");
        if pred(&snap) {
            return snap;
        }
    }
}

#[tokio::test]
async fn seeded_directory_streams_and_rates() {
    let directory = Directory::new(Arc::new(MemoryStore::new()));
    let ids = directory.seed(10).await.unwrap();
    assert_eq!(ids.len(), 10);

    let mut list = directory.restaurants(&Filters::default());
    let snap = next_until(&mut list, |s| s.len() == 10).await;
    assert_eq!(snap.len(), 10);

    // Seeded entries start with empty aggregates.
    let first = directory.restaurant(&ids[0]).await.unwrap();
    assert_eq!(first.num_ratings, 0);
    assert_eq!(first.avg_rating, 0.0);

    let user = UserRef::new("u1", "Alice");
    directory.submit_rating(&ids[0], &user, 4.0, "nice").await.unwrap();
    let rated = directory.restaurant(&ids[0]).await.unwrap();
    assert_eq!(rated.num_ratings, 1);
    assert_eq!(rated.avg_rating, 4.0);
}

#[tokio::test]
async fn detail_feed_lists_ratings_newest_first() {
    let directory = Directory::new(Arc::new(MemoryStore::new()));
    let ids = directory.seed(1).await.unwrap();
    let user = UserRef::new("u1", "Alice");

    directory.submit_rating(&ids[0], &user, 3.0, "first visit").await.unwrap();
    // Rating order is by server timestamp; keep the commits apart by more
    // than the store's millisecond precision.
    tokio::time::sleep(Duration::from_millis(10)).await;
    directory.submit_rating(&ids[0], &user, 5.0, "much better").await.unwrap();

    let mut detail = directory.ratings(&ids[0]);
    let snap = next_until(&mut detail, |s| s.len() == 2).await;
    let newest = Rating::from_document(&snap[0].1).unwrap();
    let oldest = Rating::from_document(&snap[1].1).unwrap();
    assert_eq!(newest.value, 5.0);
    assert_eq!(newest.text, "much better");
    assert_eq!(oldest.value, 3.0);
}

#[tokio::test]
async fn unknown_restaurant_lookup_fails() {
    let directory = Directory::new(Arc::new(MemoryStore::new()));
    let err = directory.restaurant("ghost").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}
