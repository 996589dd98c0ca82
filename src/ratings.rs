use crate::errors::{Error, Result};
use crate::model::{COLL_RESTAURANTS, Rating, Restaurant, UserRef, rating_collection};
use crate::store::{DocumentStore, TransactionOps};
use chrono::Utc;

/// Atomically commits a new rating and folds it into the owning
/// restaurant's aggregate fields. Returns the new rating document id.
///
/// After N concurrent successful submissions the count rises by exactly N
/// and the average equals the true mean, independent of interleaving; the
/// store's transaction retry is the only concurrency control involved.
///
/// # Errors
/// - `InvalidArgument` for a malformed id, out-of-range value, or missing
///   author, before any store interaction.
/// - `NotFound` when the restaurant does not exist.
/// - `Transient` when contention exhausts the store's retry budget.
pub async fn submit_rating<S>(
    store: &S,
    restaurant_id: &str,
    user: &UserRef,
    value: f64,
    text: &str,
) -> Result<String>
where
    S: DocumentStore + ?Sized,
{
    if restaurant_id.is_empty() {
        return Err(Error::InvalidArgument("empty restaurant id".into()));
    }
    let rating = Rating::new(user, value, text);
    rating.validate()?;

    let ratings_coll = rating_collection(restaurant_id);
    let rating_id = store.new_document_id(&ratings_coll);

    store
        .run_transaction(&mut |txn: &mut dyn TransactionOps| {
            let doc = txn.get(COLL_RESTAURANTS, restaurant_id)?;
            let mut restaurant = Restaurant::from_document(&doc)?;
            let (num_ratings, avg_rating) =
                next_aggregate(restaurant.num_ratings, restaurant.avg_rating, value);
            restaurant.num_ratings = num_ratings;
            restaurant.avg_rating = avg_rating;
            txn.set(COLL_RESTAURANTS, restaurant_id, restaurant.to_document());

            // Server-assigned timestamp, fresh per attempt.
            let mut committed = rating.clone();
            committed.timestamp = Some(Utc::now());
            txn.set(&ratings_coll, &rating_id, committed.to_document());
            Ok(())
        })
        .await?;

    log::info!("rating {rating_id} committed for restaurant {restaurant_id}");
    Ok(rating_id)
}

/// Running-mean update for one additional rating value.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn next_aggregate(num_ratings: u64, avg_rating: f64, value: f64) -> (u64, f64) {
    let new_num = num_ratings + 1;
    let old_total = avg_rating * num_ratings as f64;
    (new_num, (old_total + value) / new_num as f64)
}

#[cfg(test)]
mod tests {
    use super::next_aggregate;

    #[test]
    fn first_rating_becomes_the_average() {
        assert_eq!(next_aggregate(0, 0.0, 4.0), (1, 4.0));
    }

    #[test]
    fn fold_with_existing_aggregate() {
        let (num, avg) = next_aggregate(2, 4.0, 5.0);
        assert_eq!(num, 3);
        assert!((avg - 13.0 / 3.0).abs() < 1e-12);
    }
}
