pub mod errors;
pub mod logger;
pub mod model;
pub mod query;
pub mod ratings;
pub mod seed;
pub mod store;

use crate::errors::Result;
use crate::model::{COLL_RESTAURANTS, Restaurant, UserRef};
use crate::query::{Filters, compose_rating_query, compose_restaurant_query};
use crate::store::{DocumentStore, Subscription};
use std::sync::Arc;

/// Facade over a document store: composes the directory queries and
/// routes rating submissions through the transaction engine. Holds no
/// state of its own beyond the store handle.
pub struct Directory<S: DocumentStore> {
    store: Arc<S>,
}

impl<S: DocumentStore> Directory<S> {
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Live feed of restaurants matching `filters`, best-rated first by
    /// default.
    #[must_use]
    pub fn restaurants(&self, filters: &Filters) -> Subscription {
        self.store.subscribe(&compose_restaurant_query(filters))
    }

    /// Live feed of one restaurant's ratings, newest first.
    #[must_use]
    pub fn ratings(&self, restaurant_id: &str) -> Subscription {
        self.store.subscribe(&compose_rating_query(restaurant_id))
    }

    /// One-shot lookup of a single restaurant.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown id, or a decode error when the
    /// stored document is malformed.
    pub async fn restaurant(&self, id: &str) -> Result<Restaurant> {
        let doc = self.store.get(COLL_RESTAURANTS, id).await?;
        Restaurant::from_document(&doc)
    }

    /// See [`ratings::submit_rating`].
    ///
    /// # Errors
    /// `InvalidArgument`, `NotFound`, or `Transient` per the engine.
    pub async fn submit_rating(
        &self,
        restaurant_id: &str,
        user: &UserRef,
        value: f64,
        text: &str,
    ) -> Result<String> {
        ratings::submit_rating(self.store.as_ref(), restaurant_id, user, value, text).await
    }

    /// Seeds `count` random restaurants, returning their ids.
    ///
    /// # Errors
    /// Propagates store write failures.
    pub async fn seed(&self, count: usize) -> Result<Vec<String>> {
        seed::add_random_restaurants(self.store.as_ref(), count).await
    }

    #[must_use]
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}
