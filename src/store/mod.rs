//! Storage abstraction over the content collections.
//!
//! Every page and admin handler talks to a [`Store`] through the
//! [`client::StoreClient`] held in `ServerState`; nothing constructs a
//! connection of its own. The Postgres implementation is used in deployment,
//! the in-memory one in tests and for running the site locally without a DB.

pub mod client;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod query;
pub mod record;

use futures::future::BoxFuture;
use uuid::Uuid;

pub use client::StoreClient;
pub use error::{StoreError, StoreResult};
pub use query::{Filter, OrderBy, Query};
pub use record::{Collection, Fields, Record};

pub trait Store: Send + Sync {
    fn find<'a>(
        &'a self,
        collection: Collection,
        query: &'a Query,
    ) -> BoxFuture<'a, StoreResult<Vec<Record>>>;

    fn insert<'a>(
        &'a self,
        collection: Collection,
        fields: Fields,
    ) -> BoxFuture<'a, StoreResult<Record>>;

    /// Merges `fields` into the existing record. Keys not present are left alone.
    fn update<'a>(
        &'a self,
        collection: Collection,
        id: Uuid,
        fields: Fields,
    ) -> BoxFuture<'a, StoreResult<Record>>;

    fn delete<'a>(&'a self, collection: Collection, id: Uuid) -> BoxFuture<'a, StoreResult<()>>;

    /// Deletes every record matching `filters` and inserts `rows`, all or nothing.
    fn replace<'a>(
        &'a self,
        collection: Collection,
        filters: &'a [Filter],
        rows: Vec<Fields>,
    ) -> BoxFuture<'a, StoreResult<Vec<Record>>>;

    fn count<'a>(&'a self, collection: Collection) -> BoxFuture<'a, StoreResult<u64>>;

    fn find_one<'a>(
        &'a self,
        collection: Collection,
        filters: &'a [Filter],
    ) -> BoxFuture<'a, StoreResult<Option<Record>>> {
        Box::pin(async move {
            let query = Query {
                filters: filters.to_vec(),
                order_by: None,
                limit: Some(1),
            };
            Ok(self.find(collection, &query).await?.into_iter().next())
        })
    }
}
