use std::{future::Future, sync::Arc, time::Duration};

use tracing::warn;
use uuid::Uuid;

use super::{
    Store,
    error::{StoreError, StoreResult},
    query::{Filter, Query},
    record::{Collection, Fields, Record},
};

pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_millis(5000);

/// Handle held in `ServerState`. Every round-trip is bounded by `timeout`;
/// expiry surfaces as `StoreError::Unavailable`.
#[derive(Clone)]
pub struct StoreClient {
    inner: Arc<dyn Store>,
    timeout: Duration,
}

impl StoreClient {
    pub fn new(inner: Arc<dyn Store>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn bounded<T>(
        &self,
        op: &'static str,
        collection: Collection,
        fut: impl Future<Output = StoreResult<T>>,
    ) -> StoreResult<T> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(op, %collection, timeout = ?self.timeout, "Store round-trip timed out");
                Err(StoreError::Unavailable(format!(
                    "{op} on {collection} timed out after {:?}",
                    self.timeout
                )))
            }
        }
    }

    pub async fn find(&self, collection: Collection, query: &Query) -> StoreResult<Vec<Record>> {
        self.bounded("find", collection, self.inner.find(collection, query))
            .await
    }

    pub async fn find_one(
        &self,
        collection: Collection,
        filters: &[Filter],
    ) -> StoreResult<Option<Record>> {
        self.bounded("find_one", collection, self.inner.find_one(collection, filters))
            .await
    }

    pub async fn insert(&self, collection: Collection, fields: Fields) -> StoreResult<Record> {
        self.bounded("insert", collection, self.inner.insert(collection, fields))
            .await
    }

    pub async fn update(
        &self,
        collection: Collection,
        id: Uuid,
        fields: Fields,
    ) -> StoreResult<Record> {
        self.bounded("update", collection, self.inner.update(collection, id, fields))
            .await
    }

    pub async fn delete(&self, collection: Collection, id: Uuid) -> StoreResult<()> {
        self.bounded("delete", collection, self.inner.delete(collection, id))
            .await
    }

    pub async fn replace(
        &self,
        collection: Collection,
        filters: &[Filter],
        rows: Vec<Fields>,
    ) -> StoreResult<Vec<Record>> {
        self.bounded(
            "replace",
            collection,
            self.inner.replace(collection, filters, rows),
        )
        .await
    }

    pub async fn count(&self, collection: Collection) -> StoreResult<u64> {
        self.bounded("count", collection, self.inner.count(collection))
            .await
    }
}

#[cfg(test)]
pub(crate) mod test_stores {
    use futures::future::BoxFuture;

    use super::*;

    /// Never answers within any sane timeout.
    pub struct StalledStore;

    /// Fails every call with the given error.
    pub struct FailingStore(pub StoreError);

    fn stall<'a, T: Send + 'a>() -> BoxFuture<'a, StoreResult<T>> {
        Box::pin(async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Err(StoreError::Unavailable("stalled".to_owned()))
        })
    }

    impl Store for StalledStore {
        fn find<'a>(&'a self, _: Collection, _: &'a Query) -> BoxFuture<'a, StoreResult<Vec<Record>>> {
            stall()
        }
        fn insert<'a>(&'a self, _: Collection, _: Fields) -> BoxFuture<'a, StoreResult<Record>> {
            stall()
        }
        fn update<'a>(&'a self, _: Collection, _: Uuid, _: Fields) -> BoxFuture<'a, StoreResult<Record>> {
            stall()
        }
        fn delete<'a>(&'a self, _: Collection, _: Uuid) -> BoxFuture<'a, StoreResult<()>> {
            stall()
        }
        fn replace<'a>(
            &'a self,
            _: Collection,
            _: &'a [Filter],
            _: Vec<Fields>,
        ) -> BoxFuture<'a, StoreResult<Vec<Record>>> {
            stall()
        }
        fn count<'a>(&'a self, _: Collection) -> BoxFuture<'a, StoreResult<u64>> {
            stall()
        }
    }

    impl FailingStore {
        fn fail<'a, T: Send + 'a>(&self) -> BoxFuture<'a, StoreResult<T>> {
            let e = self.0.clone();
            Box::pin(async move { Err(e) })
        }
    }

    impl Store for FailingStore {
        fn find<'a>(&'a self, _: Collection, _: &'a Query) -> BoxFuture<'a, StoreResult<Vec<Record>>> {
            self.fail()
        }
        fn insert<'a>(&'a self, _: Collection, _: Fields) -> BoxFuture<'a, StoreResult<Record>> {
            self.fail()
        }
        fn update<'a>(&'a self, _: Collection, _: Uuid, _: Fields) -> BoxFuture<'a, StoreResult<Record>> {
            self.fail()
        }
        fn delete<'a>(&'a self, _: Collection, _: Uuid) -> BoxFuture<'a, StoreResult<()>> {
            self.fail()
        }
        fn replace<'a>(
            &'a self,
            _: Collection,
            _: &'a [Filter],
            _: Vec<Fields>,
        ) -> BoxFuture<'a, StoreResult<Vec<Record>>> {
            self.fail()
        }
        fn count<'a>(&'a self, _: Collection) -> BoxFuture<'a, StoreResult<u64>> {
            self.fail()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_stores::{FailingStore, StalledStore};
    use super::*;
    use crate::store::memory::MemoryStore;

    #[tokio::test]
    async fn stalled_round_trip_becomes_unavailable() {
        let client = StoreClient::new(Arc::new(StalledStore), Duration::from_millis(50));

        let result = client.find(Collection::BlogPosts, &Query::new()).await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }

    #[tokio::test]
    async fn store_errors_pass_through_unchanged() {
        let err = StoreError::Query("syntax error".to_owned());
        let client = StoreClient::new(Arc::new(FailingStore(err.clone())), DEFAULT_STORE_TIMEOUT);

        assert_eq!(client.count(Collection::Projects).await, Err(err));
    }

    #[tokio::test]
    async fn answers_within_the_timeout_are_returned() {
        let client = StoreClient::new(Arc::new(MemoryStore::new()), DEFAULT_STORE_TIMEOUT);
        client
            .insert(Collection::Partners, Fields::new())
            .await
            .unwrap();

        assert_eq!(client.count(Collection::Partners).await, Ok(1));
    }
}
