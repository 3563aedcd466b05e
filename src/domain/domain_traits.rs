use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use uuid::Uuid;

use crate::store::{Collection, Fields, Filter, Query, Record, StoreClient, StoreError, StoreResult};

/// A typed view over one collection. The typed struct carries `id`,
/// `created_at` and `updated_at` next to its own fields, which is exactly the
/// shape `Record::into_json` produces.
pub trait ContentKind: DeserializeOwned + Sized {
    const COLLECTION: Collection;

    /// Ordering used by list endpoints when nothing else is asked for.
    fn default_query() -> Query {
        Query::new().newest_first()
    }

    fn from_record(record: Record) -> StoreResult<Self> {
        Ok(serde_json::from_value(record.into_json())?)
    }
}

/// Lets the record filter view read a text field off a typed item.
pub trait Filterable {
    fn filter_field(&self, field: &str) -> Option<&str>;
}

impl Filterable for Record {
    fn filter_field(&self, field: &str) -> Option<&str> {
        self.get_str(field)
    }
}

pub fn into_fields<T: Serialize>(value: &T) -> StoreResult<Fields> {
    match serde_json::to_value(value)? {
        Value::Object(fields) => Ok(fields),
        other => Err(StoreError::Decode(format!(
            "expected an object to store, got {other}"
        ))),
    }
}

pub fn id_filter(id: Uuid) -> Filter {
    Filter::eq("id", id.to_string())
}

pub async fn list_content<T: ContentKind>(store: &StoreClient, query: &Query) -> StoreResult<Vec<T>> {
    store
        .find(T::COLLECTION, query)
        .await?
        .into_iter()
        .map(T::from_record)
        .collect()
}

pub async fn get_content<T: ContentKind>(store: &StoreClient, id: Uuid) -> StoreResult<Option<T>> {
    store
        .find_one(T::COLLECTION, &[id_filter(id)])
        .await?
        .map(T::from_record)
        .transpose()
}

pub async fn create_content<T: ContentKind, D: Serialize>(
    store: &StoreClient,
    draft: &D,
) -> StoreResult<T> {
    let record = store.insert(T::COLLECTION, into_fields(draft)?).await?;
    T::from_record(record)
}

/// Writes every field of `draft` over the stored record. `None` fields are
/// written as null, so a cleared form field clears the stored one.
pub async fn update_content<T: ContentKind, D: Serialize>(
    store: &StoreClient,
    id: Uuid,
    draft: &D,
) -> StoreResult<T> {
    let record = store.update(T::COLLECTION, id, into_fields(draft)?).await?;
    T::from_record(record)
}

pub async fn delete_content<T: ContentKind>(store: &StoreClient, id: Uuid) -> StoreResult<()> {
    store.delete(T::COLLECTION, id).await
}
