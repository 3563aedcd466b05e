use std::collections::HashMap;

use chrono::Utc;
use futures::future::BoxFuture;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    Store,
    error::{StoreError, StoreResult},
    query::{Filter, Query},
    record::{Collection, Fields, Record},
};

/// Process-local store. Records of a collection are kept in insertion order,
/// which is what `find` returns when the query has no ordering.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Record>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_unique(
    collection: Collection,
    records: &[Record],
    fields: &Fields,
    skip_id: Option<Uuid>,
) -> StoreResult<()> {
    for field in collection.unique_fields() {
        let Some(value) = fields.get(*field).filter(|v| !v.is_null()) else {
            continue;
        };
        let taken = records
            .iter()
            .filter(|record| Some(record.id) != skip_id)
            .any(|record| record.fields.get(*field) == Some(value));
        if taken {
            return Err(StoreError::Conflict(format!(
                "{collection}.{field} = {value} already exists"
            )));
        }
    }
    Ok(())
}

fn new_record(fields: Fields) -> Record {
    let now = Utc::now();
    Record {
        id: Uuid::now_v7(),
        created_at: now,
        updated_at: now,
        fields,
    }
}

impl Store for MemoryStore {
    fn find<'a>(
        &'a self,
        collection: Collection,
        query: &'a Query,
    ) -> BoxFuture<'a, StoreResult<Vec<Record>>> {
        Box::pin(async move {
            let collections = self.collections.read().await;
            let records = collections.get(&collection).map(Vec::as_slice).unwrap_or(&[]);
            Ok(query.apply(records))
        })
    }

    fn insert<'a>(
        &'a self,
        collection: Collection,
        fields: Fields,
    ) -> BoxFuture<'a, StoreResult<Record>> {
        Box::pin(async move {
            let mut collections = self.collections.write().await;
            let records = collections.entry(collection).or_default();
            check_unique(collection, records, &fields, None)?;

            let record = new_record(fields);
            records.push(record.clone());
            Ok(record)
        })
    }

    fn update<'a>(
        &'a self,
        collection: Collection,
        id: Uuid,
        fields: Fields,
    ) -> BoxFuture<'a, StoreResult<Record>> {
        Box::pin(async move {
            let mut collections = self.collections.write().await;
            let records = collections.entry(collection).or_default();
            check_unique(collection, records, &fields, Some(id))?;

            let record = records
                .iter_mut()
                .find(|record| record.id == id)
                .ok_or_else(|| StoreError::NotFound(format!("{collection}/{id}")))?;

            for (key, value) in fields {
                record.fields.insert(key, value);
            }
            record.updated_at = Utc::now();
            Ok(record.clone())
        })
    }

    fn delete<'a>(&'a self, collection: Collection, id: Uuid) -> BoxFuture<'a, StoreResult<()>> {
        Box::pin(async move {
            let mut collections = self.collections.write().await;
            let records = collections.entry(collection).or_default();
            let before = records.len();
            records.retain(|record| record.id != id);
            if records.len() == before {
                return Err(StoreError::NotFound(format!("{collection}/{id}")));
            }
            Ok(())
        })
    }

    fn replace<'a>(
        &'a self,
        collection: Collection,
        filters: &'a [Filter],
        rows: Vec<Fields>,
    ) -> BoxFuture<'a, StoreResult<Vec<Record>>> {
        Box::pin(async move {
            // Single write guard for the whole swap; nobody observes the in-between state.
            let mut collections = self.collections.write().await;
            let records = collections.entry(collection).or_default();

            let mut kept: Vec<Record> = records
                .iter()
                .filter(|record| !filters.iter().all(|f| f.matches(record)))
                .cloned()
                .collect();

            let mut inserted = Vec::with_capacity(rows.len());
            for fields in rows {
                check_unique(collection, &kept, &fields, None)?;
                let record = new_record(fields);
                kept.push(record.clone());
                inserted.push(record);
            }

            *records = kept;
            Ok(inserted)
        })
    }

    fn count<'a>(&'a self, collection: Collection) -> BoxFuture<'a, StoreResult<u64>> {
        Box::pin(async move {
            let collections = self.collections.read().await;
            Ok(collections.get(&collection).map_or(0, |r| r.len() as u64))
        })
    }
}

/// Builds a `Fields` map from a `serde_json::json!` object literal.
#[cfg(test)]
pub fn fields(value: serde_json::Value) -> Fields {
    match value {
        serde_json::Value::Object(map) => map,
        _ => Fields::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn find_applies_filters_order_and_limit() {
        let store = MemoryStore::new();
        for (title, date) in [
            ("late", "2026-12-01T00:00:00Z"),
            ("past", "2025-01-01T00:00:00Z"),
            ("soon", "2026-11-01T00:00:00Z"),
        ] {
            store
                .insert(
                    Collection::Events,
                    fields(json!({ "title": title, "date": date })),
                )
                .await
                .unwrap();
        }

        let query = Query::new()
            .filter(Filter::gte("date", "2026-10-16T00:00:00Z"))
            .order_by("date", true)
            .limit(3);
        let found = store.find(Collection::Events, &query).await.unwrap();

        let titles: Vec<_> = found.iter().filter_map(|r| r.get_str("title")).collect();
        assert_eq!(titles, vec!["soon", "late"]);
    }

    #[tokio::test]
    async fn numeric_order_is_not_lexicographic() {
        let store = MemoryStore::new();
        for index in [10, 2, 1] {
            store
                .insert(
                    Collection::ProjectScreenshots,
                    fields(json!({ "order_index": index })),
                )
                .await
                .unwrap();
        }

        let query = Query::new().order_by("order_index", true);
        let found = store
            .find(Collection::ProjectScreenshots, &query)
            .await
            .unwrap();
        let order: Vec<_> = found
            .iter()
            .map(|r| r.fields["order_index"].as_i64().unwrap())
            .collect();
        assert_eq!(order, vec![1, 2, 10]);
    }

    #[tokio::test]
    async fn update_merges_fields_and_keeps_the_rest() {
        let store = MemoryStore::new();
        let record = store
            .insert(
                Collection::Partners,
                fields(json!({ "name": "Acme", "website": "https://acme.test" })),
            )
            .await
            .unwrap();

        let updated = store
            .update(
                Collection::Partners,
                record.id,
                fields(json!({ "name": "Acme XR" })),
            )
            .await
            .unwrap();

        assert_eq!(updated.get_str("name"), Some("Acme XR"));
        assert_eq!(updated.get_str("website"), Some("https://acme.test"));
        assert!(updated.updated_at >= record.updated_at);
    }

    #[tokio::test]
    async fn unique_slug_is_enforced_but_own_record_may_keep_it() {
        let store = MemoryStore::new();
        let first = store
            .insert(Collection::BlogPosts, fields(json!({ "slug": "demo" })))
            .await
            .unwrap();

        let dup = store
            .insert(Collection::BlogPosts, fields(json!({ "slug": "demo" })))
            .await;
        assert!(matches!(dup, Err(StoreError::Conflict(_))));

        let same = store
            .update(
                Collection::BlogPosts,
                first.id,
                fields(json!({ "slug": "demo", "title": "Demo" })),
            )
            .await;
        assert!(same.is_ok());
    }

    #[tokio::test]
    async fn delete_and_update_missing_records_report_not_found() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();

        assert!(matches!(
            store.delete(Collection::Careers, id).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.update(Collection::Careers, id, Fields::new()).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn replace_swaps_only_matching_rows() {
        let store = MemoryStore::new();
        let project_a = Uuid::new_v4().to_string();
        let project_b = Uuid::new_v4().to_string();
        for (project, url) in [(&project_a, "a1"), (&project_a, "a2"), (&project_b, "b1")] {
            store
                .insert(
                    Collection::ProjectScreenshots,
                    fields(json!({ "project_id": project, "image_url": url })),
                )
                .await
                .unwrap();
        }

        let filters = [Filter::eq("project_id", project_a.as_str())];
        let inserted = store
            .replace(
                Collection::ProjectScreenshots,
                &filters,
                vec![fields(json!({ "project_id": project_a, "image_url": "a3" }))],
            )
            .await
            .unwrap();
        assert_eq!(inserted.len(), 1);

        let all = store
            .find(Collection::ProjectScreenshots, &Query::new())
            .await
            .unwrap();
        let urls: Vec<_> = all.iter().filter_map(|r| r.get_str("image_url")).collect();
        assert_eq!(urls, vec!["b1", "a3"]);
        assert_eq!(store.count(Collection::ProjectScreenshots).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn find_one_returns_first_match() {
        let store = MemoryStore::new();
        store
            .insert(
                Collection::AdminUsers,
                fields(json!({ "email": "admin@lumengaze.test" })),
            )
            .await
            .unwrap();

        let filters = [Filter::eq("email", "admin@lumengaze.test")];
        let found = store
            .find_one(Collection::AdminUsers, &filters)
            .await
            .unwrap();
        assert!(found.is_some());

        let filters = [Filter::eq("email", "nobody@lumengaze.test")];
        let missing = store
            .find_one(Collection::AdminUsers, &filters)
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}
