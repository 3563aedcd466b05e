use serde_derive::Serialize;
use utoipa::ToSchema;

use crate::store::{Collection, StoreClient, StoreResult};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct DashboardStats {
    pub projects: u64,
    pub blog_posts: u64,
    pub partners: u64,
    pub events: u64,
    pub contact_submissions: u64,
}

pub async fn collect_stats(store: &StoreClient) -> StoreResult<DashboardStats> {
    let (projects, blog_posts, partners, events, contact_submissions) = tokio::try_join!(
        store.count(Collection::Projects),
        store.count(Collection::BlogPosts),
        store.count(Collection::Partners),
        store.count(Collection::Events),
        store.count(Collection::ContactSubmissions),
    )?;

    Ok(DashboardStats {
        projects,
        blog_posts,
        partners,
        events,
        contact_submissions,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::store::{
        client::DEFAULT_STORE_TIMEOUT,
        memory::{MemoryStore, fields},
    };

    #[tokio::test]
    async fn counts_each_collection() {
        let store = StoreClient::new(Arc::new(MemoryStore::new()), DEFAULT_STORE_TIMEOUT);
        for (collection, n) in [
            (Collection::Projects, 3),
            (Collection::Events, 1),
            (Collection::ContactSubmissions, 2),
            (Collection::Careers, 4),
        ] {
            for i in 0..n {
                store
                    .insert(collection, fields(json!({ "n": i })))
                    .await
                    .unwrap();
            }
        }

        let stats = collect_stats(&store).await.unwrap();
        assert_eq!(
            stats,
            DashboardStats {
                projects: 3,
                blog_posts: 0,
                partners: 0,
                events: 1,
                contact_submissions: 2,
            }
        );
    }
}
