use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    store::{Collection, Filter, Query},
    util::validation::fields::now_timestamp,
};

use super::domain_traits::ContentKind;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentKind for Event {
    const COLLECTION: Collection = Collection::Events;

    fn default_query() -> Query {
        Query::new().order_by("date", true)
    }
}

/// `date` must already be normalized to UTC RFC 3339 with second precision.
#[derive(Clone, Debug, Serialize)]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Events dated now or later, soonest first.
pub fn upcoming_events_query(limit: usize) -> Query {
    Event::default_query()
        .filter(Filter::gte("date", now_timestamp()))
        .limit(limit)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, SecondsFormat};

    use super::*;
    use crate::domain::domain_traits::{create_content, list_content};
    use crate::store::{StoreClient, client::DEFAULT_STORE_TIMEOUT, memory::MemoryStore};

    fn draft(title: &str, offset_days: i64) -> EventDraft {
        EventDraft {
            title: title.to_owned(),
            date: (Utc::now() + Duration::days(offset_days))
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            location: None,
            description: None,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn upcoming_skips_past_events_and_sorts_by_date() {
        let store = StoreClient::new(Arc::new(MemoryStore::new()), DEFAULT_STORE_TIMEOUT);
        let schedule = [
            ("later", 30),
            ("past", -2),
            ("soon", 3),
            ("latest", 90),
            ("next", 10),
        ];
        for (title, offset) in schedule {
            create_content::<Event, _>(&store, &draft(title, offset))
                .await
                .unwrap();
        }

        let events: Vec<Event> = list_content(&store, &upcoming_events_query(3)).await.unwrap();
        let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["soon", "next", "later"]);
    }
}
