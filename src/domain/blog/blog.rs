use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    domain::{
        domain_traits::{ContentKind, Filterable, into_fields},
        screenshot::{Screenshot, deserialize_screenshots},
    },
    store::{Collection, Filter, Query, StoreClient, StoreError},
    util::string::generate_slug::generate_slug,
};

use super::slug::{SLUG_WRITE_ATTEMPTS, resolve_unique_slug};

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default, deserialize_with = "deserialize_screenshots")]
    pub screenshots: Vec<Screenshot>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentKind for BlogPost {
    const COLLECTION: Collection = Collection::BlogPosts;
}

impl Filterable for BlogPost {
    fn filter_field(&self, field: &str) -> Option<&str> {
        match field {
            "title" => Some(self.title.as_str()),
            "slug" => Some(self.slug.as_str()),
            "excerpt" => self.excerpt.as_deref(),
            "content" => Some(self.content.as_str()),
            _ => None,
        }
    }
}

/// The editable part of a post, already validated. The slug is never part of
/// it; it is always derived from the title on save.
#[derive(Clone, Debug, Serialize)]
pub struct BlogPostDraft {
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
    pub published: bool,
}

#[derive(Serialize)]
struct BlogPostFields<'a> {
    #[serde(flatten)]
    draft: &'a BlogPostDraft,
    slug: &'a str,
}

#[derive(Debug, thiserror::Error)]
pub enum BlogSaveError {
    #[error("title {0:?} has no letters or digits to build a slug from")]
    EmptySlug(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Creates (`id == None`) or rewrites a post, assigning it a unique slug.
///
/// The slug is resolved before anything is written. If another writer takes
/// the slug in between, the store rejects the write with a conflict and the
/// whole resolve-then-write runs again.
pub async fn save_blog_post(
    store: &StoreClient,
    draft: &BlogPostDraft,
    id: Option<Uuid>,
) -> Result<BlogPost, BlogSaveError> {
    let base = generate_slug(&draft.title);
    if base.is_empty() {
        return Err(BlogSaveError::EmptySlug(draft.title.clone()));
    }

    let mut attempt: u32 = 0;
    loop {
        attempt += 1;

        let slug = resolve_unique_slug(store, &base, id).await?;
        let fields = into_fields(&BlogPostFields {
            draft,
            slug: &slug,
        })?;

        let written = match id {
            None => store.insert(Collection::BlogPosts, fields).await,
            Some(id) => store.update(Collection::BlogPosts, id, fields).await,
        };

        match written {
            Ok(record) => {
                let post = BlogPost::from_record(record)?;
                info!(post_id = %post.id, slug = %post.slug, attempt, "Blog post saved");
                return Ok(post);
            }
            Err(StoreError::Conflict(e)) if attempt < SLUG_WRITE_ATTEMPTS => {
                warn!(slug = %slug, attempt, error = %e, "Slug taken by a concurrent write; retrying");
            }
            Err(e) => return Err(e.into()),
        }
    }
}

pub async fn find_post_by_slug(
    store: &StoreClient,
    slug: &str,
) -> Result<Option<BlogPost>, StoreError> {
    store
        .find_one(Collection::BlogPosts, &[Filter::eq("slug", slug)])
        .await?
        .map(BlogPost::from_record)
        .transpose()
}

pub fn published_posts_query() -> Query {
    Query::new()
        .filter(Filter::eq("published", true))
        .newest_first()
}

/// Up to `limit` other published posts, newest first.
pub fn related_posts_query(exclude_id: Uuid, limit: usize) -> Query {
    Query::new()
        .filter(Filter::eq("published", true))
        .filter(Filter::neq("id", exclude_id.to_string()))
        .newest_first()
        .limit(limit)
}

pub async fn write_screenshots(
    store: &StoreClient,
    id: Uuid,
    screenshots: &[Screenshot],
) -> Result<BlogPost, StoreError> {
    let mut fields = crate::store::Fields::new();
    fields.insert(
        "screenshots".to_owned(),
        serde_json::to_value(screenshots)?,
    );
    let record = store.update(Collection::BlogPosts, id, fields).await?;
    BlogPost::from_record(record)
}
