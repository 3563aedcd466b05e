use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::store::{Collection, Fields, Filter, Query, StoreClient, StoreResult};

use super::domain_traits::{ContentKind, Filterable, list_content};

#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RealityType {
    #[default]
    AR,
    VR,
    MR,
}

impl RealityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RealityType::AR => "AR",
            RealityType::VR => "VR",
            RealityType::MR => "MR",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub video_link: Option<String>,
    #[serde(default)]
    pub download_link: Option<String>,
    /// Older rows carry no reality type; they read as AR.
    #[serde(default, deserialize_with = "deserialize_reality_type")]
    pub reality_type: RealityType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn deserialize_reality_type<'de, D>(deserializer: D) -> Result<RealityType, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<RealityType> = serde::Deserialize::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default())
}

impl ContentKind for Project {
    const COLLECTION: Collection = Collection::Projects;
}

impl Filterable for Project {
    fn filter_field(&self, field: &str) -> Option<&str> {
        match field {
            "title" => Some(self.title.as_str()),
            "description" => Some(self.description.as_str()),
            "category" => Some(self.category.as_str()),
            "reality_type" => Some(self.reality_type.as_str()),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub featured: bool,
    pub thumbnail_url: Option<String>,
    pub video_link: Option<String>,
    pub download_link: Option<String>,
    pub reality_type: RealityType,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectScreenshot {
    pub id: Uuid,
    pub project_id: Uuid,
    pub image_url: String,
    #[serde(default)]
    pub order_index: i64,
    pub created_at: DateTime<Utc>,
}

impl ContentKind for ProjectScreenshot {
    const COLLECTION: Collection = Collection::ProjectScreenshots;

    fn default_query() -> Query {
        Query::new().order_by("order_index", true)
    }
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ProjectWithScreenshots {
    #[serde(flatten)]
    pub project: Project,
    pub screenshots: Vec<ProjectScreenshot>,
}

fn screenshots_of(project_id: Uuid) -> Filter {
    Filter::eq("project_id", project_id.to_string())
}

pub async fn list_project_screenshots(
    store: &StoreClient,
    project_id: Uuid,
) -> StoreResult<Vec<ProjectScreenshot>> {
    let query = ProjectScreenshot::default_query().filter(screenshots_of(project_id));
    list_content(store, &query).await
}

/// Swaps the project's screenshot rows for `urls`, in that order, in one
/// atomic store call. Blank URLs are skipped.
pub async fn replace_project_screenshots(
    store: &StoreClient,
    project_id: Uuid,
    urls: &[String],
) -> StoreResult<Vec<ProjectScreenshot>> {
    let rows: Vec<Fields> = urls
        .iter()
        .map(|url| url.trim())
        .filter(|url| !url.is_empty())
        .enumerate()
        .map(|(index, url)| {
            let mut fields = Fields::new();
            fields.insert("project_id".to_owned(), project_id.to_string().into());
            fields.insert("image_url".to_owned(), url.into());
            fields.insert("order_index".to_owned(), (index as i64).into());
            fields
        })
        .collect();

    store
        .replace(Collection::ProjectScreenshots, &[screenshots_of(project_id)], rows)
        .await?
        .into_iter()
        .map(ProjectScreenshot::from_record)
        .collect()
}

pub fn featured_projects_query(limit: usize) -> Query {
    Query::new()
        .filter(Filter::eq("featured", true))
        .newest_first()
        .limit(limit)
}

/// Distinct non-blank categories, sorted.
pub fn distinct_categories(projects: &[Project]) -> Vec<String> {
    projects
        .iter()
        .map(|p| p.category.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_owned)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::domain::domain_traits::create_content;
    use crate::store::{
        client::DEFAULT_STORE_TIMEOUT,
        memory::{MemoryStore, fields},
    };

    fn memory_client() -> StoreClient {
        StoreClient::new(Arc::new(MemoryStore::new()), DEFAULT_STORE_TIMEOUT)
    }

    fn draft(title: &str, category: &str, featured: bool) -> ProjectDraft {
        ProjectDraft {
            title: title.to_owned(),
            description: String::new(),
            category: category.to_owned(),
            featured,
            thumbnail_url: None,
            video_link: None,
            download_link: None,
            reality_type: RealityType::VR,
        }
    }

    #[tokio::test]
    async fn missing_reality_type_reads_as_ar() {
        let store = memory_client();
        let record = store
            .insert(
                Collection::Projects,
                fields(json!({ "title": "Legacy", "reality_type": null })),
            )
            .await
            .unwrap();

        let project = Project::from_record(record).unwrap();
        assert_eq!(project.reality_type, RealityType::AR);
        assert_eq!(project.filter_field("reality_type"), Some("AR"));
    }

    #[tokio::test]
    async fn screenshot_replacement_is_ordered_and_scoped() {
        let store = memory_client();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        replace_project_screenshots(&store, a, &["a1".into(), "a2".into()])
            .await
            .unwrap();
        replace_project_screenshots(&store, b, &["b1".into()])
            .await
            .unwrap();

        let urls = ["x", " ", "y", "z"].map(String::from);
        replace_project_screenshots(&store, a, &urls).await.unwrap();

        let shots = list_project_screenshots(&store, a).await.unwrap();
        let urls: Vec<_> = shots.iter().map(|s| s.image_url.as_str()).collect();
        assert_eq!(urls, vec!["x", "y", "z"]);
        let order: Vec<_> = shots.iter().map(|s| s.order_index).collect();
        assert_eq!(order, vec![0, 1, 2]);

        assert_eq!(list_project_screenshots(&store, b).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_replacement_clears_screenshots() {
        let store = memory_client();
        let id = Uuid::new_v4();
        replace_project_screenshots(&store, id, &["a".into()]).await.unwrap();

        replace_project_screenshots(&store, id, &[]).await.unwrap();
        assert!(list_project_screenshots(&store, id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn featured_query_and_categories() {
        let store = memory_client();
        for (title, category, featured) in [
            ("A", "Games", true),
            ("B", "Education", false),
            ("C", " Games ", true),
            ("D", "", true),
        ] {
            create_content::<Project, _>(&store, &draft(title, category, featured))
                .await
                .unwrap();
        }

        let featured: Vec<Project> = list_content(&store, &featured_projects_query(2))
            .await
            .unwrap();
        assert_eq!(featured.len(), 2);
        assert!(featured.iter().all(|p| p.featured));

        let all: Vec<Project> = list_content(&store, &Project::default_query()).await.unwrap();
        assert_eq!(distinct_categories(&all), vec!["Education", "Games"]);
    }
}
