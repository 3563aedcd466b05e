use std::fmt;

use chrono::{DateTime, Utc};
use serde_derive::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Field name to JSON value. Everything a record carries besides its id and timestamps.
pub type Fields = Map<String, Value>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collection {
    Projects,
    ProjectScreenshots,
    BlogPosts,
    Partners,
    Events,
    Careers,
    ContactSubmissions,
    AdminUsers,
}

impl Collection {
    pub const ALL: [Collection; 8] = [
        Collection::Projects,
        Collection::ProjectScreenshots,
        Collection::BlogPosts,
        Collection::Partners,
        Collection::Events,
        Collection::Careers,
        Collection::ContactSubmissions,
        Collection::AdminUsers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Projects => "projects",
            Collection::ProjectScreenshots => "project_screenshots",
            Collection::BlogPosts => "blog_posts",
            Collection::Partners => "partners",
            Collection::Events => "events",
            Collection::Careers => "careers",
            Collection::ContactSubmissions => "contact_submissions",
            Collection::AdminUsers => "admin_users",
        }
    }

    /// Fields the store must keep unique within the collection.
    /// Mirrors the partial unique indexes in the Postgres migration.
    pub fn unique_fields(&self) -> &'static [&'static str] {
        match self {
            Collection::BlogPosts => &["slug"],
            Collection::AdminUsers => &["email"],
            _ => &[],
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a collection. The store owns it; callers only ever see copies.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Record {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Record {
    /// Looks up a field, treating `id`, `created_at` and `updated_at` as fields too.
    pub fn value_of(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(Value::String(self.id.to_string())),
            "created_at" => Some(Value::String(self.created_at.to_rfc3339())),
            "updated_at" => Some(Value::String(self.updated_at.to_rfc3339())),
            _ => self.fields.get(field).filter(|v| !v.is_null()).cloned(),
        }
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Flattens the record into a single JSON object, the shape typed kinds deserialize from.
    pub fn into_json(self) -> Value {
        let mut object = self.fields;
        object.insert("id".to_owned(), Value::String(self.id.to_string()));
        object.insert(
            "created_at".to_owned(),
            Value::String(self.created_at.to_rfc3339()),
        );
        object.insert(
            "updated_at".to_owned(),
            Value::String(self.updated_at.to_rfc3339()),
        );
        Value::Object(object)
    }
}
