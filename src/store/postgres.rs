use chrono::{DateTime, Utc};
use diesel::{
    ExpressionMethods, OptionalExtension, PgAnyJsonExpressionMethods, PgJsonbExpressionMethods,
    QueryDsl,
    pg::Pg,
    prelude::{Insertable, Queryable, QueryableByName},
};
use diesel_async::{
    AsyncConnection, AsyncPgConnection, RunQueryDsl,
    pooled_connection::{
        AsyncDieselConnectionManager,
        bb8::{Pool, PooledConnection},
    },
    scoped_futures::ScopedFutureExt,
};
use futures::future::BoxFuture;
use serde_json::Value;
use uuid::Uuid;

use crate::schema::content_records;

use super::{
    Store,
    error::{StoreError, StoreResult},
    query::{Filter, Query},
    record::{Collection, Fields, Record},
};

type BoxedRecords<'a> = content_records::BoxedQuery<'a, Pg>;

#[derive(Queryable)]
struct ContentRecordRow {
    record_id: Uuid,
    #[allow(dead_code)]
    collection: String,
    record_data: Value,
    record_created_at: DateTime<Utc>,
    record_updated_at: DateTime<Utc>,
}

impl TryFrom<ContentRecordRow> for Record {
    type Error = StoreError;

    fn try_from(row: ContentRecordRow) -> Result<Self, Self::Error> {
        match row.record_data {
            Value::Object(fields) => Ok(Record {
                id: row.record_id,
                created_at: row.record_created_at,
                updated_at: row.record_updated_at,
                fields,
            }),
            other => Err(StoreError::Decode(format!(
                "record {} holds {} instead of an object",
                row.record_id, other
            ))),
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = content_records)]
struct NewContentRecord {
    record_id: Uuid,
    collection: &'static str,
    record_data: Value,
    record_created_at: DateTime<Utc>,
    record_updated_at: DateTime<Utc>,
}

impl NewContentRecord {
    fn new(collection: Collection, fields: Fields, now: DateTime<Utc>) -> Self {
        Self {
            // v7 ids sort by creation, which gives `find` a stable default order.
            record_id: Uuid::now_v7(),
            collection: collection.as_str(),
            record_data: Value::Object(fields),
            record_created_at: now,
            record_updated_at: now,
        }
    }
}

#[derive(QueryableByName)]
struct PgVersion {
    #[diesel(sql_type = diesel::sql_types::Text)]
    version: String,
}

/// Document-style store over the single `content_records` table.
pub struct PgStore {
    pool: Pool<AsyncPgConnection>,
}

impl PgStore {
    pub async fn connect(db_url: String, num_cores: u32) -> anyhow::Result<Self> {
        let pool_config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(db_url);

        let pool = Pool::builder()
            .min_idle(Some(num_cores))
            .max_size(num_cores * 10u32)
            .build(pool_config)
            .await?;

        Ok(Self { pool })
    }

    pub async fn server_version(&self) -> StoreResult<String> {
        let mut conn = self.conn().await?;
        let pg_version: PgVersion = diesel::sql_query("SELECT version()")
            .get_result(&mut conn)
            .await?;
        Ok(pg_version.version)
    }

    async fn conn(&self) -> StoreResult<PooledConnection<'_, AsyncPgConnection>> {
        self.pool
            .get()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

fn parse_uuid(value: &Value) -> StoreResult<Uuid> {
    value
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| StoreError::Query(format!("{value} is not a record id")))
}

fn parse_timestamp(value: &Value) -> StoreResult<DateTime<Utc>> {
    value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| StoreError::Query(format!("{value} is not an RFC 3339 timestamp")))
}

fn containment(field: &str, value: &Value) -> Value {
    let mut object = Fields::new();
    object.insert(field.to_owned(), value.clone());
    Value::Object(object)
}

fn value_as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn apply_filter<'a>(query: BoxedRecords<'a>, filter: &'a Filter) -> StoreResult<BoxedRecords<'a>> {
    use content_records::dsl::{record_created_at, record_data, record_id, record_updated_at};

    let query = match filter {
        Filter::Eq(field, value) => match field.as_str() {
            "id" => query.filter(record_id.eq(parse_uuid(value)?)),
            "created_at" => query.filter(record_created_at.eq(parse_timestamp(value)?)),
            _ => query.filter(record_data.contains(containment(field, value))),
        },
        Filter::Neq(field, value) => match field.as_str() {
            "id" => query.filter(record_id.ne(parse_uuid(value)?)),
            "created_at" => query.filter(record_created_at.ne(parse_timestamp(value)?)),
            _ => query.filter(diesel::dsl::not(
                record_data.contains(containment(field, value)),
            )),
        },
        Filter::Gte(field, value) => match field.as_str() {
            "created_at" => query.filter(record_created_at.ge(parse_timestamp(value)?)),
            "updated_at" => query.filter(record_updated_at.ge(parse_timestamp(value)?)),
            // Text comparison; dates are stored as UTC RFC 3339 so this orders correctly.
            _ => query.filter(
                record_data
                    .retrieve_as_text(field.as_str())
                    .ge(value_as_text(value)),
            ),
        },
    };

    Ok(query)
}

fn matching<'a>(collection: Collection, filters: &'a [Filter]) -> StoreResult<BoxedRecords<'a>> {
    let mut query = content_records::table
        .filter(content_records::collection.eq(collection.as_str()))
        .into_boxed();

    for filter in filters {
        query = apply_filter(query, filter)?;
    }

    Ok(query)
}

fn build_find<'a>(collection: Collection, query: &'a Query) -> StoreResult<BoxedRecords<'a>> {
    use content_records::dsl::{record_created_at, record_data, record_id, record_updated_at};

    let mut statement = matching(collection, &query.filters)?;

    statement = match &query.order_by {
        None => statement.order(record_id.asc()),
        Some(order) => {
            let ordered = match (order.field.as_str(), order.ascending) {
                ("created_at", true) => statement.order(record_created_at.asc()),
                ("created_at", false) => statement.order(record_created_at.desc()),
                ("updated_at", true) => statement.order(record_updated_at.asc()),
                ("updated_at", false) => statement.order(record_updated_at.desc()),
                (field, true) => statement.order(record_data.retrieve_as_object(field).asc()),
                (field, false) => statement.order(record_data.retrieve_as_object(field).desc()),
            };
            ordered.then_order_by(record_id.asc())
        }
    };

    if let Some(limit) = query.limit {
        statement = statement.limit(limit as i64);
    }

    Ok(statement)
}

impl Store for PgStore {
    fn find<'a>(
        &'a self,
        collection: Collection,
        query: &'a Query,
    ) -> BoxFuture<'a, StoreResult<Vec<Record>>> {
        Box::pin(async move {
            let statement = build_find(collection, query)?;
            let mut conn = self.conn().await?;
            let rows: Vec<ContentRecordRow> = statement.load(&mut conn).await?;
            drop(conn);

            rows.into_iter().map(Record::try_from).collect()
        })
    }

    fn insert<'a>(
        &'a self,
        collection: Collection,
        fields: Fields,
    ) -> BoxFuture<'a, StoreResult<Record>> {
        Box::pin(async move {
            let new_record = NewContentRecord::new(collection, fields, Utc::now());
            let mut conn = self.conn().await?;

            let row: ContentRecordRow = diesel::insert_into(content_records::table)
                .values(new_record)
                .returning(content_records::all_columns)
                .get_result(&mut conn)
                .await?;
            drop(conn);

            Record::try_from(row)
        })
    }

    fn update<'a>(
        &'a self,
        collection: Collection,
        id: Uuid,
        fields: Fields,
    ) -> BoxFuture<'a, StoreResult<Record>> {
        Box::pin(async move {
            use content_records::dsl;

            let mut conn = self.conn().await?;

            let row: Option<ContentRecordRow> = diesel::update(
                dsl::content_records
                    .filter(dsl::record_id.eq(id))
                    .filter(dsl::collection.eq(collection.as_str())),
            )
            .set((
                dsl::record_data.eq(dsl::record_data.concat(Value::Object(fields))),
                dsl::record_updated_at.eq(Utc::now()),
            ))
            .returning(content_records::all_columns)
            .get_result(&mut conn)
            .await
            .optional()?;
            drop(conn);

            match row {
                Some(row) => Record::try_from(row),
                None => Err(StoreError::NotFound(format!("{collection}/{id}"))),
            }
        })
    }

    fn delete<'a>(&'a self, collection: Collection, id: Uuid) -> BoxFuture<'a, StoreResult<()>> {
        Box::pin(async move {
            use content_records::dsl;

            let mut conn = self.conn().await?;
            let deleted = diesel::delete(
                dsl::content_records
                    .filter(dsl::record_id.eq(id))
                    .filter(dsl::collection.eq(collection.as_str())),
            )
            .execute(&mut conn)
            .await?;
            drop(conn);

            if deleted == 0 {
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
            let mut conn = self.conn().await?;

            conn.transaction::<Vec<Record>, StoreError, _>(|conn| {
                async move {
                    let stale: Vec<ContentRecordRow> =
                        matching(collection, filters)?.load(conn).await?;
                    let stale_ids: Vec<Uuid> = stale.iter().map(|row| row.record_id).collect();

                    if !stale_ids.is_empty() {
                        diesel::delete(
                            content_records::table
                                .filter(content_records::record_id.eq_any(stale_ids)),
                        )
                        .execute(conn)
                        .await?;
                    }

                    if rows.is_empty() {
                        return Ok(Vec::new());
                    }

                    let now = Utc::now();
                    let new_rows: Vec<NewContentRecord> = rows
                        .into_iter()
                        .map(|fields| NewContentRecord::new(collection, fields, now))
                        .collect();

                    let inserted: Vec<ContentRecordRow> =
                        diesel::insert_into(content_records::table)
                            .values(&new_rows)
                            .returning(content_records::all_columns)
                            .get_results(conn)
                            .await?;

                    inserted.into_iter().map(Record::try_from).collect()
                }
                .scope_boxed()
            })
            .await
        })
    }

    fn count<'a>(&'a self, collection: Collection) -> BoxFuture<'a, StoreResult<u64>> {
        Box::pin(async move {
            let mut conn = self.conn().await?;
            let count: i64 = content_records::table
                .filter(content_records::collection.eq(collection.as_str()))
                .count()
                .get_result(&mut conn)
                .await?;
            drop(conn);

            Ok(count.max(0) as u64)
        })
    }
}
