use async_trait::async_trait;
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::db::connection::Database;
use crate::domain::ListingDoc;
use crate::store::{Direction, FieldValue, ListingQuery, ListingStore, StoreError};

/// Listing store backed by JSON documents in the local SQLite database.
#[derive(Clone)]
pub struct SqliteListingStore {
    db: Database,
}

impl SqliteListingStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl ListingStore for SqliteListingStore {
    async fn query(&self, query: &ListingQuery) -> Result<Vec<ListingDoc>, StoreError> {
        query.validate()?;
        let (sql, args) = build_select(query);
        debug!(%query, %sql, "sqlite document query");

        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(&sql)
                .map_err(|e| StoreError::Rejected(e.to_string()))?;

            let rows = stmt
                .query_map(params_from_iter(args.iter()), |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
                })
                .map_err(|e| StoreError::Database(e.to_string()))?;

            let mut out = Vec::new();
            for r in rows {
                let (id, body) = r.map_err(|e| StoreError::Database(e.to_string()))?;
                let raw = serde_json::from_str(&body).unwrap_or_else(|e| {
                    warn!(%id, error = %e, "stored document is not valid JSON");
                    Value::Null
                });
                out.push(ListingDoc::from_raw(id, raw));
            }
            Ok(out)
        })
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }
}

/// Field names are interpolated into the JSON path; `ListingQuery::validate`
/// restricts them to identifier segments beforehand.
fn build_select(query: &ListingQuery) -> (String, Vec<SqlValue>) {
    let mut sql = String::from("SELECT id, data FROM documents WHERE collection = ?");
    let mut args = vec![SqlValue::Text(query.collection.clone())];

    for (field, value) in &query.filters {
        sql.push_str(&format!(" AND json_extract(data, '$.{field}') = ?"));
        args.push(to_sql(value));
    }

    match &query.order_by {
        Some((field, direction)) => {
            let dir = match direction {
                Direction::Ascending => "ASC",
                Direction::Descending => "DESC",
            };
            // Documents without the order field are not part of an ordered result.
            sql.push_str(&format!(" AND json_extract(data, '$.{field}') IS NOT NULL"));
            sql.push_str(&format!(" ORDER BY {} {dir}, id ASC", sort_key(field)));
        }
        None => sql.push_str(" ORDER BY id ASC"),
    }

    if let Some(limit) = query.limit {
        sql.push_str(" LIMIT ?");
        args.push(SqlValue::Integer(i64::from(limit)));
    }

    (sql, args)
}

/// Comparable form of a stored field value.
///
/// Timestamps arrive as RFC 3339 text with any offset, epoch seconds, or a
/// `{seconds, nanoseconds}` map; all three become epoch seconds. Text that
/// does not start with a date sorts as plain text.
fn sort_key(field: &str) -> String {
    let value = format!("json_extract(data, '$.{field}')");
    format!(
        "CASE json_type(data, '$.{field}') \
         WHEN 'text' THEN CASE WHEN {value} GLOB '[0-9][0-9][0-9][0-9]-[0-9][0-9]-[0-9][0-9]*' \
         THEN COALESCE(unixepoch({value}), {value}) ELSE {value} END \
         WHEN 'object' THEN json_extract(data, '$.{field}.seconds') \
         ELSE {value} END"
    )
}

// json_extract yields 1/0 for JSON booleans.
fn to_sql(value: &FieldValue) -> SqlValue {
    match value {
        FieldValue::Bool(b) => SqlValue::Integer(i64::from(*b)),
        FieldValue::Int(i) => SqlValue::Integer(*i),
        FieldValue::Float(f) => SqlValue::Real(*f),
        FieldValue::Text(s) => SqlValue::Text(s.clone()),
    }
}

/// Upsert one document body.
pub fn put_document(
    db: &Database,
    collection: &str,
    id: &str,
    data: &Value,
) -> Result<(), StoreError> {
    let body = serde_json::to_string(data).map_err(|e| StoreError::Decode(e.to_string()))?;
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO documents (collection, id, data) VALUES (?1, ?2, ?3)
             ON CONFLICT(collection, id) DO UPDATE SET data = excluded.data",
            params![collection, id, body],
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(())
    })
}

pub fn count_documents(db: &Database, collection: &str) -> Result<i64, StoreError> {
    db.with_conn(|conn| {
        conn.query_row(
            "SELECT count(*) FROM documents WHERE collection = ?",
            params![collection],
            |r| r.get(0),
        )
        .map_err(|e| StoreError::Database(e.to_string()))
    })
}

/// Load a JSON array of listing bodies into an empty collection.
///
/// Entries may carry an `"id"`; the rest get `listing-<n>`. Returns the number
/// of documents written (zero when the collection already had data).
pub fn seed_from_file(db: &Database, collection: &str, path: &Path) -> Result<usize, StoreError> {
    if count_documents(db, collection)? > 0 {
        debug!(collection, "collection already populated, skipping seed");
        return Ok(0);
    }

    let raw = fs::read_to_string(path)
        .map_err(|e| StoreError::Database(format!("Failed to read seed file: {e}")))?;
    let entries: Vec<Value> =
        serde_json::from_str(&raw).map_err(|e| StoreError::Decode(e.to_string()))?;

    let mut written = 0;
    for (n, mut entry) in entries.into_iter().enumerate() {
        let Some(obj) = entry.as_object_mut() else {
            warn!(index = n, "seed entry is not an object, skipped");
            continue;
        };
        let id = match obj.remove("id") {
            Some(Value::String(id)) if !id.is_empty() => id,
            _ => format!("listing-{}", n + 1),
        };
        put_document(db, collection, &id, &entry)?;
        written += 1;
    }

    info!(collection, written, path = %path.display(), "seeded listings");
    Ok(written)
}
