use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Row};
use tokio_rusqlite::Connection;

use crate::error::Result;
use crate::models::{Bookmark, BookmarkFilter, Feedback, NewBookmark, NewFeedback, Rating};

use super::schema::SCHEMA;

/// Append-only store for feedback and bookmarks.
///
/// Holds only the database path; every operation opens its own connection
/// and drops it before returning.
#[derive(Debug, Clone)]
pub struct AnnotationStore {
    db_path: PathBuf,
}

impl AnnotationStore {
    /// Create the database file and tables if needed.
    pub async fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let store = Self { db_path };
        let conn = store.connect().await?;
        conn.call(|conn| {
            conn.execute_batch("PRAGMA journal_mode=WAL;")?;
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await?;
        tracing::debug!(path = %store.db_path.display(), "Annotation store ready");

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    async fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(self.db_path.clone()).await?;
        conn.call(|conn| {
            // Concurrent writers wait on SQLite's own lock
            conn.busy_timeout(Duration::from_secs(5))?;
            Ok(())
        })
        .await?;
        Ok(conn)
    }

    // Feedback operations

    pub async fn append_feedback(&self, feedback: NewFeedback) -> Result<i64> {
        let rating = feedback.rating.map(Rating::try_from).transpose()?;

        let conn = self.connect().await?;
        let id = conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO feedback (paper_id, user_name, comment_text, rating) VALUES (?1, ?2, ?3, ?4)",
                    params![
                        feedback.paper_id,
                        feedback.user_name,
                        feedback.comment_text,
                        rating.map(i64::from),
                    ],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await?;
        Ok(id)
    }

    pub async fn list_feedback(&self) -> Result<Vec<Feedback>> {
        let conn = self.connect().await?;
        let feedback = conn
            .call(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, paper_id, user_name, comment_text, rating, timestamp FROM feedback ORDER BY id",
                )?;
                let feedback = stmt
                    .query_map([], feedback_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(feedback)
            })
            .await?;
        Ok(feedback)
    }

    // Bookmark operations

    pub async fn append_bookmark(&self, bookmark: NewBookmark) -> Result<i64> {
        let conn = self.connect().await?;
        let id = conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO bookmarks (user_name, paper_id) VALUES (?1, ?2)",
                    params![bookmark.user_name, bookmark.paper_id],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await?;
        Ok(id)
    }

    pub async fn list_bookmarks(&self, filter: BookmarkFilter) -> Result<Vec<Bookmark>> {
        let conn = self.connect().await?;
        let bookmarks = conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    r#"SELECT id, user_name, paper_id, saved_at FROM bookmarks
                       WHERE (?1 IS NULL OR user_name = ?1)
                         AND (?2 IS NULL OR paper_id = ?2)
                       ORDER BY id"#,
                )?;
                let bookmarks = stmt
                    .query_map(params![filter.user_name, filter.paper_id], bookmark_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(bookmarks)
            })
            .await?;
        Ok(bookmarks)
    }
}

/// Group feedback by paper id, keeping storage order within each paper.
pub fn group_by_paper(feedback: Vec<Feedback>) -> BTreeMap<String, Vec<Feedback>> {
    let mut grouped: BTreeMap<String, Vec<Feedback>> = BTreeMap::new();
    for entry in feedback {
        grouped.entry(entry.paper_id.clone()).or_default().push(entry);
    }
    grouped
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    // Try RFC3339 first (e.g., "2026-01-11T12:34:56+00:00")
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // Try SQLite datetime format (e.g., "2026-01-11 12:34:56")
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    None
}

fn datetime_column(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    parse_datetime(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("invalid datetime {raw:?}").into(),
        )
    })
}

fn rating_column(row: &Row, idx: usize) -> rusqlite::Result<Option<Rating>> {
    row.get::<_, Option<i64>>(idx)?
        .map(|value| {
            Rating::try_from(value).map_err(|err| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, err.to_string().into())
            })
        })
        .transpose()
}

fn feedback_from_row(row: &Row) -> rusqlite::Result<Feedback> {
    Ok(Feedback {
        id: row.get(0)?,
        paper_id: row.get(1)?,
        user_name: row.get(2)?,
        comment_text: row.get(3)?,
        rating: rating_column(row, 4)?,
        timestamp: datetime_column(row, 5)?,
    })
}

fn bookmark_from_row(row: &Row) -> rusqlite::Result<Bookmark> {
    Ok(Bookmark {
        id: row.get(0)?,
        user_name: row.get(1)?,
        paper_id: row.get(2)?,
        saved_at: datetime_column(row, 3)?,
    })
}
