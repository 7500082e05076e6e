/*!
 * Notes repository.
 *
 * One record per article: an ordered list of note strings stored as JSON.
 * Saving replaces the whole list, so the last write wins.
 */

use anyhow::{Context, Result};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

use super::connection::DatabaseConnection;

/// Repository for vocabulary notes keyed by article name
#[derive(Clone)]
pub struct NotesRepository {
    db: DatabaseConnection,
}

impl NotesRepository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with the default database location
    pub fn new_default() -> Result<Self> {
        Ok(Self::new(DatabaseConnection::new_default()?))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        Ok(Self::new(DatabaseConnection::new_in_memory()?))
    }

    /// Replace the notes of an article
    pub async fn save_notes(&self, article: &str, notes: &[String]) -> Result<()> {
        let article = article.to_string();
        let notes_json = serde_json::to_string(notes).context("Failed to encode notes")?;

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO notes (article, notes_json, updated_at)
                    VALUES (?1, ?2, datetime('now'))
                    ON CONFLICT(article) DO UPDATE SET
                        notes_json = excluded.notes_json,
                        updated_at = excluded.updated_at
                    "#,
                    params![article, notes_json],
                )?;
                debug!("Saved notes for article '{}'", article);
                Ok(())
            })
            .await
    }

    /// Notes of an article, empty when none were saved
    pub async fn get_notes(&self, article: &str) -> Result<Vec<String>> {
        let article = article.to_string();

        self.db
            .execute_async(move |conn| Self::get_notes_sync(conn, &article))
            .await
    }

    fn get_notes_sync(conn: &Connection, article: &str) -> Result<Vec<String>> {
        let stored: Option<String> = conn
            .query_row(
                "SELECT notes_json FROM notes WHERE article = ?1",
                [article],
                |row| row.get(0),
            )
            .optional()?;

        match stored {
            Some(json) => serde_json::from_str(&json)
                .with_context(|| format!("Corrupt notes record for article '{}'", article)),
            None => Ok(Vec::new()),
        }
    }

    /// Articles that have notes, sorted by name
    pub async fn list_articles(&self) -> Result<Vec<String>> {
        self.db
            .execute_async(|conn| {
                let mut stmt = conn.prepare("SELECT article FROM notes ORDER BY article")?;
                let articles = stmt
                    .query_map([], |row| row.get(0))?
                    .collect::<rusqlite::Result<Vec<String>>>()?;
                Ok(articles)
            })
            .await
    }

    /// Delete the notes of an article, returning whether a record existed
    pub async fn delete_notes(&self, article: &str) -> Result<bool> {
        let article = article.to_string();

        self.db
            .execute_async(move |conn| {
                let deleted = conn.execute("DELETE FROM notes WHERE article = ?1", [&article])?;
                Ok(deleted > 0)
            })
            .await
    }
}
