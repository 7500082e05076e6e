/*!
 * SQLite handle for the notes store.
 *
 * The connection is opened once and shared; queries run on tokio's blocking
 * pool so async callers never stall the runtime on disk I/O.
 */

use anyhow::{Context, Result};
use log::{debug, info};
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::schema;

// @const: "<data dir>/subalign/notes.db"
const DATA_DIR_NAME: &str = "subalign";
const DB_FILE_NAME: &str = "notes.db";

/// Shared, schema-initialized notes database
#[derive(Clone)]
pub struct DatabaseConnection {
    connection: Arc<Mutex<Connection>>,
}

impl DatabaseConnection {
    /// Open the database in the user's local data directory
    pub fn new_default() -> Result<Self> {
        Self::new(default_database_path()?)
    }

    /// Open or create the database file, creating parent directories as needed
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create notes directory: {:?}", parent))?;
        }

        info!("Opening notes database at: {:?}", db_path);
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open notes database: {:?}", db_path))?;
        Self::from_connection(conn)
    }

    /// Open a throwaway in-memory database
    pub fn new_in_memory() -> Result<Self> {
        debug!("Opening in-memory notes database");
        let conn = Connection::open_in_memory().context("Failed to open in-memory notes database")?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        schema::initialize_schema(&conn)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a query on the blocking pool with exclusive access to the connection
    pub async fn execute_async<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let connection = Arc::clone(&self.connection);

        tokio::task::spawn_blocking(move || f(&*connection.lock()))
            .await
            .context("Notes query panicked")?
    }
}

fn default_database_path() -> Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .or_else(dirs::data_dir)
        .ok_or_else(|| anyhow::anyhow!("Could not determine a data directory for notes"))?;

    Ok(base_dir.join(DATA_DIR_NAME).join(DB_FILE_NAME))
}
