use anyhow::Context;
use sqlx::{
    Pool, Sqlite,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};
use std::{path::Path, str::FromStr};

#[derive(Clone)]
pub struct Database {
    pub(crate) pool: Pool<Sqlite>,
}

/// Common methods for the primary database, extensions are implemented separately in every module.
impl Database {
    /// Opens database "connection".
    pub async fn open<I: FnOnce() -> anyhow::Result<String>>(
        initializer: I,
    ) -> anyhow::Result<Self> {
        let url = initializer()?;
        let options = SqliteConnectOptions::from_str(&url)
            .with_context(|| "Failed to parse database URL")?
            .create_if_missing(true)
            .foreign_keys(true);

        // In-memory database is dropped together with its last open connection.
        let pool = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await
        } else {
            SqlitePoolOptions::new()
                .connect_with(options.journal_mode(SqliteJournalMode::Wal))
                .await
        }
        .with_context(|| "Failed to connect to database")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .with_context(|| "Failed to migrate database")?;

        Ok(Database { pool })
    }

    /// Opens database stored in the file at the specified path.
    pub async fn open_path<P: AsRef<Path>>(data_path: P) -> anyhow::Result<Self> {
        Self::open(|| {
            data_path
                .as_ref()
                .to_str()
                .ok_or_else(|| {
                    anyhow::anyhow!("Cannot stringify database path {:?}", data_path.as_ref())
                })
                .map(|db_path| format!("sqlite://{db_path}?mode=rwc"))
        })
        .await
    }
}

impl AsRef<Database> for Database {
    fn as_ref(&self) -> &Self {
        self
    }
}
