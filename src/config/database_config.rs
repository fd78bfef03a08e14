use serde_derive::{Deserialize, Serialize};

/// Configuration for the database connection.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct DatabaseConfig {
    /// Path to the SQLite database file, created if it doesn't exist.
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "safeenv.db".to_string(),
        }
    }
}
