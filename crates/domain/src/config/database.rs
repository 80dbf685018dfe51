use serde::{Deserialize, Serialize};

/// Backing store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to SQLite database file (default: "./tollgate.db", ":memory:" allowed)
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Maximum pooled connections (default: 8)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        if self.is_memory() {
            "sqlite::memory:".to_string()
        } else {
            format!("sqlite://{}", self.path)
        }
    }

    pub fn is_memory(&self) -> bool {
        self.path == ":memory:"
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_db_path() -> String {
    "./tollgate.db".to_string()
}

fn default_max_connections() -> u32 {
    8
}
