use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables (or a `.env` file picked up by
/// `dotenvy`).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// The single entry `*` allows any origin (without credentials).
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// SQLite connection URL (default: `sqlite://data/antemortem.db`).
    pub database_url: String,
    /// Root directory for inspection records, generated reports, and the
    /// default database file (default: `data`).
    pub data_dir: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                       |
    /// |------------------------|-------------------------------|
    /// | `HOST`                 | `0.0.0.0`                     |
    /// | `PORT`                 | `8000`                        |
    /// | `CORS_ORIGINS`         | `*`                           |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                          |
    /// | `DATABASE_URL`         | `sqlite://data/antemortem.db` |
    /// | `DATA_DIR`             | `data`                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://data/antemortem.db".into());

        let data_dir = PathBuf::from(std::env::var("DATA_DIR").unwrap_or_else(|_| "data".into()));

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            data_dir,
        }
    }

    /// Directory holding per-inspection JSON records.
    pub fn inspections_dir(&self) -> PathBuf {
        self.data_dir.join("inspections")
    }

    /// Directory generated PDF reports are written to.
    pub fn reports_dir(&self) -> PathBuf {
        self.data_dir.join("reports")
    }
}
