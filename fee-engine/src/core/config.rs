use std::path::PathBuf;

/// Calculator configuration
///
/// # Environment Variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./.gps-calc | store and log directory |
/// | CATALOG_PATH | (built-in) | JSON platform catalog |
/// | LOG_LEVEL | info | log level |
/// | LOG_TO_FILE | false | also write daily log files under `WORK_DIR/logs` |
/// | LOG_JSON | false | JSON console logs |
/// | DEFAULT_TARGET_MARGIN | 20 | planning target margin (%) |
/// | DEFAULT_TARGET_VOLUME | 50 | planning unit volume |
/// | ENVIRONMENT | development | development / production |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/tmp/gps CATALOG_PATH=./rates.json gps-calc compare
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the store file and logs
    pub work_dir: String,
    /// Optional catalog file; the built-in rates are used otherwise
    pub catalog_path: Option<String>,
    pub log_level: String,
    pub log_to_file: bool,
    pub log_json: bool,
    /// Target margin (%) used when planning without an explicit target
    pub default_target_margin: f64,
    /// Unit volume used when planning without an explicit volume
    pub default_target_volume: u32,
    /// development | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, with defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./.gps-calc".into()),
            catalog_path: std::env::var("CATALOG_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_to_file: std::env::var("LOG_TO_FILE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            default_target_margin: std::env::var("DEFAULT_TARGET_MARGIN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20.0),
            default_target_volume: std::env::var("DEFAULT_TARGET_VOLUME")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(50),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Override the work directory
    ///
    /// Mostly used by tests.
    pub fn with_overrides(work_dir: impl Into<String>, catalog_path: Option<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.catalog_path = catalog_path;
        config
    }

    /// Path of the redb store file
    pub fn store_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("storage.redb")
    }

    /// Directory for daily log files
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
