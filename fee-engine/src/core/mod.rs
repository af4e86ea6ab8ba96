//! Runtime configuration and process setup

pub mod config;

pub use config::Config;

use crate::utils::logger::init_logger_with_file;

/// Load variables from a `.env` file, if present
///
/// Must run before [`Config::from_env`] and before CLI parsing so `env`
/// fallbacks see the file's values.
pub fn load_dotenv() {
    dotenv::dotenv().ok();
}

/// Create the work directory and start logging
pub fn setup_environment(config: &Config) -> anyhow::Result<()> {
    std::fs::create_dir_all(&config.work_dir)?;

    let log_dir = config.log_dir();
    let log_dir = if config.log_to_file {
        log_dir.to_str()
    } else {
        None
    };
    init_logger_with_file(
        &config.log_level,
        config.log_json || config.is_production(),
        log_dir,
    )?;

    tracing::debug!(
        work_dir = %config.work_dir,
        environment = %config.environment,
        "Environment ready"
    );
    Ok(())
}
