pub mod app_config;
pub mod config;
pub mod record;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use record::{
    DescriptionDetails, ProductRecord, ReviewEntry, ReviewSummary, SizeCell, SizeChart,
    SizeGrid, SizeVariant, DEFAULT_CURRENCY,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
