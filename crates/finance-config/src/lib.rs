//! finance-config
//!
//! User preferences for the finance tracker: display currency, data location
//! and storage key, plus their `config.json` file.

pub mod error;
pub mod file;
pub mod model;

pub use error::ConfigError;
pub use file::CONFIG_FILE_NAME;
pub use model::{Config, HOME_ENV_VAR};
