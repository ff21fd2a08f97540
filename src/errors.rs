use finance_config::ConfigError;
use finance_core::CoreError;
use thiserror::Error;

/// Failures while assembling the tracker from configuration and storage.
#[derive(Debug, Error)]
pub enum FinanceError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Fatal shell errors; per-command failures are reported and the shell continues.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Finance(#[from] FinanceError),
    #[error("Command failed: {0}")]
    Command(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::Finance(FinanceError::Core(err))
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Finance(FinanceError::Config(err))
    }
}
