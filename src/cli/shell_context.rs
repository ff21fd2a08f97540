//! Shared runtime state for CLI interactions and command execution.

use std::sync::Arc;

use dialoguer::theme::ColorfulTheme;
use finance_config::Config;
use finance_core::{Clock, FinanceStore};
use finance_storage_json::JsonStateStorage;

use super::{formatters::CliFormatters, registry::CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: FinanceStore,
    /// Same files as `store`; used for backup management.
    pub storage: JsonStateStorage,
    pub clock: Arc<dyn Clock>,
    pub formatters: CliFormatters,
    pub theme: ColorfulTheme,
    pub config: Config,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn status(&self) -> String {
        format!(
            "ShellContext {{ mode: {:?}, running: {}, last_command: {:?}, data: {} }}",
            self.mode,
            self.running,
            self.last_command,
            self.storage.state_path().display()
        )
    }
}
