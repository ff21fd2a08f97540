//! Command dispatch, error reporting and shell context construction.

use std::{path::Path, sync::Arc};

use dialoguer::theme::ColorfulTheme;
use finance_config::Config;
use finance_core::{Clock, CoreError};
use strsim::levenshtein;
use tracing::debug;

use crate::{errors::CliError, open_store};

use super::commands;
use super::formatters::CliFormatters;
use super::io as cli_io;
use super::output::{self, OutputPreferences};
use super::registry::{CommandEntry, CommandRegistry};
pub use super::shell_context::{CliMode, ShellContext};
use super::system_clock::SystemClock;

const MAX_SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    /// Loads configuration from the default home and opens the store it points at.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let home = Config::default().resolve_data_dir();
        Self::open_in(mode, &home, Arc::new(SystemClock))
    }

    /// Context over `<home>/config.json`, which is created with defaults if absent.
    pub fn open_in(mode: CliMode, home: &Path, clock: Arc<dyn Clock>) -> Result<Self, CliError> {
        let config = Config::load_or_init(home)?;
        output::set_preferences(OutputPreferences {
            color_enabled: config.ui_color_enabled && mode == CliMode::Interactive,
        });

        let (store, storage) = open_store(&config)?;
        let registry = CommandRegistry::from_entries(commands::all_definitions());

        debug!(?mode, path = %storage.state_path().display(), "shell context ready");
        Ok(Self {
            mode,
            registry,
            store,
            storage,
            clock,
            formatters: CliFormatters::from_config(&config),
            theme: ColorfulTheme::default(),
            config,
            last_command: None,
            running: true,
        })
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        "finance> ".to_string()
    }

    /// Tokenizes and runs one input line. Blank lines and `#` comments are skipped.
    pub(crate) fn run_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match shell_words::split(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };
        let Some((raw, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        if raw.starts_with('#') {
            return Ok(LoopControl::Continue);
        }

        self.last_command = Some(line.trim().to_string());
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        let control = self.dispatch(raw, &args)?;
        if control == LoopControl::Exit {
            self.running = false;
        }
        Ok(control)
    }

    fn dispatch(&mut self, raw: &str, args: &[&str]) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.command(&raw.to_lowercase()).map(|entry| entry.handler) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    /// Closest registered command name within a small edit distance.
    pub(crate) fn closest_command(&self, input: &str) -> Option<&'static str> {
        let needle = input.to_lowercase();
        self.registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, name)| name)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.closest_command(input) {
            output::info(format!("Suggestion: `{}`?", best));
        }
    }

    /// Script runs never block on a prompt; they proceed as if confirmed.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Core(CoreError::CategoryInUse { .. }) => {
                output::error(err);
                output::hint("Edit or delete its transactions first.");
            }
            CommandError::Core(CoreError::Ambiguous(_)) => {
                output::error(err);
                output::hint("Use more characters of the id.");
            }
            other => output::error(other),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn new_context_seeds_store_and_registers_commands() {
        let (context, _dir) = script_context();
        assert_eq!(context.store.list_categories(None).len(), 12);
        for name in ["stats", "category", "txn", "backup", "restore", "help", "exit"] {
            assert!(context.command(name).is_some(), "missing `{name}`");
        }
        assert!(context.storage.state_path().exists());
    }

    #[test]
    fn typos_get_a_suggestion() {
        let (context, _dir) = script_context();
        assert_eq!(context.closest_command("stat"), Some("stats"));
        assert_eq!(context.closest_command("catgory"), Some("category"));
        assert_eq!(context.closest_command("zzzzzzzzzz"), None);
    }

    #[test]
    fn exit_stops_the_loop() {
        let (mut context, _dir) = script_context();
        assert_eq!(context.run_line("unknown").unwrap(), LoopControl::Continue);
        assert!(context.running);
        assert_eq!(context.run_line("EXIT").unwrap(), LoopControl::Exit);
        assert!(!context.running);
    }

    #[test]
    fn comments_blank_and_unbalanced_lines_are_skipped() {
        let (mut context, _dir) = script_context();
        for line in ["", "   ", "# txn remove everything", "txn add \"unterminated"] {
            assert_eq!(context.run_line(line).unwrap(), LoopControl::Continue);
        }
        assert!(context.last_command.is_none());

        context.run_line("  stats ").unwrap();
        assert_eq!(context.last_command.as_deref(), Some("stats"));
    }

    #[test]
    fn script_mode_confirms_without_prompting() {
        let (context, _dir) = script_context();
        assert!(context.confirm("Delete?").unwrap());
    }
}
