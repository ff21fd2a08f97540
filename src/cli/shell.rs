use std::io::{self, BufRead};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    history::DefaultHistory,
    Cmd, Context as ReadlineContext, Editor, Helper, Highlighter, Hinter, KeyEvent, Validator,
};
use tracing::debug;

use crate::cli::core::{CliMode, LoopControl, ShellContext};
use crate::cli::output;
use crate::errors::CliError;

/// Setting this variable switches the shell to reading commands from stdin.
pub const SCRIPT_ENV_VAR: &str = "FINANCE_TRACKER_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV_VAR).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };
    let mut context = ShellContext::new(mode)?;

    let result = match mode {
        CliMode::Interactive => {
            let mut source = Prompted::new(&context)?;
            output::info("Finance Tracker. Type `help` to list commands.");
            drive(&mut context, &mut source)
        }
        CliMode::Script => drive(&mut context, &mut Piped(io::stdin().lock().lines())),
    };
    debug!(status = %context.status(), "shell finished");
    result
}

/// Where the shell gets its next line; `None` ends the session.
trait LineSource {
    fn next_line(&mut self, context: &ShellContext) -> Result<Option<String>, CliError>;
}

/// Runs lines until the source is exhausted or a command asks to exit.
/// Command failures are reported and do not stop the session.
fn drive(context: &mut ShellContext, source: &mut impl LineSource) -> Result<(), CliError> {
    while context.running {
        let Some(line) = source.next_line(context)? else {
            break;
        };
        match context.run_line(&line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    Ok(())
}

/// Lines read from a pipe or file.
struct Piped<I>(I);

impl<I: Iterator<Item = io::Result<String>>> LineSource for Piped<I> {
    fn next_line(&mut self, _context: &ShellContext) -> Result<Option<String>, CliError> {
        Ok(self.0.next().transpose()?)
    }
}

/// Lines typed at a rustyline prompt, with history and command completion.
struct Prompted {
    editor: Editor<CommandHelper, DefaultHistory>,
}

impl Prompted {
    fn new(context: &ShellContext) -> Result<Self, CliError> {
        let mut editor: Editor<CommandHelper, DefaultHistory> = Editor::new()?;
        editor.set_helper(Some(CommandHelper::new(context.command_names())));
        editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
        Ok(Self { editor })
    }
}

impl LineSource for Prompted {
    fn next_line(&mut self, context: &ShellContext) -> Result<Option<String>, CliError> {
        loop {
            match self.editor.readline(&context.prompt()) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        self.editor.add_history_entry(line.trim()).ok();
                    }
                    return Ok(Some(line));
                }
                // Ctrl-C asks before leaving; declining returns to the prompt.
                Err(ReadlineError::Interrupted) => {
                    if context.confirm("Exit shell?")? {
                        return Ok(None);
                    }
                }
                Err(ReadlineError::Eof) => {
                    output::info("Exiting shell.");
                    return Ok(None);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

/// Completes the first word of the line against registered command names.
#[derive(Helper, Hinter, Highlighter, Validator)]
struct CommandHelper {
    commands: Vec<&'static str>,
}

impl CommandHelper {
    fn new(mut commands: Vec<&'static str>) -> Self {
        commands.sort_unstable();
        commands.dedup();
        Self { commands }
    }

    fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<Pair>) {
        let before = &line[..pos];
        let word = before.trim_start();
        let start = pos - word.len();
        if word.contains(char::is_whitespace) {
            return (pos, Vec::new());
        }
        let needle = word.to_ascii_lowercase();
        let pairs = self
            .commands
            .iter()
            .filter(|name| name.starts_with(&needle))
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect();
        (start, pairs)
    }
}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(line, pos))
    }
}
