use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// One top-level shell command.
pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

/// The shell's command table, kept in the order `help` lists it.
///
/// There are only a handful of commands, so lookups scan the list.
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    /// Builds the table; a later entry with an already-used name is ignored.
    pub fn from_entries(entries: impl IntoIterator<Item = CommandEntry>) -> Self {
        let mut kept: Vec<CommandEntry> = Vec::new();
        for entry in entries {
            if kept.iter().all(|existing| existing.name != entry.name) {
                kept.push(entry);
            }
        }
        Self { entries: kept }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut ShellContext, _: &[&str]) -> CommandResult {
        Ok(())
    }

    #[test]
    fn keeps_first_registration_and_order() {
        let registry = CommandRegistry::from_entries([
            CommandEntry::new("stats", "first", "stats", noop),
            CommandEntry::new("txn", "", "txn", noop),
            CommandEntry::new("stats", "second", "stats", noop),
        ]);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["stats", "txn"]);
        assert_eq!(registry.get("stats").map(|entry| entry.description), Some("first"));
        assert!(registry.get("missing").is_none());
    }
}
