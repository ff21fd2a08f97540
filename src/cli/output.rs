use std::fmt;
use std::sync::{OnceLock, RwLock};

use colored::Colorize;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Hint,
    Section,
}

#[derive(Clone, Copy, Debug)]
pub struct OutputPreferences {
    pub color_enabled: bool,
}

impl Default for OutputPreferences {
    fn default() -> Self {
        Self {
            color_enabled: true,
        }
    }
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

pub fn set_preferences(prefs: OutputPreferences) {
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
    colored::control::set_override(prefs.color_enabled);
}

pub fn current_preferences() -> OutputPreferences {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputPreferences::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

fn label(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Success => "OK:",
        MessageKind::Warning => "WARNING:",
        MessageKind::Error => "ERROR:",
        MessageKind::Hint => "hint:",
        MessageKind::Info | MessageKind::Section => "",
    }
}

pub(crate) fn render(kind: MessageKind, message: impl fmt::Display, prefs: &OutputPreferences) -> String {
    let text = message.to_string();
    let plain = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        MessageKind::Info => text,
        _ => format!("{} {}", label(kind), text),
    };

    if !prefs.color_enabled {
        return plain;
    }

    match kind {
        MessageKind::Success => plain.bright_green().to_string(),
        MessageKind::Warning => plain.bright_yellow().to_string(),
        MessageKind::Error => plain.bright_red().to_string(),
        MessageKind::Hint => plain.dimmed().to_string(),
        MessageKind::Section => plain.bold().to_string(),
        MessageKind::Info => plain,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = render(kind, message, &current_preferences());
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn hint(message: impl fmt::Display) {
    print(MessageKind::Hint, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_rendering_prefixes_labels() {
        let prefs = OutputPreferences {
            color_enabled: false,
        };
        assert_eq!(render(MessageKind::Error, "boom", &prefs), "ERROR: boom");
        assert_eq!(render(MessageKind::Section, " Stats ", &prefs), "=== Stats ===");
        assert_eq!(render(MessageKind::Info, "plain", &prefs), "plain");
    }
}
