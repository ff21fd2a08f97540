pub mod backup;
pub mod category;
pub mod stats;
pub mod system;
pub mod transaction;

use chrono::NaiveDate;
use finance_domain::EntryKind;

use crate::cli::core::CommandError;
use crate::cli::registry::CommandEntry;

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(stats::definitions());
    commands.extend(category::definitions());
    commands.extend(transaction::definitions());
    commands.extend(backup::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn parse_kind(input: &str) -> Result<EntryKind, CommandError> {
    input
        .parse::<EntryKind>()
        .map_err(|err| CommandError::InvalidArguments(err.to_string()))
}

pub(crate) fn parse_amount(input: &str) -> Result<f64, CommandError> {
    input
        .parse::<f64>()
        .map_err(|_| CommandError::InvalidArguments(format!("invalid amount `{}`", input)))
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("invalid date `{}` (use YYYY-MM-DD)", input))
    })
}

/// Splits trailing `[date] [description...]` arguments. A first token that is
/// not a date starts the description.
pub(crate) fn date_and_description<'a>(args: &[&'a str]) -> (Option<NaiveDate>, Vec<&'a str>) {
    match args.split_first() {
        Some((first, rest)) => match parse_date(first) {
            Ok(date) => (Some(date), rest.to_vec()),
            Err(_) => (None, args.to_vec()),
        },
        None => (None, Vec::new()),
    }
}

pub(crate) fn usage(text: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {}", text))
}
