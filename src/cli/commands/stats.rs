use finance_domain::EntryKind;

use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "stats",
        "Show total income, total expense and balance",
        "stats",
        cmd_stats,
    )]
}

fn cmd_stats(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let stats = context.store.stats();
    let fmt = &context.formatters;
    output::section("Summary");
    output::info(format!(
        "  Total income : {}",
        fmt.amount(stats.total_for(EntryKind::Income))
    ));
    output::info(format!(
        "  Total expense: {}",
        fmt.amount(stats.total_for(EntryKind::Expense))
    ));
    output::info(format!("  Balance      : {}", fmt.amount(stats.balance)));
    Ok(())
}
