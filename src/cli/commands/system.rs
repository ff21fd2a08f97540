use finance_storage_json::STATE_SCHEMA_VERSION;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
        CommandEntry::new("quit", "Exit the shell", "quit", cmd_exit),
    ]
}

fn cmd_version(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("{} {}", build_info::PACKAGE_NAME, meta.version));
    output::info(format!("  Data schema  : v{}", STATE_SCHEMA_VERSION));
    output::info(format!("  Storage key  : {}", context.storage.key()));
    output::info(format!(
        "  Data file    : {}",
        context.storage.state_path().display()
    ));
    output::info(format!(
        "  Currency     : {} ({} decimals)",
        context.config.currency_symbol, context.config.decimal_places
    ));
    output::info(format!("  Backups kept : {}", context.config.backup_retention));
    output::info(format!(
        "  Build hash   : {} ({})",
        meta.git_hash, meta.git_status
    ));
    output::info(format!("  Built at     : {}", meta.timestamp));
    output::info(format!("  Target       : {}", meta.target));
    output::info(format!("  Profile      : {}", meta.profile));
    output::info(format!("  Rustc        : {}", meta.rustc));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.command(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
