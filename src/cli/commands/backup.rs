use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

use super::usage;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "backup",
            "Write a timestamped backup of the current data",
            "backup [note...]",
            cmd_backup,
        ),
        CommandEntry::new("backups", "List backups, newest first", "backups", cmd_backups),
        CommandEntry::new(
            "restore",
            "Replace the current data with a backup",
            "restore <backup-id>",
            cmd_restore,
        ),
    ]
}

fn cmd_backup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let note = args.join(" ");
    let note = Some(note.as_str()).filter(|note| !note.trim().is_empty());
    let info = context.storage.backup(&context.store.snapshot(), note)?;
    output::success(format!("Backup `{}` created.", info.id));
    Ok(())
}

fn cmd_backups(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let backups = context.storage.list_backups()?;
    output::section(format!("Backups in {}", context.storage.backups_dir().display()));
    if backups.is_empty() {
        output::info("  (none)");
    }
    for info in &backups {
        let created = info
            .created_at
            .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "unknown time".into());
        output::info(format!("  {}  {}", created, info.id));
    }
    Ok(())
}

fn cmd_restore(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(usage("restore <backup-id>"));
    };
    let backup = context.storage.find_backup(id)?;
    if !context.confirm(&format!("Replace current data with `{}`?", backup.id))? {
        output::info("Cancelled.");
        return Ok(());
    }
    let state = context.storage.restore(&backup)?;
    let (categories, transactions) = (state.categories.len(), state.transactions.len());
    context.store.replace(state)?;
    output::success(format!(
        "Restored `{}`: {} categories, {} transactions.",
        backup.id, categories, transactions
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cli::core::test_support::{run, script_context};

    #[test]
    fn backup_then_restore_brings_data_back() {
        let (mut context, _dir) = script_context();
        run(
            &mut context,
            &[
                "txn add income 100 工资 2024-03-01",
                "backup before cleanup",
            ],
        );
        let backups = context.storage.list_backups().unwrap();
        assert_eq!(backups.len(), 1);
        assert!(backups[0].id.ends_with("_before-cleanup.json"));

        let txn = context.store.list_transactions(None)[0].clone();
        run(&mut context, &[format!("txn remove {}", txn.id).as_str()]);
        assert!(context.store.list_transactions(None).is_empty());

        run(&mut context, &[format!("restore {}", backups[0].id).as_str()]);
        assert_eq!(context.store.list_transactions(None), vec![txn]);
    }

    #[test]
    fn restore_of_unknown_backup_fails() {
        let (mut context, _dir) = script_context();
        assert!(context.run_line("restore nothing-here").is_err());
    }
}
