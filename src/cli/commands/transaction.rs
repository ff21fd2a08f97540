use finance_core::resolve::short_id;
use finance_domain::{Displayable, Transaction, TransactionInput};

use super::{date_and_description, parse_amount, parse_kind, usage};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const USAGE: &str = "txn <list|add|edit|remove> ...";
const ADD_USAGE: &str = "txn add <income|expense> <amount> <category> [YYYY-MM-DD] [description...]";
const EDIT_USAGE: &str = "txn edit <id> <amount> <category> [YYYY-MM-DD] [description...]";
const REMOVE_USAGE: &str = "txn remove <id>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "txn",
        "List, add, edit or remove transactions",
        "txn list [income|expense]\n         txn add <income|expense> <amount> <category> [YYYY-MM-DD] [description...]\n         txn edit <id> <amount> <category> [YYYY-MM-DD] [description...]\n         txn remove <id>",
        cmd_transaction,
    )]
}

fn cmd_transaction(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return Err(usage(USAGE));
    };
    match action.to_lowercase().as_str() {
        "list" | "ls" => list(context, rest),
        "add" => add(context, rest),
        "edit" => edit(context, rest),
        "remove" | "rm" | "delete" => remove(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown txn subcommand `{}`",
            other
        ))),
    }
}

fn list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let filter = args.first().map(|raw| parse_kind(raw)).transpose()?;
    let transactions = context.store.list_transactions(filter);
    match filter {
        Some(kind) => output::section(format!("Transactions ({kind})")),
        None => output::section("Transactions"),
    }
    if transactions.is_empty() {
        output::info("  (none)");
    }
    for txn in &transactions {
        output::info(row(context, txn));
    }
    Ok(())
}

fn row(context: &ShellContext, txn: &Transaction) -> String {
    let fmt = &context.formatters;
    let mut line = format!(
        "  {}  {}  {:>12}  {}",
        short_id(txn.id),
        fmt.date(txn.date),
        fmt.signed(txn),
        context.store.category_label(txn.category_id)
    );
    if !txn.description.is_empty() {
        line.push_str("  ");
        line.push_str(&txn.description);
    }
    line
}

fn add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [kind, amount, category, rest @ ..] = args else {
        return Err(usage(ADD_USAGE));
    };
    let kind = parse_kind(kind)?;
    let amount = parse_amount(amount)?;
    let category = context.store.resolve_category(category)?;
    let (date, description) = date_and_description(rest);
    let date = date.unwrap_or_else(|| context.clock.today());

    let input = TransactionInput::new(kind, amount, category.id, date)
        .with_description(description.join(" "));
    let txn = context.store.add_transaction(input)?;
    output::success(format!(
        "Recorded {} {} in {} ({}).",
        txn.kind,
        context.formatters.amount(txn.amount),
        category.display_label(),
        short_id(txn.id)
    ));
    Ok(())
}

fn edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [token, amount, category, rest @ ..] = args else {
        return Err(usage(EDIT_USAGE));
    };
    let current = context.store.resolve_transaction(token)?;
    let amount = parse_amount(amount)?;
    let category = context.store.resolve_category(category)?;
    let (date, description) = date_and_description(rest);

    let mut input = TransactionInput::from(&current);
    input.amount = amount;
    input.category_id = category.id;
    input.kind = category.kind;
    if let Some(date) = date {
        input.date = date;
    }
    if !description.is_empty() {
        input.description = description.join(" ");
    }

    let txn = context.store.edit_transaction(current.id, input)?;
    output::success(format!("Transaction {} updated.", short_id(txn.id)));
    Ok(())
}

fn remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [token] = args else {
        return Err(usage(REMOVE_USAGE));
    };
    let txn = context.store.resolve_transaction(token)?;
    let prompt = format!("Delete transaction{}?", row(context, &txn));
    if !context.confirm(&prompt)? {
        output::info("Cancelled.");
        return Ok(());
    }
    context.store.delete_transaction(txn.id)?;
    output::success(format!("Transaction {} deleted.", short_id(txn.id)));
    Ok(())
}
