use finance_core::resolve::short_id;
use finance_domain::{Category, CategoryInput, Displayable, EntryKind};

use super::{parse_kind, usage};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const USAGE: &str = "category <list|add|edit|remove> ...";
const ADD_USAGE: &str = "category add <income|expense> <name> [icon]";
const EDIT_USAGE: &str = "category edit <id|name> <new-name> [icon] [--type income|expense]";
const REMOVE_USAGE: &str = "category remove <id|name>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "category",
        "List, add, edit or remove categories",
        "category list [income|expense]\n         category add <income|expense> <name> [icon]\n         category edit <id|name> <new-name> [icon] [--type income|expense]\n         category remove <id|name>",
        cmd_category,
    )]
}

fn cmd_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return Err(usage(USAGE));
    };
    match action.to_lowercase().as_str() {
        "list" | "ls" => list(context, rest),
        "add" => add(context, rest),
        "edit" => edit(context, rest),
        "remove" | "rm" | "delete" => remove(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown category subcommand `{}`",
            other
        ))),
    }
}

fn list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let filter = args.first().map(|raw| parse_kind(raw)).transpose()?;
    let categories = context.store.list_categories(filter);
    match filter {
        Some(kind) => output::section(format!("Categories ({kind})")),
        None => output::section("Categories"),
    }
    if categories.is_empty() {
        output::info("  (none)");
    }
    for category in &categories {
        output::info(format!(
            "  {}  {:<7}  {}",
            short_id(category.id),
            category.kind,
            category.display_label()
        ));
    }
    Ok(())
}

fn add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (kind, name, icon) = match args {
        [kind, name] => (*kind, *name, None),
        [kind, name, icon] => (*kind, *name, Some(*icon)),
        _ => return Err(usage(ADD_USAGE)),
    };
    let mut input = CategoryInput::new(name, parse_kind(kind)?);
    if let Some(icon) = icon {
        input = input.with_icon(icon);
    }
    let category = context.store.add_category(input)?;
    output::success(format!(
        "Category {} added ({}).",
        category.display_label(),
        short_id(category.id)
    ));
    Ok(())
}

fn edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (positional, kind) = split_type_flag(args)?;
    let (token, name, icon) = match positional.as_slice() {
        [token, name] => (*token, *name, None),
        [token, name, icon] => (*token, *name, Some(*icon)),
        _ => return Err(usage(EDIT_USAGE)),
    };
    let current = context.store.resolve_category(token)?;
    let input = edited_input(&current, name, icon, kind);
    let updated = context.store.edit_category(current.id, input)?;
    output::success(format!("Category {} updated.", updated.display_label()));
    Ok(())
}

/// Name always replaced; icon and type kept unless given.
fn edited_input(
    current: &Category,
    name: &str,
    icon: Option<&str>,
    kind: Option<EntryKind>,
) -> CategoryInput {
    let mut input = CategoryInput::from(current);
    input.name = name.to_string();
    if let Some(icon) = icon {
        input.icon = Some(icon.to_string());
    }
    if let Some(kind) = kind {
        input.kind = kind;
    }
    input
}

fn split_type_flag<'a>(
    args: &[&'a str],
) -> Result<(Vec<&'a str>, Option<EntryKind>), CommandError> {
    let mut positional = Vec::new();
    let mut kind = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if *arg == "--type" {
            let value = iter.next().ok_or_else(|| usage(EDIT_USAGE))?;
            kind = Some(parse_kind(value)?);
        } else {
            positional.push(*arg);
        }
    }
    Ok((positional, kind))
}

fn remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [token] = args else {
        return Err(usage(REMOVE_USAGE));
    };
    let category = context.store.resolve_category(token)?;
    let prompt = format!("Delete category {}?", category.display_label());
    if !context.confirm(&prompt)? {
        output::info("Cancelled.");
        return Ok(());
    }
    let removed = context.store.delete_category(category.id)?;
    output::success(format!("Category {} deleted.", removed.display_label()));
    Ok(())
}
