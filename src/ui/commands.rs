use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use chrono::NaiveDate;

use super::app::{App, InputMode, PendingAction, Screen};
use crate::import::LedgerImporter;
use crate::ledger::{CategoryDraft, ExpenseDraft, IncomeDraft};
use crate::models::{Category, CategoryKind};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit SmartBudget", cmd_quit, r);
    register_command!("quit", "Quit SmartBudget", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("c", "Go to Categories", cmd_categories, r);
    register_command!("categories", "Go to Categories", cmd_categories, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "income",
        "Add income (e.g. :income 2024-01-31 5000 salary Paycheck | Employer)",
        cmd_income,
        r
    );
    register_command!("in", "Add income (e.g. :in 5000 salary Paycheck)", cmd_income, r);
    register_command!(
        "expense",
        "Add expense (e.g. :expense 1200 housing Rent | Bank transfer)",
        cmd_expense,
        r
    );
    register_command!("ex", "Add expense (e.g. :ex 12.50 food Lunch)", cmd_expense, r);
    register_command!(
        "category",
        "Create category (e.g. :category expense Pets)",
        cmd_category,
        r
    );
    register_command!(
        "edit-category",
        "Edit selected category (e.g. :edit-category type income)",
        cmd_edit_category,
        r
    );
    register_command!(
        "rename-category",
        "Rename selected category (e.g. :rename-category Groceries)",
        cmd_rename_category,
        r
    );
    register_command!(
        "color",
        "Set selected category color (e.g. :color #FF9500)",
        cmd_color,
        r
    );
    register_command!(
        "icon",
        "Set selected category icon (e.g. :icon coffee)",
        cmd_icon,
        r
    );
    register_command!(
        "delete-category",
        "Delete selected category and its transactions",
        cmd_delete_category,
        r
    );
    register_command!(
        "delete-txn",
        "Delete selected transaction",
        cmd_delete_txn,
        r
    );
    register_command!(
        "import",
        "Load a ledger CSV (e.g. :import ~/budget.csv)",
        cmd_import,
        r
    );
    register_command!("i", "Load a ledger CSV", cmd_import, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        tracing::debug!(command = cmd_name, "Running command");
        (cmd.run)(args, app)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 2) // skip short aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Positional arguments of `:income` / `:expense`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EntryArgs {
    pub(crate) date: NaiveDate,
    pub(crate) amount: String,
    pub(crate) category_id: String,
    pub(crate) description: String,
    /// Text after `|`: income source or payment method.
    pub(crate) detail: String,
}

/// Parse `[YYYY-MM-DD] <amount> <category> <description> [| detail]`.
/// The category token may be an id or a (single-word) name.
pub(crate) fn parse_entry(
    args: &str,
    categories: &[Category],
    today: NaiveDate,
) -> Option<EntryArgs> {
    let (main, detail) = match args.split_once('|') {
        Some((main, detail)) => (main, detail.trim()),
        None => (args, ""),
    };

    let mut tokens = main.split_whitespace().peekable();
    let date = match tokens
        .peek()
        .and_then(|t| NaiveDate::parse_from_str(t, "%Y-%m-%d").ok())
    {
        Some(d) => {
            tokens.next();
            d
        }
        None => today,
    };

    let amount = tokens.next()?.to_string();
    let category_token = tokens.next()?;
    let description = tokens.collect::<Vec<_>>().join(" ");

    let category_id = Category::find_by_id(categories, category_token)
        .or_else(|| Category::find_by_name(categories, category_token))
        .map(|c| c.id.clone())
        .unwrap_or_else(|| category_token.to_string());

    Some(EntryArgs {
        date,
        amount,
        category_id,
        description,
        detail: detail.to_string(),
    })
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    Ok(())
}

fn cmd_categories(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Categories;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_income(args: &str, app: &mut App) -> anyhow::Result<()> {
    let Some(entry) = parse_entry(args, app.ledger.categories(), today()) else {
        app.set_status("Usage: :income [YYYY-MM-DD] <amount> <category> <description> [| source]");
        return Ok(());
    };

    let result = app.ledger.add_income(IncomeDraft {
        description: entry.description,
        amount: entry.amount,
        date: entry.date,
        category_id: entry.category_id,
        source: entry.detail,
    });
    match result {
        Ok(income) => {
            let msg = format!(
                "{} income recorded: {}",
                crate::util::format_currency(income.amount),
                income.description
            );
            app.refresh();
            app.set_status(msg);
        }
        Err(e) => app.set_status(format!("Income not added: {e}")),
    }
    Ok(())
}

fn cmd_expense(args: &str, app: &mut App) -> anyhow::Result<()> {
    let Some(entry) = parse_entry(args, app.ledger.categories(), today()) else {
        app.set_status(
            "Usage: :expense [YYYY-MM-DD] <amount> <category> <description> [| payment method]",
        );
        return Ok(());
    };

    let result = app.ledger.add_expense(ExpenseDraft {
        description: entry.description,
        amount: entry.amount,
        date: entry.date,
        category_id: entry.category_id,
        payment_method: entry.detail,
    });
    match result {
        Ok(expense) => {
            let msg = format!(
                "{} expense recorded: {}",
                crate::util::format_currency(expense.amount),
                expense.description
            );
            app.refresh();
            app.set_status(msg);
        }
        Err(e) => app.set_status(format!("Expense not added: {e}")),
    }
    Ok(())
}

fn cmd_category(args: &str, app: &mut App) -> anyhow::Result<()> {
    let usage = "Usage: :category <income|expense> <name>";
    let Some((kind_str, name)) = args.split_once(' ') else {
        app.set_status(usage);
        return Ok(());
    };
    let Some(kind) = CategoryKind::parse(kind_str) else {
        app.set_status(usage);
        return Ok(());
    };

    match app.ledger.add_category(CategoryDraft::new(name, kind)) {
        Ok(cat) => {
            let msg = format!("Created {kind} category: {}", cat.name);
            app.refresh();
            app.set_status(msg);
        }
        Err(e) => app.set_status(format!("Category not added: {e}")),
    }
    Ok(())
}

/// Apply `edit` to a draft of the selected category and save it.
fn edit_selected_category(
    app: &mut App,
    edit: impl FnOnce(&mut CategoryDraft),
) -> anyhow::Result<()> {
    let Some(category) = app.selected_category() else {
        app.set_status("No category selected");
        return Ok(());
    };
    let id = category.id.clone();
    let mut draft = CategoryDraft::from_category(category);
    edit(&mut draft);

    match app.ledger.edit_category(&id, draft) {
        Ok(cat) => {
            let msg = format!("Updated category: {}", cat.name);
            app.refresh();
            app.set_status(msg);
        }
        Err(e) => app.set_status(format!("Category not updated: {e}")),
    }
    Ok(())
}

fn cmd_edit_category(args: &str, app: &mut App) -> anyhow::Result<()> {
    let (field, value) = args.split_once(' ').unwrap_or((args, ""));
    let value = value.trim();
    match field {
        "name" => cmd_rename_category(value, app),
        "color" => cmd_color(value, app),
        "icon" => cmd_icon(value, app),
        "type" => match CategoryKind::parse(value) {
            Some(kind) => edit_selected_category(app, |draft| draft.kind = kind),
            None => {
                app.set_status("Usage: :edit-category type <income|expense>");
                Ok(())
            }
        },
        _ => {
            app.set_status("Usage: :edit-category <name|color|icon|type> <value>");
            Ok(())
        }
    }
}

fn cmd_rename_category(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :rename-category <new name>");
        return Ok(());
    }
    edit_selected_category(app, |draft| draft.name = args.to_string())
}

fn cmd_color(args: &str, app: &mut App) -> anyhow::Result<()> {
    let valid = args.len() == 7
        && args.starts_with('#')
        && args[1..].chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        app.set_status("Usage: :color #RRGGBB");
        return Ok(());
    }
    edit_selected_category(app, |draft| draft.color = args.to_uppercase())
}

fn cmd_icon(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() || args.contains(' ') {
        app.set_status("Usage: :icon <name>");
        return Ok(());
    }
    edit_selected_category(app, |draft| draft.icon = args.to_string())
}

fn cmd_delete_category(_args: &str, app: &mut App) -> anyhow::Result<()> {
    let Some(category) = app.selected_category() else {
        app.set_status("No category selected");
        return Ok(());
    };
    let id = category.id.clone();
    let name = category.name.clone();
    let affected = app
        .ledger
        .sorted_transactions()
        .iter()
        .filter(|t| t.category_id() == id)
        .count();

    app.confirm_message = if affected > 0 {
        format!("Delete category '{name}' and its {affected} transaction(s)?")
    } else {
        format!("Delete category '{name}'?")
    };
    app.pending_action = Some(PendingAction::DeleteCategory { id, name });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_delete_txn(_args: &str, app: &mut App) -> anyhow::Result<()> {
    if app.screen != Screen::Transactions {
        app.set_status("Switch to Transactions (2) to delete a transaction");
        return Ok(());
    }
    let Some((id, description)) = app.selected_transaction() else {
        app.set_status("No transaction selected");
        return Ok(());
    };
    app.confirm_message = format!("Delete '{description}'?");
    app.pending_action = Some(PendingAction::DeleteTransaction { id, description });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_import(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :import <file.csv>");
        return Ok(());
    }
    let path = crate::run::shellexpand(args);

    // Load into a copy so a bad row leaves the current ledger untouched.
    let mut staged = app.ledger.clone();
    match LedgerImporter::load(Path::new(&path), &mut staged) {
        Ok(report) => {
            app.ledger = staged;
            app.refresh();
            app.set_status(format!(
                "Imported {} transactions ({} income, {} expense) from {path}",
                report.total(),
                report.incomes,
                report.expenses
            ));
        }
        Err(e) => app.set_status(format!("Import failed: {e:#}")),
    }
    Ok(())
}

/// Carry out a confirmed [`PendingAction`].
pub(crate) fn confirm(action: PendingAction, app: &mut App) -> anyhow::Result<()> {
    match action {
        PendingAction::DeleteTransaction { id, description } => {
            app.ledger.delete_transaction(&id)?;
            app.refresh();
            app.set_status(format!("Deleted: {description}"));
        }
        PendingAction::DeleteCategory { id, name } => {
            let deleted = app.ledger.delete_category(&id)?;
            app.refresh();
            app.set_status(format!(
                "Deleted category: {name} ({} transaction(s) removed)",
                deleted.removed_transactions
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
