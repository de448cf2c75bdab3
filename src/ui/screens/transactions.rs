use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::models::Category;
use crate::ui::app::App;
use crate::ui::theme;
use crate::util::{format_currency, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let transactions = app.ledger.sorted_transactions();

    if transactions.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No transactions yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Load a CSV with :import <file> or add one with :income / :expense",
                theme::dim_style(),
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(" Transactions (0) ", theme::title_style()));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Date", "Description", "Category", "Source / Payment", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = transactions
        .iter()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let category = Category::lookup(app.ledger.categories(), txn.category_id());

            let amount_style = if txn.is_income() {
                theme::income_style()
            } else {
                theme::expense_style()
            };
            let sign = if txn.is_expense() { "-" } else { "+" };
            let amount_str = format!("{sign}{}", format_currency(txn.amount()));

            let style = if i == app.transaction_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let category_cell = if category.is_known() {
                Cell::from(category.name().to_string())
            } else {
                Cell::from(Span::styled(
                    format!("{} ({})", category.name(), category.id()),
                    theme::dim_style(),
                ))
            };

            Row::new(vec![
                Cell::from(format!("  {}", txn.date())),
                Cell::from(truncate(txn.description(), 40)),
                category_cell,
                Cell::from(truncate(txn.detail().unwrap_or(""), 20)),
                Cell::from(Span::styled(amount_str, amount_style)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Min(20),
        Constraint::Length(18),
        Constraint::Length(20),
        Constraint::Length(14),
    ];

    let income_count = app.ledger.incomes().len();
    let expense_count = app.ledger.expenses().len();
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(
                    " Transactions ({}) | {income_count} income, {expense_count} expense ",
                    transactions.len()
                ),
                theme::title_style(),
            )),
    );

    f.render_widget(table, area);
}
