use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::models::{Category, CategoryKind};
use crate::ui::app::App;
use crate::ui::theme;
use crate::util::{format_currency, format_percentage};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_category_list(f, chunks[0], app);
    render_category_detail(f, chunks[1], app);
}

fn render_category_list(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .ledger
        .categories()
        .iter()
        .enumerate()
        .skip(app.category_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, cat)| {
            let marker = match cat.kind {
                CategoryKind::Income => "+",
                CategoryKind::Expense => "-",
            };
            let name_style = if i == app.category_index {
                theme::selected_style()
            } else {
                theme::normal_style()
            };

            ListItem::new(Line::from(vec![
                Span::styled("■ ", Style::default().fg(theme::hex_color(&cat.color))),
                Span::styled(format!("{marker} {}", cat.name), name_style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .title(Span::styled(
                format!(" Categories ({}) ", app.ledger.categories().len()),
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(list, area);
}

fn render_category_detail(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" Details ", theme::title_style()));

    let Some(cat) = app.selected_category() else {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No categories", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Create one with :category <income|expense> <name>",
                Style::default().fg(theme::ACCENT),
            )),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    };

    let field = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {label:<14}"), theme::dim_style()),
            Span::styled(value, theme::normal_style()),
        ])
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", cat.name),
            Style::default()
                .fg(theme::hex_color(&cat.color))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        field("Id", cat.id.clone()),
        field("Type", cat.kind.to_string()),
        field("Color", cat.color.clone()),
        field("Icon", cat.icon.clone()),
        field("Transactions", transaction_count(app, cat).to_string()),
    ];

    match cat.kind {
        CategoryKind::Expense => {
            let share = app
                .summary
                .expense_for(&cat.id)
                .map(|e| e.percentage)
                .unwrap_or_default();
            lines.push(field("Spent", format_currency(app.spend_for(&cat.id))));
            lines.push(field("Share", format_percentage(share)));
        }
        CategoryKind::Income => {
            let earned = app
                .ledger
                .incomes()
                .iter()
                .filter(|i| i.category_id == cat.id)
                .map(|i| i.amount)
                .sum();
            lines.push(field("Earned", format_currency(earned)));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  :rename-category  :color  :icon  :delete-category",
        theme::dim_style(),
    )));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn transaction_count(app: &App, cat: &Category) -> usize {
    match cat.kind {
        CategoryKind::Income => app
            .ledger
            .incomes()
            .iter()
            .filter(|i| i.category_id == cat.id)
            .count(),
        CategoryKind::Expense => app
            .ledger
            .expenses()
            .iter()
            .filter(|e| e.category_id == cat.id)
            .count(),
    }
}
