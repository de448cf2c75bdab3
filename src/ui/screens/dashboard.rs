use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Sparkline, Wrap},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::engine::{cash_flow, expense_breakdown};
use crate::models::{Category, ChartSlice};
use crate::ui::app::App;
use crate::ui::theme;
use crate::util::{format_currency, format_percentage, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Min(10),   // Charts + recommendations
            Constraint::Length(3), // Monthly savings sparkline
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);
    render_expense_chart(f, middle[0], app);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(4)])
        .split(middle[1]);
    render_cash_flow(f, right[0], app);
    render_recommendations(f, right[1], app);

    render_trend_sparkline(f, chunks[2], app);
}

fn panel(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()))
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let summary = &app.summary;
    let signed = |v: Decimal| if v >= Decimal::ZERO { theme::GREEN } else { theme::RED };

    render_card(
        f,
        cards[0],
        "Income",
        format_currency(summary.total_income),
        theme::GREEN,
        format!("{} entries", app.ledger.incomes().len()),
    );
    render_card(
        f,
        cards[1],
        "Expenses",
        format_currency(summary.total_expenses),
        theme::RED,
        format!("{} entries", app.ledger.expenses().len()),
    );
    render_card(
        f,
        cards[2],
        "Net Savings",
        format_currency(summary.net_savings),
        signed(summary.net_savings),
        String::new(),
    );
    render_card(
        f,
        cards[3],
        "Savings Rate",
        format_percentage(summary.savings_rate),
        signed(summary.savings_rate),
        "of income".into(),
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    value: String,
    color: Color,
    subtitle: String,
) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, theme::dim_style())),
    ])
    .centered()
    .block(panel(title));

    f.render_widget(text, area);
}

fn slice_bar(slice: &ChartSlice, label_width: usize) -> Bar<'static> {
    Bar::default()
        .value(slice.value.to_u64().unwrap_or(0))
        .text_value(format_currency(slice.value))
        .label(Line::from(truncate(&slice.label, label_width)))
        .style(Style::default().fg(theme::hex_color(&slice.color)))
        .value_style(
            Style::default()
                .fg(theme::HEADER_BG)
                .bg(theme::hex_color(&slice.color))
                .add_modifier(Modifier::BOLD),
        )
}

fn render_expense_chart(f: &mut Frame, area: Rect, app: &App) {
    if app.summary.expenses_by_category.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No expenses recorded yet", theme::dim_style())),
            Line::from(Span::styled(
                "Add one with :expense <amount> <category> <description>",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(panel("Expenses by Category"));
        f.render_widget(msg, area);
        return;
    }

    let slices = expense_breakdown(&app.summary, app.ledger.categories());
    let bars: Vec<Bar> = slices.iter().map(|s| slice_bar(s, 10)).collect();

    let chart = BarChart::default()
        .block(panel("Expenses by Category"))
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1);

    f.render_widget(chart, area);
}

fn render_cash_flow(f: &mut Frame, area: Rect, app: &App) {
    let slices = cash_flow(&app.summary);
    let bars: Vec<Bar> = slices.iter().map(|s| slice_bar(s, 10)).collect();

    let chart = BarChart::default()
        .block(panel("Cash Flow"))
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(1);

    f.render_widget(chart, area);
}

fn render_recommendations(f: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::new();

    for rec in &app.recommendations {
        let category = Category::lookup(app.ledger.categories(), &rec.category_id);
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<9}", rec.impact.as_str().to_uppercase()),
                theme::impact_style(rec.impact),
            ),
            Span::styled(
                category.name().to_string(),
                Style::default()
                    .fg(theme::hex_color(category.color()))
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "  Suggested {}  (now {})",
                format_currency(rec.suggested_amount),
                format_currency(rec.current_amount)
            ),
            theme::normal_style(),
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", rec.reasoning),
            theme::dim_style(),
        )));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(panel(&format!("Recommendations ({})", app.recommendations.len())));
    f.render_widget(widget, area);
}

fn render_trend_sparkline(f: &mut Frame, area: Rect, app: &App) {
    let data: Vec<u64> = app
        .monthly_trend
        .iter()
        .map(|m| m.savings.max(Decimal::ZERO).to_u64().unwrap_or(0))
        .collect();

    let title = match (app.monthly_trend.first(), app.monthly_trend.last()) {
        (Some(first), Some(last)) if first.month != last.month => {
            format!("Monthly Savings {} to {}", first.month, last.month)
        }
        _ => "Monthly Savings".to_string(),
    };

    let sparkline = Sparkline::default()
        .block(panel(&title))
        .data(&data)
        .style(Style::default().fg(theme::YELLOW));

    f.render_widget(sparkline, area);
}
