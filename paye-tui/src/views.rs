//! Rendering. Pure functions from app state to widgets; no state lives here.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use rust_decimal::Decimal;

use crate::app::App;
use crate::utils::format_cedis;

pub fn draw(
    frame: &mut Frame<'_>,
    app: &App,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(9),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_input(frame, app, chunks[1]);
    draw_body(frame, app, chunks[2]);
    draw_footer(frame, chunks[3]);
}

fn draw_header(
    frame: &mut Frame<'_>,
    app: &App,
    area: Rect,
) {
    let source = match &app.rates.provenance {
        Some(tag) => format!("live · {tag}"),
        None => "built-in".to_string(),
    };
    let mut spans = vec![
        Span::raw(format!("Tax year {} · {source} rates", app.rates.period_label)),
    ];
    if app.loading {
        spans.push(Span::styled(
            "  refreshing…",
            Style::default().fg(Color::Yellow),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Ghana PAYE Calculator "),
    );
    frame.render_widget(header, area);
}

fn draw_input(
    frame: &mut Frame<'_>,
    app: &App,
    area: Rect,
) {
    let title = format!(" Gross income ({}) ", app.period.label());
    let input = Paragraph::new(Line::from(vec![
        Span::raw("GH₵ "),
        Span::styled(
            app.income_input.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled("▏", Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(input, area);
}

fn draw_body(
    frame: &mut Frame<'_>,
    app: &App,
    area: Rect,
) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    draw_summary(frame, app, halves[0]);
    draw_bands(frame, app, halves[1]);
}

fn draw_summary(
    frame: &mut Frame<'_>,
    app: &App,
    area: Rect,
) {
    let slip = &app.slip;
    let ssnit_pct = (app.rates.mandatory_rate * Decimal::ONE_HUNDRED).normalize();

    let lines = vec![
        summary_line("Monthly gross", slip.gross_income, None),
        summary_line(
            &format!("SSNIT ({ssnit_pct}%)"),
            -slip.mandatory_deduction,
            Some(Color::Red),
        ),
        summary_line("Taxable income", slip.taxable_income, None),
        summary_line("Income tax", -slip.total_tax, Some(Color::Red)),
        Line::from(vec![
            Span::raw(format!("{:<16}", "Take-home")),
            Span::styled(
                format_cedis(slip.net_income),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let summary = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Summary "));
    frame.render_widget(summary, area);
}

fn summary_line(
    label: &str,
    amount: Decimal,
    color: Option<Color>,
) -> Line<'static> {
    let style = match color {
        Some(c) => Style::default().fg(c),
        None => Style::default(),
    };
    Line::from(vec![
        Span::raw(format!("{label:<16}")),
        Span::styled(format_cedis(amount), style),
    ])
}

fn draw_bands(
    frame: &mut Frame<'_>,
    app: &App,
    area: Rect,
) {
    let rows: Vec<Row> = app
        .slip
        .bands
        .iter()
        .map(|band| {
            Row::new(vec![
                Cell::from(band.label.clone()),
                Cell::from(format_cedis(band.taxed_amount)),
                Cell::from(format_cedis(band.tax)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(16),
            Constraint::Length(16),
        ],
    )
    .header(
        Row::new(vec!["Band", "Amount", "Tax"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title(" Tax bands "));
    frame.render_widget(table, area);
}

fn draw_footer(
    frame: &mut Frame<'_>,
    area: Rect,
) {
    let hints = Paragraph::new(Line::from(Span::styled(
        " type amount · [p] monthly/annual · [r] refresh rates · [q] quit",
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(hints, area);
}
