use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Span, Spans};
use tui::widgets::{BarChart, Block, Borders, Cell, Paragraph, Row, Table, Tabs, Wrap};
use tui::Frame;

use crate::chart::{hex_to_rgb, ChartSpecification, FONT_COLOR};
use crate::dashboard::Dashboard;
use crate::keys::{GroupKey, MetricKey};

pub const TITLE: &'static str = "Evaluación Docente 2023 - Dashboard";
pub const INTRO: &'static str = "Una aplicación para visualizar los resultados de la evaluación docente de 2023, \
tanto el puntaje del portafolio como la prueba de conocimientos (ECEP). \
Interactúa con los controles para ver los resultados de la evaluación docente.";
const HELP: &'static str = "p/e métrica | m cambiar métrica | ←/→ o 1-5 categoría | q salir";

// Bars are integers; means are drawn at this resolution.
const BAR_SCALE: f64 = 100.0;

fn rgb(hex: &str, fallback: Color) -> Color {
    hex_to_rgb(hex).map_or(fallback, |(r, g, b)| Color::Rgb(r, g, b))
}

pub fn bar_data(chart: &ChartSpecification) -> Vec<(&str, u64)> {
    chart
        .points
        .iter()
        .map(|p| (p.category.as_str(), (p.value.max(0.0) * BAR_SCALE).round() as u64))
        .collect()
}

pub fn draw<B: Backend>(rect: &mut Frame<B>, dashboard: &Dashboard) {
    let size = rect.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(5),
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(size);

    let text_color = rgb(FONT_COLOR, Color::Gray);
    let intro = Paragraph::new(vec![
        Spans::from(Span::styled(
            TITLE,
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )),
        Spans::from(Span::raw(INTRO)),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .style(Style::default().fg(text_color));
    rect.render_widget(intro, chunks[0]);

    draw_controls(rect, dashboard, chunks[1]);

    match (&dashboard.chart, &dashboard.error) {
        (_, Some(message)) => {
            let error = Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))
            .block(Block::default().title("Error").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
            rect.render_widget(error, chunks[2]);
        }
        (Some(chart), None) => draw_chart(rect, chart, chunks[2]),
        (None, None) => {}
    }

    let help = Paragraph::new(Span::styled(HELP, Style::default().fg(Color::DarkGray)))
        .alignment(Alignment::Center);
    rect.render_widget(help, chunks[3]);
}

fn draw_controls<B: Backend>(rect: &mut Frame<B>, dashboard: &Dashboard, area: Rect) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)].as_ref())
        .split(area);

    let menu = MetricKey::ALL
        .iter()
        .map(|m| {
            let (first, rest) = m.label().split_at(1);
            Spans::from(vec![
                Span::styled(
                    first,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::UNDERLINED),
                ),
                Span::styled(rest, Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();
    let tabs = Tabs::new(menu)
        .select(MetricKey::ALL.iter().position(|m| *m == dashboard.metric).unwrap_or(0))
        .block(Block::default().title("Tipo de evaluación").borders(Borders::ALL))
        .style(Style::default().fg(Color::Cyan))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .divider(Span::raw("|"));
    rect.render_widget(tabs, header_chunks[0]);

    let groups: Vec<Span> = GroupKey::ALL
        .iter()
        .enumerate()
        .flat_map(|(i, g)| {
            let style = if *g == dashboard.group {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            vec![Span::styled(format!("{} {}", i + 1, g.label()), style), Span::raw("  ")]
        })
        .collect();
    let refreshed = dashboard
        .refreshed_at
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_default();
    let selection = Paragraph::new(Spans::from(groups))
        .block(
            Block::default()
                .title(format!("Elige una categoría! (actualizado {})", refreshed))
                .borders(Borders::ALL),
        )
        .alignment(Alignment::Center);
    rect.render_widget(selection, header_chunks[1]);
}

fn draw_chart<B: Backend>(rect: &mut Frame<B>, chart: &ChartSpecification, area: Rect) {
    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)].as_ref())
        .split(area);

    let marker = chart
        .marker_rgb()
        .map_or(Color::Magenta, |(r, g, b)| Color::Rgb(r, g, b));
    let data = bar_data(chart);
    let bar_count = data.len().max(1) as u16;
    let bar_width = (body_chunks[0].width.saturating_sub(2) / bar_count)
        .saturating_sub(1)
        .clamp(3, 20);
    let bars = BarChart::default()
        .block(
            Block::default()
                .title(Span::styled(
                    chart.title.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL),
        )
        .data(&data)
        .bar_width(bar_width)
        .bar_gap(1)
        .bar_style(Style::default().fg(marker))
        // digits would show the scaled integer; the table carries the real means
        .value_style(Style::default().fg(marker).bg(marker))
        .label_style(Style::default().fg(Color::White));
    rect.render_widget(bars, body_chunks[0]);

    let mut rows: Vec<Row> = chart
        .points
        .iter()
        .map(|p| {
            Row::new(vec![
                Cell::from(p.category.as_str()),
                Cell::from(format!("{:.2}", p.value)),
                Cell::from(p.count.to_string()),
            ])
        })
        .collect();
    rows.extend(chart.empty_categories.iter().map(|c| {
        Row::new(vec![
            Cell::from(c.as_str()),
            Cell::from("sin datos"),
            Cell::from("0"),
        ])
        .style(Style::default().fg(Color::DarkGray))
    }));
    let table = Table::new(rows)
        .header(
            Row::new(vec![
                Cell::from(chart.x_label.as_str()),
                Cell::from(chart.y_label.as_str()),
                Cell::from("n"),
            ])
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().title("Promedios").borders(Borders::ALL))
        .widths(&[
            Constraint::Percentage(45),
            Constraint::Percentage(35),
            Constraint::Percentage(20),
        ]);
    rect.render_widget(table, body_chunks[1]);
}
