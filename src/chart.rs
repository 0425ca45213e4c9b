use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Paragraph};
use ratatui::DefaultTerminal;

use crate::models::WeeklyAverage;

pub const TITLE: &str = "Average Application Rating Per Week";
pub const X_LABEL: &str = "Week";
pub const Y_LABEL: &str = "Average Rating";

pub const CANVAS_WIDTH: u16 = 100;
pub const CANVAS_HEIGHT: u16 = 30;

const BAR_COLOR: Color = Color::Rgb(135, 206, 235);
const BAR_GAP: u16 = 1;
const MAX_BAR_WIDTH: u16 = 9;

/// Shows the weekly chart until the user presses `q`, `Esc` or `Ctrl+C`.
pub fn show(weekly: &[WeeklyAverage]) -> anyhow::Result<()> {
    let mut terminal =
        ratatui::try_init().context("failed to open the terminal for the chart")?;
    let result = run(&mut terminal, weekly);
    ratatui::restore();
    result
}

fn run(terminal: &mut DefaultTerminal, weekly: &[WeeklyAverage]) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, weekly))?;

        if let Event::Key(key) = event::read()? {
            // Press only (Windows reports releases too)
            if key.kind == KeyEventKind::Press && is_quit(&key) {
                return Ok(());
            }
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

pub fn canvas(area: Rect) -> Rect {
    Rect {
        width: area.width.min(CANVAS_WIDTH),
        height: area.height.min(CANVAS_HEIGHT),
        ..area
    }
}

pub fn bar_width(available: u16, bars: usize) -> u16 {
    if bars == 0 {
        return MAX_BAR_WIDTH;
    }
    let bars = u16::try_from(bars).unwrap_or(u16::MAX);
    let per_bar = available / bars;
    per_bar.saturating_sub(BAR_GAP).clamp(1, MAX_BAR_WIDTH)
}

pub fn bars(weekly: &[WeeklyAverage]) -> Vec<Bar<'static>> {
    weekly
        .iter()
        .map(|week| {
            Bar::default()
                .value(week.average_rating.max(0.0).round() as u64)
                .text_value(format!("{:.1}", week.average_rating))
                .label(Line::from(week.week.to_string()))
        })
        .collect()
}

pub fn draw(frame: &mut Frame, weekly: &[WeeklyAverage]) {
    let area = canvas(frame.area());
    let block = Block::bordered()
        .title(Line::from(TITLE).bold().centered())
        .title_bottom(Line::from(X_LABEL).centered());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [label_area, chart_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);
    frame.render_widget(Paragraph::new(Line::from(Y_LABEL).italic()), label_area);

    if weekly.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from("No accepted applications to chart.").centered()),
            chart_area,
        );
        return;
    }

    let bars = bars(weekly);
    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width(chart_area.width, bars.len()))
        .bar_gap(BAR_GAP)
        .bar_style(Style::new().fg(BAR_COLOR))
        .value_style(Style::new().fg(Color::Black).bg(BAR_COLOR));
    frame.render_widget(chart, chart_area);
}
