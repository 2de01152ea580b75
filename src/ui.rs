use crate::aggregate::Summary;
use crate::charts::{bar_values, format_share, pie_slices, slice_points, ChartKind, ChartSurface};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table,
    },
    Frame, Terminal,
};
use std::io;

const SLICE_COLORS: [Color; 8] = [
    Color::Cyan,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::Red,
    Color::Blue,
    Color::LightCyan,
    Color::LightYellow,
];

const PIE_RESOLUTION: usize = 120;

fn slice_color(index: usize) -> Color {
    SLICE_COLORS[index % SLICE_COLORS.len()]
}

/// Draws charts full-screen in the terminal until a key closes them.
#[derive(Debug, Default)]
pub struct TerminalCharts;

impl ChartSurface for TerminalCharts {
    fn show(&mut self, kind: ChartKind, summary: &Summary) -> Result<()> {
        run_chart(kind, summary)
    }
}

/// Raw mode plus alternate screen; both are undone on drop, including
/// when setup fails halfway.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = disable_raw_mode() {
            tracing::warn!("failed to leave raw mode: {err}");
        }
        if let Err(err) = execute!(io::stdout(), LeaveAlternateScreen) {
            tracing::warn!("failed to leave alternate screen: {err}");
        }
    }
}

pub fn run_chart(kind: ChartKind, summary: &Summary) -> Result<()> {
    let guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, kind, summary);

    // Restore terminal
    drop(guard);
    terminal.show_cursor()?;

    res?;
    tracing::debug!(chart = ?kind, categories = summary.categories.len(), "chart closed");
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    kind: ChartKind,
    summary: &Summary,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, kind, summary))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => return Ok(()),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(())
                }
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, kind: ChartKind, summary: &Summary) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title and total
            Constraint::Min(0),    // Chart
            Constraint::Length(3), // Key hints
        ])
        .split(f.size());

    render_header(f, chunks[0], kind, summary);

    match kind {
        ChartKind::Pie => render_pie(f, chunks[1], summary),
        ChartKind::Bar => render_bar(f, chunks[1], summary),
    }

    render_status_bar(f, chunks[2]);
}

fn render_header(f: &mut Frame, area: Rect, kind: ChartKind, summary: &Summary) {
    let mut spans = vec![
        Span::styled(
            kind.title(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Total: {:.2}", summary.total),
            Style::default().fg(Color::White),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("{} categories", summary.categories.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    if let Some(largest) = summary.largest() {
        spans.push(Span::raw("  |  "));
        spans.push(Span::styled(
            format!("Largest: {}", largest.category),
            Style::default().fg(Color::Red),
        ));
    }

    let header = Paragraph::new(vec![Line::from(spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_pie(f: &mut Frame, area: Rect, summary: &Summary) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Pie
            Constraint::Percentage(40), // Legend
        ])
        .split(area);

    let slices = pie_slices(summary);
    let buckets = slice_points(&slices, PIE_RESOLUTION);

    // Terminal cells are about twice as tall as wide; widen the x range so
    // the disc stays round.
    let inner_width = chunks[0].width.saturating_sub(2).max(1) as f64;
    let inner_height = chunks[0].height.saturating_sub(2).max(1) as f64;
    let half_height = 1.1;
    let half_width = half_height * inner_width / (2.0 * inner_height);

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Share of Total "),
        )
        .marker(Marker::Braille)
        .x_bounds([-half_width, half_width])
        .y_bounds([-half_height, half_height])
        .paint(|ctx| {
            for (i, points) in buckets.iter().enumerate() {
                ctx.draw(&Points {
                    coords: points,
                    color: slice_color(i),
                });
            }
        });
    f.render_widget(canvas, chunks[0]);

    let header = Row::new(["Category", "Amount", "Share"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    }))
    .style(Style::default().bg(Color::DarkGray))
    .height(1);

    let rows = slices.iter().enumerate().map(|(i, slice)| {
        let color = slice_color(i);
        Row::new(vec![
            Cell::from(Line::from(vec![
                Span::styled("■ ", Style::default().fg(color)),
                Span::raw(truncate(&slice.category, 20)),
            ])),
            Cell::from(format!("{:.2}", slice.amount)),
            Cell::from(format_share(slice.share)).style(Style::default().fg(color)),
        ])
        .height(1)
    });

    let legend = Table::new(
        rows,
        [
            Constraint::Min(12),
            Constraint::Length(12),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Legend "),
    );
    f.render_widget(legend, chunks[1]);
}

fn render_bar(f: &mut Frame, area: Rect, summary: &Summary) {
    let values = bar_values(summary);
    let bars: Vec<Bar> = values
        .iter()
        .enumerate()
        .map(|(i, (category, cents))| {
            Bar::default()
                .value(*cents)
                .text_value(format!("{:.2}", *cents as f64 / 100.0))
                .label(Line::from(truncate(category, 12)))
                .style(Style::default().fg(slice_color(i)))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Amount by Category "),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(12)
        .bar_gap(2)
        .value_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .label_style(Style::default().fg(Color::White));

    f.render_widget(chart, area);
}

fn render_status_bar(f: &mut Frame, area: Rect) {
    let status_spans = vec![
        Span::styled(" q", Style::default().fg(Color::Red)),
        Span::raw(" / "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" / "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Back to menu"),
    ];

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
