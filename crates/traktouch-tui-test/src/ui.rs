//! TUI rendering with ratatui.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use traktouch_engine::{Lifecycle, TouchPhase};
use traktouch_types::Point16;

use crate::app::{AppState, SCREEN_H, SCREEN_W};

pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Min(10),    // Screen + status
            Constraint::Length(10), // Event log
            Constraint::Length(3),  // Help bar
        ])
        .split(f.area());

    draw_title(f, chunks[0], app);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[1]);
    draw_screen(f, cols[0], app);
    draw_status(f, cols[1], app);

    draw_log(f, chunks[2], app);
    draw_help(f, chunks[3]);
}

fn draw_title(f: &mut Frame, area: Rect, app: &AppState) {
    let title = Paragraph::new(format!(
        "traktouch TUI test, host window \"{}\"",
        app.engine.config().host.window_title
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(ratatui::layout::Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn lifecycle_color(lifecycle: Lifecycle) -> Color {
    match lifecycle {
        Lifecycle::Active(_) => Color::Green,
        Lifecycle::Dormant | Lifecycle::Uninitialized => Color::Yellow,
        Lifecycle::Degraded(_) | Lifecycle::TornDown => Color::Red,
    }
}

fn phase_color(phase: TouchPhase) -> Color {
    match phase {
        TouchPhase::Idle => Color::White,
        TouchPhase::PendingCorrection => Color::Yellow,
        TouchPhase::Corrected => Color::Green,
    }
}

fn draw_screen(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .title("Host window")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(lifecycle_color(app.status().lifecycle)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Finger first so the host pointer wins when they overlap.
    let finger_glyph = if app.finger_down { "+" } else { "." };
    draw_dot(f, inner, app.finger, finger_glyph, Color::Cyan);
    draw_dot(f, inner, app.seen, "@", Color::Magenta);
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn draw_dot(f: &mut Frame, inner: Rect, at: Point16, glyph: &'static str, color: Color) {
    if inner.width <= 2 || inner.height <= 2 {
        return;
    }
    let draw_w = f64::from(inner.width - 2);
    let draw_h = f64::from(inner.height - 2);
    let x = (f64::from(at.x.max(0)) / f64::from(SCREEN_W) * draw_w) as u16;
    let y = (f64::from(at.y.max(0)) / f64::from(SCREEN_H) * draw_h) as u16;

    let dot = Paragraph::new(glyph).style(Style::default().fg(color).add_modifier(Modifier::BOLD));
    f.render_widget(
        dot,
        Rect {
            x: inner.x + 1 + x.min(inner.width.saturating_sub(3)),
            y: inner.y + 1 + y.min(inner.height.saturating_sub(3)),
            width: 1,
            height: 1,
        },
    );
}

fn field(name: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{name:<12}")),
        Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}

fn draw_status(f: &mut Frame, area: Rect, app: &AppState) {
    let status = app.status();
    let correction = status
        .correction
        .map_or_else(|| "-".to_string(), |c| c.to_string());

    let lines = vec![
        field(
            "Lifecycle",
            status.lifecycle.to_string(),
            lifecycle_color(status.lifecycle),
        ),
        field("Phase", status.phase.to_string(), phase_color(status.phase)),
        field("Correction", correction, Color::White),
        field(
            "Deferral",
            format!("{} ticks", status.deferral_ticks),
            if status.deferral_ticks > 0 {
                Color::Yellow
            } else {
                Color::White
            },
        ),
        field("Pending up", status.pending_up.to_string(), Color::White),
        field("Pan", status.pan_active.to_string(), Color::White),
        field("Auto paint", app.auto_tick.to_string(), Color::White),
        field("Finger", app.finger.to_string(), Color::Cyan),
        field("Host sees", app.seen.to_string(), Color::Magenta),
    ];

    let panel = Paragraph::new(lines).block(Block::default().title("Engine").borders(Borders::ALL));
    f.render_widget(panel, area);
}

fn draw_log(f: &mut Frame, area: Rect, app: &AppState) {
    let items: Vec<ListItem> = app
        .log_lines
        .iter()
        .rev()
        .take(area.height.saturating_sub(2) as usize)
        .map(|line| {
            let color = if line.starts_with("posted") {
                Color::Green
            } else if line.starts_with("wheel") {
                Color::Yellow
            } else if line.contains("(was") {
                Color::Cyan
            } else {
                Color::White
            };
            ListItem::new(Span::styled(format!("> {line}"), Style::default().fg(color)))
        })
        .collect();

    let log = List::new(items).block(Block::default().title("Event Log").borders(Borders::ALL));
    f.render_widget(log, area);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let help = Paragraph::new(
        "q: quit  arrows: move  space: finger down/up  c: mouse click  r: host SetCursorPos  \
         p: paint  a: auto paint  g/j/k/e: pan begin/down/up/end  x: teardown",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(ratatui::layout::Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}
