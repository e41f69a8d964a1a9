use crate::app::AppState;
use crate::domain::{format_clock, TimerEngine, TimerStatus, PRESETS};
use crate::ui::styles::{
    border_style, default_style, expired_style, gauge_style, hint_style, idle_style,
    paused_style, running_style, selected_style, title_style,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Status badge shown next to the clock
fn status_badge(status: TimerStatus) -> (&'static str, Style) {
    match status {
        TimerStatus::Idle => ("READY", idle_style()),
        TimerStatus::Running => ("RUNNING", running_style()),
        TimerStatus::Paused => ("PAUSED", paused_style()),
        TimerStatus::Expired => ("TIME'S UP", expired_style()),
    }
}

/// Label for the selected duration, falling back to the exact length for non-preset values
fn duration_label(timer: &TimerEngine) -> String {
    match timer.preset_index() {
        Some(index) => PRESETS[index].label.to_string(),
        None => format!("Custom {}", format_clock(timer.selected_seconds())),
    }
}

fn preset_line(selected: Option<usize>) -> Line<'static> {
    let mut spans = Vec::new();
    for (index, preset) in PRESETS.iter().enumerate() {
        let style = if selected == Some(index) {
            selected_style()
        } else {
            hint_style()
        };
        spans.push(Span::styled(
            format!("[{}] {}", index + 1, preset.label),
            style,
        ));
        spans.push(Span::raw("  "));
    }
    Line::from(spans)
}

/// Render the countdown pane
pub fn render_timer_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let timer = &app.timer;
    let (badge, badge_style) = status_badge(timer.status());

    let title = format!(" ⏱ Timer — {} ", duration_label(timer));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Clock + status
            Constraint::Length(1), // Gauge
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Presets
            Constraint::Min(0),
        ])
        .split(block.inner(area));

    let clock = Line::from(vec![
        Span::styled(format!(" {} ", timer.format_clock()), default_style()),
        Span::styled(badge, badge_style),
        Span::styled(
            format!("   🍅 {} done this session", app.completed_sessions),
            hint_style(),
        ),
    ]);

    let percent = (timer.progress() * 100.0).round().clamp(0.0, 100.0) as u16;
    let gauge = Gauge::default()
        .gauge_style(gauge_style())
        .percent(percent)
        .label("");

    f.render_widget(block, area);
    f.render_widget(Paragraph::new(clock), chunks[0]);
    f.render_widget(gauge, chunks[1]);
    f.render_widget(Paragraph::new(preset_line(timer.preset_index())), chunks[3]);
}
