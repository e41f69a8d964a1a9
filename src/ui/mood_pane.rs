use crate::app::AppState;
use crate::domain::MoodEntry;
use crate::ui::styles::{border_style, hint_style, modal_title_style, title_style};
use chrono::Local;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the mood pane: current mood and the recent history
pub fn render_mood_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let current = app.moods.current();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Mood ", title_style()));

    let lines = vec![
        Line::from(vec![
            Span::raw("Now: "),
            Span::styled(format!("{} {}", current.symbol(), current.label()), modal_title_style()),
            Span::styled("   (m to log)", hint_style()),
        ]),
        history_line(app.moods.entries()),
    ];

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

/// Recent entries, newest first, e.g. "Recent: 🔥 14:02  😓 11:30"
fn history_line(entries: &[MoodEntry]) -> Line<'static> {
    if entries.is_empty() {
        return Line::styled("No entries yet.", hint_style());
    }

    let mut spans = vec![Span::raw("Recent: ")];
    for entry in entries {
        let at = entry.timestamp.with_timezone(&Local).format("%H:%M");
        spans.push(Span::raw(entry.symbol.symbol()));
        spans.push(Span::styled(format!(" {}  ", at), hint_style()));
    }
    Line::from(spans)
}
