use crate::app::AppState;
use crate::domain::{Mood, UiMode};
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the mood picker modal
pub fn render_mood_picker(f: &mut Frame, app: &AppState, area: Rect) {
    if app.ui_mode != UiMode::MoodPicker {
        return;
    }

    let modal_area = create_modal_area(area, 10);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let mut lines = vec![Line::raw(""), Line::raw("  How are you feeling?"), Line::raw("")];

    let current = app.moods.current();
    for (idx, mood) in Mood::all().iter().enumerate() {
        let marker = if *mood == current { "  ← current" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!("  [{}] ", idx + 1), modal_title_style()),
            Span::raw(format!("{} {}{}", mood.symbol(), mood.label(), marker)),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(Line::raw("  Esc to cancel"));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Mood ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
