use crate::app::AppState;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, app: &AppState, area: Rect) {
    let timer_hint = if app.timer.is_running() {
        " s pause   "
    } else {
        " s start   "
    };
    let hints = Line::from(vec![
        Span::raw(timer_hint),
        Span::raw("r reset   "),
        Span::raw("1-3 duration   "),
        Span::raw("a add   "),
        Span::raw("↑/↓ select   "),
        Span::raw("Enter done   "),
        Span::raw("d delete   "),
        Span::raw("c clear done   "),
        Span::raw("m mood   "),
        Span::raw("q quit"),
    ]);

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
