use crate::app::AppState;
use crate::domain::Task;
use crate::ui::styles::{border_style, default_style, done_style, hint_style, selected_style, title_style};
use chrono::Local;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{
        block::{Position, Title},
        Block, Borders, List, ListItem, ListState, Paragraph,
    },
    Frame,
};

/// Render the task checklist pane
pub fn render_task_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let done = app.tasks.completed_count();
    let title = format!(" ✅ Tasks ({}/{}) ", done, app.tasks.len());
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()));

    if app.tasks.has_completed() {
        block = block.title(
            Title::from(Span::styled(" c: clear completed ", hint_style())).position(Position::Bottom),
        );
    }

    if app.tasks.is_empty() {
        let empty = Paragraph::new(Line::styled("No tasks yet. Press 'a' to add one.", hint_style()))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .tasks
        .tasks()
        .iter()
        .map(|task| ListItem::new(create_task_line(task)).style(default_style()))
        .collect();

    // Stateful render scrolls the list so the selected task stays visible
    let mut state = ListState::default().with_selected(Some(app.selected_index));
    let list = List::new(items).block(block).highlight_style(selected_style());
    f.render_stateful_widget(list, area, &mut state);
}

/// Create a single line for a task
/// Format: [x] Write proposal   09:41
fn create_task_line(task: &Task) -> Line<'static> {
    let checkbox = if task.done { "[x] " } else { "[ ] " };
    let text_style = if task.done { done_style() } else { default_style() };
    let created = task.created_at.with_timezone(&Local).format("%H:%M");

    Line::from(vec![
        Span::raw(checkbox),
        Span::styled(task.text.clone(), text_style),
        Span::styled(format!("   {}", created), hint_style()),
    ])
}
