use crate::app::AppState;
use crate::domain::UiMode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask => {
            handle_input_form_mode(app, key);
            false
        }
        UiMode::MoodPicker => {
            handle_mood_picker_mode(app, key);
            false
        }
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        // Timer
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char(' ') => app.timer.toggle(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.timer.reset(),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            app.timer.select_preset(index);
        }

        // Task navigation
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),

        // Task edits
        KeyCode::Char('a') | KeyCode::Char('A') => app.start_add_task(),
        KeyCode::Enter | KeyCode::Char('x') | KeyCode::Char('X') => app.toggle_selected(),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => app.remove_selected(),
        KeyCode::Char('c') | KeyCode::Char('C') => app.clear_completed(),

        // Mood
        KeyCode::Char('m') | KeyCode::Char('M') => app.open_mood_picker(),

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,

        _ => {}
    }
    false
}

/// Handle keys in input form mode (adding a task)
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_input_form(),
        KeyCode::Esc => app.cancel_input_form(),
        KeyCode::Backspace => app.input_form_backspace(),
        KeyCode::Char(c) => app.input_form_push(c),
        _ => {}
    }
}

/// Handle keys in the mood picker
fn handle_mood_picker_mode(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            app.pick_mood(index);
        }
        KeyCode::Esc | KeyCode::Char('q') => app.close_mood_picker(),
        _ => {}
    }
}
