use crate::domain::{Mood, MoodLog, TaskList, TimerCompleted, TimerEngine, UiMode};
use crate::notifications::{AudioCue, Notifier, TIMER_DONE_BODY, TIMER_DONE_TITLE};
use crate::persistence::Store;
use crate::ticker::tick_duration;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Input form state for adding tasks
#[derive(Debug, Clone, Default)]
pub struct InputFormState {
    pub text: String,
}

/// Main application state
pub struct AppState {
    pub timer: TimerEngine,
    pub tasks: TaskList,
    pub moods: MoodLog,
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    /// Whether the terminal window currently has focus
    pub has_focus: bool,
    /// Countdowns finished during this session
    pub completed_sessions: u32,
    notifier: Box<dyn Notifier>,
    audio: Box<dyn AudioCue>,
}

impl AppState {
    pub fn new(store: Store, notifier: Box<dyn Notifier>, audio: Box<dyn AudioCue>) -> Self {
        Self {
            timer: TimerEngine::load(store.clone()),
            tasks: TaskList::load(store.clone()),
            moods: MoodLog::load(store),
            selected_index: 0,
            ui_mode: UiMode::Normal,
            input_form: None,
            has_focus: true,
            completed_sessions: 0,
            notifier,
            audio,
        }
    }

    /// Advance the countdown to the current time
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        if let Some(completed) = self.timer.poll_at(now) {
            self.on_timer_completed(completed);
        }
    }

    /// How long the event loop may block before the next tick is due
    pub fn next_wake(&self, now: Instant) -> Duration {
        match self.timer.next_tick_in(now) {
            Some(due) => due.min(tick_duration()),
            None => tick_duration(),
        }
    }

    fn on_timer_completed(&mut self, completed: TimerCompleted) {
        self.completed_sessions += 1;
        log::info!(
            "event=session_completed seconds={} focused={}",
            completed.duration_seconds,
            self.has_focus
        );

        self.audio.play();
        // Only interrupt the desktop when the user is looking elsewhere
        if !self.has_focus {
            self.notifier.notify(TIMER_DONE_TITLE, TIMER_DONE_BODY);
        }
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.has_focus = focused;
    }

    // ── Tasks ───────────────────────────────────────────────────────

    pub fn selected_task_id(&self) -> Option<Uuid> {
        self.tasks.get(self.selected_index).map(|t| t.id)
    }

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.tasks.len() {
            self.selected_index += 1;
        }
    }

    fn clamp_selection(&mut self) {
        if self.tasks.is_empty() {
            self.selected_index = 0;
        } else if self.selected_index >= self.tasks.len() {
            self.selected_index = self.tasks.len() - 1;
        }
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.tasks.toggle(id);
        }
    }

    pub fn remove_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.tasks.remove(id);
            self.clamp_selection();
        }
    }

    pub fn clear_completed(&mut self) {
        if self.tasks.has_completed() {
            self.tasks.clear_completed();
            self.clamp_selection();
        }
    }

    pub fn start_add_task(&mut self) {
        self.input_form = Some(InputFormState::default());
        self.ui_mode = UiMode::AddingTask;
    }

    pub fn input_form_push(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            form.text.push(c);
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.text.pop();
        }
    }

    /// Add the typed task and close the form. Blank input just closes it.
    pub fn submit_input_form(&mut self) {
        if let Some(form) = self.input_form.take() {
            if self.tasks.add(&form.text).is_some() {
                // New tasks land on top
                self.selected_index = 0;
            }
        }
        self.ui_mode = UiMode::Normal;
    }

    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    // ── Mood ────────────────────────────────────────────────────────

    pub fn open_mood_picker(&mut self) {
        self.ui_mode = UiMode::MoodPicker;
    }

    /// Record the mood at `index` in the picker and close it
    pub fn pick_mood(&mut self, index: usize) {
        if let Some(mood) = Mood::all().get(index) {
            self.moods.select(*mood);
            self.ui_mode = UiMode::Normal;
        }
    }

    pub fn close_mood_picker(&mut self) {
        self.ui_mode = UiMode::Normal;
    }
}
