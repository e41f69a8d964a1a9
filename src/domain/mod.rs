pub mod enums;
pub mod mood;
pub mod task;
pub mod timer;

pub use enums::UiMode;
pub use mood::{Mood, MoodEntry, MoodLog};
pub use task::{Task, TaskList};
pub use timer::{format_clock, TimerCompleted, TimerEngine, TimerStatus, PRESETS};
