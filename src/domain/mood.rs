use crate::persistence::{Store, MOOD_KEY, MOOD_LOG_KEY};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of entries kept in the mood history
pub const MOOD_LOG_CAPACITY: usize = 12;

/// How the user is feeling, stored as its glyph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    #[default]
    #[serde(rename = "😀")]
    Good,
    #[serde(rename = "😐")]
    Okay,
    #[serde(rename = "😓")]
    Tired,
    #[serde(rename = "🔥")]
    Motivated,
}

impl Mood {
    pub fn symbol(&self) -> &'static str {
        match self {
            Mood::Good => "😀",
            Mood::Okay => "😐",
            Mood::Tired => "😓",
            Mood::Motivated => "🔥",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Good => "Good",
            Mood::Okay => "Okay",
            Mood::Tired => "Tired",
            Mood::Motivated => "Motivated",
        }
    }

    /// All moods in picker order
    pub fn all() -> &'static [Mood] {
        &[Mood::Good, Mood::Okay, Mood::Tired, Mood::Motivated]
    }
}

/// One recorded mood selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub symbol: Mood,
    pub timestamp: DateTime<Utc>,
}

/// Current mood plus a bounded newest-first history.
///
/// The two are persisted under separate keys; the current mood is set directly
/// on selection rather than read off the head of the log.
pub struct MoodLog {
    current: Mood,
    entries: Vec<MoodEntry>,
    store: Store,
}

impl MoodLog {
    pub fn load(store: Store) -> Self {
        let current = store.load(MOOD_KEY, Mood::default());
        let mut entries: Vec<MoodEntry> = store.load(MOOD_LOG_KEY, Vec::new());
        entries.truncate(MOOD_LOG_CAPACITY);
        Self {
            current,
            entries,
            store,
        }
    }

    pub fn current(&self) -> Mood {
        self.current
    }

    /// History, newest first
    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    pub fn select(&mut self, mood: Mood) {
        self.current = mood;
        self.entries.insert(
            0,
            MoodEntry {
                symbol: mood,
                timestamp: Utc::now(),
            },
        );
        self.entries.truncate(MOOD_LOG_CAPACITY);

        self.store.save(MOOD_KEY, &self.current);
        self.store.save(MOOD_LOG_KEY, &self.entries);
    }
}
