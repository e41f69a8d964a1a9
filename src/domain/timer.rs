use crate::persistence::{Store, SELECTED_SECONDS_KEY};
use crate::ticker::{TickHandle, TICK_INTERVAL};
use std::time::{Duration, Instant};

/// A named countdown length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerPreset {
    pub label: &'static str,
    pub seconds: u32,
}

/// Available countdown lengths; the first one is the default
pub const PRESETS: [TimerPreset; 3] = [
    TimerPreset {
        label: "Pomodoro 25 min",
        seconds: 25 * 60,
    },
    TimerPreset {
        label: "Focus 15 min",
        seconds: 15 * 60,
    },
    TimerPreset {
        label: "Sprint 5 min",
        seconds: 5 * 60,
    },
];

/// Emitted exactly once each time a countdown reaches zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerCompleted {
    pub duration_seconds: u32,
}

/// Display-level view of the timer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStatus {
    /// Full duration remaining, not running
    Idle,
    Running,
    Paused,
    /// Reached zero; needs a reset or a new duration before it can start again
    Expired,
}

/// Single countdown state machine.
///
/// `running` implies `remaining > 0`, and the tick slot is occupied exactly while running.
pub struct TimerEngine {
    selected_seconds: u32,
    remaining: u32,
    running: bool,
    ticker: Option<TickHandle>,
    store: Store,
}

impl TimerEngine {
    /// Restore the selected duration from the store; the countdown itself always starts idle
    pub fn load(store: Store) -> Self {
        let default = PRESETS[0].seconds;
        let stored: u32 = store.load(SELECTED_SECONDS_KEY, default);
        let selected_seconds = if stored > 0 { stored } else { default };

        Self {
            selected_seconds,
            remaining: selected_seconds,
            running: false,
            ticker: None,
            store,
        }
    }

    pub fn selected_seconds(&self) -> u32 {
        self.selected_seconds
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn status(&self) -> TimerStatus {
        if self.running {
            TimerStatus::Running
        } else if self.remaining == 0 {
            TimerStatus::Expired
        } else if self.remaining == self.selected_seconds {
            TimerStatus::Idle
        } else {
            TimerStatus::Paused
        }
    }

    /// Index into `PRESETS` of the selected duration, if it matches one
    pub fn preset_index(&self) -> Option<usize> {
        PRESETS
            .iter()
            .position(|p| p.seconds == self.selected_seconds)
    }

    /// Elapsed fraction of the selected duration (0.0 to 1.0)
    pub fn progress(&self) -> f64 {
        if self.selected_seconds == 0 {
            return 0.0;
        }
        1.0 - self.remaining as f64 / self.selected_seconds as f64
    }

    /// Remaining time as "MM:SS"
    pub fn format_clock(&self) -> String {
        format_clock(self.remaining_seconds())
    }

    /// Change the countdown length. Stops any active countdown.
    pub fn select_duration(&mut self, seconds: u32) {
        if seconds == 0 {
            return;
        }
        self.stop();
        self.selected_seconds = seconds;
        self.remaining = seconds;
        self.store.save(SELECTED_SECONDS_KEY, &seconds);
        log::debug!("event=timer_duration_selected seconds={}", seconds);
    }

    pub fn select_preset(&mut self, index: usize) {
        if let Some(preset) = PRESETS.get(index) {
            self.select_duration(preset.seconds);
        }
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Start counting down from `now`. No-op while running or once expired.
    pub fn start_at(&mut self, now: Instant) {
        if self.running || self.remaining == 0 {
            return;
        }
        // Assigning the slot drops any previous handle
        self.ticker = Some(TickHandle::arm(now, TICK_INTERVAL));
        self.running = true;
        log::debug!("event=timer_started remaining={}", self.remaining);
    }

    pub fn pause(&mut self) {
        if !self.running {
            return;
        }
        self.stop();
        log::debug!("event=timer_paused remaining={}", self.remaining);
    }

    /// Start if stopped, pause if running
    pub fn toggle(&mut self) {
        if self.running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Stop and rewind to the full selected duration
    pub fn reset(&mut self) {
        self.stop();
        self.remaining = self.selected_seconds;
    }

    /// Time until the next tick is due, or `None` when not running
    pub fn next_tick_in(&self, now: Instant) -> Option<Duration> {
        self.ticker.as_ref().map(|t| t.time_until_due(now))
    }

    /// Deliver every tick due by `now`. Returns the completion if the countdown hit zero.
    pub fn poll_at(&mut self, now: Instant) -> Option<TimerCompleted> {
        while self.running {
            let due = match self.ticker.as_mut() {
                Some(ticker) => ticker.fire(now),
                None => false,
            };
            if !due {
                break;
            }
            if let Some(completed) = self.tick() {
                return Some(completed);
            }
        }
        None
    }

    fn tick(&mut self) -> Option<TimerCompleted> {
        if !self.running {
            return None;
        }

        if self.remaining <= 1 {
            self.remaining = 0;
            self.stop();
            log::info!("event=timer_completed seconds={}", self.selected_seconds);
            return Some(TimerCompleted {
                duration_seconds: self.selected_seconds,
            });
        }

        self.remaining -= 1;
        None
    }

    fn stop(&mut self) {
        self.running = false;
        self.ticker = None;
    }
}

/// Format seconds as zero-padded "MM:SS"
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> TimerEngine {
        TimerEngine::load(Store::in_memory())
    }

    /// Drive `n` one-second ticks starting from `start`, counting completions
    fn advance(timer: &mut TimerEngine, start: Instant, from: u64, n: u64) -> usize {
        (from + 1..=from + n)
            .filter_map(|s| timer.poll_at(start + Duration::from_secs(s)))
            .count()
    }

    #[test]
    fn test_loads_default_preset() {
        let timer = engine();
        assert_eq!(timer.selected_seconds(), 1500);
        assert_eq!(timer.remaining_seconds(), 1500);
        assert!(!timer.is_running());
        assert_eq!(timer.status(), TimerStatus::Idle);
        assert_eq!(timer.preset_index(), Some(0));
    }

    #[test]
    fn test_loads_stored_duration() {
        let store = Store::in_memory();
        store.save(SELECTED_SECONDS_KEY, &900u32);
        let timer = TimerEngine::load(store);
        assert_eq!(timer.selected_seconds(), 900);
        assert_eq!(timer.remaining_seconds(), 900);
    }

    #[test]
    fn test_non_positive_stored_duration_uses_default() {
        let store = Store::in_memory();
        store.put_raw(SELECTED_SECONDS_KEY, "0");
        assert_eq!(TimerEngine::load(store.clone()).selected_seconds(), 1500);

        store.put_raw(SELECTED_SECONDS_KEY, "-30");
        assert_eq!(TimerEngine::load(store).selected_seconds(), 1500);
    }

    #[test]
    fn test_ticks_decrement_while_running() {
        let mut timer = engine();
        timer.select_duration(10);
        let t0 = Instant::now();
        timer.start_at(t0);

        let completions = advance(&mut timer, t0, 0, 4);
        assert_eq!(completions, 0);
        assert_eq!(timer.remaining_seconds(), 6);
        assert!(timer.is_running());
    }

    #[test]
    fn test_completion_fires_exactly_once() {
        let mut timer = engine();
        timer.select_duration(5);
        let t0 = Instant::now();
        timer.start_at(t0);

        let completions = advance(&mut timer, t0, 0, 5);
        assert_eq!(completions, 1);
        assert_eq!(timer.remaining_seconds(), 0);
        assert!(!timer.is_running());
        assert_eq!(timer.status(), TimerStatus::Expired);

        // Later polls never fire again
        assert_eq!(advance(&mut timer, t0, 5, 10), 0);
        assert!(timer.next_tick_in(t0).is_none());
    }

    #[test]
    fn test_overdue_poll_delivers_missed_ticks() {
        let mut timer = engine();
        timer.select_duration(10);
        let t0 = Instant::now();
        timer.start_at(t0);

        assert!(timer.poll_at(t0 + Duration::from_millis(3200)).is_none());
        assert_eq!(timer.remaining_seconds(), 7);

        // A long stall past the end completes once and stops
        let completed = timer.poll_at(t0 + Duration::from_secs(60));
        assert_eq!(completed, Some(TimerCompleted { duration_seconds: 10 }));
        assert_eq!(timer.remaining_seconds(), 0);
    }

    #[test]
    fn test_pause_then_start_resumes_exactly() {
        let mut timer = engine();
        timer.select_duration(10);
        let t0 = Instant::now();
        timer.start_at(t0);
        advance(&mut timer, t0, 0, 3);

        timer.pause();
        assert_eq!(timer.status(), TimerStatus::Paused);
        assert!(timer.next_tick_in(t0).is_none());
        // Time passing while paused changes nothing
        assert!(timer.poll_at(t0 + Duration::from_secs(30)).is_none());
        assert_eq!(timer.remaining_seconds(), 7);

        let t1 = t0 + Duration::from_secs(40);
        timer.start_at(t1);
        advance(&mut timer, t1, 0, 2);
        assert_eq!(timer.remaining_seconds(), 5);
    }

    #[test]
    fn test_pause_when_idle_is_noop() {
        let mut timer = engine();
        timer.pause();
        assert_eq!(timer.status(), TimerStatus::Idle);
        assert_eq!(timer.remaining_seconds(), 1500);
    }

    #[test]
    fn test_start_twice_keeps_single_tick_source() {
        let mut timer = engine();
        timer.select_duration(10);
        let t0 = Instant::now();
        timer.start_at(t0);
        // Second start is ignored, the original schedule stands
        timer.start_at(t0 + Duration::from_millis(500));

        advance(&mut timer, t0, 0, 2);
        assert_eq!(timer.remaining_seconds(), 8);
    }

    #[test]
    fn test_select_duration_while_running_stops() {
        let mut timer = engine();
        let t0 = Instant::now();
        timer.start_at(t0);
        advance(&mut timer, t0, 0, 10);

        timer.select_duration(900);
        assert!(!timer.is_running());
        assert_eq!(timer.remaining_seconds(), 900);
        assert_eq!(timer.selected_seconds(), 900);
        assert!(timer.poll_at(t0 + Duration::from_secs(20)).is_none());
        assert_eq!(timer.remaining_seconds(), 900);
    }

    #[test]
    fn test_select_duration_persists() {
        let store = Store::in_memory();
        let mut timer = TimerEngine::load(store.clone());
        timer.select_preset(2);
        assert_eq!(TimerEngine::load(store).selected_seconds(), 300);
    }

    #[test]
    fn test_select_zero_is_ignored() {
        let mut timer = engine();
        timer.select_duration(0);
        assert_eq!(timer.selected_seconds(), 1500);
    }

    #[test]
    fn test_select_preset_out_of_range_is_ignored() {
        let mut timer = engine();
        timer.select_preset(PRESETS.len());
        assert_eq!(timer.selected_seconds(), 1500);
    }

    #[test]
    fn test_reset_restores_full_duration() {
        let mut timer = engine();
        timer.select_duration(60);
        let t0 = Instant::now();
        timer.start_at(t0);
        advance(&mut timer, t0, 0, 15);
        timer.pause();

        timer.reset();
        assert_eq!(timer.remaining_seconds(), 60);
        assert!(!timer.is_running());
        assert_eq!(timer.status(), TimerStatus::Idle);
    }

    #[test]
    fn test_reset_while_running_cancels_ticks() {
        let mut timer = engine();
        timer.select_duration(60);
        let t0 = Instant::now();
        timer.start_at(t0);
        advance(&mut timer, t0, 0, 5);

        timer.reset();
        assert!(timer.poll_at(t0 + Duration::from_secs(30)).is_none());
        assert_eq!(timer.remaining_seconds(), 60);
    }

    #[test]
    fn test_sprint_scenario() {
        let mut timer = engine();
        let presets: Vec<u32> = PRESETS.iter().map(|p| p.seconds).collect();
        assert_eq!(presets, vec![1500, 900, 300]);

        timer.select_duration(300);
        let t0 = Instant::now();
        timer.start_at(t0);

        assert_eq!(advance(&mut timer, t0, 0, 299), 0);
        assert_eq!(timer.remaining_seconds(), 1);
        assert_eq!(advance(&mut timer, t0, 299, 1), 1);
        assert_eq!(timer.remaining_seconds(), 0);
        assert!(!timer.is_running());

        // Start is refused until reset or a new duration
        let t1 = t0 + Duration::from_secs(400);
        timer.start_at(t1);
        assert!(!timer.is_running());
        assert!(timer.next_tick_in(t1).is_none());

        timer.reset();
        timer.start_at(t1);
        assert!(timer.is_running());
        assert_eq!(timer.remaining_seconds(), 300);
    }

    #[test]
    fn test_start_after_select_duration_from_expired() {
        let mut timer = engine();
        timer.select_duration(2);
        let t0 = Instant::now();
        timer.start_at(t0);
        advance(&mut timer, t0, 0, 2);
        assert_eq!(timer.status(), TimerStatus::Expired);

        timer.select_duration(900);
        timer.start_at(t0 + Duration::from_secs(3));
        assert!(timer.is_running());
    }

    #[test]
    fn test_toggle() {
        let mut timer = engine();
        timer.toggle();
        assert!(timer.is_running());
        timer.toggle();
        assert!(!timer.is_running());
    }

    #[test]
    fn test_next_tick_in() {
        let mut timer = engine();
        let t0 = Instant::now();
        assert!(timer.next_tick_in(t0).is_none());
        timer.start_at(t0);
        assert_eq!(
            timer.next_tick_in(t0 + Duration::from_millis(400)),
            Some(Duration::from_millis(600))
        );
    }

    #[test]
    fn test_progress_and_clock() {
        let mut timer = engine();
        timer.select_duration(100);
        assert_eq!(timer.progress(), 0.0);
        assert_eq!(timer.format_clock(), "01:40");

        let t0 = Instant::now();
        timer.start_at(t0);
        advance(&mut timer, t0, 0, 25);
        assert!((timer.progress() - 0.25).abs() < f64::EPSILON);
        assert_eq!(timer.format_clock(), "01:15");
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(6000), "100:00");
    }

    #[test]
    fn test_denied_write_keeps_selected_duration() {
        use crate::persistence::store::MemoryStore;

        let store = Store::new(MemoryStore::with_quota(0));
        let mut timer = TimerEngine::load(store.clone());
        timer.select_duration(600);

        assert_eq!(timer.selected_seconds(), 600);
        assert_eq!(timer.remaining_seconds(), 600);
        assert!(store.raw(SELECTED_SECONDS_KEY).is_none());
        assert_eq!(TimerEngine::load(store).selected_seconds(), 1500);
    }
}
