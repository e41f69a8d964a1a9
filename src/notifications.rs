//! Completion side effects: desktop notifications and an audible cue.
//! Every implementation is best-effort; failures are ignored.
use std::io::Write;
#[cfg(any(target_os = "macos", target_os = "linux"))]
use std::process::Command;

/// Title shown when a countdown finishes
pub const TIMER_DONE_TITLE: &str = "⏰ FocusFlow";
/// Body shown when a countdown finishes
pub const TIMER_DONE_BODY: &str = "Time's up";

/// Delivers a user-visible notification
pub trait Notifier {
    fn notify(&self, title: &str, body: &str);
}

/// Plays a short completion cue
pub trait AudioCue {
    fn play(&self);
}

/// Native desktop notifications (macOS via osascript, Linux via notify-send)
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) {
        #[cfg(target_os = "macos")]
        {
            let script = format!(
                r#"display notification "{}" with title "{}""#,
                body.replace('"', "\\\""),
                title.replace('"', "\\\"")
            );

            let _ = Command::new("osascript").arg("-e").arg(&script).output();
        }

        #[cfg(target_os = "linux")]
        {
            let _ = Command::new("notify-send").arg(title).arg(body).output();
        }

        #[cfg(not(any(target_os = "macos", target_os = "linux")))]
        {
            // No-op on other platforms
            let _ = (title, body);
        }
    }
}

pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _title: &str, _body: &str) {}
}

/// Rings the terminal bell
pub struct TerminalBell;

impl AudioCue for TerminalBell {
    fn play(&self) {
        let mut stdout = std::io::stdout();
        let _ = stdout.write_all(b"\x07");
        let _ = stdout.flush();
    }
}

pub struct SilentCue;

impl AudioCue for SilentCue {
    fn play(&self) {}
}
