//! Terminal notification emitter.
//!
//! Best-effort: writes a bell and a completion line to stderr. A terminal
//! that swallows the bell is tolerated silently.

use std::io::Write;

use focustick_core::{Notifier, TimerMode};

pub struct TerminalNotifier {
    enabled: bool,
}

impl TerminalNotifier {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Notifier for TerminalNotifier {
    fn request_permission(&self) -> bool {
        self.enabled
    }

    fn notify(&self, completed: TimerMode, next: TimerMode) {
        if !self.enabled {
            return;
        }
        let body = if completed.is_work() {
            "Time for a break!"
        } else {
            "Ready to focus again?"
        };
        let mut err = std::io::stderr();
        let _ = writeln!(
            err,
            "\x07{} completed! {} (next: {})",
            completed.label(),
            body,
            next.label()
        );
    }
}
