use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Session, TimerMode};

/// Every state change in the engine produces an Event.
///
/// The CLI prints them as JSON; the notification emitter reacts to
/// `SessionCompleted`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        mode: TimerMode,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: TimerMode,
        at: DateTime<Utc>,
    },
    ModeSwitched {
        mode: TimerMode,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    /// A countdown reached zero. Carries the just-finished mode and the
    /// mode the engine moved to.
    SessionCompleted {
        completed: TimerMode,
        next: TimerMode,
        duration_secs: u32,
        sessions_today: u32,
        at: DateTime<Utc>,
    },
    /// Full read model for UI rendering.
    StateSnapshot {
        mode: TimerMode,
        remaining_secs: u32,
        remaining_formatted: String,
        progress_pct: f64,
        running: bool,
        sessions_today: u32,
        /// Most-recent-first, capped at the last 5 completions.
        recent_sessions: Vec<Session>,
        at: DateTime<Utc>,
    },
}
