//! Timer engine implementation.
//!
//! The timer engine is a tick-driven state machine. It does not use internal
//! threads and never reads the wall clock for countdown progress -- the
//! caller is responsible for calling `tick()` once per elapsed second while
//! the timer is running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle <-> Running, crossed with mode in {Work, ShortBreak, LongBreak}
//! ```
//!
//! When a running countdown exhausts, the completion protocol runs
//! synchronously on that same tick: the session is logged, counters update,
//! the next mode is selected and loaded, and the engine returns to Idle.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new();
//! engine.start();
//! // Once per second:
//! engine.tick(); // Returns Some(Event::SessionCompleted) when done
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::mode::{Durations, TimerMode};
use super::session::Session;
use crate::events::Event;

/// How many sessions the snapshot read model exposes.
const RECENT_SESSIONS: usize = 5;

/// Work completions between long breaks.
const WORK_SESSIONS_PER_CYCLE: u32 = 4;

/// Core timer engine.
///
/// Owns the live timer state and the append-only session log. All mutation
/// goes through the command methods; callers read state through the query
/// methods or [`TimerEngine::snapshot`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "PersistedEngine")]
pub struct TimerEngine {
    durations: Durations,
    mode: TimerMode,
    /// Seconds left in the current countdown.
    /// Invariant: `0 <= remaining_secs <= durations.for_mode(mode)`.
    remaining_secs: u32,
    running: bool,
    completed_today: u32,
    /// In-process log only. The database is the durable session log;
    /// persisting the log here would duplicate it without bound.
    #[serde(skip)]
    sessions: Vec<Session>,
}

/// Serialized form of the engine.
///
/// Restoring goes through [`From`], which clamps the countdown so a stale
/// or hand-edited blob cannot violate the remaining-time bound.
#[derive(Deserialize)]
struct PersistedEngine {
    durations: Durations,
    mode: TimerMode,
    remaining_secs: u32,
    running: bool,
    completed_today: u32,
}

impl From<PersistedEngine> for TimerEngine {
    fn from(p: PersistedEngine) -> Self {
        let cap = p.durations.for_mode(p.mode);
        Self {
            durations: p.durations,
            mode: p.mode,
            remaining_secs: p.remaining_secs.min(cap),
            running: p.running,
            completed_today: p.completed_today,
            sessions: Vec::new(),
        }
    }
}

impl TimerEngine {
    /// Create an engine with the default Pomodoro durations, idle in Work
    /// mode with a full countdown.
    pub fn new() -> Self {
        Self::with_durations(Durations::default())
    }

    /// Create an engine with configured durations.
    pub fn with_durations(durations: Durations) -> Self {
        Self {
            durations,
            mode: TimerMode::Work,
            remaining_secs: durations.for_mode(TimerMode::Work),
            running: false,
            completed_today: 0,
            sessions: Vec::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn completed_today(&self) -> u32 {
        self.completed_today
    }

    /// Append-only log of completed sessions, oldest first.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Full duration of the current mode in seconds.
    pub fn duration_secs(&self) -> u32 {
        self.durations.for_mode(self.mode)
    }

    /// 0.0 .. 1.0 progress within the current countdown.
    pub fn progress(&self) -> f64 {
        let total = self.duration_secs();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / total as f64)
    }

    /// Remaining time as `mm:ss`.
    pub fn remaining_formatted(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_secs / 60,
            self.remaining_secs % 60
        )
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            remaining_formatted: self.remaining_formatted(),
            progress_pct: self.progress() * 100.0,
            running: self.running,
            sessions_today: self.completed_today,
            recent_sessions: self
                .sessions
                .iter()
                .rev()
                .take(RECENT_SESSIONS)
                .cloned()
                .collect(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start (or resume) the countdown. Idempotent while running.
    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        self.running = true;
        Some(Event::TimerStarted {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Freeze the countdown at the current remaining time.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop and restore the full duration of the current mode.
    /// Mode and counters are untouched.
    pub fn reset(&mut self) -> Option<Event> {
        self.running = false;
        self.remaining_secs = self.duration_secs();
        Some(Event::TimerReset {
            mode: self.mode,
            at: Utc::now(),
        })
    }

    /// Replace the durations table.
    ///
    /// A countdown idle at its full duration snaps to the new full
    /// duration; otherwise the remaining time is kept, clamped to the new
    /// bound for the active mode. Called on every engine restore so config
    /// duration changes reach engines persisted before the change.
    pub fn set_durations(&mut self, durations: Durations) {
        let at_full = !self.running && self.remaining_secs == self.duration_secs();
        self.durations = durations;
        let cap = self.duration_secs();
        if at_full || self.remaining_secs > cap {
            self.remaining_secs = cap;
        }
    }

    /// Switch to `mode` with a full, stopped countdown.
    ///
    /// Switching to the mode already active is an explicit reset-to-mode,
    /// not a no-op. The engine accepts this command in any state; the
    /// control surface is expected to withhold it while running.
    pub fn switch_mode(&mut self, mode: TimerMode) -> Option<Event> {
        self.mode = mode;
        self.remaining_secs = self.durations.for_mode(mode);
        self.running = false;
        Some(Event::ModeSwitched {
            mode,
            duration_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Advance the countdown by one second.
    ///
    /// Called once per elapsed second by the clock driver. A tick while
    /// paused is ignored, so a misbehaving driver cannot corrupt state.
    /// The tick that exhausts the countdown runs the completion protocol
    /// synchronously and returns `Some(Event::SessionCompleted)`.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        if self.remaining_secs > 1 {
            self.remaining_secs -= 1;
            return None;
        }
        Some(self.complete())
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Completion protocol: log the session, stop, bump the work counter,
    /// load the next mode at full duration.
    fn complete(&mut self) -> Event {
        let completed = self.mode;
        let duration_secs = self.durations.for_mode(completed);
        self.sessions.push(Session {
            id: Uuid::new_v4(),
            mode: completed,
            duration_secs,
            completed_at: Utc::now(),
        });
        self.running = false;
        if completed.is_work() {
            self.completed_today += 1;
        }
        let next = self.next_mode(completed);
        self.mode = next;
        self.remaining_secs = self.durations.for_mode(next);
        Event::SessionCompleted {
            completed,
            next,
            duration_secs,
            sessions_today: self.completed_today,
            at: Utc::now(),
        }
    }

    /// Every 4th completed work session (post-increment count) earns a long
    /// break; breaks always lead back to work.
    fn next_mode(&self, completed: TimerMode) -> TimerMode {
        match completed {
            TimerMode::Work => {
                if self.completed_today % WORK_SESSIONS_PER_CYCLE == 0 {
                    TimerMode::LongBreak
                } else {
                    TimerMode::ShortBreak
                }
            }
            TimerMode::ShortBreak | TimerMode::LongBreak => TimerMode::Work,
        }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}
