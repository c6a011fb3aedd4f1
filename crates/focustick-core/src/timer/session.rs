use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::mode::TimerMode;

/// A completed countdown.
///
/// Appended to the engine's log exactly once, when a running countdown
/// reaches zero. Never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub mode: TimerMode,
    pub duration_secs: u32,
    pub completed_at: DateTime<Utc>,
}
