use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    Work,
    ShortBreak,
    LongBreak,
}

impl TimerMode {
    /// Display label for the mode.
    pub fn label(&self) -> &'static str {
        match self {
            TimerMode::Work => "Focus Time",
            TimerMode::ShortBreak => "Short Break",
            TimerMode::LongBreak => "Long Break",
        }
    }

    /// Stable identifier used in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerMode::Work => "work",
            TimerMode::ShortBreak => "short_break",
            TimerMode::LongBreak => "long_break",
        }
    }

    pub fn is_work(&self) -> bool {
        matches!(self, TimerMode::Work)
    }
}

/// Per-mode countdown durations in seconds.
///
/// These are configuration constants, not derived values. The defaults are
/// the classic Pomodoro cadence: 25 minute focus, 5 minute short break,
/// 15 minute long break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durations {
    pub work: u32,
    pub short_break: u32,
    pub long_break: u32,
}

impl Durations {
    pub fn for_mode(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Work => self.work,
            TimerMode::ShortBreak => self.short_break,
            TimerMode::LongBreak => self.long_break,
        }
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            work: 25 * 60,
            short_break: 5 * 60,
            long_break: 15 * 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_durations() {
        let d = Durations::default();
        assert_eq!(d.for_mode(TimerMode::Work), 1500);
        assert_eq!(d.for_mode(TimerMode::ShortBreak), 300);
        assert_eq!(d.for_mode(TimerMode::LongBreak), 900);
    }

    #[test]
    fn mode_serde_tags() {
        assert_eq!(
            serde_json::to_string(&TimerMode::ShortBreak).unwrap(),
            "\"short_break\""
        );
        assert_eq!(TimerMode::LongBreak.as_str(), "long_break");
    }
}
