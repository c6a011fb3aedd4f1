//! # Focustick Core Library
//!
//! This library provides the core business logic for the Focustick Pomodoro
//! timer. All operations are available via a standalone CLI binary; any GUI
//! is expected to be a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A tick-driven state machine. The engine never owns a
//!   clock -- a clock driver invokes `tick()` once per elapsed second while
//!   the timer is running.
//! - **Storage**: SQLite-based session storage and TOML-based configuration
//! - **Events**: Every state change produces an [`Event`] for consumers to
//!   render or react to
//! - **Notifications**: An injectable, best-effort [`Notifier`] capability
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`ClockDriver`]: Once-per-second driver for a running engine
//! - [`Database`]: Session and statistics persistence
//! - [`Config`]: Application configuration management

pub mod clock;
pub mod error;
pub mod events;
pub mod notify;
pub mod storage;
pub mod timer;

pub use clock::ClockDriver;
pub use error::{ConfigError, CoreError, DatabaseError, Result};
pub use events::Event;
pub use notify::{Notifier, NullNotifier};
pub use storage::{Config, Database, SessionRecord, Stats};
pub use timer::{Durations, Session, TimerEngine, TimerMode};
