mod engine;
mod mode;
mod session;

pub use engine::TimerEngine;
pub use mode::{Durations, TimerMode};
pub use session::Session;
