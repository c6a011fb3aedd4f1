use std::io::Write;

use clap::{Subcommand, ValueEnum};
use focustick_core::storage::Database;
use focustick_core::{ClockDriver, Config, Event, Notifier, TimerEngine, TimerMode};

use crate::notify::TerminalNotifier;

const ENGINE_KEY: &str = "timer_engine";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start or resume the countdown
    Start,
    /// Pause the countdown, keeping the remaining time
    Pause,
    /// Restore the current mode to its full duration
    Reset,
    /// Switch mode (refused while the timer is running)
    Switch {
        #[arg(value_enum)]
        mode: ModeArg,
    },
    /// Print current timer state as JSON
    Status,
    /// Advance the countdown by N seconds (for scripting)
    Tick {
        #[arg(long, default_value = "1")]
        count: u32,
    },
    /// Run the countdown in the foreground until the session completes
    Run,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Work,
    ShortBreak,
    LongBreak,
}

impl From<ModeArg> for TimerMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Work => TimerMode::Work,
            ModeArg::ShortBreak => TimerMode::ShortBreak,
            ModeArg::LongBreak => TimerMode::LongBreak,
        }
    }
}

fn load_engine(db: &Database, config: &Config) -> TimerEngine {
    if let Ok(Some(json)) = db.kv_get(ENGINE_KEY) {
        if let Ok(mut engine) = serde_json::from_str::<TimerEngine>(&json) {
            // Duration changes made after the engine was persisted still
            // apply.
            engine.set_durations(config.timer_durations());
            return engine;
        }
    }
    TimerEngine::with_durations(config.timer_durations())
}

fn save_engine(db: &Database, engine: &TimerEngine) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(engine)?;
    db.kv_set(ENGINE_KEY, &json)?;
    Ok(())
}

/// Persist the session behind a completion event and surface the alert.
fn handle_completion(
    db: &Database,
    engine: &TimerEngine,
    event: &Event,
    notifier: &TerminalNotifier,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(session) = engine.sessions().last() {
        db.record_session(session)?;
    }
    if let Event::SessionCompleted {
        completed, next, ..
    } = event
    {
        notifier.notify(*completed, *next);
    }
    Ok(())
}

fn print_event(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load_or_default();
    let notifier = TerminalNotifier::new(config.notifications.enabled);
    let mut engine = load_engine(&db, &config);

    match action {
        TimerAction::Start => {
            // Best-effort; a refusal never blocks the timer.
            notifier.request_permission();
            match engine.start() {
                Some(event) => print_event(&event)?,
                None => print_event(&engine.snapshot())?,
            }
        }
        TimerAction::Pause => match engine.pause() {
            Some(event) => print_event(&event)?,
            None => print_event(&engine.snapshot())?,
        },
        TimerAction::Reset => {
            if let Some(event) = engine.reset() {
                print_event(&event)?;
            }
        }
        TimerAction::Switch { mode } => {
            // Mode switching is withheld while running; the engine itself
            // would accept it.
            if engine.is_running() {
                eprintln!("cannot switch modes while the timer is running");
                std::process::exit(1);
            }
            if let Some(event) = engine.switch_mode(mode.into()) {
                print_event(&event)?;
            }
        }
        TimerAction::Status => {
            print_event(&engine.snapshot())?;
        }
        TimerAction::Tick { count } => {
            for _ in 0..count {
                if let Some(event) = engine.tick() {
                    handle_completion(&db, &engine, &event, &notifier)?;
                    print_event(&event)?;
                }
            }
            print_event(&engine.snapshot())?;
        }
        TimerAction::Run => {
            notifier.request_permission();
            if let Some(event) = engine.start() {
                print_event(&event)?;
            }
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            let completed = rt.block_on(async {
                ClockDriver::new()
                    .run(&mut engine, |e| {
                        eprint!("\r{} {}  ", e.mode().label(), e.remaining_formatted());
                        let _ = std::io::stderr().flush();
                    })
                    .await
            });
            eprintln!();
            if let Some(event) = completed {
                handle_completion(&db, &engine, &event, &notifier)?;
                print_event(&event)?;
            }
        }
    }

    save_engine(&db, &engine)?;
    Ok(())
}
