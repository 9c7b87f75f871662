use aula_core::format_mm_ss;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start or resume the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Reset to the full duration
    Reset,
    /// Advance the countdown by simulated seconds
    Tick {
        /// Number of one-second ticks to apply
        #[arg(long, default_value = "1")]
        seconds: u32,
    },
    /// Print current timer state as JSON
    Status,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = super::open_session(None)?;
    match action {
        TimerAction::Start => {
            if let Some(event) = session.start_timer()? {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
        TimerAction::Pause => {
            if let Some(event) = session.pause_timer()? {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
        TimerAction::Reset => {
            let event = session.reset_timer()?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        TimerAction::Tick { seconds } => {
            for _ in 0..seconds {
                if let Some(event) = session.tick()? {
                    println!("{}", serde_json::to_string_pretty(&event)?);
                }
            }
        }
        TimerAction::Status => {}
    }

    let timer = session.timer();
    let status = serde_json::json!({
        "state": timer.state(),
        "remaining_seconds": timer.remaining_seconds(),
        "duration_seconds": timer.duration_seconds(),
        "display": format_mm_ss(timer.remaining_seconds()),
    });
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}
