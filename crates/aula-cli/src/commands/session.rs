use clap::Subcommand;

#[derive(Subcommand)]
pub enum SessionAction {
    /// Print the combined pairing and timer state as JSON
    Status,
    /// Reset both machines and drop the persisted records
    Reset,
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = super::open_session(None)?;
    match action {
        SessionAction::Status => {
            let snapshot = session.snapshot();
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        SessionAction::Reset => {
            let event = session.reset_session()?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
    }
    Ok(())
}
