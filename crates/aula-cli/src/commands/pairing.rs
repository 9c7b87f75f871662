use clap::Subcommand;

#[derive(Subcommand)]
pub enum PairingAction {
    /// Draw a random unused group number into a sector
    Spin {
        /// Sector number, starting at 1
        sector: usize,
        /// Seed for reproducible draws
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Release a sector's number and redraw
    Replace {
        /// Sector number, starting at 1
        sector: usize,
        /// Seed for reproducible draws
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Clear all sectors and the used pool
    Reset,
    /// Print current pairing state as JSON
    Status,
}

fn sector_id(sector: usize) -> Result<usize, Box<dyn std::error::Error>> {
    sector
        .checked_sub(1)
        .ok_or_else(|| "sector numbers start at 1".into())
}

pub fn run(action: PairingAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PairingAction::Spin { sector, seed } => {
            let mut session = super::open_session(seed)?;
            let outcome = session.spin(sector_id(sector)?)?;
            for event in &outcome.events {
                println!("{}", serde_json::to_string_pretty(event)?);
            }
        }
        PairingAction::Replace { sector, seed } => {
            let mut session = super::open_session(seed)?;
            let outcome = session.replace(sector_id(sector)?)?;
            for event in &outcome.events {
                println!("{}", serde_json::to_string_pretty(event)?);
            }
        }
        PairingAction::Reset => {
            let mut session = super::open_session(None)?;
            let event = session.reset_pairing()?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        PairingAction::Status => {
            let session = super::open_session(None)?;
            let snapshot = session.snapshot();
            let status = serde_json::json!({
                "sector_assignments": snapshot.pairing.sector_assignments,
                "used": snapshot.pairing.used,
                "available": session.picker().available(),
                "complete": snapshot.pairing_complete,
            });
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }
    Ok(())
}
