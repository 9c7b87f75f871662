pub mod config;
pub mod pairing;
pub mod session;
pub mod timer;

use aula_core::{
    Config, Database, RandomSource, SeededRandom, SessionController, ThreadRandom,
};

/// Open the persisted session with the configured parameters.
///
/// `seed` selects the deterministic generator for reproducible draws.
pub fn open_session(seed: Option<u64>) -> Result<SessionController, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    let rng: Box<dyn RandomSource> = match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    };
    Ok(SessionController::new(&config.session, rng, Box::new(db))?)
}
