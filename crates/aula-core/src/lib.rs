//! # Aula Core Library
//!
//! Core logic for a classroom activity session: a random group-pairing
//! picker and a fixed-duration countdown timer, composed behind a session
//! controller. The library is CLI-first - every operation is available
//! programmatically, and any GUI is a thin layer over the same core.
//!
//! ## Architecture
//!
//! - [`PairingPicker`]: assigns unique group numbers to sectors, with a
//!   wrap-around policy when the pool runs out
//! - [`CountdownTimer`]: a caller-ticked start/pause/reset countdown
//! - [`SessionController`]: composes both and persists their snapshots
//!   through a [`StateStore`]
//! - **Storage**: SQLite key-value store for state, TOML for configuration
//!
//! Both state machines are synchronous and thread-free; randomness and
//! storage are injected ports, so everything is testable without wall-clock
//! time or a real filesystem.

pub mod error;
pub mod events;
pub mod picker;
pub mod rng;
pub mod session;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, StorageError};
pub use events::Event;
pub use picker::{PairingPicker, PairingSnapshot, SpinOutcome};
pub use rng::{RandomSource, SeededRandom, ThreadRandom};
pub use session::{SessionController, SessionSnapshot, PAIRING_STATE_KEY, TIMER_STATE_KEY};
pub use storage::{Config, Database, MemoryStore, SessionConfig, StateStore};
pub use timer::{format_mm_ss, CountdownTimer, TimerSnapshot, TimerState};
