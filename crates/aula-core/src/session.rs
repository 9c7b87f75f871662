//! Session façade composing the pairing picker and the countdown timer.
//!
//! The controller forwards operations to the two state machines, persists
//! the affected snapshot through the [`StateStore`] port on every mutation,
//! and returns raised events unchanged. Missing or corrupt persisted records
//! are replaced by fresh defaults at load time, never propagated as a crash.

use chrono::Utc;
use serde::Serialize;

use crate::error::Result;
use crate::events::Event;
use crate::picker::{PairingPicker, PairingSnapshot, SpinOutcome};
use crate::rng::RandomSource;
use crate::storage::{SessionConfig, StateStore};
use crate::timer::{CountdownTimer, TimerSnapshot, TimerState};

/// Storage key for the picker snapshot.
pub const PAIRING_STATE_KEY: &str = "pairing-state";
/// Storage key for the timer snapshot.
pub const TIMER_STATE_KEY: &str = "timer-state";

/// Combined observational state, for status output.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub pairing: PairingSnapshot,
    pub pairing_complete: bool,
    pub timer: TimerSnapshot,
    pub timer_state: TimerState,
}

/// App-level API consumed by the presentation layer.
pub struct SessionController {
    picker: PairingPicker,
    timer: CountdownTimer,
    rng: Box<dyn RandomSource>,
    store: Box<dyn StateStore>,
}

impl SessionController {
    /// Build a session from configuration, restoring any persisted state.
    ///
    /// Records that are missing, unparsable, or fail invariant validation
    /// leave the corresponding machine at its fresh default.
    pub fn new(
        config: &SessionConfig,
        rng: Box<dyn RandomSource>,
        store: Box<dyn StateStore>,
    ) -> Result<Self> {
        let mut picker = PairingPicker::new(config.group_count, config.sector_count);
        let mut timer = CountdownTimer::new(config.duration_seconds);

        if let Some(json) = store.get(PAIRING_STATE_KEY)? {
            if let Ok(snapshot) = serde_json::from_str::<PairingSnapshot>(&json) {
                // Validation failure keeps the fresh default.
                let _ = picker.restore(snapshot);
            }
        }
        if let Some(json) = store.get(TIMER_STATE_KEY)? {
            if let Ok(snapshot) = serde_json::from_str::<TimerSnapshot>(&json) {
                let _ = timer.restore(snapshot);
            }
        }

        Ok(Self {
            picker,
            timer,
            rng,
            store,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn picker(&self) -> &PairingPicker {
        &self.picker
    }

    pub fn timer(&self) -> &CountdownTimer {
        &self.timer
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            pairing: self.picker.snapshot(),
            pairing_complete: self.picker.is_complete(),
            timer: self.timer.snapshot(),
            timer_state: self.timer.state(),
        }
    }

    // ── Pairing commands ─────────────────────────────────────────────

    pub fn spin(&mut self, sector_id: usize) -> Result<SpinOutcome> {
        let outcome = self.picker.spin(sector_id, self.rng.as_mut())?;
        self.persist_pairing()?;
        Ok(outcome)
    }

    pub fn replace(&mut self, sector_id: usize) -> Result<SpinOutcome> {
        let outcome = self.picker.replace(sector_id, self.rng.as_mut())?;
        self.persist_pairing()?;
        Ok(outcome)
    }

    pub fn reset_pairing(&mut self) -> Result<Event> {
        let event = self.picker.reset();
        self.persist_pairing()?;
        Ok(event)
    }

    // ── Timer commands ───────────────────────────────────────────────

    pub fn start_timer(&mut self) -> Result<Option<Event>> {
        let event = self.timer.start();
        if event.is_some() {
            self.persist_timer()?;
        }
        Ok(event)
    }

    pub fn pause_timer(&mut self) -> Result<Option<Event>> {
        let event = self.timer.pause();
        if event.is_some() {
            self.persist_timer()?;
        }
        Ok(event)
    }

    pub fn reset_timer(&mut self) -> Result<Event> {
        let event = self.timer.reset();
        self.persist_timer()?;
        Ok(event)
    }

    /// Advance the countdown by one second. No-op outside `Running`.
    pub fn tick(&mut self) -> Result<Option<Event>> {
        let event = self.timer.tick();
        if event.is_some() {
            self.persist_timer()?;
        }
        Ok(event)
    }

    // ── Session commands ─────────────────────────────────────────────

    /// Reset both machines and drop the persisted records.
    pub fn reset_session(&mut self) -> Result<Event> {
        self.picker.reset();
        self.timer.reset();
        self.store.delete(PAIRING_STATE_KEY)?;
        self.store.delete(TIMER_STATE_KEY)?;
        Ok(Event::StateChanged { at: Utc::now() })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn persist_pairing(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.picker.snapshot())?;
        self.store.set(PAIRING_STATE_KEY, &json)
    }

    fn persist_timer(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.timer.snapshot())?;
        self.store.set(TIMER_STATE_KEY, &json)
    }
}
