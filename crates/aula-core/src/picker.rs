//! Pairing picker: assigns unique group numbers to a fixed set of sectors.
//!
//! The picker is a synchronous state machine. It owns no randomness; a
//! [`RandomSource`] is passed into the drawing commands so selection is
//! testable and reproducible.
//!
//! ## Pool semantics
//!
//! Group numbers live in `1..=group_count`. A drawn number moves to the
//! `used` set and stays there until `replace` releases it or the pool wraps
//! around. When a draw finds the pool empty, the picker resets the pool and
//! clears every sector before drawing from the full range again - it never
//! deadlocks, at the cost of forgetting the prior pairing.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::rng::RandomSource;

/// Persisted picker state.
///
/// `used` keeps draw order; `sector_assignments` is indexed by sector id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingSnapshot {
    pub used: Vec<u32>,
    pub sector_assignments: Vec<Option<u32>>,
}

/// Result of a `spin` or `replace` command.
#[derive(Debug, Clone)]
pub struct SpinOutcome {
    /// The group number assigned to the sector.
    pub group_id: u32,
    /// True when the pool was exhausted and wrapped around before the draw,
    /// clearing every other sector's assignment.
    pub pool_reset: bool,
    /// Events raised by the command, in order.
    pub events: Vec<Event>,
}

/// Assigns unique group numbers to sectors.
#[derive(Debug, Clone)]
pub struct PairingPicker {
    group_count: u32,
    used: Vec<u32>,
    sectors: Vec<Option<u32>>,
    /// Latch so `PairingComplete` fires once per completed-then-modified
    /// cycle. Cleared whenever a sector is emptied.
    complete_announced: bool,
}

impl PairingPicker {
    /// `group_count` and `sector_count` must both be at least 1; a draw from
    /// an empty universe has no defined result.
    pub fn new(group_count: u32, sector_count: usize) -> Self {
        assert!(group_count >= 1, "group_count must be at least 1");
        assert!(sector_count >= 1, "sector_count must be at least 1");
        Self {
            group_count,
            used: Vec::new(),
            sectors: vec![None; sector_count],
            complete_announced: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn group_count(&self) -> u32 {
        self.group_count
    }

    pub fn sector_count(&self) -> usize {
        self.sectors.len()
    }

    pub fn used(&self) -> &[u32] {
        &self.used
    }

    /// Current assignments, indexed by sector id.
    pub fn assignments(&self) -> &[Option<u32>] {
        &self.sectors
    }

    pub fn sector(&self, sector_id: usize) -> Result<Option<u32>> {
        self.check_sector(sector_id)?;
        Ok(self.sectors[sector_id])
    }

    /// True when every sector holds an assignment.
    pub fn is_complete(&self) -> bool {
        self.sectors.iter().all(Option::is_some)
    }

    /// Group numbers still drawable, in ascending order.
    pub fn available(&self) -> Vec<u32> {
        (1..=self.group_count)
            .filter(|g| !self.used.contains(g))
            .collect()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Draw a random available group number into the sector.
    ///
    /// A sector that already holds a number is overwritten; the old number
    /// stays in `used` until the pool wraps around. On an empty pool the
    /// whole pool is reset first (see module docs).
    pub fn spin(&mut self, sector_id: usize, rng: &mut dyn RandomSource) -> Result<SpinOutcome> {
        self.check_sector(sector_id)?;
        if self.sectors[sector_id].take().is_some() {
            self.complete_announced = false;
        }
        Ok(self.draw_into(sector_id, None, rng))
    }

    /// Release the sector's number back to the pool and redraw.
    ///
    /// The released number is excluded from the immediate redraw unless it
    /// is the only available one.
    pub fn replace(&mut self, sector_id: usize, rng: &mut dyn RandomSource) -> Result<SpinOutcome> {
        self.check_sector(sector_id)?;
        let released = self.sectors[sector_id].take().ok_or_else(|| {
            CoreError::InvalidTransition(format!("replace on unassigned sector {sector_id}"))
        })?;
        self.used.retain(|&g| g != released);
        self.complete_announced = false;
        Ok(self.draw_into(sector_id, Some(released), rng))
    }

    /// Clear all sectors and the entire used pool.
    pub fn reset(&mut self) -> Event {
        self.used.clear();
        self.sectors.fill(None);
        self.complete_announced = false;
        Event::StateChanged { at: Utc::now() }
    }

    // ── Persistence ──────────────────────────────────────────────────

    pub fn snapshot(&self) -> PairingSnapshot {
        PairingSnapshot {
            used: self.used.clone(),
            sector_assignments: self.sectors.clone(),
        }
    }

    /// Replace state with a validated snapshot.
    ///
    /// On `CorruptPersistedState` the picker is left unchanged, so callers
    /// can keep the fresh default they started from.
    pub fn restore(&mut self, snapshot: PairingSnapshot) -> Result<()> {
        if snapshot.sector_assignments.len() != self.sectors.len() {
            return Err(CoreError::CorruptPersistedState(format!(
                "expected {} sectors, snapshot has {}",
                self.sectors.len(),
                snapshot.sector_assignments.len()
            )));
        }
        let mut seen = Vec::with_capacity(snapshot.used.len());
        for &g in &snapshot.used {
            if g < 1 || g > self.group_count {
                return Err(CoreError::CorruptPersistedState(format!(
                    "group {g} outside 1..={}",
                    self.group_count
                )));
            }
            if seen.contains(&g) {
                return Err(CoreError::CorruptPersistedState(format!(
                    "duplicate group {g} in used set"
                )));
            }
            seen.push(g);
        }
        let mut assigned = Vec::new();
        for assignment in snapshot.sector_assignments.iter().flatten() {
            if !snapshot.used.contains(assignment) {
                return Err(CoreError::CorruptPersistedState(format!(
                    "assigned group {assignment} missing from used set"
                )));
            }
            if assigned.contains(assignment) {
                return Err(CoreError::CorruptPersistedState(format!(
                    "group {assignment} assigned to two sectors"
                )));
            }
            assigned.push(*assignment);
        }
        self.used = snapshot.used;
        self.sectors = snapshot.sector_assignments;
        // A restored complete pairing was already announced before the save.
        self.complete_announced = self.is_complete();
        Ok(())
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn check_sector(&self, sector_id: usize) -> Result<()> {
        if sector_id >= self.sectors.len() {
            return Err(CoreError::InvalidSectorId {
                sector_id,
                sector_count: self.sectors.len(),
            });
        }
        Ok(())
    }

    fn draw_into(
        &mut self,
        sector_id: usize,
        excluded: Option<u32>,
        rng: &mut dyn RandomSource,
    ) -> SpinOutcome {
        let mut pool_reset = false;
        let mut available = self.available();
        if available.is_empty() {
            self.used.clear();
            self.sectors.fill(None);
            self.complete_announced = false;
            pool_reset = true;
            available = self.available();
        }
        if let Some(released) = excluded {
            // Pool-of-size-1: the released number is the only choice.
            if available.len() > 1 {
                available.retain(|&g| g != released);
            }
        }
        let group_id = available[rng.pick(available.len())];
        self.used.push(group_id);
        self.sectors[sector_id] = Some(group_id);

        let mut events = vec![Event::SectorAssigned {
            sector_id,
            group_id,
            at: Utc::now(),
        }];
        if self.is_complete() && !self.complete_announced {
            self.complete_announced = true;
            events.push(Event::PairingComplete {
                assignments: self.sectors.iter().flatten().copied().collect(),
                at: Utc::now(),
            });
        }
        SpinOutcome {
            group_id,
            pool_reset,
            events,
        }
    }
}
