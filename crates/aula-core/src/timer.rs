//! Countdown timer state machine.
//!
//! The timer has no internal thread - the caller drives it by invoking
//! `tick()` once per elapsed second. Outside `Running` a tick is a no-op,
//! which makes cancellation part of the transition itself: no stale tick can
//! land after a `pause()` or `reset()`.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Paused -> Running -> ... -> Expired -> (reset) -> Idle
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    /// Countdown reached zero; only `reset()` leaves this state.
    Expired,
}

/// Persisted timer state. `running` is informational: a restore always lands
/// in a stopped state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub remaining_seconds: u32,
    pub running: bool,
}

/// Fixed-duration countdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownTimer {
    duration_seconds: u32,
    remaining_seconds: u32,
    state: TimerState,
}

impl CountdownTimer {
    pub fn new(duration_seconds: u32) -> Self {
        Self {
            duration_seconds,
            remaining_seconds: duration_seconds,
            state: TimerState::Idle,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin or resume the countdown. Silent no-op while already running or
    /// after expiry, mirroring a disabled start button.
    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Idle | TimerState::Paused if self.remaining_seconds > 0 => {
                self.state = TimerState::Running;
                Some(Event::StateChanged { at: Utc::now() })
            }
            _ => None,
        }
    }

    /// Freeze the countdown. No-op unless running.
    pub fn pause(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running => {
                self.state = TimerState::Paused;
                Some(Event::StateChanged { at: Utc::now() })
            }
            _ => None,
        }
    }

    /// Return to a full idle countdown from any state.
    pub fn reset(&mut self) -> Event {
        self.state = TimerState::Idle;
        self.remaining_seconds = self.duration_seconds;
        Event::StateChanged { at: Utc::now() }
    }

    /// Advance by one second. Only acts while running; emits `Expired`
    /// instead of a tick when the countdown reaches zero.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.state = TimerState::Expired;
            Some(Event::Expired { at: Utc::now() })
        } else {
            Some(Event::Tick {
                remaining_seconds: self.remaining_seconds,
                at: Utc::now(),
            })
        }
    }

    // ── Persistence ──────────────────────────────────────────────────

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            remaining_seconds: self.remaining_seconds,
            running: self.state == TimerState::Running,
        }
    }

    /// Replace state with a validated snapshot.
    ///
    /// `running` is discarded: a reloaded timer never resumes on its own.
    /// Remaining time of zero lands in `Expired`, a full countdown in
    /// `Idle`, anything between in `Paused`.
    pub fn restore(&mut self, snapshot: TimerSnapshot) -> Result<()> {
        if snapshot.remaining_seconds > self.duration_seconds {
            return Err(CoreError::CorruptPersistedState(format!(
                "remaining {}s exceeds duration {}s",
                snapshot.remaining_seconds, self.duration_seconds
            )));
        }
        self.remaining_seconds = snapshot.remaining_seconds;
        self.state = if snapshot.remaining_seconds == 0 {
            TimerState::Expired
        } else if snapshot.remaining_seconds == self.duration_seconds {
            TimerState::Idle
        } else {
            TimerState::Paused
        };
        Ok(())
    }
}

/// Format seconds as zero-padded `MM:SS`.
pub fn format_mm_ss(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_pause_resume() {
        let mut timer = CountdownTimer::new(300);
        assert_eq!(timer.state(), TimerState::Idle);

        assert!(timer.start().is_some());
        assert_eq!(timer.state(), TimerState::Running);

        assert!(timer.pause().is_some());
        assert_eq!(timer.state(), TimerState::Paused);

        assert!(timer.start().is_some());
        assert_eq!(timer.state(), TimerState::Running);
    }

    #[test]
    fn start_is_idempotent() {
        let mut timer = CountdownTimer::new(300);
        timer.start();
        assert!(timer.start().is_none());
        assert_eq!(timer.state(), TimerState::Running);
        assert_eq!(timer.remaining_seconds(), 300);
    }

    #[test]
    fn pause_outside_running_is_noop() {
        let mut timer = CountdownTimer::new(300);
        assert!(timer.pause().is_none());
        assert_eq!(timer.state(), TimerState::Idle);
    }

    #[test]
    fn tick_outside_running_is_noop() {
        let mut timer = CountdownTimer::new(300);
        assert!(timer.tick().is_none());
        timer.start();
        timer.pause();
        assert!(timer.tick().is_none());
        assert_eq!(timer.remaining_seconds(), 300);
    }

    #[test]
    fn full_rundown_expires_exactly_once() {
        let mut timer = CountdownTimer::new(300);
        timer.start();
        let mut expired = 0;
        let mut ticks = 0;
        for _ in 0..300 {
            match timer.tick() {
                Some(Event::Tick { .. }) => ticks += 1,
                Some(Event::Expired { .. }) => expired += 1,
                other => panic!("unexpected tick result: {other:?}"),
            }
        }
        assert_eq!(ticks, 299);
        assert_eq!(expired, 1);
        assert_eq!(timer.state(), TimerState::Expired);
        assert_eq!(timer.remaining_seconds(), 0);
        // Expired is terminal: no more ticks, start is a no-op.
        assert!(timer.tick().is_none());
        assert!(timer.start().is_none());
    }

    #[test]
    fn resume_continues_from_paused_remaining() {
        let mut timer = CountdownTimer::new(300);
        timer.start();
        for _ in 0..100 {
            timer.tick();
        }
        timer.pause();
        assert_eq!(timer.remaining_seconds(), 200);

        timer.start();
        timer.tick();
        assert_eq!(timer.remaining_seconds(), 199);
    }

    #[test]
    fn reset_from_any_state_yields_full_idle() {
        let mut timer = CountdownTimer::new(300);
        timer.start();
        for _ in 0..300 {
            timer.tick();
        }
        assert_eq!(timer.state(), TimerState::Expired);

        timer.reset();
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining_seconds(), 300);

        timer.start();
        timer.tick();
        timer.reset();
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining_seconds(), 300);
    }

    #[test]
    fn restore_forces_stopped_state() {
        let mut timer = CountdownTimer::new(300);
        timer.restore(TimerSnapshot {
            remaining_seconds: 200,
            running: true,
        })
        .unwrap();
        assert_eq!(timer.state(), TimerState::Paused);
        assert_eq!(timer.remaining_seconds(), 200);
        // Paused means start() resumes from 200, not 300.
        timer.start();
        timer.tick();
        assert_eq!(timer.remaining_seconds(), 199);
    }

    #[test]
    fn restore_maps_boundary_values_to_states() {
        let mut timer = CountdownTimer::new(300);
        timer.restore(TimerSnapshot {
            remaining_seconds: 300,
            running: true,
        })
        .unwrap();
        assert_eq!(timer.state(), TimerState::Idle);

        timer.restore(TimerSnapshot {
            remaining_seconds: 0,
            running: false,
        })
        .unwrap();
        assert_eq!(timer.state(), TimerState::Expired);
        assert!(timer.start().is_none());
    }

    #[test]
    fn restore_rejects_remaining_beyond_duration() {
        let mut timer = CountdownTimer::new(300);
        let err = timer
            .restore(TimerSnapshot {
                remaining_seconds: 301,
                running: false,
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::CorruptPersistedState(_)));
        assert_eq!(timer.remaining_seconds(), 300);
        assert_eq!(timer.state(), TimerState::Idle);
    }

    #[test]
    fn snapshot_round_trip() {
        let mut timer = CountdownTimer::new(300);
        timer.start();
        for _ in 0..42 {
            timer.tick();
        }
        let snapshot = timer.snapshot();
        assert!(snapshot.running);
        assert_eq!(snapshot.remaining_seconds, 258);

        let mut restored = CountdownTimer::new(300);
        restored.restore(snapshot).unwrap();
        assert_eq!(restored.remaining_seconds(), 258);
        assert!(!restored.is_running());
    }

    #[test]
    fn formats_mm_ss() {
        assert_eq!(format_mm_ss(300), "05:00");
        assert_eq!(format_mm_ss(0), "00:00");
        assert_eq!(format_mm_ss(61), "01:01");
        assert_eq!(format_mm_ss(599), "09:59");
    }
}
