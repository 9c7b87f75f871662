use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every state change in the system produces an Event.
/// Commands return the events they raised; the presentation layer (CLI, GUI)
/// decides how to deliver them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A sector received a group number.
    SectorAssigned {
        sector_id: usize,
        group_id: u32,
        at: DateTime<Utc>,
    },
    /// Every sector holds an assignment. Fired once per completed pairing;
    /// not fired again until a sector has been cleared and refilled.
    PairingComplete {
        assignments: Vec<u32>,
        at: DateTime<Utc>,
    },
    /// One second elapsed on a running countdown.
    Tick {
        remaining_seconds: u32,
        at: DateTime<Utc>,
    },
    /// The countdown reached zero. Terminal until reset.
    Expired { at: DateTime<Utc> },
    /// Generic state mutation with no more specific event.
    StateChanged { at: DateTime<Utc> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let event = Event::SectorAssigned {
            sector_id: 0,
            group_id: 7,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "SectorAssigned");
        assert_eq!(json["group_id"], 7);
    }
}
