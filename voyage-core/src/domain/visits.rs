use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{Bound, DateRange, Mmsi, hours_between};

/// A slow ping inside the search area of a port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMatch {
    pub mmsi: Mmsi,
    pub timestamp: DateTime<Utc>,
    pub port_name: String,
}

/// One contiguous stay of a vessel at a port, bounded by its first and last matching ping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Visit {
    pub mmsi: Mmsi,
    pub port_name: String,
    pub entry_time: DateTime<Utc>,
    pub exit_time: DateTime<Utc>,
    pub duration_hours: f64,
}

impl Visit {
    pub fn new(
        mmsi: Mmsi,
        port_name: impl Into<String>,
        entry_time: DateTime<Utc>,
        exit_time: DateTime<Utc>,
    ) -> Self {
        Self {
            mmsi,
            port_name: port_name.into(),
            entry_time,
            exit_time,
            duration_hours: hours_between(entry_time, exit_time),
        }
    }

    /// Whether `timestamp` lies within the visit, both ends inclusive.
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        DateRange::from_parts(
            self.entry_time,
            self.exit_time,
            Bound::Inclusive,
            Bound::Inclusive,
        )
        .contains(timestamp)
    }
}

/// Two consecutive visits of a vessel where the second starts before the first ends.
/// No voyage is produced for such a pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitOverlap {
    pub mmsi: Mmsi,
    pub departure_port: String,
    pub departure_exit_time: DateTime<Utc>,
    pub arrival_port: String,
    pub arrival_entry_time: DateTime<Utc>,
}

impl VisitOverlap {
    pub fn new(departure: &Visit, arrival: &Visit) -> Self {
        Self {
            mmsi: departure.mmsi,
            departure_port: departure.port_name.clone(),
            departure_exit_time: departure.exit_time,
            arrival_port: arrival.port_name.clone(),
            arrival_entry_time: arrival.entry_time,
        }
    }
}
