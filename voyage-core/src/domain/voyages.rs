use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{Mmsi, Ping};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct VoyageId(u64);

impl VoyageId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl Display for VoyageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A ping annotated with where the vessel is, came from and is heading to.
///
/// `current_port` is set when the ping lies within a visit. In that case the
/// remaining labels are always unset, a vessel at port is not en route.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledPing {
    pub ping: Ping,
    pub current_port: Option<String>,
    pub origin_port: Option<String>,
    pub destination_port: Option<String>,
    pub voyage_id: Option<VoyageId>,
}

impl LabeledPing {
    pub fn at_port(ping: Ping, port_name: String) -> Self {
        Self {
            ping,
            current_port: Some(port_name),
            origin_port: None,
            destination_port: None,
            voyage_id: None,
        }
    }

    pub fn at_sea(
        ping: Ping,
        origin_port: Option<String>,
        destination_port: Option<String>,
    ) -> Self {
        Self {
            ping,
            current_port: None,
            origin_port,
            destination_port,
            voyage_id: None,
        }
    }

    pub fn is_at_sea(&self) -> bool {
        self.current_port.is_none()
    }

    pub fn mmsi(&self) -> Mmsi {
        self.ping.mmsi
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.ping.timestamp
    }
}

/// The sea leg between the exit of one visit and the entry of the next, for one vessel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Voyage {
    pub voyage_id: VoyageId,
    pub mmsi: Mmsi,
    pub departure_port: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_port: String,
    pub arrival_time: DateTime<Utc>,
    pub duration_hours: f64,
    pub ping_count: usize,
}
