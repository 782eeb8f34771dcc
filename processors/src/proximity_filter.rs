use std::sync::Arc;

use tracing::{debug, instrument};
use voyage_core::{CandidateMatch, Geofence, Ping, Port, ProximityConfig};

/// Pairs slow pings with every port whose search area contains them.
///
/// Overlapping search areas are not resolved here, a ping inside two ports yields
/// two candidates.
#[derive(Clone)]
pub struct ProximityFilter {
    geofence: Arc<dyn Geofence>,
    config: ProximityConfig,
}

impl ProximityFilter {
    pub fn new(geofence: Arc<dyn Geofence>, config: ProximityConfig) -> Self {
        Self { geofence, config }
    }

    /// Speed at or below the threshold, regardless of position.
    pub fn is_slow(&self, ping: &Ping) -> bool {
        ping.speed_over_ground <= self.config.max_speed_knots()
    }

    #[instrument(skip_all)]
    pub fn candidates(&self, pings: &[Ping], ports: &[Port]) -> Vec<CandidateMatch> {
        let candidates: Vec<CandidateMatch> = pings
            .iter()
            .filter(|p| self.is_slow(p))
            .flat_map(|ping| {
                self.geofence
                    .ports_containing(ping.latitude, ping.longitude, ports)
                    .into_iter()
                    .map(move |port| CandidateMatch {
                        mmsi: ping.mmsi,
                        timestamp: ping.timestamp,
                        port_name: port.name.clone(),
                    })
            })
            .collect();

        debug!(
            "{} of {} pings matched {} ports",
            candidates.len(),
            pings.len(),
            ports.len()
        );

        candidates
    }
}
