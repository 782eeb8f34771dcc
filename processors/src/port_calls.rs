use std::collections::{BTreeSet, HashMap};

use tracing::instrument;
use voyage_core::{MinimumStay, Port, PortCall, PortCallCount, Visit};

/// Reports which vessels called at which ports, ignoring stays shorter than the minimum.
#[derive(Debug, Clone, Copy)]
pub struct PortCallMatcher {
    min_stay: MinimumStay,
}

impl PortCallMatcher {
    pub fn new(min_stay: MinimumStay) -> Self {
        Self { min_stay }
    }

    /// Unique vessel and port pairs, sorted by vessel then port name.
    #[instrument(skip_all)]
    pub fn matches(&self, visits: &[Visit]) -> Vec<PortCall> {
        visits
            .iter()
            .filter(|v| v.exit_time - v.entry_time >= self.min_stay.duration())
            .map(|v| PortCall {
                mmsi: v.mmsi,
                port_name: v.port_name.clone(),
            })
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Distinct vessels calling at each port, in port order. Ports without calls count zero.
pub fn port_call_counts(ports: &[Port], calls: &[PortCall]) -> Vec<PortCallCount> {
    let mut vessels_per_port: HashMap<&str, BTreeSet<_>> = HashMap::new();
    for call in calls {
        vessels_per_port
            .entry(call.port_name.as_str())
            .or_default()
            .insert(call.mmsi);
    }

    ports
        .iter()
        .map(|p| PortCallCount {
            port_name: p.name.clone(),
            port_call_count: vessels_per_port
                .get(p.name.as_str())
                .map(BTreeSet::len)
                .unwrap_or_default(),
        })
        .collect()
}
