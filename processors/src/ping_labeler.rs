use std::collections::HashMap;

use chrono::{DateTime, Utc};
use itertools::Itertools;
use tracing::{debug, instrument};
use voyage_core::{LabeledPing, Mmsi, Ping, Visit};

/// Labels every ping with the port it is at, or the ports it left and is heading to.
#[derive(Debug, Clone, Copy, Default)]
pub struct PingLabeler;

/// The visits of one vessel, searchable by entry and by exit time.
#[derive(Debug)]
pub struct VesselVisits<'a> {
    by_entry: Vec<&'a Visit>,
    by_exit: Vec<&'a Visit>,
    /// Latest exit among `by_entry[..=i]`.
    max_exit: Vec<DateTime<Utc>>,
}

impl PingLabeler {
    /// One labeled ping per input ping, sorted by vessel and timestamp. Pings with
    /// equal vessel and timestamp keep their input order.
    #[instrument(skip_all)]
    pub fn label(&self, pings: &[Ping], visits: &[Visit]) -> Vec<LabeledPing> {
        let visits_per_vessel = VesselVisits::per_vessel(visits);
        let empty = VesselVisits::new(Vec::new());

        let mut pings = pings.to_vec();
        pings.sort_by_key(|p| (p.mmsi, p.timestamp));

        let labeled: Vec<LabeledPing> = pings
            .into_iter()
            .map(|ping| {
                visits_per_vessel
                    .get(&ping.mmsi)
                    .unwrap_or(&empty)
                    .label(ping)
            })
            .collect();

        debug!(
            "labeled {} pings, {} at port",
            labeled.len(),
            labeled.iter().filter(|p| !p.is_at_sea()).count()
        );

        labeled
    }
}

impl<'a> VesselVisits<'a> {
    pub fn new(mut by_entry: Vec<&'a Visit>) -> Self {
        by_entry.sort_by(|a, b| {
            a.entry_time
                .cmp(&b.entry_time)
                .then_with(|| a.port_name.cmp(&b.port_name))
        });
        let mut by_exit = by_entry.clone();
        by_exit.sort_by_key(|v| v.exit_time);

        let max_exit = by_entry
            .iter()
            .scan(None, |latest: &mut Option<DateTime<Utc>>, v| {
                let exit = latest.map_or(v.exit_time, |l| l.max(v.exit_time));
                *latest = Some(exit);
                Some(exit)
            })
            .collect();

        Self {
            by_entry,
            by_exit,
            max_exit,
        }
    }

    pub fn per_vessel(visits: &'a [Visit]) -> HashMap<Mmsi, VesselVisits<'a>> {
        visits
            .iter()
            .into_group_map_by(|v| v.mmsi)
            .into_iter()
            .map(|(mmsi, visits)| (mmsi, VesselVisits::new(visits)))
            .collect()
    }

    /// Visits sorted by entry time, then port name.
    pub fn by_entry(&self) -> &[&'a Visit] {
        &self.by_entry
    }

    pub fn label(&self, ping: Ping) -> LabeledPing {
        match self.current(ping.timestamp) {
            Some(visit) => LabeledPing::at_port(ping, visit.port_name.clone()),
            None => {
                let origin = self.origin(ping.timestamp).map(|v| v.port_name.clone());
                let destination = self.destination(ping.timestamp).map(|v| v.port_name.clone());
                LabeledPing::at_sea(ping, origin, destination)
            }
        }
    }

    /// The visit containing `timestamp`. When visits overlap the one entered first wins,
    /// then the lowest port name.
    pub fn current(&self, timestamp: DateTime<Utc>) -> Option<&'a Visit> {
        // The first visit in entry order that has not been exited yet. Any earlier
        // visit exited before `timestamp`, so this is the only candidate.
        let open = self.max_exit.partition_point(|exit| *exit < timestamp);
        self.by_entry
            .get(open)
            .copied()
            .filter(|v| v.contains(timestamp))
    }

    /// The visit with the latest exit at or before `timestamp`.
    pub fn origin(&self, timestamp: DateTime<Utc>) -> Option<&'a Visit> {
        let exited = self.by_exit.partition_point(|v| v.exit_time <= timestamp);
        exited
            .checked_sub(1)
            .and_then(|i| self.by_exit.get(i))
            .copied()
    }

    /// The visit with the earliest entry at or after `timestamp`.
    pub fn destination(&self, timestamp: DateTime<Utc>) -> Option<&'a Visit> {
        let before = self.by_entry.partition_point(|v| v.entry_time < timestamp);
        self.by_entry.get(before).copied()
    }
}
