use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, instrument};
use voyage_core::{CandidateMatch, Mmsi, SegmenterConfig, Visit};

/// Splits the candidate pings of each vessel and port into visits wherever two
/// consecutive pings are further apart than the gap threshold.
#[derive(Debug, Clone, Copy)]
pub struct VisitSegmenter {
    config: SegmenterConfig,
}

impl VisitSegmenter {
    pub fn new(config: SegmenterConfig) -> Self {
        Self { config }
    }

    /// Visits sorted by vessel and entry time. Visits of one vessel sharing an entry
    /// time are ordered by port name.
    #[instrument(skip_all)]
    pub fn segment(&self, candidates: &[CandidateMatch]) -> Vec<Visit> {
        let mut groups: BTreeMap<(Mmsi, &str), Vec<DateTime<Utc>>> = BTreeMap::new();
        for c in candidates {
            groups
                .entry((c.mmsi, c.port_name.as_str()))
                .or_default()
                .push(c.timestamp);
        }

        let mut visits = Vec::new();
        for ((mmsi, port_name), mut timestamps) in groups {
            timestamps.sort_unstable();
            visits.extend(
                clusters(&timestamps, self.config.gap_threshold())
                    .map(|(entry, exit)| Visit::new(mmsi, port_name, entry, exit)),
            );
        }

        // Stable, keeps the port name order of visits with equal entry times.
        visits.sort_by_key(|v| (v.mmsi, v.entry_time));

        debug!(
            "segmented {} candidates into {} visits",
            candidates.len(),
            visits.len()
        );

        visits
    }
}

/// First and last timestamp of each cluster in `timestamps`, which must be sorted.
/// A gap equal to the threshold does not split a cluster.
fn clusters(
    timestamps: &[DateTime<Utc>],
    gap_threshold: Duration,
) -> impl Iterator<Item = (DateTime<Utc>, DateTime<Utc>)> + '_ {
    timestamps
        .chunk_by(move |a, b| *b - *a <= gap_threshold)
        .filter_map(|c| Some((*c.first()?, *c.last()?)))
}
