use std::{collections::BTreeMap, sync::Arc};

use async_channel::Receiver;
use snafu::ResultExt;
use tokio::task::JoinSet;
use tracing::{info, instrument};
use voyage_core::{
    CandidateMatch, Geofence, LabeledPing, MinimumStay, Mmsi, Ping, Port, PortCall,
    PortCallCount, ProximityConfig, SegmenterConfig, Visit, VisitOverlap, Voyage,
};

use crate::{
    PingLabeler, PortCallMatcher, ProximityFilter, Result, VisitSegmenter, VoyageBuilder,
    VoyageTable,
    error::error::{JoinSnafu, WorkerChannelClosedSnafu},
    offset_voyage_ids, port_call_counts,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineOutput {
    pub visits: Vec<Visit>,
    pub labeled_pings: Vec<LabeledPing>,
    pub voyages: Vec<Voyage>,
    pub overlaps: Vec<VisitOverlap>,
    pub port_calls: Vec<PortCall>,
    pub port_call_counts: Vec<PortCallCount>,
}

/// Runs a full batch of pings through proximity filtering, visit segmentation,
/// labeling and voyage building.
///
/// Vessels are independent of each other after proximity filtering, so each one
/// is handed to a pool of workers. Voyage ids are assigned afterwards in ascending
/// MMSI order, which makes the output independent of `num_workers`.
#[derive(Clone)]
pub struct VoyagePipeline {
    filter: ProximityFilter,
    segmenter: VisitSegmenter,
    port_calls: PortCallMatcher,
    num_workers: u32,
}

#[derive(Debug)]
struct VesselWork {
    mmsi: Mmsi,
    pings: Vec<Ping>,
    candidates: Vec<CandidateMatch>,
}

#[derive(Debug)]
struct VesselOutcome {
    mmsi: Mmsi,
    visits: Vec<Visit>,
    labeled_pings: Vec<LabeledPing>,
    voyages: VoyageTable,
}

impl VoyagePipeline {
    pub fn new(
        geofence: Arc<dyn Geofence>,
        proximity: ProximityConfig,
        segmenter: SegmenterConfig,
        min_stay: MinimumStay,
        num_workers: u32,
    ) -> Self {
        Self {
            filter: ProximityFilter::new(geofence, proximity),
            segmenter: VisitSegmenter::new(segmenter),
            port_calls: PortCallMatcher::new(min_stay),
            num_workers: num_workers.max(1),
        }
    }

    #[instrument(skip_all, fields(pings = pings.len(), ports = ports.len()))]
    pub async fn run(&self, pings: Vec<Ping>, ports: &[Port]) -> Result<PipelineOutput> {
        let candidates = self.filter.candidates(&pings, ports);
        info!("found {} port candidates", candidates.len());

        let vessels = partition_by_vessel(pings, candidates);
        let num_vessels = vessels.len();

        let (sender, receiver) = async_channel::unbounded();
        for work in vessels {
            if sender.send(work).await.is_err() {
                return WorkerChannelClosedSnafu.fail();
            }
        }
        // Workers exit once the channel is both empty and closed.
        drop(sender);

        let mut set = JoinSet::new();
        for _ in 0..self.num_workers {
            set.spawn(vessel_task(receiver.clone(), self.segmenter));
        }

        let mut outcomes = Vec::with_capacity(num_vessels);
        while let Some(res) = set.join_next().await {
            outcomes.extend(res.context(JoinSnafu)?);
        }

        let output = self.merge(outcomes, ports);
        info!(
            "processed {num_vessels} vessels into {} visits and {} voyages, skipped {} overlapping visit pairs",
            output.visits.len(),
            output.voyages.len(),
            output.overlaps.len()
        );

        Ok(output)
    }

    fn merge(&self, mut outcomes: Vec<VesselOutcome>, ports: &[Port]) -> PipelineOutput {
        outcomes.sort_unstable_by_key(|o| o.mmsi);

        let mut visits = Vec::new();
        let mut labeled_pings = Vec::new();
        let mut table = VoyageTable::default();

        for mut outcome in outcomes {
            offset_voyage_ids(
                table.voyages.len() as u64,
                &mut outcome.voyages.voyages,
                &mut outcome.labeled_pings,
            );
            visits.extend(outcome.visits);
            labeled_pings.extend(outcome.labeled_pings);
            table.extend(outcome.voyages);
        }

        let port_calls = self.port_calls.matches(&visits);
        let port_call_counts = port_call_counts(ports, &port_calls);

        PipelineOutput {
            visits,
            labeled_pings,
            voyages: table.voyages,
            overlaps: table.overlaps,
            port_calls,
            port_call_counts,
        }
    }
}

fn partition_by_vessel(pings: Vec<Ping>, candidates: Vec<CandidateMatch>) -> Vec<VesselWork> {
    let mut vessels: BTreeMap<Mmsi, VesselWork> = BTreeMap::new();
    for ping in pings {
        let mmsi = ping.mmsi;
        vessels
            .entry(mmsi)
            .or_insert_with(|| VesselWork {
                mmsi,
                pings: Vec::new(),
                candidates: Vec::new(),
            })
            .pings
            .push(ping);
    }
    for candidate in candidates {
        // Every candidate stems from a ping, so its vessel is always present.
        if let Some(work) = vessels.get_mut(&candidate.mmsi) {
            work.candidates.push(candidate);
        }
    }
    vessels.into_values().collect()
}

async fn vessel_task(
    receiver: Receiver<VesselWork>,
    segmenter: VisitSegmenter,
) -> Vec<VesselOutcome> {
    let mut outcomes = Vec::new();
    while let Ok(work) = receiver.recv().await {
        outcomes.push(process_vessel(work, &segmenter));
    }
    outcomes
}

fn process_vessel(work: VesselWork, segmenter: &VisitSegmenter) -> VesselOutcome {
    let visits = segmenter.segment(&work.candidates);
    let labeled = PingLabeler.label(&work.pings, &visits);
    let (labeled_pings, voyages) = VoyageBuilder.build(labeled, &visits);

    VesselOutcome {
        mmsi: work.mmsi,
        visits,
        labeled_pings,
        voyages,
    }
}
