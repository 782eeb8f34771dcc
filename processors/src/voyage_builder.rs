use itertools::Itertools;
use serde::Serialize;
use tracing::{debug, instrument, warn};
use voyage_core::{DateRange, LabeledPing, Mmsi, Visit, VisitOverlap, Voyage, VoyageId};

use crate::VesselVisits;

/// Chains consecutive visits of each vessel into voyages and stamps the sea pings
/// of each voyage with its id.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoyageBuilder;

/// Voyages together with the visit pairs that were skipped because they overlap.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VoyageTable {
    pub voyages: Vec<Voyage>,
    pub overlaps: Vec<VisitOverlap>,
}

/// Hands out voyage ids in increasing order, starting at zero.
#[derive(Debug, Default)]
struct VoyageIdSequence {
    next: u64,
}

impl VoyageIdSequence {
    fn next_id(&mut self) -> VoyageId {
        let id = VoyageId::new(self.next);
        self.next += 1;
        id
    }
}

impl VoyageBuilder {
    /// Vessels are processed in ascending MMSI order and voyage ids start at zero.
    /// The returned pings are sorted by vessel and timestamp.
    #[instrument(skip_all)]
    pub fn build(
        &self,
        mut labeled: Vec<LabeledPing>,
        visits: &[Visit],
    ) -> (Vec<LabeledPing>, VoyageTable) {
        labeled.sort_by_key(|p| (p.mmsi(), p.timestamp()));

        let mut visits_per_vessel: Vec<_> = VesselVisits::per_vessel(visits).into_iter().collect();
        visits_per_vessel.sort_unstable_by_key(|(mmsi, _)| *mmsi);

        let mut ids = VoyageIdSequence::default();
        let mut table = VoyageTable::default();
        for (mmsi, vessel_visits) in visits_per_vessel {
            let pings = vessel_pings(&mut labeled, mmsi);
            vessel_voyages(mmsi, pings, vessel_visits.by_entry(), &mut ids, &mut table);
        }

        debug!(
            "built {} voyages, skipped {} overlapping visit pairs",
            table.voyages.len(),
            table.overlaps.len()
        );

        (labeled, table)
    }
}

impl VoyageTable {
    pub fn extend(&mut self, other: VoyageTable) {
        self.voyages.extend(other.voyages);
        self.overlaps.extend(other.overlaps);
    }
}

/// The pings of `mmsi` within `labeled`, which must be sorted by vessel.
fn vessel_pings(labeled: &mut [LabeledPing], mmsi: Mmsi) -> &mut [LabeledPing] {
    let start = labeled.partition_point(|p| p.mmsi() < mmsi);
    let end = labeled.partition_point(|p| p.mmsi() <= mmsi);
    &mut labeled[start..end]
}

/// Pings strictly inside `sea_leg`, `pings` must be sorted by timestamp.
fn pings_within<'a>(pings: &'a mut [LabeledPing], sea_leg: &DateRange) -> &'a mut [LabeledPing] {
    let start = pings.partition_point(|p| p.timestamp() <= sea_leg.start());
    let end = pings.partition_point(|p| p.timestamp() < sea_leg.end());
    &mut pings[start..end]
}

fn vessel_voyages(
    mmsi: Mmsi,
    pings: &mut [LabeledPing],
    visits: &[&Visit],
    ids: &mut VoyageIdSequence,
    table: &mut VoyageTable,
) {
    for (departure, arrival) in visits.iter().tuple_windows() {
        let sea_leg = match DateRange::open(departure.exit_time, arrival.entry_time) {
            Ok(r) => r,
            Err(_) => {
                warn!(
                    "skipping overlapping visits for vessel '{mmsi}', '{}' exits at '{}' after '{}' is entered at '{}'",
                    departure.port_name,
                    departure.exit_time,
                    arrival.port_name,
                    arrival.entry_time
                );
                table.overlaps.push(VisitOverlap::new(departure, arrival));
                continue;
            }
        };

        let voyage_id = ids.next_id();
        let mut ping_count = 0;
        for ping in pings_within(pings, &sea_leg)
            .iter_mut()
            .filter(|p| p.is_at_sea())
        {
            ping.voyage_id = Some(voyage_id);
            ping_count += 1;
        }

        table.voyages.push(Voyage {
            voyage_id,
            mmsi,
            departure_port: departure.port_name.clone(),
            departure_time: departure.exit_time,
            arrival_port: arrival.port_name.clone(),
            arrival_time: arrival.entry_time,
            duration_hours: sea_leg.duration_hours(),
            ping_count,
        });
    }
}

/// Shifts every voyage id in `voyages` and `pings` by `offset`.
pub(crate) fn offset_voyage_ids(offset: u64, voyages: &mut [Voyage], pings: &mut [LabeledPing]) {
    let shift = |id: VoyageId| VoyageId::new(id.into_inner() + offset);
    for v in voyages {
        v.voyage_id = shift(v.voyage_id);
    }
    for p in pings {
        p.voyage_id = p.voyage_id.map(shift);
    }
}
