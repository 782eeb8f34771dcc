//! CSV and JSON tables read by and written from the pipeline.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use snafu::ResultExt;
use tracing::{debug, instrument};
use voyage_core::{LabeledPing, Mmsi, PortDefinition, RawPing, VoyageId};

use crate::{
    PipelineOutput, Result,
    error::error::{CsvSnafu, IoSnafu, JsonSnafu},
};

pub const VISITS_FILE: &str = "visits.csv";
pub const LABELED_PINGS_FILE: &str = "labeled_pings.csv";
pub const VOYAGES_FILE: &str = "voyages.csv";
pub const PORT_CALLS_FILE: &str = "port_calls.csv";
pub const PORT_CALL_COUNTS_FILE: &str = "port_call_counts.csv";
pub const OVERLAPS_FILE: &str = "overlaps.json";

/// A labeled ping flattened into one table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledPingRow<'a> {
    pub mmsi: Mmsi,
    pub base_date_time: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub sog: f64,
    pub current_port: Option<&'a str>,
    pub origin_port: Option<&'a str>,
    pub destination_port: Option<&'a str>,
    pub voyage_id: Option<VoyageId>,
}

impl<'a> From<&'a LabeledPing> for LabeledPingRow<'a> {
    fn from(value: &'a LabeledPing) -> Self {
        Self {
            mmsi: value.ping.mmsi,
            base_date_time: value.ping.timestamp,
            latitude: value.ping.latitude,
            longitude: value.ping.longitude,
            sog: value.ping.speed_over_ground,
            current_port: value.current_port.as_deref(),
            origin_port: value.origin_port.as_deref(),
            destination_port: value.destination_port.as_deref(),
            voyage_id: value.voyage_id,
        }
    }
}

pub fn read_pings(path: impl AsRef<Path>) -> Result<Vec<RawPing>> {
    read_table(path.as_ref())
}

pub fn read_ports(path: impl AsRef<Path>) -> Result<Vec<PortDefinition>> {
    read_table(path.as_ref())
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context(CsvSnafu { path })?;

    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, _>>()
        .context(CsvSnafu { path })?;

    debug!("read {} rows from '{}'", rows.len(), path.display());
    Ok(rows)
}

pub fn write_table<T: Serialize>(
    path: impl AsRef<Path>,
    rows: impl IntoIterator<Item = T>,
) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path).context(CsvSnafu { path })?;
    for row in rows {
        writer.serialize(row).context(CsvSnafu { path })?;
    }
    writer.flush().context(IoSnafu { path })
}

/// Writes every table of `output` into `directory`, creating it if needed.
#[instrument(skip(output))]
pub fn write_output(directory: &Path, output: &PipelineOutput) -> Result<()> {
    fs::create_dir_all(directory).context(IoSnafu { path: directory })?;

    write_table(directory.join(VISITS_FILE), &output.visits)?;
    write_table(
        directory.join(LABELED_PINGS_FILE),
        output.labeled_pings.iter().map(LabeledPingRow::from),
    )?;
    write_table(directory.join(VOYAGES_FILE), &output.voyages)?;
    write_table(directory.join(PORT_CALLS_FILE), &output.port_calls)?;
    write_table(
        directory.join(PORT_CALL_COUNTS_FILE),
        &output.port_call_counts,
    )?;

    let path: PathBuf = directory.join(OVERLAPS_FILE);
    let json = serde_json::to_vec_pretty(&output.overlaps).context(JsonSnafu { path: &path })?;
    fs::write(&path, json).context(IoSnafu { path })
}
