use std::path::PathBuf;

use tracing::info;
use voyage_core::{validate_pings, validate_ports};

use crate::{
    PipelineOutput, Result, VoyagePipeline,
    settings::{InputSettings, Settings},
    table,
};

pub struct App {
    pipeline: VoyagePipeline,
    default_radius_nm: f64,
    input: InputSettings,
    output_directory: PathBuf,
}

impl App {
    /// Fails if any configured threshold is invalid, before any input is read.
    pub fn build(settings: &Settings) -> Result<Self> {
        let proximity = settings.proximity_config()?;

        Ok(Self {
            pipeline: VoyagePipeline::new(
                settings.proximity.geofence.geofence(),
                proximity,
                settings.segmenter_config()?,
                settings.minimum_stay()?,
                settings.num_workers,
            ),
            default_radius_nm: proximity.radius_nautical_miles(),
            input: settings.input.clone(),
            output_directory: settings.output.directory.clone(),
        })
    }

    pub async fn run(self) -> Result<PipelineOutput> {
        let pings = validate_pings(table::read_pings(&self.input.pings)?)?;
        let ports = validate_ports(table::read_ports(&self.input.ports)?, self.default_radius_nm)?;
        info!("validated {} pings and {} ports", pings.len(), ports.len());

        let output = self.pipeline.run(pings, &ports).await?;
        table::write_output(&self.output_directory, &output)?;

        info!("wrote output to '{}'", self.output_directory.display());
        Ok(output)
    }
}
