use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use snafu::OptionExt;
use strum::{AsRefStr, Display as StrumDisplay};

use crate::validation_error::{DuplicatePortSnafu, InvalidPortFieldSnafu, MissingPortFieldSnafu};
use crate::{Mmsi, ValidationError, parse_coordinate};

pub const METERS_PER_NAUTICAL_MILE: f64 = 1852.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, StrumDisplay)]
#[strum(serialize_all = "snake_case")]
pub enum PortField {
    PortName,
    Latitude,
    Longitude,
    RadiusNm,
}

/// A port as it arrives from a table. Coordinates are either decimal degrees or
/// degree-minute-second strings such as `46°59'00"N`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PortDefinition {
    #[serde(alias = "portName")]
    pub port_name: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub radius_nm: Option<String>,
}

/// A named port with the circular search area used for proximity matching.
#[derive(Debug, Clone, PartialEq)]
pub struct Port {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: f64,
}

impl Port {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64, radius_nm: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            radius_meters: radius_nm * METERS_PER_NAUTICAL_MILE,
        }
    }

    pub fn radius_nautical_miles(&self) -> f64 {
        self.radius_meters / METERS_PER_NAUTICAL_MILE
    }
}

impl PortDefinition {
    /// Validates the row at `index`. Ports without their own radius get `default_radius_nm`.
    pub fn validate(self, index: usize, default_radius_nm: f64) -> Result<Port, ValidationError> {
        let PortDefinition {
            port_name,
            latitude,
            longitude,
            radius_nm,
        } = self;

        let name = port_name
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .context(MissingPortFieldSnafu {
                index,
                field: PortField::PortName,
            })?;

        let latitude = coordinate(index, PortField::Latitude, latitude, 90.0)?;
        let longitude = coordinate(index, PortField::Longitude, longitude, 180.0)?;

        let radius_nm = radius(index, radius_nm, default_radius_nm)?;

        Ok(Port::new(name, latitude, longitude, radius_nm))
    }
}

fn coordinate(
    index: usize,
    field: PortField,
    value: Option<String>,
    limit: f64,
) -> Result<f64, ValidationError> {
    let value = value
        .filter(|v| !v.trim().is_empty())
        .context(MissingPortFieldSnafu { index, field })?;

    parse_coordinate(&value)
        .filter(|v| v.abs() <= limit)
        .context(InvalidPortFieldSnafu {
            index,
            field,
            value: value.clone(),
        })
}

fn radius(
    index: usize,
    value: Option<String>,
    default_radius_nm: f64,
) -> Result<f64, ValidationError> {
    let (text, radius_nm) = match value.filter(|v| !v.trim().is_empty()) {
        Some(v) => {
            let parsed = v.trim().parse::<f64>().ok();
            (v, parsed)
        }
        None => (default_radius_nm.to_string(), Some(default_radius_nm)),
    };

    radius_nm
        .filter(|r| r.is_finite() && *r > 0.0)
        .context(InvalidPortFieldSnafu {
            index,
            field: PortField::RadiusNm,
            value: text,
        })
}

/// Validates every port definition, rejecting the batch on the first bad row or on
/// duplicate port names.
pub fn validate_ports(
    definitions: Vec<PortDefinition>,
    default_radius_nm: f64,
) -> Result<Vec<Port>, ValidationError> {
    let mut names = HashSet::with_capacity(definitions.len());
    let mut ports = Vec::with_capacity(definitions.len());

    for (index, definition) in definitions.into_iter().enumerate() {
        let port = definition.validate(index, default_radius_nm)?;
        if !names.insert(port.name.clone()) {
            return DuplicatePortSnafu { name: port.name }.fail();
        }
        ports.push(port);
    }

    Ok(ports)
}

/// A vessel that stayed at a port for at least the minimum stay.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PortCall {
    pub mmsi: Mmsi,
    pub port_name: String,
}

/// Number of distinct vessels with at least one port call at a port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortCallCount {
    pub port_name: String,
    pub port_call_count: usize,
}
