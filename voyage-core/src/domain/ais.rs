use std::{fmt::Display, num::ParseIntError, str::FromStr};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use snafu::OptionExt;
use strum::{AsRefStr, Display as StrumDisplay};

use crate::validation_error::{InvalidPingFieldSnafu, MissingPingFieldSnafu};
use crate::ValidationError;

static NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Mmsi(i32);

impl Mmsi {
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    pub fn into_inner(self) -> i32 {
        self.0
    }
}

impl FromStr for Mmsi {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<Mmsi> for i32 {
    fn from(value: Mmsi) -> Self {
        value.0
    }
}

impl Display for Mmsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Column names of a ping record, used to point at the offending field of a rejected row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, StrumDisplay)]
#[strum(serialize_all = "snake_case")]
pub enum PingField {
    Mmsi,
    BaseDateTime,
    Latitude,
    Longitude,
    Sog,
}

/// A position report exactly as it arrives from a table, every column optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawPing {
    pub mmsi: Option<String>,
    pub base_date_time: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub sog: Option<String>,
}

/// A validated position report.
#[derive(Debug, Clone, PartialEq)]
pub struct Ping {
    pub mmsi: Mmsi,
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    /// Speed over ground in knots.
    pub speed_over_ground: f64,
}

impl RawPing {
    /// Validates the row at `index`, failing on the first missing or malformed field.
    pub fn validate(self, index: usize) -> Result<Ping, ValidationError> {
        let RawPing {
            mmsi,
            base_date_time,
            latitude,
            longitude,
            sog,
        } = self;

        let mmsi = mmsi
            .filter(|v| !v.trim().is_empty())
            .context(MissingPingFieldSnafu {
                index,
                field: PingField::Mmsi,
            })?;
        let mmsi = mmsi.parse::<Mmsi>().ok().context(InvalidPingFieldSnafu {
            index,
            field: PingField::Mmsi,
            value: mmsi.clone(),
        })?;

        let base_date_time = base_date_time
            .filter(|v| !v.trim().is_empty())
            .context(MissingPingFieldSnafu {
                index,
                field: PingField::BaseDateTime,
            })?;
        let timestamp = parse_timestamp(&base_date_time).context(InvalidPingFieldSnafu {
            index,
            field: PingField::BaseDateTime,
            value: base_date_time.clone(),
        })?;

        let latitude = checked_value(index, PingField::Latitude, latitude, |v| {
            (-90.0..=90.0).contains(&v)
        })?;
        let longitude = checked_value(index, PingField::Longitude, longitude, |v| {
            (-180.0..=180.0).contains(&v)
        })?;
        let speed_over_ground = checked_value(index, PingField::Sog, sog, |v| v >= 0.0)?;

        Ok(Ping {
            mmsi,
            timestamp,
            latitude,
            longitude,
            speed_over_ground,
        })
    }
}

/// Validates every row, rejecting the whole batch on the first bad one.
pub fn validate_pings(raw: Vec<RawPing>) -> Result<Vec<Ping>, ValidationError> {
    raw.into_iter()
        .enumerate()
        .map(|(index, ping)| ping.validate(index))
        .collect()
}

fn checked_value(
    index: usize,
    field: PingField,
    value: Option<String>,
    in_range: impl Fn(f64) -> bool,
) -> Result<f64, ValidationError> {
    let value = value
        .filter(|v| !v.trim().is_empty())
        .context(MissingPingFieldSnafu { index, field })?;

    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && in_range(*v))
        .context(InvalidPingFieldSnafu {
            index,
            field,
            value: value.clone(),
        })
}

/// Parses RFC 3339 timestamps, and naive ISO-8601 timestamps which are taken to be UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(v) = DateTime::parse_from_rfc3339(value) {
        return Some(v.with_timezone(&Utc));
    }

    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(value, f).ok())
        .map(|v| v.and_utc())
}
