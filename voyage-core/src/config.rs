use chrono::Duration;
use snafu::OptionExt;

use crate::{
    ConfigurationError, METERS_PER_NAUTICAL_MILE, MILLISECONDS_PER_HOUR,
    configuration_error::{NegativeSnafu, NonPositiveSnafu, NotFiniteSnafu, OutOfRangeSnafu},
};

/// Thresholds deciding whether a ping is a port candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityConfig {
    max_speed_knots: f64,
    radius_nautical_miles: f64,
}

/// Largest gap between consecutive pings at the same port that still belong to one visit.
///
/// Must be smaller than the shortest real absence between two distinct visits and larger
/// than the longest reporting gap within one stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmenterConfig {
    gap_threshold: Duration,
}

/// Visits shorter than this are not reported as port calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinimumStay {
    duration: Duration,
}

impl ProximityConfig {
    pub fn new(
        max_speed_knots: f64,
        radius_nautical_miles: f64,
    ) -> Result<Self, ConfigurationError> {
        positive("max_speed_knots", max_speed_knots)?;
        positive("radius_nautical_miles", radius_nautical_miles)?;
        Ok(Self {
            max_speed_knots,
            radius_nautical_miles,
        })
    }

    pub fn max_speed_knots(&self) -> f64 {
        self.max_speed_knots
    }

    pub fn radius_nautical_miles(&self) -> f64 {
        self.radius_nautical_miles
    }

    pub fn radius_meters(&self) -> f64 {
        self.radius_nautical_miles * METERS_PER_NAUTICAL_MILE
    }
}

impl SegmenterConfig {
    pub fn new(gap_threshold: Duration) -> Result<Self, ConfigurationError> {
        if gap_threshold <= Duration::zero() {
            return NonPositiveSnafu {
                name: "gap_threshold",
                value: hours(gap_threshold),
            }
            .fail();
        }
        Ok(Self { gap_threshold })
    }

    pub fn from_hours(gap_threshold_hours: f64) -> Result<Self, ConfigurationError> {
        positive("gap_threshold", gap_threshold_hours)?;
        Self::new(from_hours("gap_threshold", gap_threshold_hours)?)
    }

    pub fn gap_threshold(&self) -> Duration {
        self.gap_threshold
    }
}

impl MinimumStay {
    pub fn new(duration: Duration) -> Result<Self, ConfigurationError> {
        if duration < Duration::zero() {
            return NegativeSnafu {
                name: "min_stay",
                value: hours(duration),
            }
            .fail();
        }
        Ok(Self { duration })
    }

    pub fn from_hours(min_stay_hours: f64) -> Result<Self, ConfigurationError> {
        if !min_stay_hours.is_finite() {
            return NotFiniteSnafu {
                name: "min_stay",
                value: min_stay_hours,
            }
            .fail();
        }
        if min_stay_hours < 0.0 {
            return NegativeSnafu {
                name: "min_stay",
                value: min_stay_hours,
            }
            .fail();
        }
        Self::new(from_hours("min_stay", min_stay_hours)?)
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn hours(&self) -> f64 {
        hours(self.duration)
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if !value.is_finite() {
        NotFiniteSnafu { name, value }.fail()
    } else if value <= 0.0 {
        NonPositiveSnafu { name, value }.fail()
    } else {
        Ok(())
    }
}

fn from_hours(name: &'static str, value: f64) -> Result<Duration, ConfigurationError> {
    let milliseconds = (value * MILLISECONDS_PER_HOUR).round();
    if !milliseconds.is_finite() || milliseconds.abs() >= i64::MAX as f64 {
        return OutOfRangeSnafu { name, value }.fail();
    }
    Duration::try_milliseconds(milliseconds as i64).context(OutOfRangeSnafu { name, value })
}

fn hours(value: Duration) -> f64 {
    value.num_milliseconds() as f64 / MILLISECONDS_PER_HOUR
}
