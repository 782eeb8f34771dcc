use chrono::{DateTime, Utc};

mod ais;
mod date_range;
mod ports;
mod visits;
mod voyages;

pub use ais::*;
pub use date_range::*;
pub use ports::*;
pub use visits::*;
pub use voyages::*;

/// Whole and fractional hours between two instants.
pub fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / MILLISECONDS_PER_HOUR
}

pub(crate) const MILLISECONDS_PER_HOUR: f64 = 3_600_000.0;
