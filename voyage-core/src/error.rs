use crate::{PingField, PortField};
use chrono::{DateTime, Utc};
use snafu::{Location, Snafu};

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum ValidationError {
    #[snafu(display("Ping at row '{index}' is missing required field '{field}'"))]
    MissingPingField {
        #[snafu(implicit)]
        location: Location,
        index: usize,
        field: PingField,
    },
    #[snafu(display("Ping at row '{index}' has an invalid '{field}': '{value}'"))]
    InvalidPingField {
        #[snafu(implicit)]
        location: Location,
        index: usize,
        field: PingField,
        value: String,
    },
    #[snafu(display("Port at row '{index}' is missing required field '{field}'"))]
    MissingPortField {
        #[snafu(implicit)]
        location: Location,
        index: usize,
        field: PortField,
    },
    #[snafu(display("Port at row '{index}' has an invalid '{field}': '{value}'"))]
    InvalidPortField {
        #[snafu(implicit)]
        location: Location,
        index: usize,
        field: PortField,
        value: String,
    },
    #[snafu(display("Port '{name}' is defined more than once"))]
    DuplicatePort {
        #[snafu(implicit)]
        location: Location,
        name: String,
    },
}

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum DateRangeError {
    #[snafu(display("Start of date range '{start}' is not before its end '{end}'"))]
    Ordering {
        #[snafu(implicit)]
        location: Location,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum ConfigurationError {
    #[snafu(display("'{name}' must be greater than zero, got '{value}'"))]
    NonPositive {
        #[snafu(implicit)]
        location: Location,
        name: &'static str,
        value: f64,
    },
    #[snafu(display("'{name}' cannot be negative, got '{value}'"))]
    Negative {
        #[snafu(implicit)]
        location: Location,
        name: &'static str,
        value: f64,
    },
    #[snafu(display("'{name}' must be a finite number, got '{value}'"))]
    NotFinite {
        #[snafu(implicit)]
        location: Location,
        name: &'static str,
        value: f64,
    },
    #[snafu(display("'{name}' of '{value}' hours is out of range"))]
    OutOfRange {
        #[snafu(implicit)]
        location: Location,
        name: &'static str,
        value: f64,
    },
}
