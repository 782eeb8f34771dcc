use std::path::PathBuf;

use snafu::{Location, Snafu};
use tokio::task::JoinError;
use voyage_core::{ConfigurationError, ValidationError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Rejected input batch"), context(false))]
    Validation {
        #[snafu(implicit)]
        location: Location,
        source: ValidationError,
    },
    #[snafu(display("Rejected configuration"), context(false))]
    Configuration {
        #[snafu(implicit)]
        location: Location,
        source: ConfigurationError,
    },
    #[snafu(display("Failed to load settings"))]
    Settings {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: config::ConfigError,
    },
    #[snafu(display("Unknown environment '{value}'"))]
    UnknownEnvironment {
        #[snafu(implicit)]
        location: Location,
        value: String,
    },
    #[snafu(display("Failed to join tasks"))]
    JoinError {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: JoinError,
    },
    #[snafu(display("Vessel work channel closed before all vessels were queued"))]
    WorkerChannelClosed {
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("CSV error for '{}'", path.display()))]
    Csv {
        #[snafu(implicit)]
        location: Location,
        path: PathBuf,
        #[snafu(source)]
        error: csv::Error,
    },
    #[snafu(display("IO error for '{}'", path.display()))]
    Io {
        #[snafu(implicit)]
        location: Location,
        path: PathBuf,
        #[snafu(source)]
        error: std::io::Error,
    },
    #[snafu(display("Failed to serialize '{}'", path.display()))]
    Json {
        #[snafu(implicit)]
        location: Location,
        path: PathBuf,
        #[snafu(source)]
        error: serde_json::Error,
    },
}
