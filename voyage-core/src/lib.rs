#![deny(warnings)]
#![deny(rust_2018_idioms)]

//! Domain types and capabilities shared by the port visit and voyage processors.

mod config;
mod coordinates;
mod domain;
mod error;
mod geofence;

#[cfg(feature = "test")]
pub mod test_helper;

pub use config::*;
pub use coordinates::*;
pub use domain::*;
pub use error::*;
pub use geofence::*;
