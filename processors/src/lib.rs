#![deny(warnings)]
#![deny(rust_2018_idioms)]

//! Turns vessel position reports into port visits, labeled pings and voyages.

mod error;
mod ping_labeler;
mod pipeline;
mod port_calls;
mod proximity_filter;
mod visit_segmenter;
mod voyage_builder;

pub mod settings;
pub mod startup;
pub mod table;

pub use error::{Error, Result};
pub use ping_labeler::*;
pub use pipeline::*;
pub use port_calls::*;
pub use proximity_filter::*;
pub use visit_segmenter::*;
pub use voyage_builder::*;
