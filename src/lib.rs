pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::SearchConfig};
pub use crate::core::{etl::SearchEngine, pipeline::HotelPipeline};
pub use domain::model::{
    DateRange, DisplayCurrency, HotelListing, RankedListings, SearchOutcome, SearchQuery,
};
pub use utils::error::{ErrorKind, Result, SearchError};
