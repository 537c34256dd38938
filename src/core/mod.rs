pub mod currency;
pub mod dates;
pub mod etl;
pub mod export;
pub mod extractor;
pub mod fetcher;
pub mod pipeline;
pub mod query;
pub mod ranking;

pub use crate::domain::model::{HotelListing, RankedListings, SearchOutcome, SearchQuery};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
