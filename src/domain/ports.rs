use crate::domain::model::{
    DisplayCurrency, HotelListing, MarkupSelectors, RankedListings, SearchQuery,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// 檔案在此儲存體中的完整位置，用於回報
    fn location(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn base_currency(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn accept_language(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
    fn max_listings(&self) -> usize;
    fn selectors(&self) -> &MarkupSelectors;
    fn base_symbol(&self) -> &str;
    fn alternate_code(&self) -> &str;
    fn conversion_rate(&self) -> f64;
    fn output_filename(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self, query: &SearchQuery) -> Result<Vec<HotelListing>>;
    async fn transform(
        &self,
        listings: Vec<HotelListing>,
        currency: DisplayCurrency,
    ) -> Result<RankedListings>;
    async fn load(&self, ranked: &RankedListings) -> Result<String>;
}
