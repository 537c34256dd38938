use crate::core::currency::CurrencyNormalizer;
use crate::core::export::ExportWriter;
use crate::core::extractor::ListingExtractor;
use crate::core::fetcher::ListingsFetcher;
use crate::core::query::QueryBuilder;
use crate::core::ranking;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{DisplayCurrency, HotelListing, RankedListings, SearchQuery};
use crate::utils::error::Result;

/// 飯店搜尋管道：extract = 組請求 + 抓取 + 解析，transform = 換算幣別 + 排序，load = 匯出 CSV
pub struct HotelPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    query_builder: QueryBuilder,
    fetcher: ListingsFetcher,
    extractor: ListingExtractor,
    normalizer: CurrencyNormalizer,
}

impl<S: Storage, C: ConfigProvider> HotelPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        // selector 表在建構時就編譯，發出請求前即可發現錯誤
        let extractor = ListingExtractor::new(config.selectors(), config.max_listings())?;

        Ok(Self {
            query_builder: QueryBuilder::from_config(&config),
            fetcher: ListingsFetcher::new(config.request_timeout())?,
            extractor,
            normalizer: CurrencyNormalizer::from_config(&config),
            storage,
            config,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for HotelPipeline<S, C> {
    async fn extract(&self, query: &SearchQuery) -> Result<Vec<HotelListing>> {
        let request = self.query_builder.build(query)?;
        let body = self.fetcher.fetch(&request).await?;

        let listings = self.extractor.extract(&body);
        if listings.is_empty() {
            tracing::warn!("No listings found for '{}'", query.city());
        }

        Ok(listings)
    }

    async fn transform(
        &self,
        listings: Vec<HotelListing>,
        currency: DisplayCurrency,
    ) -> Result<RankedListings> {
        // 任何一筆換算失敗就中止，不留下部分換算的結果
        let normalized = listings
            .into_iter()
            .map(|listing| self.normalizer.normalize(listing, currency))
            .collect::<Result<Vec<_>>>()?;

        Ok(ranking::rank(normalized))
    }

    async fn load(&self, ranked: &RankedListings) -> Result<String> {
        ExportWriter::new(&self.storage, self.config.output_filename())
            .write(ranked)
            .await
    }
}
