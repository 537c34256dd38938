use crate::core::dates;
use crate::core::Pipeline;
use crate::domain::model::{DisplayCurrency, SearchOutcome, SearchQuery};
use crate::utils::error::Result;
use std::time::Instant;

pub const DEFAULT_DISPLAY_LIMIT: usize = 5;

/// 依序執行一次搜尋：extract → transform → load，任一步失敗即中止
pub struct SearchEngine<P: Pipeline> {
    pipeline: P,
    display_limit: usize,
}

impl<P: Pipeline> SearchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            display_limit: DEFAULT_DISPLAY_LIMIT,
        }
    }

    pub fn with_display_limit(mut self, display_limit: usize) -> Self {
        self.display_limit = display_limit;
        self
    }

    /// 先驗證日期再執行；驗證失敗時不會發出任何網路請求
    pub async fn search(
        &self,
        city: &str,
        checkin_raw: &str,
        checkout_raw: &str,
        currency: DisplayCurrency,
    ) -> Result<SearchOutcome> {
        let dates = dates::validate(checkin_raw, checkout_raw)?;
        let query = SearchQuery::new(city, dates, currency);
        self.run(&query).await
    }

    pub async fn run(&self, query: &SearchQuery) -> Result<SearchOutcome> {
        tracing::info!(
            "🔎 Searching hotels in '{}' from {} to {} ({} nights)",
            query.city(),
            query.dates().checkin(),
            query.dates().checkout(),
            query.dates().nights()
        );
        if !query.is_suggested_city() {
            tracing::debug!("City '{}' is not in the suggestion list", query.city());
        }

        // Extract
        let started = Instant::now();
        let listings = self.pipeline.extract(query).await?;
        tracing::info!("Extracted {} listings in {:?}", listings.len(), started.elapsed());

        // Transform
        let started = Instant::now();
        let ranked = self
            .pipeline
            .transform(listings, query.display_currency())
            .await?;
        tracing::info!("Ranked {} listings in {:?}", ranked.len(), started.elapsed());

        // Load
        let started = Instant::now();
        let output_path = self.pipeline.load(&ranked).await?;
        tracing::info!("💾 Saved {} listings to {} in {:?}", ranked.len(), output_path, started.elapsed());

        Ok(SearchOutcome {
            ranked,
            output_path,
            display_limit: self.display_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ranking;
    use crate::domain::model::{HotelListing, RankedListings};
    use crate::utils::error::SearchError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingPipeline {
        extracts: AtomicUsize,
        loads: AtomicUsize,
        fail_extract: bool,
        listings: usize,
    }

    #[async_trait]
    impl Pipeline for CountingPipeline {
        async fn extract(&self, _query: &SearchQuery) -> Result<Vec<HotelListing>> {
            self.extracts.fetch_add(1, Ordering::SeqCst);
            if self.fail_extract {
                return Err(SearchError::FetchError {
                    cause: "connection refused".to_string(),
                });
            }
            Ok((0..self.listings)
                .map(|i| HotelListing {
                    name: format!("Hotel {}", i),
                    points: i.to_string(),
                    address: String::new(),
                    distance_to_center: String::new(),
                    price: "€ 10".to_string(),
                })
                .collect())
        }

        async fn transform(
            &self,
            listings: Vec<HotelListing>,
            _currency: DisplayCurrency,
        ) -> Result<RankedListings> {
            Ok(ranking::rank(listings))
        }

        async fn load(&self, _ranked: &RankedListings) -> Result<String> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok("hotels_data.csv".to_string())
        }
    }

    #[tokio::test]
    async fn test_invalid_dates_never_reach_pipeline() {
        let engine = SearchEngine::new(CountingPipeline::default());

        let err = engine
            .search("Paris", "12/12/2025", "10/12/2025", DisplayCurrency::Base)
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::OrderError { .. }));

        let err = engine
            .search("Paris", "2025-12-10", "12/12/2025", DisplayCurrency::Base)
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::FormatError { .. }));

        assert_eq!(engine.pipeline.extracts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fetch_error_skips_load() {
        let engine = SearchEngine::new(CountingPipeline {
            fail_extract: true,
            ..CountingPipeline::default()
        });

        let err = engine
            .search("Paris", "10/12/2025", "12/12/2025", DisplayCurrency::Base)
            .await
            .unwrap_err();

        assert!(matches!(err, SearchError::FetchError { .. }));
        assert_eq!(engine.pipeline.loads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_outcome_keeps_everything_but_displays_top_five() {
        let engine = SearchEngine::new(CountingPipeline {
            listings: 8,
            ..CountingPipeline::default()
        });

        let outcome = engine
            .search("Vienna", "01/03/2026", "04/03/2026", DisplayCurrency::Base)
            .await
            .unwrap();

        assert_eq!(outcome.ranked.len(), 8);
        assert_eq!(outcome.display().len(), 5);
        assert_eq!(outcome.display()[0].name, "Hotel 7");
        assert_eq!(outcome.output_path, "hotels_data.csv");
        assert_eq!(engine.pipeline.loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_custom_display_limit() {
        let engine = SearchEngine::new(CountingPipeline {
            listings: 4,
            ..CountingPipeline::default()
        })
        .with_display_limit(2);

        let outcome = engine
            .search("Rome", "01/03/2026", "02/03/2026", DisplayCurrency::Base)
            .await
            .unwrap();

        assert_eq!(outcome.display().len(), 2);
    }
}
