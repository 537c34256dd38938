use crate::core::dates::to_iso;
use crate::domain::model::{OutgoingRequest, SearchQuery};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, SearchError};
use url::Url;

// 固定的同行人數與房間數
pub const GROUP_ADULTS: u32 = 2;
pub const NO_ROOMS: u32 = 1;
pub const GROUP_CHILDREN: u32 = 0;

/// 把 SearchQuery 組成對外搜尋請求。幣別永遠使用基準幣別，
/// 使用者選的顯示幣別只在資料回來之後才套用。
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    endpoint: String,
    base_currency: String,
    user_agent: String,
    accept_language: String,
}

impl QueryBuilder {
    pub fn new(
        endpoint: impl Into<String>,
        base_currency: impl Into<String>,
        user_agent: impl Into<String>,
        accept_language: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            base_currency: base_currency.into(),
            user_agent: user_agent.into(),
            accept_language: accept_language.into(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(
            config.endpoint(),
            config.base_currency(),
            config.user_agent(),
            config.accept_language(),
        )
    }

    pub fn build(&self, query: &SearchQuery) -> Result<OutgoingRequest> {
        let dates = query.dates();
        let params = [
            ("ss", query.city().to_string()),
            ("checkin", to_iso(dates.checkin())),
            ("checkout", to_iso(dates.checkout())),
            ("group_adults", GROUP_ADULTS.to_string()),
            ("no_rooms", NO_ROOMS.to_string()),
            ("group_children", GROUP_CHILDREN.to_string()),
            ("selected_currency", self.base_currency.clone()),
        ];

        let url = Url::parse_with_params(&self.endpoint, &params).map_err(|e| {
            SearchError::InvalidConfigValueError {
                field: "source.endpoint".to_string(),
                value: self.endpoint.clone(),
                reason: format!("Invalid URL format: {}", e),
            }
        })?;

        tracing::debug!("Built search request: {}", url);

        Ok(OutgoingRequest {
            url,
            headers: vec![
                ("User-Agent".to_string(), self.user_agent.clone()),
                ("Accept-Language".to_string(), self.accept_language.clone()),
            ],
        })
    }
}
