use crate::core::currency::{DEFAULT_ALTERNATE_CODE, DEFAULT_BASE_SYMBOL, DEFAULT_CONVERSION_RATE};
use crate::core::etl::DEFAULT_DISPLAY_LIMIT;
use crate::core::export::DEFAULT_EXPORT_FILENAME;
use crate::core::extractor::{ListingExtractor, DEFAULT_MAX_LISTINGS};
use crate::core::ConfigProvider;
use crate::domain::model::MarkupSelectors;
use crate::utils::error::{Result, SearchError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://www.booking.com/searchresults.tr.html";
pub const DEFAULT_BASE_CURRENCY: &str = "EUR";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; CrOS x86_64 8172.45.0) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/51.0.2704.64 Safari/537.36";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

/// 設定檔模型；所有欄位都有預設值，空檔案即等同內建設定
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub source: SourceConfig,
    pub extract: ExtractConfig,
    pub currency: CurrencyConfig,
    pub load: LoadConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub endpoint: String,
    pub base_currency: String,
    pub user_agent: String,
    pub accept_language: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            base_currency: DEFAULT_BASE_CURRENCY.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub max_listings: usize,
    pub selectors: MarkupSelectors,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            max_listings: DEFAULT_MAX_LISTINGS,
            selectors: MarkupSelectors::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyConfig {
    pub base_symbol: String,
    pub alternate_code: String,
    pub rate: f64,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            base_symbol: DEFAULT_BASE_SYMBOL.to_string(),
            alternate_code: DEFAULT_ALTERNATE_CODE.to_string(),
            rate: DEFAULT_CONVERSION_RATE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    pub output_path: String,
    pub filename: String,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output_path: ".".to_string(),
            filename: DEFAULT_EXPORT_FILENAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub top_n: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_DISPLAY_LIMIT,
        }
    }
}

impl SearchConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SearchError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SearchError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${USER_AGENT})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SearchError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn output_path(&self) -> &str {
        &self.load.output_path
    }

    pub fn top_n(&self) -> usize {
        self.display.top_n
    }
}

impl Validate for SearchConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.endpoint", &self.source.endpoint)?;
        validation::validate_non_empty_string("source.base_currency", &self.source.base_currency)?;
        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_non_empty_string("load.filename", &self.load.filename)?;
        validation::validate_range("extract.max_listings", self.extract.max_listings, 1, DEFAULT_MAX_LISTINGS)?;
        validation::validate_range("display.top_n", self.display.top_n, 1, self.extract.max_listings)?;
        validation::validate_non_empty_string("currency.alternate_code", &self.currency.alternate_code)?;
        validation::validate_non_empty_string("currency.base_symbol", &self.currency.base_symbol)?;
        validation::validate_positive_rate("currency.rate", self.currency.rate)?;

        if let Some(timeout) = self.source.timeout_seconds {
            validation::validate_range("source.timeout_seconds", timeout, 1, 600)?;
        }

        // selector 必須都能編譯
        ListingExtractor::new(&self.extract.selectors, self.extract.max_listings)?;

        Ok(())
    }
}

impl ConfigProvider for SearchConfig {
    fn endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn base_currency(&self) -> &str {
        &self.source.base_currency
    }

    fn user_agent(&self) -> &str {
        &self.source.user_agent
    }

    fn accept_language(&self) -> &str {
        &self.source.accept_language
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.source.timeout_seconds.map(Duration::from_secs)
    }

    fn max_listings(&self) -> usize {
        self.extract.max_listings
    }

    fn selectors(&self) -> &MarkupSelectors {
        &self.extract.selectors
    }

    fn base_symbol(&self) -> &str {
        &self.currency.base_symbol
    }

    fn alternate_code(&self) -> &str {
        &self.currency.alternate_code
    }

    fn conversion_rate(&self) -> f64 {
        self.currency.rate
    }

    fn output_filename(&self) -> &str {
        &self.load.filename
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_builtin_defaults() {
        let config = SearchConfig::from_toml_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(config.base_currency(), "EUR");
        assert_eq!(config.max_listings(), 10);
        assert_eq!(config.conversion_rate(), 30.0);
        assert_eq!(config.alternate_code(), "TL");
        assert_eq!(config.output_filename(), "hotels_data.csv");
        assert_eq!(config.top_n(), 5);
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_partial_file_overrides_only_given_fields() {
        let config = SearchConfig::from_toml_str(
            r#"
[source]
timeout_seconds = 20

[currency]
rate = 35.5

[extract.selectors]
points = "div[data-testid=\"review-score\"] > div"

[load]
output_path = "./out"
"#,
        )
        .unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(20)));
        assert_eq!(config.conversion_rate(), 35.5);
        assert_eq!(config.selectors().points, r#"div[data-testid="review-score"] > div"#);
        assert_eq!(config.selectors().name, MarkupSelectors::default().name);
        assert_eq!(config.output_path(), "./out");
        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("HOTEL_ETL_TEST_LANG", "tr-TR");
        let config = SearchConfig::from_toml_str(
            r#"
[source]
accept_language = "${HOTEL_ETL_TEST_LANG}"
user_agent = "${HOTEL_ETL_TEST_UNSET_VAR}"
"#,
        )
        .unwrap();

        assert_eq!(config.accept_language(), "tr-TR");
        assert_eq!(config.user_agent(), "${HOTEL_ETL_TEST_UNSET_VAR}");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = SearchConfig::default();
        config.currency.rate = 0.0;
        assert!(config.validate().is_err());

        let mut config = SearchConfig::default();
        config.source.endpoint = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = SearchConfig::default();
        config.display.top_n = 11;
        assert!(config.validate().is_err());

        let mut config = SearchConfig::default();
        config.extract.max_listings = 0;
        assert!(config.validate().is_err());

        let mut config = SearchConfig::default();
        config.extract.selectors.address = ":::".to_string();
        assert!(matches!(config.validate(), Err(SearchError::ExtractionError { .. })));
    }

    #[test]
    fn test_max_listings_above_ten_is_rejected() {
        let config = SearchConfig::from_toml_str("[extract]\nmax_listings = 50").unwrap();
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, SearchError::InvalidConfigValueError { ref field, .. } if field == "extract.max_listings")
        );

        let config = SearchConfig::from_toml_str("[extract]\nmax_listings = 10").unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = SearchConfig::from_toml_str("[source\nendpoint = 1").unwrap_err();
        assert!(matches!(err, SearchError::ConfigError { .. }));
    }
}
