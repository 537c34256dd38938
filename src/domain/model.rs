use crate::utils::error::{Result, SearchError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::Url;

/// 表單下拉選單提供的城市，僅供提示，不做限制
pub const SUGGESTED_CITIES: [&str; 10] = [
    "Paris",
    "London",
    "Berlin",
    "Madrid",
    "Rome",
    "Amsterdam",
    "Vienna",
    "Prague",
    "Athens",
    "Lisbon",
];

pub fn is_suggested_city(city: &str) -> bool {
    SUGGESTED_CITIES
        .iter()
        .any(|c| c.eq_ignore_ascii_case(city.trim()))
}

pub const POINTS_NOT_GIVEN: &str = "NOT GIVEN";
pub const PRICE_NOT_AVAILABLE: &str = "Not available";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum DisplayCurrency {
    /// 網站報價使用的幣別
    #[default]
    Base,
    /// 以固定匯率換算後的幣別
    Alternate,
}

/// 入住與退房日期，保證 checkin < checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    checkin: NaiveDate,
    checkout: NaiveDate,
}

impl DateRange {
    pub fn new(checkin: NaiveDate, checkout: NaiveDate) -> Result<Self> {
        if checkin >= checkout {
            return Err(SearchError::OrderError {
                checkin: checkin.to_string(),
                checkout: checkout.to_string(),
            });
        }
        Ok(Self { checkin, checkout })
    }

    pub fn checkin(&self) -> NaiveDate {
        self.checkin
    }

    pub fn checkout(&self) -> NaiveDate {
        self.checkout
    }

    pub fn nights(&self) -> i64 {
        (self.checkout - self.checkin).num_days()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    city: String,
    dates: DateRange,
    display_currency: DisplayCurrency,
}

impl SearchQuery {
    pub fn new(city: impl Into<String>, dates: DateRange, display_currency: DisplayCurrency) -> Self {
        Self {
            city: city.into(),
            dates,
            display_currency,
        }
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn dates(&self) -> DateRange {
        self.dates
    }

    pub fn display_currency(&self) -> DisplayCurrency {
        self.display_currency
    }

    pub fn is_suggested_city(&self) -> bool {
        is_suggested_city(&self.city)
    }
}

/// 單筆飯店資料，欄位名稱即匯出檔的欄位標題
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelListing {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Points")]
    pub points: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Distance to Center")]
    pub distance_to_center: String,
    #[serde(rename = "Price")]
    pub price: String,
}

impl HotelListing {
    pub fn has_price(&self) -> bool {
        self.price != PRICE_NOT_AVAILABLE
    }
}

/// 依評分由高到低排序後的結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RankedListings {
    listings: Vec<HotelListing>,
}

impl RankedListings {
    pub(crate) fn from_sorted(listings: Vec<HotelListing>) -> Self {
        Self { listings }
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HotelListing> {
        self.listings.iter()
    }

    pub fn as_slice(&self) -> &[HotelListing] {
        &self.listings
    }

    /// 前 n 筆；不足 n 筆時回傳全部
    pub fn top(&self, n: usize) -> &[HotelListing] {
        &self.listings[..n.min(self.listings.len())]
    }
}

impl<'a> IntoIterator for &'a RankedListings {
    type Item = &'a HotelListing;
    type IntoIter = std::slice::Iter<'a, HotelListing>;

    fn into_iter(self) -> Self::IntoIter {
        self.listings.iter()
    }
}

/// 已組好的搜尋請求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    pub url: Url,
    pub headers: Vec<(String, String)>,
}

/// 一次搜尋的結果：完整排序清單與匯出檔路徑
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub ranked: RankedListings,
    pub output_path: String,
    pub display_limit: usize,
}

impl SearchOutcome {
    /// 交給展示層的前幾筆
    pub fn display(&self) -> &[HotelListing] {
        self.ranked.top(self.display_limit)
    }
}

/// 標記每個欄位位置的 CSS selector 表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupSelectors {
    pub fragment: String,
    pub name: String,
    pub points: String,
    pub address: String,
    pub distance: String,
    pub price: String,
}

impl Default for MarkupSelectors {
    fn default() -> Self {
        Self {
            fragment: r#"div[data-testid="property-card"]"#.to_string(),
            name: r#"div[data-testid="title"]"#.to_string(),
            points: "span.a3332d346a".to_string(),
            address: r#"span[data-testid="address"]"#.to_string(),
            distance: r#"span[data-testid="distance"]"#.to_string(),
            price: r#"span[data-testid="price-and-discounted-price"]"#.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn listing(name: &str) -> HotelListing {
        HotelListing {
            name: name.to_string(),
            points: POINTS_NOT_GIVEN.to_string(),
            address: String::new(),
            distance_to_center: String::new(),
            price: PRICE_NOT_AVAILABLE.to_string(),
        }
    }

    #[test]
    fn test_date_range_rejects_equal_dates() {
        let err = DateRange::new(date(2025, 12, 10), date(2025, 12, 10)).unwrap_err();
        assert!(matches!(err, SearchError::OrderError { .. }));
    }

    #[test]
    fn test_date_range_nights() {
        let range = DateRange::new(date(2025, 12, 30), date(2026, 1, 2)).unwrap();
        assert_eq!(range.nights(), 3);
    }

    #[test]
    fn test_suggested_city_is_not_enforced() {
        let range = DateRange::new(date(2025, 12, 10), date(2025, 12, 12)).unwrap();
        let paris = SearchQuery::new("paris", range, DisplayCurrency::Base);
        let izmir = SearchQuery::new("İzmir", range, DisplayCurrency::Base);
        assert!(paris.is_suggested_city());
        assert!(!izmir.is_suggested_city());
        assert_eq!(izmir.city(), "İzmir");
    }

    #[test]
    fn test_ranked_listings_top_is_bounded() {
        let ranked = RankedListings::from_sorted(vec![listing("A"), listing("B"), listing("C")]);
        assert_eq!(ranked.top(5).len(), 3);
        assert_eq!(ranked.top(2)[1].name, "B");
        assert_eq!(ranked.top(0).len(), 0);
    }

    #[test]
    fn test_listing_price_sentinel() {
        let mut l = listing("A");
        assert!(!l.has_price());
        l.price = "€ 10".to_string();
        assert!(l.has_price());
    }
}
