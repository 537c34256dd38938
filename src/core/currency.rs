use crate::domain::model::{DisplayCurrency, HotelListing};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, SearchError};

pub const DEFAULT_BASE_SYMBOL: &str = "€";
pub const DEFAULT_ALTERNATE_CODE: &str = "TL";
pub const DEFAULT_CONVERSION_RATE: f64 = 30.0;

/// 把基準幣別的價格字串換算成顯示幣別。只動 price 欄位。
#[derive(Debug, Clone)]
pub struct CurrencyNormalizer {
    base_symbol: String,
    alternate_code: String,
    rate: f64,
}

impl CurrencyNormalizer {
    pub fn new(base_symbol: impl Into<String>, alternate_code: impl Into<String>, rate: f64) -> Self {
        Self {
            base_symbol: base_symbol.into(),
            alternate_code: alternate_code.into(),
            rate,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(
            config.base_symbol(),
            config.alternate_code(),
            config.conversion_rate(),
        )
    }

    pub fn normalize(&self, mut listing: HotelListing, currency: DisplayCurrency) -> Result<HotelListing> {
        if currency == DisplayCurrency::Base || !listing.has_price() {
            return Ok(listing);
        }

        listing.price = self.convert_price(&listing.price)?;
        Ok(listing)
    }

    /// "€1.234,56" → "37036.80 TL"（匯率 30）
    pub fn convert_price(&self, price: &str) -> Result<String> {
        let amount = parse_base_amount(price, &self.base_symbol)?;
        let converted = round_half_even(amount * self.rate, 2);
        if !converted.is_finite() {
            return Err(SearchError::NormalizationError {
                price: price.to_string(),
                reason: "converted amount is out of range".to_string(),
            });
        }
        Ok(format!("{:.2} {}", converted, self.alternate_code))
    }
}

impl Default for CurrencyNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_SYMBOL, DEFAULT_ALTERNATE_CODE, DEFAULT_CONVERSION_RATE)
    }
}

/// 以來源地區慣例解析金額：'.' 為千分位，',' 為小數點
pub fn parse_base_amount(price: &str, symbol: &str) -> Result<f64> {
    let invalid = |reason: &str| SearchError::NormalizationError {
        price: price.to_string(),
        reason: reason.to_string(),
    };

    let stripped = price
        .trim()
        .trim_start_matches(symbol)
        .trim_end_matches(symbol)
        .trim();

    let numeral: String = stripped.replace('.', "").replace(',', ".");

    if numeral.is_empty() {
        return Err(invalid("no digits after removing the currency symbol"));
    }
    if !numeral.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(invalid("unexpected characters in amount"));
    }
    if numeral.matches('.').count() > 1 || !numeral.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(invalid("malformed decimal separator"));
    }

    let amount = numeral
        .parse::<f64>()
        .map_err(|e| invalid(&e.to_string()))?;

    // 位數過長時 parse 會得到 inf 而不是錯誤
    if !amount.is_finite() {
        return Err(invalid("amount is out of range"));
    }
    Ok(amount)
}

/// 四捨六入五成雙
pub fn round_half_even(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    if !scaled.is_finite() {
        // 這麼大的數已經沒有小數位可捨入
        return value;
    }
    scaled.round_ties_even() / factor
}
