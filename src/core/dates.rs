use crate::domain::model::DateRange;
use crate::utils::error::{Result, SearchError};
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

pub const INPUT_DATE_FORMAT: &str = "%d/%m/%Y";
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$").expect("valid date pattern"))
}

/// 解析單一 DD/MM/YYYY 日期；格式不符或日期不存在都視為 FormatError
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate> {
    let format_error = || SearchError::FormatError {
        field: field.to_string(),
        value: raw.to_string(),
    };

    // 先檢查字面格式，再做日期運算
    if !date_pattern().is_match(raw) {
        return Err(format_error());
    }

    let date = NaiveDate::parse_from_str(raw, INPUT_DATE_FORMAT).map_err(|_| format_error())?;

    // 西元 0 年不是合法的日曆日期
    if date.year() < 1 {
        return Err(format_error());
    }
    Ok(date)
}

/// 驗證入住/退房日期並轉成 DateRange
pub fn validate(checkin_raw: &str, checkout_raw: &str) -> Result<DateRange> {
    let checkin = parse_date("checkin", checkin_raw)?;
    let checkout = parse_date("checkout", checkout_raw)?;

    tracing::debug!("Validated dates: {} -> {}", checkin, checkout);
    DateRange::new(checkin, checkout)
}

pub fn to_iso(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}
