use crate::domain::model::{HotelListing, RankedListings};

/// 排序用分數。沒有任何數字的評分視為負無限大，永遠排在最後。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Score {
    Missing,
    /// 去掉前導零後的數字串；先比長度再比字典序，等同比較整數大小且不會溢位
    Value { len: usize, digits: String },
}

impl Score {
    fn from_digits(digits: &str) -> Self {
        let significant = digits.trim_start_matches('0');
        Score::Value {
            len: significant.len(),
            digits: significant.to_string(),
        }
    }
}

/// 把評分文字中所有數字串接起來："9.2" → 92，"NOT GIVEN" → Missing
pub fn score(points: &str) -> Score {
    let digits: String = points.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Score::Missing;
    }
    Score::from_digits(&digits)
}

/// 依分數由高到低穩定排序；同分維持網站原本順序
pub fn rank(listings: Vec<HotelListing>) -> RankedListings {
    let mut scored: Vec<(Score, HotelListing)> = listings
        .into_iter()
        .map(|listing| (score(&listing.points), listing))
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));

    tracing::debug!(
        "Ranked {} listings ({} without points)",
        scored.len(),
        scored.iter().filter(|(s, _)| *s == Score::Missing).count()
    );

    RankedListings::from_sorted(scored.into_iter().map(|(_, listing)| listing).collect())
}
