use crate::domain::model::{HotelListing, MarkupSelectors, POINTS_NOT_GIVEN, PRICE_NOT_AVAILABLE};
use crate::utils::error::{Result, SearchError};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

pub const DEFAULT_MAX_LISTINGS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingField {
    Name,
    Points,
    Address,
    Distance,
    Price,
}

/// 欄位缺少時的處理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// 缺少就整筆略過
    Required,
    Sentinel(&'static str),
    Empty,
}

impl Fallback {
    fn value(self) -> Option<String> {
        match self {
            Fallback::Required => None,
            Fallback::Sentinel(text) => Some(text.to_string()),
            Fallback::Empty => Some(String::new()),
        }
    }
}

type Refine = fn(&str) -> Option<String>;

/// 欄位 → 缺值處理 → 文字後處理。網站改版時只需調整這張表與 selector 設定。
const RULE_TABLE: [(ListingField, Fallback, Refine); 5] = [
    (ListingField::Name, Fallback::Required, non_empty_text),
    (ListingField::Points, Fallback::Sentinel(POINTS_NOT_GIVEN), raw_text),
    (ListingField::Address, Fallback::Empty, raw_text),
    (ListingField::Distance, Fallback::Empty, distance_text),
    (ListingField::Price, Fallback::Sentinel(PRICE_NOT_AVAILABLE), raw_text),
];

#[derive(Debug)]
struct FieldRule {
    field: ListingField,
    selector: Selector,
    fallback: Fallback,
    refine: Refine,
}

#[derive(Debug)]
pub struct ListingExtractor {
    fragment: Selector,
    rules: Vec<FieldRule>,
    max_listings: usize,
}

impl ListingExtractor {
    pub fn new(selectors: &MarkupSelectors, max_listings: usize) -> Result<Self> {
        let fragment = compile("fragment", &selectors.fragment)?;
        let rules = RULE_TABLE
            .iter()
            .map(|&(field, fallback, refine)| {
                let (label, css) = selector_for(selectors, field);
                Ok(FieldRule {
                    field,
                    selector: compile(label, css)?,
                    fallback,
                    refine,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            fragment,
            rules,
            // 上限固定為 10 筆
            max_listings: max_listings.min(DEFAULT_MAX_LISTINGS),
        })
    }

    /// 依文件順序取出前 max_listings 個片段並逐一轉成 HotelListing
    pub fn extract(&self, body: &str) -> Vec<HotelListing> {
        let document = Html::parse_document(body);
        let mut listings = Vec::new();

        for (index, fragment) in document
            .select(&self.fragment)
            .take(self.max_listings)
            .enumerate()
        {
            match self.extract_fragment(fragment) {
                Some(listing) => listings.push(listing),
                None => tracing::warn!("Skipping listing fragment #{}: no hotel name found", index + 1),
            }
        }

        tracing::debug!("Extracted {} listings", listings.len());
        listings
    }

    fn extract_fragment(&self, fragment: ElementRef<'_>) -> Option<HotelListing> {
        let mut listing = HotelListing {
            name: String::new(),
            points: String::new(),
            address: String::new(),
            distance_to_center: String::new(),
            price: String::new(),
        };

        for rule in &self.rules {
            let value = fragment
                .select(&rule.selector)
                .next()
                .map(element_text)
                .and_then(|text| (rule.refine)(&text));

            let value = match value {
                Some(value) => value,
                None => {
                    tracing::debug!("Field {:?} missing, applying {:?}", rule.field, rule.fallback);
                    rule.fallback.value()?
                }
            };

            match rule.field {
                ListingField::Name => listing.name = value,
                ListingField::Points => listing.points = value,
                ListingField::Address => listing.address = value,
                ListingField::Distance => listing.distance_to_center = value,
                ListingField::Price => listing.price = value,
            }
        }

        Some(listing)
    }
}

fn selector_for(selectors: &MarkupSelectors, field: ListingField) -> (&'static str, &str) {
    match field {
        ListingField::Name => ("name", &selectors.name),
        ListingField::Points => ("points", &selectors.points),
        ListingField::Address => ("address", &selectors.address),
        ListingField::Distance => ("distance", &selectors.distance),
        ListingField::Price => ("price", &selectors.price),
    }
}

fn compile(label: &str, css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| SearchError::ExtractionError {
        message: format!("invalid {} selector '{}': {:?}", label, css, e),
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn raw_text(text: &str) -> Option<String> {
    Some(text.to_string())
}

fn non_empty_text(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

fn distance_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"([0-9][0-9.,]*)\s*(km|m)\b").expect("valid distance pattern")
    })
}

/// "2,3 km from centre" → "2,3km"
pub fn distance_text(text: &str) -> Option<String> {
    distance_pattern()
        .captures(text)
        .map(|caps| format!("{}{}", &caps[1], &caps[2]))
}
