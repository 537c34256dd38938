use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid date for {field}: '{value}' (expected DD/MM/YYYY)")]
    FormatError { field: String, value: String },

    #[error("Check-out date {checkout} must be after check-in date {checkin}")]
    OrderError { checkin: String, checkout: String },

    #[error("Network request failed: {cause}")]
    FetchError { cause: String },

    #[error("Cannot normalize price '{price}': {reason}")]
    NormalizationError { price: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Extraction rule error: {message}")]
    ExtractionError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// 對外暴露的錯誤種類，展示層依此決定訊息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Format,
    Order,
    Fetch,
    Normalization,
    Io,
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::FormatError { .. } => ErrorKind::Format,
            SearchError::OrderError { .. } => ErrorKind::Order,
            SearchError::FetchError { .. } => ErrorKind::Fetch,
            SearchError::NormalizationError { .. } => ErrorKind::Normalization,
            SearchError::IoError(_) | SearchError::CsvError(_) => ErrorKind::Io,
            SearchError::ExtractionError { .. }
            | SearchError::ConfigError { .. }
            | SearchError::InvalidConfigValueError { .. } => ErrorKind::Config,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.kind() {
            // 使用者輸入錯誤，修正後重送即可
            ErrorKind::Format | ErrorKind::Order => ErrorSeverity::Low,
            ErrorKind::Fetch => ErrorSeverity::Medium,
            ErrorKind::Normalization => ErrorSeverity::High,
            ErrorKind::Io | ErrorKind::Config => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SearchError::FormatError { .. } => {
                "Invalid date format. Please enter dates in DD/MM/YYYY format.".to_string()
            }
            SearchError::OrderError { .. } => {
                "Check-out date must be after the check-in date.".to_string()
            }
            SearchError::FetchError { .. } => {
                "Failed to fetch data from the server.".to_string()
            }
            SearchError::NormalizationError { price, .. } => {
                format!("Could not convert the listed price '{}'.", price)
            }
            SearchError::IoError(_) | SearchError::CsvError(_) => {
                "Failed to save the results file.".to_string()
            }
            other => format!("Configuration problem: {}", other),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Format => "Use two-digit day, two-digit month and four-digit year, e.g. 10/12/2025",
            ErrorKind::Order => "Pick a check-out date later than the check-in date",
            ErrorKind::Fetch => "Make sure you have an internet connection and try again",
            ErrorKind::Normalization => {
                "The site returned a price in an unexpected format; search in the base currency instead"
            }
            ErrorKind::Io => "Check that the output directory exists and is writable",
            ErrorKind::Config => "Review the configuration file and command line arguments",
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
