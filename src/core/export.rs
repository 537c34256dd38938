use crate::domain::model::{HotelListing, RankedListings};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, SearchError};

pub const DEFAULT_EXPORT_FILENAME: &str = "hotels_data.csv";
pub const EXPORT_COLUMNS: [&str; 5] = ["Name", "Points", "Address", "Distance to Center", "Price"];

/// 把排序結果寫成 CSV（UTF-8），每次執行都整個覆寫
pub struct ExportWriter<'a, S: Storage> {
    storage: &'a S,
    filename: &'a str,
}

impl<'a, S: Storage> ExportWriter<'a, S> {
    pub fn new(storage: &'a S, filename: &'a str) -> Self {
        Self { storage, filename }
    }

    pub async fn write(&self, ranked: &RankedListings) -> Result<String> {
        // 先在記憶體組好整份檔案，避免寫出半份結果
        let data = encode_listings(ranked)?;

        tracing::debug!(
            "Writing {} listings ({} bytes) to {}",
            ranked.len(),
            data.len(),
            self.filename
        );
        self.storage.write_file(self.filename, &data).await?;

        Ok(self.storage.location(self.filename))
    }

    pub async fn read(&self) -> Result<Vec<HotelListing>> {
        let data = self.storage.read_file(self.filename).await?;
        read_listings(&data)
    }
}

pub fn encode_listings(ranked: &RankedListings) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    // 沒有資料時也要輸出標題列
    writer.write_record(EXPORT_COLUMNS)?;
    for listing in ranked {
        writer.serialize(listing)?;
    }

    writer
        .into_inner()
        .map_err(|e| SearchError::IoError(e.into_error()))
}

pub fn read_listings(data: &[u8]) -> Result<Vec<HotelListing>> {
    let mut reader = csv::Reader::from_reader(data);

    let headers = reader.headers()?.clone();
    if headers.iter().ne(EXPORT_COLUMNS.iter().copied()) {
        return Err(SearchError::CsvError(csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("unexpected header row: {:?}", headers),
        ))));
    }

    reader
        .deserialize()
        .collect::<std::result::Result<Vec<HotelListing>, csv::Error>>()
        .map_err(SearchError::from)
}
