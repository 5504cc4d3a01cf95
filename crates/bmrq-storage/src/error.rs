use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("table API error: {0}")]
    TableApi(String),

    #[error("sheets API error: {0}")]
    SheetsApi(String),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
