use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpendwiseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "xlsx")]
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Missing required columns: {0}")]
    MissingColumns(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, SpendwiseError>;
