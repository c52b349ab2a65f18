use thiserror::Error;

pub type Result<T> = std::result::Result<T, VizError>;

#[derive(Error, Debug)]
pub enum VizError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] Box<reqwest::Error>),
    #[error("CSV error: {0}")]
    Csv(#[from] Box<csv::Error>),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Malformed row {row}: column '{field}' has invalid value {value:?}")]
    MalformedRow {
        row: usize,
        field: &'static str,
        value: String,
    },
    #[error("Invalid selection rectangle: {0}")]
    InvalidRect(String),
}

// Manual From implementations for unboxed to boxed conversions
impl From<reqwest::Error> for VizError {
    fn from(err: reqwest::Error) -> Self {
        VizError::Http(Box::new(err))
    }
}

impl From<csv::Error> for VizError {
    fn from(err: csv::Error) -> Self {
        VizError::Csv(Box::new(err))
    }
}
