use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("The play source is unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },
}

impl From<std::io::Error> for LoaderError {
    fn from(err: std::io::Error) -> Self {
        LoaderError::SourceUnavailable(err.to_string())
    }
}

impl From<csv::Error> for LoaderError {
    fn from(err: csv::Error) -> Self {
        LoaderError::SourceUnavailable(format!("invalid CSV: {err}"))
    }
}

impl From<reqwest::Error> for LoaderError {
    fn from(err: reqwest::Error) -> Self {
        LoaderError::SourceUnavailable(format!("request failed: {err}"))
    }
}
