use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("No plays found for analyst '{0}'")]
    UnknownMember(String),

    #[error("Arithmetic overflow while computing '{0}'")]
    Overflow(&'static str),
}
