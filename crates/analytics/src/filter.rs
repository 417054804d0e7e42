use crate::error::AnalyticsError;
use chrono::NaiveDate;
use core_types::PlayRecord;
use serde::{Deserialize, Serialize};

/// An inclusive calendar window `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// The earliest and latest play dates, or `None` for an empty set.
    pub fn bounds(records: &[PlayRecord]) -> Option<Self> {
        let start = records.iter().map(|r| r.date).min()?;
        let end = records.iter().map(|r| r.date).max()?;
        Some(Self { start, end })
    }

    /// Resolves caller-supplied bounds against the full record set.
    ///
    /// Missing bounds default to the earliest/latest play; supplied bounds are
    /// clamped into that span. Returns `None` when there are no records.
    pub fn resolve(
        records: &[PlayRecord],
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Option<Self>, AnalyticsError> {
        let Some(full) = Self::bounds(records) else {
            return Ok(None);
        };

        let start = start.unwrap_or(full.start).clamp(full.start, full.end);
        let end = end.unwrap_or(full.end).clamp(full.start, full.end);

        if start > end {
            return Err(AnalyticsError::InvalidDateRange { start, end });
        }
        Ok(Some(Self { start, end }))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The plays dated within `range`, both ends inclusive, in input order.
pub fn filter_by_date<'a>(records: &'a [PlayRecord], range: &DateRange) -> Vec<&'a PlayRecord> {
    records.iter().filter(|r| range.contains(r.date)).collect()
}
