use crate::error::LoaderError;
use chrono::{NaiveDate, NaiveDateTime};
use core_types::{PlayRecord, PlayResult};
use rust_decimal::Decimal;
use std::io::Read;
use std::str::FromStr;

// Column names agreed with the data provider.
pub const COL_DATE: &str = "DATE";
pub const COL_PLAY: &str = "PLAY";
pub const COL_ODDS: &str = "ODDS";
pub const COL_MEMBER: &str = "MEMBER";
pub const COL_RESULT: &str = "MASTER";
pub const COL_UNITS_OUT: &str = "UNITS_OUT";
pub const COL_UNITS_IN: &str = "UNITS_IN";

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%b %d, %Y",
    "%B %d, %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Largest stake or return accepted for a single play.
pub const MAX_UNITS: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Positions of the required columns within a header row.
struct Columns {
    date: usize,
    play: usize,
    odds: usize,
    member: usize,
    result: usize,
    units_out: usize,
    units_in: usize,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Self, LoaderError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| LoaderError::SourceUnavailable(format!("missing column '{name}'")))
        };

        Ok(Self {
            date: find(COL_DATE)?,
            play: find(COL_PLAY)?,
            odds: find(COL_ODDS)?,
            member: find(COL_MEMBER)?,
            result: find(COL_RESULT)?,
            units_out: find(COL_UNITS_OUT)?,
            units_in: find(COL_UNITS_IN)?,
        })
    }
}

/// Parses a CSV document of plays into records, preserving source order.
///
/// Rows with an empty result are skipped. Any other bad cell (date, result
/// code, units) fails the whole load.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<PlayRecord>, LoaderError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns = Columns::locate(rdr.headers()?)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in rdr.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let cell = |idx: usize| row.get(idx).unwrap_or("");

        let raw_result = cell(columns.result);
        if raw_result.is_empty() {
            skipped += 1;
            continue;
        }

        let result = PlayResult::from_str(raw_result).map_err(|e| LoaderError::MalformedRecord {
            line,
            reason: e.to_string(),
        })?;

        let raw_date = cell(columns.date);
        let date = parse_date(raw_date).ok_or_else(|| LoaderError::MalformedRecord {
            line,
            reason: format!("unparseable date '{raw_date}'"),
        })?;

        records.push(PlayRecord {
            date,
            play: cell(columns.play).to_string(),
            odds: cell(columns.odds).to_string(),
            member: cell(columns.member).to_string(),
            result,
            units_out: parse_units(cell(columns.units_out), COL_UNITS_OUT, line)?,
            units_in: parse_units(cell(columns.units_in), COL_UNITS_IN, line)?,
        });
    }

    if skipped > 0 {
        tracing::debug!(skipped, "Dropped rows without a result.");
    }

    Ok(records)
}

/// Parses the date notations seen in the source sheet.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// An empty cell counts as zero units.
fn parse_units(raw: &str, column: &str, line: u64) -> Result<Decimal, LoaderError> {
    if raw.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let value = Decimal::from_str(raw).map_err(|_| LoaderError::MalformedRecord {
        line,
        reason: format!("{column} is not a number: '{raw}'"),
    })?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(LoaderError::MalformedRecord {
            line,
            reason: format!("{column} must not be negative: '{raw}'"),
        });
    }
    if value > MAX_UNITS {
        return Err(LoaderError::MalformedRecord {
            line,
            reason: format!("{column} exceeds {MAX_UNITS}: '{raw}'"),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const HEADER: &str = "DATE,PLAY,ODDS,MEMBER,MASTER,UNITS_OUT,UNITS_IN\n";

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_rows_in_source_order() {
        let csv = format!(
            "{HEADER}2025-01-02,Chiefs -3,-110,Dana,W,1.1,2.1\n\
             01/03/2025,Over 47.5,+105,Riley,L,1,0\n"
        );
        let records = parse_csv(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, ymd(2025, 1, 2));
        assert_eq!(records[0].member, "Dana");
        assert_eq!(records[0].result, PlayResult::Win);
        assert_eq!(records[0].units_out, dec!(1.1));
        assert_eq!(records[0].units_in, dec!(2.1));
        assert_eq!(records[1].date, ymd(2025, 1, 3));
        assert_eq!(records[1].odds, "+105");
        assert_eq!(records[1].result, PlayResult::Loss);
    }

    #[test]
    fn drops_rows_without_a_result() {
        let csv = format!(
            "{HEADER}2025-01-02,Pending play,-110,Dana,,1,\n\
             2025-01-02,Settled play,-110,Dana,P,1,1\n"
        );
        let records = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].play, "Settled play");
    }

    #[test]
    fn unparseable_date_fails_the_whole_load() {
        let csv = format!(
            "{HEADER}2025-01-02,A,-110,Dana,W,1,2\n\
             someday,B,-110,Dana,L,1,0\n"
        );
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        match err {
            LoaderError::MalformedRecord { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("someday"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unknown_result_code_is_malformed() {
        let csv = format!("{HEADER}2025-01-02,A,-110,Dana,V,1,0\n");
        assert!(matches!(
            parse_csv(csv.as_bytes()),
            Err(LoaderError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn negative_units_are_malformed() {
        let csv = format!("{HEADER}2025-01-02,A,-110,Dana,L,-1,0\n");
        assert!(matches!(
            parse_csv(csv.as_bytes()),
            Err(LoaderError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn oversized_units_are_malformed() {
        let csv = format!("{HEADER}2025-01-02,A,-110,Dana,W,0.0001,10000000000000000000000000\n");
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        match err {
            LoaderError::MalformedRecord { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains(COL_UNITS_IN));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let at_cap = format!("{HEADER}2025-01-02,A,-110,Dana,W,1000000000,0\n");
        assert_eq!(parse_csv(at_cap.as_bytes()).unwrap()[0].units_out, MAX_UNITS);
    }

    #[test]
    fn empty_units_count_as_zero() {
        let csv = format!("{HEADER}2025-01-02,A,-110,Dana,L,1,\n");
        let records = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(records[0].units_in, Decimal::ZERO);
    }

    #[test]
    fn missing_column_is_source_unavailable() {
        let csv = "DATE,PLAY,ODDS,MEMBER,UNITS_OUT,UNITS_IN\n2025-01-02,A,-110,Dana,1,0\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoaderError::SourceUnavailable(msg) if msg.contains("MASTER")));
    }

    #[test]
    fn extra_columns_and_header_order_do_not_matter() {
        let csv = "NOTES,MEMBER,MASTER,DATE,UNITS_IN,UNITS_OUT,ODDS,PLAY\n\
                   x,Dana,w,2025-02-01,0,1,-120,Celtics ML\n";
        let records = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(records[0].member, "Dana");
        assert_eq!(records[0].result, PlayResult::Win);
        assert_eq!(records[0].play, "Celtics ML");
        assert_eq!(records[0].units_out, dec!(1));
    }

    #[test]
    fn accepts_common_date_notations() {
        assert_eq!(parse_date("2025-03-09"), Some(ymd(2025, 3, 9)));
        assert_eq!(parse_date("3/9/2025"), Some(ymd(2025, 3, 9)));
        assert_eq!(parse_date("3/9/25"), Some(ymd(2025, 3, 9)));
        assert_eq!(parse_date("Mar 09, 2025"), Some(ymd(2025, 3, 9)));
        assert_eq!(parse_date("2025-03-09 18:30:00"), Some(ymd(2025, 3, 9)));
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2025-13-01"), None);
    }
}
