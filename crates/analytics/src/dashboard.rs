use crate::engine::{by_net_units, select_top_n, AnalyticsEngine};
use crate::error::AnalyticsError;
use crate::filter::{filter_by_date, DateRange};
use crate::report::StatsBundle;
use chrono::NaiveDate;
use core_types::{PlayRecord, WinRatePolicy};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Caller-supplied parameters for one dashboard pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// Size of the all-time top performer cohort.
    pub top_n: usize,
    /// Cap for the recent plays list; `None` shows every play in the window.
    pub recent_limit: Option<usize>,
    pub policy: WinRatePolicy,
}

impl Default for DashboardQuery {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
            top_n: 5,
            recent_limit: Some(10),
            policy: WinRatePolicy::default(),
        }
    }
}

/// The top-N cohort: chosen on all-time net units, measured in the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortReport {
    pub members: Vec<String>,
    pub stats: StatsBundle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalystRow {
    pub member: String,
    pub stats: StatsBundle,
}

/// Everything the overview screen shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    /// The resolved window; `None` when there are no plays at all.
    pub range: Option<DateRange>,
    pub overall: StatsBundle,
    pub cohort: CohortReport,
    /// Analysts with plays in the window, by net units descending.
    pub analysts: Vec<AnalystRow>,
    /// Plays in the window, most recent first.
    pub recent_plays: Vec<PlayRecord>,
    /// Every analyst in the full history, in first-seen order.
    pub members: Vec<String>,
}

/// One play in an analyst drill-down, with its own net result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayLine {
    #[serde(flatten)]
    pub record: PlayRecord,
    pub net_units: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalystDetail {
    pub member: String,
    pub range: Option<DateRange>,
    pub stats: StatsBundle,
    /// The analyst's plays in the window, most recent first.
    pub plays: Vec<PlayLine>,
}

/// Composes dashboard views from the full record set.
pub struct Dashboard;

impl Dashboard {
    /// Runs one full computation pass.
    ///
    /// The window filters the overall, cohort and per-analyst figures. Cohort
    /// membership is decided on the unfiltered history.
    pub fn build(
        records: &[PlayRecord],
        query: &DashboardQuery,
    ) -> Result<DashboardReport, AnalyticsError> {
        let engine = AnalyticsEngine::new(query.policy);
        let range = DateRange::resolve(records, query.start, query.end)?;
        let window = windowed(records, range.as_ref());

        let overall = engine.aggregate(window.iter().copied())?;

        let cohort_members = select_top_n(records, query.top_n, by_net_units)?;
        let in_cohort: HashSet<&str> = cohort_members.iter().map(String::as_str).collect();
        let cohort_stats = engine.aggregate(
            window
                .iter()
                .copied()
                .filter(|r| in_cohort.contains(r.member.as_str())),
        )?;

        let analysts = rank_by_net_units(
            engine
                .aggregate_by(window.iter().copied(), |r| r.member.clone())?
                .into_iter()
                .map(|(member, stats)| AnalystRow { member, stats })
                .collect(),
        );

        let recent_plays = recent_plays(&window, query.recent_limit)
            .into_iter()
            .cloned()
            .collect();

        tracing::debug!(
            plays = window.len(),
            analysts = analysts.len(),
            cohort = ?cohort_members,
            "Built dashboard."
        );

        Ok(DashboardReport {
            range,
            overall,
            cohort: CohortReport {
                members: cohort_members,
                stats: cohort_stats,
            },
            analysts,
            recent_plays,
            members: members(records),
        })
    }

    /// Statistics and plays for one analyst within the window.
    ///
    /// The analyst must appear somewhere in the full history; an analyst with no
    /// plays in the window gets a zeroed bundle.
    pub fn analyst_detail(
        records: &[PlayRecord],
        member: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        policy: WinRatePolicy,
    ) -> Result<AnalystDetail, AnalyticsError> {
        if !records.iter().any(|r| r.member == member) {
            return Err(AnalyticsError::UnknownMember(member.to_string()));
        }

        let range = DateRange::resolve(records, start, end)?;
        let plays: Vec<&PlayRecord> = windowed(records, range.as_ref())
            .into_iter()
            .filter(|r| r.member == member)
            .collect();

        let stats = AnalyticsEngine::new(policy).aggregate(plays.iter().copied())?;
        let plays = recent_plays(&plays, None)
            .into_iter()
            .map(|record| PlayLine {
                net_units: record.net_units(),
                record: record.clone(),
            })
            .collect();

        Ok(AnalystDetail {
            member: member.to_string(),
            range,
            stats,
            plays,
        })
    }
}

fn windowed<'a>(records: &'a [PlayRecord], range: Option<&DateRange>) -> Vec<&'a PlayRecord> {
    match range {
        Some(range) => filter_by_date(records, range),
        None => records.iter().collect(),
    }
}

/// Distinct analysts in first-seen order.
pub fn members(records: &[PlayRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.member.as_str()))
        .map(|r| r.member.clone())
        .collect()
}

/// Sorts analyst rows by net units, highest first. Ties keep their order.
pub fn rank_by_net_units(mut rows: Vec<AnalystRow>) -> Vec<AnalystRow> {
    rows.sort_by(|a, b| b.stats.net_units.cmp(&a.stats.net_units));
    rows
}

/// Most recent first, optionally capped. Plays on the same date keep their order.
pub fn recent_plays<'a>(plays: &[&'a PlayRecord], limit: Option<usize>) -> Vec<&'a PlayRecord> {
    let mut sorted = plays.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = limit {
        sorted.truncate(limit);
    }
    sorted
}
