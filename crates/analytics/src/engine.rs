use crate::error::AnalyticsError;
use crate::report::StatsBundle;
use core_types::{PlayRecord, PlayResult, WinRatePolicy};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::hash::Hash;

/// A stateless calculator for deriving performance statistics from plays.
///
/// The win-rate policy is fixed per engine so every subset on a dashboard is
/// measured the same way.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticsEngine {
    policy: WinRatePolicy,
}

impl AnalyticsEngine {
    pub fn new(policy: WinRatePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> WinRatePolicy {
        self.policy
    }

    /// Computes the statistics bundle for any subset of plays.
    ///
    /// Input order does not matter. An empty subset yields a zeroed bundle.
    /// Sums and ratios are checked; a value outside `Decimal` range is an
    /// `AnalyticsError::Overflow` rather than a panic.
    pub fn aggregate<'a, I>(&self, records: I) -> Result<StatsBundle, AnalyticsError>
    where
        I: IntoIterator<Item = &'a PlayRecord>,
    {
        let mut stats = StatsBundle::new();

        for record in records {
            stats.total += 1;
            match record.result {
                PlayResult::Win => stats.wins += 1,
                PlayResult::Loss => stats.losses += 1,
                PlayResult::Push => stats.pushes += 1,
            }
            stats.units_risked = stats
                .units_risked
                .checked_add(record.units_out)
                .ok_or(AnalyticsError::Overflow("units_risked"))?;
            stats.units_won = stats
                .units_won
                .checked_add(record.units_in)
                .ok_or(AnalyticsError::Overflow("units_won"))?;
        }

        stats.net_units = stats
            .units_won
            .checked_sub(stats.units_risked)
            .ok_or(AnalyticsError::Overflow("net_units"))?;

        if stats.units_risked > Decimal::ZERO {
            stats.roi = stats
                .net_units
                .checked_div(stats.units_risked)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .ok_or(AnalyticsError::Overflow("roi"))?;
        }

        let denominator = match self.policy {
            WinRatePolicy::ExcludePushes => stats.decisions(),
            WinRatePolicy::IncludePushes => stats.total,
        };
        if denominator > 0 {
            // Bounded by 100, cannot overflow.
            stats.win_rate =
                Decimal::from(stats.wins) / Decimal::from(denominator) * Decimal::ONE_HUNDRED;
        }

        Ok(stats)
    }

    /// Partitions plays by `key_fn` and aggregates each partition.
    ///
    /// Groups are returned in the order their key was first encountered.
    pub fn aggregate_by<'a, I, K, F>(
        &self,
        records: I,
        key_fn: F,
    ) -> Result<Vec<(K, StatsBundle)>, AnalyticsError>
    where
        I: IntoIterator<Item = &'a PlayRecord>,
        K: Eq + Hash + Clone,
        F: Fn(&PlayRecord) -> K,
    {
        let mut index: HashMap<K, usize> = HashMap::new();
        let mut partitions: Vec<(K, Vec<&'a PlayRecord>)> = Vec::new();

        for record in records {
            let key = key_fn(record);
            match index.get(&key) {
                Some(&slot) => partitions[slot].1.push(record),
                None => {
                    index.insert(key.clone(), partitions.len());
                    partitions.push((key, vec![record]));
                }
            }
        }

        partitions
            .into_iter()
            .map(|(key, group)| Ok((key, self.aggregate(group)?)))
            .collect()
    }
}

/// `AnalyticsEngine::aggregate` under the canonical (push-excluding) policy.
pub fn aggregate<'a, I>(records: I) -> Result<StatsBundle, AnalyticsError>
where
    I: IntoIterator<Item = &'a PlayRecord>,
{
    AnalyticsEngine::default().aggregate(records)
}

/// `AnalyticsEngine::aggregate_by` under the canonical (push-excluding) policy.
pub fn aggregate_by<'a, I, K, F>(
    records: I,
    key_fn: F,
) -> Result<Vec<(K, StatsBundle)>, AnalyticsError>
where
    I: IntoIterator<Item = &'a PlayRecord>,
    K: Eq + Hash + Clone,
    F: Fn(&PlayRecord) -> K,
{
    AnalyticsEngine::default().aggregate_by(records, key_fn)
}

/// Ranking metric for cohort selection.
pub fn by_net_units(stats: &StatsBundle) -> Decimal {
    stats.net_units
}

/// Selects the `n` members with the highest `metric` over `records`.
///
/// Callers pass the full, unfiltered history so the cohort does not move with
/// the date window. Ties keep first-encounter order.
pub fn select_top_n<'a, I, F>(
    records: I,
    n: usize,
    metric: F,
) -> Result<Vec<String>, AnalyticsError>
where
    I: IntoIterator<Item = &'a PlayRecord>,
    F: Fn(&StatsBundle) -> Decimal,
{
    let mut ranked = aggregate_by(records, |r| r.member.clone())?;
    // `sort_by` is stable, which gives the tie-break.
    ranked.sort_by(|a, b| metric(&b.1).cmp(&metric(&a.1)));
    Ok(ranked.into_iter().take(n).map(|(member, _)| member).collect())
}
