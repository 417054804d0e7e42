//! # Legup Analytics Engine
//!
//! This crate turns a flat set of settled plays into performance statistics.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of where
//!   records come from. It depends only on `core-types` (Layer 0).
//! - **One Aggregation Rule:** Every figure on the dashboard (overall, top-N
//!   cohort, per analyst) is the same `aggregate` applied to a different subset.
//!   Subsets are chosen by the filtering and grouping helpers.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: aggregation under a chosen win-rate policy.
//! - `StatsBundle`: the statistics for one subset of plays.
//! - `DateRange`, `filter_by_date`: inclusive date windows.
//! - `Dashboard`: composes a full report and analyst drill-downs.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod dashboard;
pub mod display;
pub mod engine;
pub mod error;
pub mod filter;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use dashboard::{
    AnalystDetail, AnalystRow, CohortReport, Dashboard, DashboardQuery, DashboardReport, PlayLine,
};
pub use engine::{aggregate, aggregate_by, by_net_units, select_top_n, AnalyticsEngine};
pub use error::AnalyticsError;
pub use filter::{filter_by_date, DateRange};
pub use report::StatsBundle;
