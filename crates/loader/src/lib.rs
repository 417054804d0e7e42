//! # Legup Record Loader
//!
//! This crate turns an external tabular source of plays into validated
//! `PlayRecord`s. It is the only part of the system that performs I/O.
//!
//! ## Architectural Principles
//!
//! - **Swappable Sources:** Every source implements `RecordProvider`. The
//!   aggregation code never knows whether records came from disk, a published
//!   spreadsheet, or an in-memory fixture.
//! - **Explicit Refresh Policy:** Caching is a provider too (`CachedProvider`),
//!   wrapping any other provider with a time-to-live.
//! - **Strict Parsing:** Rows without a result are dropped; any other malformed
//!   row fails the whole load. No partial record set is ever returned.
//!
//! ## Public API
//!
//! - `RecordProvider`: the async trait all sources implement.
//! - `LocalCsvProvider`, `PublishedSheetProvider`, `StaticProvider`, `CachedProvider`.
//! - `parse_csv`: the CSV-to-record parser shared by the concrete sources.
//! - `provider_from_config`: builds the configured, cached provider.
//! - `LoaderError`: the error types that can be returned from this crate.

pub mod cache;
pub mod error;
pub mod local;
pub mod parse;
pub mod provider;
pub mod sheet;

pub use cache::CachedProvider;
pub use error::LoaderError;
pub use local::LocalCsvProvider;
pub use parse::parse_csv;
pub use provider::{provider_from_config, RecordProvider, StaticProvider};
pub use sheet::PublishedSheetProvider;
