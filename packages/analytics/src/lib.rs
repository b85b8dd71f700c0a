#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derived-view engines for the incident dashboard.
//!
//! Every engine is a pure function over an immutable record slice: the
//! aggregation engine feeds the distribution charts, and the
//! filter → sort → paginate chain produces the table page. [`dashboard`]
//! wires them together behind input-keyed memoization so each stage is
//! only recomputed when one of its own inputs changes.

pub mod aggregate;
pub mod dashboard;
pub mod filter;
pub mod format;
pub mod paginate;
pub mod sort;

pub use aggregate::{aggregate, aggregate_by_race, sort_stats_by_count};
pub use dashboard::{Dashboard, DashboardPage, DashboardQuery};
pub use filter::filter;
pub use paginate::paginate;
pub use sort::sort;
