//! Core business logic - framework-agnostic project, partner, unit, and
//! purchase operations plus the derived rollup, planner, report, and export
//! layers. Nothing in here knows about a UI; every function takes the
//! database connection and the owning project id explicitly.

/// Tabular export building and the remote spreadsheet boundary
pub mod export;
/// Partner CRUD and reference-nullifying deletion
pub mod partner;
/// Budget category planner - fraction-table budget splits
pub mod planner;
/// Project CRUD, category list management, cascade deletion
pub mod project;
/// Purchase recording (allocation engine) and purchase CRUD
pub mod purchase;
/// Reporting presentation - status thresholds and display formatting
pub mod report;
/// Aggregation engine - unit cost and category spending rollups
pub mod rollup;
/// Unit CRUD and reference-nullifying deletion
pub mod unit;

/// Rounds a dollar amount to two decimal places (cents).
///
/// All persisted and reported money values in this crate go through this
/// helper so that the same value always rounds the same way.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
