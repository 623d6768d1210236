//! Shared test utilities for the budget tracker.
//!
//! This module provides common helper functions for setting up test
//! databases and creating test entities with sensible defaults.

use crate::{
    core::{partner, project, purchase, unit},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test project with sensible defaults.
///
/// # Defaults
/// * `total_budget`: 100 000
/// * `categories`: the default 15-label seed set
pub async fn create_test_project(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::project::Model> {
    project::create_project(db, name.to_string(), None, 100_000.0, None, None).await
}

/// Creates a test partner with sensible defaults.
///
/// # Defaults
/// * `total_contribution`: 10 000
/// * `status`: `"active"`
pub async fn create_test_partner(
    db: &DatabaseConnection,
    project_id: i64,
    name: &str,
) -> Result<entities::partner::Model> {
    partner::create_partner(
        db,
        project_id,
        name.to_string(),
        None,
        None,
        10_000.0,
        entities::partner::STATUS_ACTIVE.to_string(),
    )
    .await
}

/// Creates a test unit with sensible defaults.
///
/// # Defaults
/// * `unit_type`: `"apartment"`
/// * `budget`: 1 000
/// * `status`: `"planning"`
pub async fn create_test_unit(
    db: &DatabaseConnection,
    project_id: i64,
    name: &str,
) -> Result<entities::unit::Model> {
    unit::create_unit(
        db,
        project_id,
        name.to_string(),
        "apartment".to_string(),
        1_000.0,
        entities::unit::STATUS_PLANNING.to_string(),
        None,
        None,
    )
    .await
}

/// Records a single-unit test purchase with `quantity = 1`, so
/// `total_cost == unit_price == total`.
pub async fn create_test_purchase(
    db: &DatabaseConnection,
    project_id: i64,
    unit_id: i64,
    category: &str,
    total: f64,
) -> Result<entities::purchase::Model> {
    let created = purchase::record_purchase(
        db,
        project_id,
        purchase::PurchaseEntry {
            date: chrono::NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap_or_default(),
            category: category.to_string(),
            description: "Test purchase".to_string(),
            quantity: 1.0,
            unit_price: total,
            unit_ids: vec![unit_id],
            partner_id: None,
            distribute_evenly: false,
        },
    )
    .await?;
    Ok(created.into_iter().next().expect("one purchase created"))
}

/// Builds an in-memory purchase model for pure-function tests that never
/// touch the database.
#[must_use]
pub fn test_purchase_model(id: i64, category: &str, total: f64) -> entities::purchase::Model {
    entities::purchase::Model {
        id,
        project_id: 1,
        unit_id: None,
        partner_id: None,
        date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
        category: category.to_string(),
        description: String::new(),
        quantity: 1.0,
        unit_price: total,
        total_cost: total,
        receipt: None,
        created_at: chrono::Utc::now(),
    }
}

/// Sets up a complete test environment with a project.
/// Returns (db, project) for common test scenarios.
pub async fn setup_with_project() -> Result<(DatabaseConnection, entities::project::Model)> {
    let db = setup_test_db().await?;
    let project = create_test_project(&db, "Test Project").await?;
    Ok((db, project))
}

/// Sets up a complete test environment with a project and one unit.
/// Returns (db, project, unit) for purchase-related tests.
pub async fn setup_with_unit() -> Result<(
    DatabaseConnection,
    entities::project::Model,
    entities::unit::Model,
)> {
    let db = setup_test_db().await?;
    let project = create_test_project(&db, "Test Project").await?;
    let unit = create_test_unit(&db, project.id, "Test Unit").await?;
    Ok((db, project, unit))
}
