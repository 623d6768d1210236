//! Database configuration module.
//!
//! Handles the `SQLite` database connection and table creation using
//! `SeaORM`. Tables are generated from the entity definitions via
//! `Schema::create_table_from_entity`, so the database schema always
//! matches the Rust struct definitions without hand-written SQL.

use crate::entities::{Partner, Project, Purchase, Unit};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from the `DATABASE_URL` environment variable,
/// falling back to a default local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/renobudget.sqlite".to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all tables from the entity definitions.
///
/// Creation order follows the ownership hierarchy: projects first, then
/// partners, units, and purchases.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let project_table = schema.create_table_from_entity(Project);
    let partner_table = schema.create_table_from_entity(Partner);
    let unit_table = schema.create_table_from_entity(Unit);
    let purchase_table = schema.create_table_from_entity(Purchase);

    db.execute(builder.build(&project_table)).await?;
    db.execute(builder.build(&partner_table)).await?;
    db.execute(builder.build(&unit_table)).await?;
    db.execute(builder.build(&purchase_table)).await?;

    Ok(())
}
