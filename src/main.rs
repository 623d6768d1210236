//! Bootstrap binary: initializes logging, loads configuration, connects to
//! the database, and creates the schema from the entity definitions. The
//! presentation layer that drives the core sits outside this crate.

use dotenvy::dotenv;
use renobudget::config;
use renobudget::errors::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Non-fatal: env vars can be set externally
    dotenv().ok();

    let plan = config::plan::load_default_plan()?;
    info!(
        categories = plan.fractions.len(),
        default_fraction = plan.default_fraction,
        "Loaded budget plan"
    );

    let db = config::database::create_connection().await?;
    config::database::create_tables(&db).await?;
    info!(url = %config::database::get_database_url(), "Database schema ready");

    Ok(())
}
