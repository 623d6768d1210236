//! Project business logic - Handles all project-related operations.
//!
//! Provides functions for creating, retrieving, updating, and deleting
//! projects. Projects own everything else in the system, so deletion
//! cascades to partners, units, and purchases inside one database
//! transaction.

use crate::{
    entities::{Partner, Project, Purchase, Unit, partner, project, purchase, unit},
    errors::{Error, Result},
};
use sea_orm::{IntoActiveModel, QueryOrder, Set, TransactionTrait, prelude::*};

/// The default category seed set applied to new projects that do not supply
/// their own list.
pub const DEFAULT_CATEGORIES: [&str; 15] = [
    "Bathroom",
    "Kitchen",
    "Bedroom",
    "Living Room",
    "Plumbing",
    "Electrical",
    "Flooring",
    "Painting",
    "Roofing",
    "Windows",
    "Doors",
    "HVAC",
    "Insulation",
    "Landscaping",
    "Permits",
];

/// Fields that can be changed on an existing project. `None` leaves the
/// field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    /// New project name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New total budget
    pub total_budget: Option<f64>,
    /// New location
    pub location: Option<String>,
    /// Replacement category list
    pub categories: Option<Vec<String>>,
}

/// Validates and JSON-encodes a category list: labels are trimmed,
/// blank labels rejected, duplicates dropped while preserving order.
fn encode_categories(labels: &[String]) -> Result<String> {
    let mut seen = Vec::with_capacity(labels.len());
    for label in labels {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(Error::validation("Category labels cannot be empty"));
        }
        if !seen.iter().any(|s: &String| s == trimmed) {
            seen.push(trimmed.to_string());
        }
    }
    if seen.is_empty() {
        return Err(Error::validation(
            "A project needs at least one spending category",
        ));
    }
    serde_json::to_string(&seen).map_err(|e| Error::Config {
        message: format!("Failed to encode category list: {e}"),
    })
}

/// Creates a new project, seeding the default category set when no custom
/// list is supplied.
///
/// Validates that the name is non-empty and the total budget is a finite,
/// non-negative amount.
pub async fn create_project(
    db: &DatabaseConnection,
    name: String,
    description: Option<String>,
    total_budget: f64,
    location: Option<String>,
    categories: Option<Vec<String>>,
) -> Result<project::Model> {
    if name.trim().is_empty() {
        return Err(Error::validation("Project name cannot be empty"));
    }
    if !total_budget.is_finite() || total_budget < 0.0 {
        return Err(Error::validation(format!(
            "Total budget must be a non-negative amount, got {total_budget}"
        )));
    }

    let labels = categories
        .unwrap_or_else(|| DEFAULT_CATEGORIES.iter().map(ToString::to_string).collect());
    let encoded = encode_categories(&labels)?;

    let now = chrono::Utc::now();
    let model = project::ActiveModel {
        name: Set(name.trim().to_string()),
        description: Set(description),
        total_budget: Set(total_budget),
        location: Set(location),
        categories: Set(encoded),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    Ok(model.insert(db).await?)
}

/// Finds a project by its unique ID.
pub async fn get_project_by_id(
    db: &DatabaseConnection,
    project_id: i64,
) -> Result<Option<project::Model>> {
    Project::find_by_id(project_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a project by its unique ID, failing with `ProjectNotFound` when it
/// does not resolve. Used by the other core modules when a project is a
/// required collaborator rather than an optional lookup.
pub async fn require_project<C>(db: &C, project_id: i64) -> Result<project::Model>
where
    C: ConnectionTrait,
{
    Project::find_by_id(project_id)
        .one(db)
        .await?
        .ok_or(Error::ProjectNotFound { id: project_id })
}

/// Retrieves all projects, ordered alphabetically by name.
pub async fn get_all_projects(db: &DatabaseConnection) -> Result<Vec<project::Model>> {
    Project::find()
        .order_by_asc(project::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Applies a partial update to a project and touches `updated_at`.
///
/// Changed fields go through the same validation as creation.
pub async fn update_project(
    db: &DatabaseConnection,
    project_id: i64,
    update: ProjectUpdate,
) -> Result<project::Model> {
    let existing = require_project(db, project_id).await?;
    let mut active = existing.into_active_model();

    if let Some(name) = update.name {
        if name.trim().is_empty() {
            return Err(Error::validation("Project name cannot be empty"));
        }
        active.name = Set(name.trim().to_string());
    }
    if let Some(description) = update.description {
        active.description = Set(Some(description));
    }
    if let Some(total_budget) = update.total_budget {
        if !total_budget.is_finite() || total_budget < 0.0 {
            return Err(Error::validation(format!(
                "Total budget must be a non-negative amount, got {total_budget}"
            )));
        }
        active.total_budget = Set(total_budget);
    }
    if let Some(location) = update.location {
        active.location = Set(Some(location));
    }
    if let Some(labels) = update.categories {
        active.categories = Set(encode_categories(&labels)?);
    }

    active.updated_at = Set(chrono::Utc::now());
    Ok(active.update(db).await?)
}

/// Deletes a project and everything it owns: purchases, units, and partners
/// are removed first, then the project row, all in one transaction.
pub async fn delete_project(db: &DatabaseConnection, project_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    require_project(&txn, project_id).await?;

    Purchase::delete_many()
        .filter(purchase::Column::ProjectId.eq(project_id))
        .exec(&txn)
        .await?;
    Unit::delete_many()
        .filter(unit::Column::ProjectId.eq(project_id))
        .exec(&txn)
        .await?;
    Partner::delete_many()
        .filter(partner::Column::ProjectId.eq(project_id))
        .exec(&txn)
        .await?;
    Project::delete_by_id(project_id).exec(&txn).await?;

    txn.commit().await?;
    Ok(())
}
