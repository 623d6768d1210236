//! Unit business logic - Handles all unit-related operations.
//!
//! A unit never stores its actual cost; that is always derived by the
//! rollup module. Deleting a unit clears the reference on any purchase that
//! points at it and leaves the purchase rows in place as general spend.

use crate::{
    entities::{Partner, Purchase, Unit, purchase, unit},
    errors::{Error, Result},
};
use sea_orm::{IntoActiveModel, QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};

/// Fields that can be changed on an existing unit. `None` leaves the field
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct UnitUpdate {
    /// New unit name
    pub name: Option<String>,
    /// New free-text classification
    pub unit_type: Option<String>,
    /// New budget
    pub budget: Option<f64>,
    /// New status
    pub status: Option<String>,
    /// New completion date
    pub completion_date: Option<Date>,
    /// New funding partner (`Some(None)` clears the reference)
    pub partner_id: Option<Option<i64>>,
}

fn validate_status(status: &str) -> Result<()> {
    if unit::STATUSES.contains(&status) {
        return Ok(());
    }
    Err(Error::validation(format!(
        "Unknown unit status {status:?}, expected one of {:?}",
        unit::STATUSES
    )))
}

fn validate_budget(budget: f64) -> Result<()> {
    if !budget.is_finite() || budget < 0.0 {
        return Err(Error::validation(format!(
            "Unit budget must be a non-negative amount, got {budget}"
        )));
    }
    Ok(())
}

/// Verifies that a partner exists and belongs to the given project.
async fn validate_partner_ref<C>(db: &C, project_id: i64, partner_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let partner = Partner::find_by_id(partner_id)
        .one(db)
        .await?
        .ok_or(Error::PartnerNotFound { id: partner_id })?;
    if partner.project_id != project_id {
        return Err(Error::PartnerNotFound { id: partner_id });
    }
    Ok(())
}

/// Creates a new unit under a project.
pub async fn create_unit(
    db: &DatabaseConnection,
    project_id: i64,
    name: String,
    unit_type: String,
    budget: f64,
    status: String,
    completion_date: Option<Date>,
    partner_id: Option<i64>,
) -> Result<unit::Model> {
    if name.trim().is_empty() {
        return Err(Error::validation("Unit name cannot be empty"));
    }
    validate_budget(budget)?;
    validate_status(&status)?;

    crate::core::project::require_project(db, project_id).await?;
    if let Some(partner_id) = partner_id {
        validate_partner_ref(db, project_id, partner_id).await?;
    }

    let model = unit::ActiveModel {
        project_id: Set(project_id),
        name: Set(name.trim().to_string()),
        unit_type: Set(unit_type),
        budget: Set(budget),
        status: Set(status),
        completion_date: Set(completion_date),
        partner_id: Set(partner_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    Ok(model.insert(db).await?)
}

/// Finds a unit by its unique ID.
pub async fn get_unit_by_id(db: &DatabaseConnection, unit_id: i64) -> Result<Option<unit::Model>> {
    Unit::find_by_id(unit_id).one(db).await.map_err(Into::into)
}

/// Retrieves all units for a project, ordered by name ascending.
///
/// The ordering matches the unit cost view so a presentation layer can zip
/// the two without re-sorting.
pub async fn get_units_for_project(
    db: &DatabaseConnection,
    project_id: i64,
) -> Result<Vec<unit::Model>> {
    Unit::find()
        .filter(unit::Column::ProjectId.eq(project_id))
        .order_by_asc(unit::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Applies a partial update to a unit.
pub async fn update_unit(
    db: &DatabaseConnection,
    unit_id: i64,
    update: UnitUpdate,
) -> Result<unit::Model> {
    let existing = Unit::find_by_id(unit_id)
        .one(db)
        .await?
        .ok_or(Error::UnitNotFound { id: unit_id })?;
    let project_id = existing.project_id;
    let mut active = existing.into_active_model();

    if let Some(name) = update.name {
        if name.trim().is_empty() {
            return Err(Error::validation("Unit name cannot be empty"));
        }
        active.name = Set(name.trim().to_string());
    }
    if let Some(unit_type) = update.unit_type {
        active.unit_type = Set(unit_type);
    }
    if let Some(budget) = update.budget {
        validate_budget(budget)?;
        active.budget = Set(budget);
    }
    if let Some(status) = update.status {
        validate_status(&status)?;
        active.status = Set(status);
    }
    if let Some(completion_date) = update.completion_date {
        active.completion_date = Set(Some(completion_date));
    }
    if let Some(partner_ref) = update.partner_id {
        if let Some(partner_id) = partner_ref {
            validate_partner_ref(db, project_id, partner_id).await?;
        }
        active.partner_id = Set(partner_ref);
    }

    Ok(active.update(db).await?)
}

/// Deletes a unit, clearing the reference on any purchase that points at
/// it. Those purchases become general (unit-less) spend; they are never
/// deleted. The nullify-then-delete sequence runs in one transaction.
pub async fn delete_unit(db: &DatabaseConnection, unit_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    Unit::find_by_id(unit_id)
        .one(&txn)
        .await?
        .ok_or(Error::UnitNotFound { id: unit_id })?;

    Purchase::update_many()
        .col_expr(purchase::Column::UnitId, Expr::value(Option::<i64>::None))
        .filter(purchase::Column::UnitId.eq(unit_id))
        .exec(&txn)
        .await?;
    Unit::delete_by_id(unit_id).exec(&txn).await?;

    txn.commit().await?;
    Ok(())
}
