//! Purchase business logic - the allocation engine and purchase CRUD.
//!
//! One purchase-entry form submission expands into one or more purchase
//! rows. With even distribution enabled and multiple target units, the cost
//! is split in integer cents so that the generated rows always sum exactly
//! to `round(quantity * unit_price, 2)` - no drift from per-share rounding.
//! All rows generated by a single submission are inserted inside one
//! database transaction, so a submission either fully succeeds or leaves no
//! trace.

use crate::{
    core::round2,
    entities::{Partner, Purchase, Unit, purchase},
    errors::{Error, Result},
};
use sea_orm::{IntoActiveModel, QueryOrder, Set, TransactionTrait, prelude::*};

/// One purchase-entry form submission targeting one or more units.
#[derive(Debug, Clone)]
pub struct PurchaseEntry {
    /// Date of the expense
    pub date: Date,
    /// Spending category; must be one of the project's categories
    pub category: String,
    /// Description of the expense
    pub description: String,
    /// Quantity purchased (strictly positive)
    pub quantity: f64,
    /// Price per unit of quantity (non-negative)
    pub unit_price: f64,
    /// Target units; must be non-empty
    pub unit_ids: Vec<i64>,
    /// Optional partner the expense is attributed to
    pub partner_id: Option<i64>,
    /// Split quantity and cost evenly across all target units
    pub distribute_evenly: bool,
}

/// A purchase-entry form submission with no unit attribution ("general"
/// spend). Counted in category rollups, invisible to unit rollups.
#[derive(Debug, Clone)]
pub struct GeneralPurchaseEntry {
    /// Date of the expense
    pub date: Date,
    /// Spending category; must be one of the project's categories
    pub category: String,
    /// Description of the expense
    pub description: String,
    /// Quantity purchased (strictly positive)
    pub quantity: f64,
    /// Price per unit of quantity (non-negative)
    pub unit_price: f64,
    /// Optional partner the expense is attributed to
    pub partner_id: Option<i64>,
    /// Optional receipt reference
    pub receipt: Option<String>,
}

/// Fields that can be changed on an existing purchase. `None` leaves the
/// field untouched.
///
/// Changing `quantity` or `unit_price` recomputes `total_cost` in the same
/// update, so the stored invariant `total_cost == round2(quantity *
/// unit_price)` cannot drift through this API.
#[derive(Debug, Clone, Default)]
pub struct PurchaseUpdate {
    /// New expense date
    pub date: Option<Date>,
    /// New category (validated against the project's list)
    pub category: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New quantity (strictly positive)
    pub quantity: Option<f64>,
    /// New unit price (non-negative)
    pub unit_price: Option<f64>,
    /// New receipt reference
    pub receipt: Option<String>,
}

/// Quantity and cost apportioned to a single target unit.
#[derive(Debug, Clone, PartialEq)]
pub struct CostShare {
    /// Share of the submitted quantity
    pub quantity: f64,
    /// Share of the total cost, in whole cents
    pub total_cost: f64,
}

/// Splits a submission's quantity and cost across `targets` shares.
///
/// For a single target the share carries the full quantity and
/// `round2(quantity * unit_price)`. For multiple targets the rounded total
/// is converted to integer cents and floor-divided; the division remainder
/// goes to the FIRST share. The shares therefore always sum exactly to the
/// rounded total. Each share's quantity is `quantity / targets`, left
/// unrounded.
// Cast safety: totals are pre-rounded dollar amounts well inside i64 cent
// range; share counts are small form inputs.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
#[must_use]
pub fn allocate_shares(quantity: f64, unit_price: f64, targets: usize) -> Vec<CostShare> {
    let total = round2(quantity * unit_price);
    if targets <= 1 {
        return vec![CostShare {
            quantity,
            total_cost: total,
        }];
    }

    let total_cents = (total * 100.0).round() as i64;
    let n = targets as i64;
    let base = total_cents / n;
    let remainder = total_cents % n;
    let share_quantity = quantity / targets as f64;

    (0..n)
        .map(|i| {
            let cents = if i == 0 { base + remainder } else { base };
            CostShare {
                quantity: share_quantity,
                total_cost: cents as f64 / 100.0,
            }
        })
        .collect()
}

fn validate_amounts(quantity: f64, unit_price: f64) -> Result<()> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(Error::validation(format!(
            "Quantity must be a positive amount, got {quantity}"
        )));
    }
    if !unit_price.is_finite() || unit_price < 0.0 {
        return Err(Error::validation(format!(
            "Unit price must be a non-negative amount, got {unit_price}"
        )));
    }
    Ok(())
}

/// Verifies the category against the owning project's declared list. The
/// schema has no foreign key for categories; membership is enforced here at
/// entry time.
async fn validate_category<C>(db: &C, project_id: i64, category: &str) -> Result<()>
where
    C: ConnectionTrait,
{
    let project = crate::core::project::require_project(db, project_id).await?;
    if project.category_list().iter().any(|c| c == category) {
        return Ok(());
    }
    Err(Error::validation(format!(
        "Unknown category {category:?} for project {project_id}"
    )))
}

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

/// Records one purchase-entry submission, expanding it into one or more
/// purchase rows.
///
/// With `distribute_evenly` off (or a single target unit) exactly one row
/// is created against the first target unit, carrying the full quantity and
/// cost. With it on and N > 1 targets, N rows are created via
/// [`allocate_shares`]; each split row's description is annotated with its
/// per-unit quantity for traceability. All rows share the submission's
/// date, category, and partner, and are inserted in one transaction.
pub async fn record_purchase(
    db: &DatabaseConnection,
    project_id: i64,
    entry: PurchaseEntry,
) -> Result<Vec<purchase::Model>> {
    validate_amounts(entry.quantity, entry.unit_price)?;
    if entry.unit_ids.is_empty() {
        return Err(Error::validation(
            "At least one target unit must be selected",
        ));
    }

    let txn = db.begin().await?;

    validate_category(&txn, project_id, &entry.category).await?;
    for &unit_id in &entry.unit_ids {
        let unit = Unit::find_by_id(unit_id)
            .one(&txn)
            .await?
            .ok_or(Error::UnitNotFound { id: unit_id })?;
        if unit.project_id != project_id {
            return Err(Error::UnitNotFound { id: unit_id });
        }
    }
    if let Some(partner_id) = entry.partner_id {
        validate_partner_ref(&txn, project_id, partner_id).await?;
    }

    let split = entry.distribute_evenly && entry.unit_ids.len() > 1;
    let targets: Vec<i64> = if split {
        entry.unit_ids.clone()
    } else {
        vec![entry.unit_ids[0]]
    };
    let shares = allocate_shares(entry.quantity, entry.unit_price, targets.len());

    let now = chrono::Utc::now();
    let mut created = Vec::with_capacity(targets.len());
    for (unit_id, share) in targets.into_iter().zip(shares) {
        let description = if split {
            format!("{} [{:.3} units]", entry.description, share.quantity)
        } else {
            entry.description.clone()
        };
        let model = purchase::ActiveModel {
            project_id: Set(project_id),
            unit_id: Set(Some(unit_id)),
            partner_id: Set(entry.partner_id),
            date: Set(entry.date),
            category: Set(entry.category.clone()),
            description: Set(description),
            quantity: Set(share.quantity),
            unit_price: Set(entry.unit_price),
            total_cost: Set(share.total_cost),
            receipt: Set(None),
            created_at: Set(now),
            ..Default::default()
        };
        created.push(model.insert(&txn).await?);
    }

    txn.commit().await?;
    Ok(created)
}

/// Records a general (unit-less) purchase. Same validation as
/// [`record_purchase`] minus the unit checks; always exactly one row.
pub async fn record_general_purchase(
    db: &DatabaseConnection,
    project_id: i64,
    entry: GeneralPurchaseEntry,
) -> Result<purchase::Model> {
    validate_amounts(entry.quantity, entry.unit_price)?;

    let txn = db.begin().await?;

    validate_category(&txn, project_id, &entry.category).await?;
    if let Some(partner_id) = entry.partner_id {
        validate_partner_ref(&txn, project_id, partner_id).await?;
    }

    let model = purchase::ActiveModel {
        project_id: Set(project_id),
        unit_id: Set(None),
        partner_id: Set(entry.partner_id),
        date: Set(entry.date),
        category: Set(entry.category),
        description: Set(entry.description),
        quantity: Set(entry.quantity),
        unit_price: Set(entry.unit_price),
        total_cost: Set(round2(entry.quantity * entry.unit_price)),
        receipt: Set(entry.receipt),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let created = model.insert(&txn).await?;

    txn.commit().await?;
    Ok(created)
}

/// Finds a purchase by its unique ID.
pub async fn get_purchase_by_id(
    db: &DatabaseConnection,
    purchase_id: i64,
) -> Result<Option<purchase::Model>> {
    Purchase::find_by_id(purchase_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all purchases for a project, newest expense first.
pub async fn get_purchases_for_project(
    db: &DatabaseConnection,
    project_id: i64,
) -> Result<Vec<purchase::Model>> {
    Purchase::find()
        .filter(purchase::Column::ProjectId.eq(project_id))
        .order_by_desc(purchase::Column::Date)
        .order_by_desc(purchase::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all purchases attributed to a specific unit, newest first.
pub async fn get_purchases_for_unit(
    db: &DatabaseConnection,
    unit_id: i64,
) -> Result<Vec<purchase::Model>> {
    Purchase::find()
        .filter(purchase::Column::UnitId.eq(unit_id))
        .order_by_desc(purchase::Column::Date)
        .order_by_desc(purchase::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Applies a partial update to a purchase, recomputing `total_cost`
/// whenever quantity or unit price change.
pub async fn update_purchase(
    db: &DatabaseConnection,
    purchase_id: i64,
    update: PurchaseUpdate,
) -> Result<purchase::Model> {
    let existing = Purchase::find_by_id(purchase_id)
        .one(db)
        .await?
        .ok_or(Error::PurchaseNotFound { id: purchase_id })?;

    let quantity = update.quantity.unwrap_or(existing.quantity);
    let unit_price = update.unit_price.unwrap_or(existing.unit_price);
    validate_amounts(quantity, unit_price)?;

    if let Some(category) = &update.category {
        validate_category(db, existing.project_id, category).await?;
    }

    let recompute = update.quantity.is_some() || update.unit_price.is_some();
    let mut active = existing.into_active_model();

    if let Some(date) = update.date {
        active.date = Set(date);
    }
    if let Some(category) = update.category {
        active.category = Set(category);
    }
    if let Some(description) = update.description {
        active.description = Set(description);
    }
    if let Some(receipt) = update.receipt {
        active.receipt = Set(Some(receipt));
    }
    if recompute {
        active.quantity = Set(quantity);
        active.unit_price = Set(unit_price);
        active.total_cost = Set(round2(quantity * unit_price));
    }

    Ok(active.update(db).await?)
}

/// Deletes a purchase.
pub async fn delete_purchase(db: &DatabaseConnection, purchase_id: i64) -> Result<()> {
    let existing = Purchase::find_by_id(purchase_id)
        .one(db)
        .await?
        .ok_or(Error::PurchaseNotFound { id: purchase_id })?;
    existing.delete(db).await?;
    Ok(())
}
