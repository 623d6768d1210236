//! Aggregation engine - derived, read-only rollups over the purchase set.
//!
//! Both views are recomputed in full on every request; nothing is cached or
//! incrementally maintained. The row-building functions are pure so the
//! ordering and rounding rules can be tested without a database; the async
//! wrappers fetch the project's rows and delegate.

use crate::{
    core::round2,
    entities::{Purchase, Unit, purchase, unit},
    errors::Result,
};
use sea_orm::{QueryOrder, prelude::*};
use std::collections::HashMap;

/// One row of the unit cost view: a unit's derived spend against its budget.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitCostRow {
    /// Unit identifier
    pub unit_id: i64,
    /// Unit name (rows are ordered by this)
    pub unit_name: String,
    /// The unit's budget
    pub budget: f64,
    /// Sum of `total_cost` over purchases attributed to the unit
    pub actual_cost: f64,
    /// `actual_cost / budget * 100`, rounded to 2 decimals; 0 when the
    /// budget is zero
    pub cost_percentage: f64,
}

/// One row of the category spending view.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpendingRow {
    /// Category label
    pub category: String,
    /// Sum of `total_cost` over the category's purchases
    pub total_spent: f64,
    /// Number of purchases in the category
    pub purchase_count: u64,
    /// `total_spent / purchase_count`, rounded to 2 decimals
    pub average_purchase: f64,
}

/// Builds the unit cost view from already-fetched rows.
///
/// Every unit yields a row, including units with no purchases
/// (`actual_cost = 0`). General purchases (no unit reference) are ignored.
/// Rows are ordered by unit name ascending, case-sensitive lexical order.
#[must_use]
pub fn unit_cost_rows(units: &[unit::Model], purchases: &[purchase::Model]) -> Vec<UnitCostRow> {
    let mut spent_by_unit: HashMap<i64, f64> = HashMap::new();
    for purchase in purchases {
        if let Some(unit_id) = purchase.unit_id {
            *spent_by_unit.entry(unit_id).or_insert(0.0) += purchase.total_cost;
        }
    }

    let mut rows: Vec<UnitCostRow> = units
        .iter()
        .map(|unit| {
            let actual_cost = round2(spent_by_unit.get(&unit.id).copied().unwrap_or(0.0));
            let cost_percentage = if unit.budget > 0.0 {
                round2(actual_cost / unit.budget * 100.0)
            } else {
                0.0
            };
            UnitCostRow {
                unit_id: unit.id,
                unit_name: unit.name.clone(),
                budget: unit.budget,
                actual_cost,
                cost_percentage,
            }
        })
        .collect();

    rows.sort_by(|a, b| a.unit_name.cmp(&b.unit_name));
    rows
}

/// Builds the category spending view from already-fetched purchases.
///
/// Only categories that occur in at least one purchase appear; the
/// project's declared-but-unused categories are omitted. Rows are ordered
/// by `total_spent` descending with a stable sort, so ties keep the order
/// in which the categories were first encountered in `purchases`.
#[must_use]
pub fn category_spending_rows(purchases: &[purchase::Model]) -> Vec<CategorySpendingRow> {
    let mut index_by_category: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<CategorySpendingRow> = Vec::new();

    for purchase in purchases {
        match index_by_category.get(purchase.category.as_str()) {
            Some(&i) => {
                rows[i].total_spent += purchase.total_cost;
                rows[i].purchase_count += 1;
            }
            None => {
                index_by_category.insert(purchase.category.as_str(), rows.len());
                rows.push(CategorySpendingRow {
                    category: purchase.category.clone(),
                    total_spent: purchase.total_cost,
                    purchase_count: 1,
                    average_purchase: 0.0,
                });
            }
        }
    }

    for row in &mut rows {
        row.total_spent = round2(row.total_spent);
        // Precision: purchase counts are small, well within f64 range
        #[allow(clippy::cast_precision_loss)]
        {
            row.average_purchase = round2(row.total_spent / row.purchase_count as f64);
        }
    }

    rows.sort_by(|a, b| {
        b.total_spent
            .partial_cmp(&a.total_spent)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    rows
}

/// Fetches the purchases of a project in insertion order.
///
/// Insertion order (ascending id) defines the first-encountered order used
/// by the category view's tie-breaking.
async fn fetch_purchases(
    db: &DatabaseConnection,
    project_id: i64,
) -> Result<Vec<purchase::Model>> {
    Purchase::find()
        .filter(purchase::Column::ProjectId.eq(project_id))
        .order_by_asc(purchase::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Computes the unit cost view for a project. A project with no units
/// yields an empty vector, not an error.
pub async fn unit_costs(db: &DatabaseConnection, project_id: i64) -> Result<Vec<UnitCostRow>> {
    let units = Unit::find()
        .filter(unit::Column::ProjectId.eq(project_id))
        .all(db)
        .await?;
    let purchases = fetch_purchases(db, project_id).await?;
    Ok(unit_cost_rows(&units, &purchases))
}

/// Computes the category spending view for a project. A project with no
/// purchases yields an empty vector, not an error.
pub async fn category_spending(
    db: &DatabaseConnection,
    project_id: i64,
) -> Result<Vec<CategorySpendingRow>> {
    let purchases = fetch_purchases(db, project_id).await?;
    Ok(category_spending_rows(&purchases))
}
