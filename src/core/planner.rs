//! Budget category planner - derives a target spending split across a
//! project's category list from its total budget.
//!
//! The split comes from a fraction table keyed by category name; categories
//! with no explicit entry get the flat default fraction. The fractions are
//! deliberately not required to sum to 1.0 - with many categories on the
//! default share the implied total can exceed 100%, and that is accepted.
//! Nothing here is persisted; the plan is recomputed per view.

use crate::{
    core::round2,
    entities::{Purchase, purchase},
    errors::Result,
};
use sea_orm::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;

/// Fraction of the total budget each category gets by default when the
/// table has no explicit entry for it.
pub const DEFAULT_FRACTION: f64 = 0.05;

/// The category-to-fraction table driving the planner.
///
/// Loadable from configuration (see `config::plan`); the `Default` impl
/// carries the built-in table.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanConfig {
    /// Explicit fraction per category name
    #[serde(default)]
    pub fractions: HashMap<String, f64>,
    /// Fraction for categories absent from `fractions`
    #[serde(default = "default_fraction")]
    pub default_fraction: f64,
}

fn default_fraction() -> f64 {
    DEFAULT_FRACTION
}

impl Default for PlanConfig {
    fn default() -> Self {
        let fractions = [
            ("Bathroom", 0.15),
            ("Kitchen", 0.15),
            ("Bedroom", 0.12),
            ("Plumbing", 0.10),
            ("Electrical", 0.08),
            ("Flooring", 0.10),
        ]
        .into_iter()
        .map(|(name, fraction)| (name.to_string(), fraction))
        .collect();

        PlanConfig {
            fractions,
            default_fraction: DEFAULT_FRACTION,
        }
    }
}

impl PlanConfig {
    /// Returns the budget fraction for a category.
    #[must_use]
    pub fn fraction_for(&self, category: &str) -> f64 {
        self.fractions
            .get(category)
            .copied()
            .unwrap_or(self.default_fraction)
    }
}

/// One row of the planned budget split.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBudgetRow {
    /// Category label
    pub category: String,
    /// `total_budget * fraction` for this category
    pub budget_amount: f64,
    /// Sum of `total_cost` over the category's purchases
    pub spent_amount: f64,
    /// `budget_amount - spent_amount`; negative when over budget, never
    /// clamped
    pub remaining: f64,
}

/// Builds the planned split from already-fetched data. One row per declared
/// category, in declared order, whether or not it has purchases.
#[must_use]
pub fn category_budget_rows(
    total_budget: f64,
    categories: &[String],
    purchases: &[purchase::Model],
    plan: &PlanConfig,
) -> Vec<CategoryBudgetRow> {
    let mut spent_by_category: HashMap<&str, f64> = HashMap::new();
    for purchase in purchases {
        *spent_by_category
            .entry(purchase.category.as_str())
            .or_insert(0.0) += purchase.total_cost;
    }

    categories
        .iter()
        .map(|category| {
            let budget_amount = round2(total_budget * plan.fraction_for(category));
            let spent_amount = round2(
                spent_by_category
                    .get(category.as_str())
                    .copied()
                    .unwrap_or(0.0),
            );
            CategoryBudgetRow {
                category: category.clone(),
                budget_amount,
                spent_amount,
                remaining: round2(budget_amount - spent_amount),
            }
        })
        .collect()
}

/// Computes the planned budget split for a project.
pub async fn category_budgets(
    db: &DatabaseConnection,
    project_id: i64,
    plan: &PlanConfig,
) -> Result<Vec<CategoryBudgetRow>> {
    let project = crate::core::project::require_project(db, project_id).await?;
    let purchases = Purchase::find()
        .filter(purchase::Column::ProjectId.eq(project_id))
        .all(db)
        .await?;
    Ok(category_budget_rows(
        project.total_budget,
        &project.category_list(),
        &purchases,
        plan,
    ))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_fraction_table_defaults() {
        let plan = PlanConfig::default();
        assert_eq!(plan.fraction_for("Kitchen"), 0.15);
        assert_eq!(plan.fraction_for("Bathroom"), 0.15);
        assert_eq!(plan.fraction_for("Bedroom"), 0.12);
        assert_eq!(plan.fraction_for("Plumbing"), 0.10);
        assert_eq!(plan.fraction_for("Electrical"), 0.08);
        assert_eq!(plan.fraction_for("Flooring"), 0.10);
        // Anything unlisted gets the flat default share
        assert_eq!(plan.fraction_for("Landscaping"), 0.05);
        assert_eq!(plan.fraction_for("Custom Tilework"), 0.05);
    }

    #[test]
    fn test_category_budget_amounts() {
        let plan = PlanConfig::default();
        let rows = category_budget_rows(
            100_000.0,
            &labels(&["Kitchen", "Landscaping"]),
            &[],
            &plan,
        );

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category, "Kitchen");
        assert_eq!(rows[0].budget_amount, 15_000.0);
        assert_eq!(rows[1].category, "Landscaping");
        assert_eq!(rows[1].budget_amount, 5_000.0);
    }

    #[test]
    fn test_remaining_goes_negative_when_over_budget() {
        let plan = PlanConfig::default();
        let purchases = vec![test_purchase_model(1, "Landscaping", 6_500.0)];
        let rows = category_budget_rows(100_000.0, &labels(&["Landscaping"]), &purchases, &plan);

        assert_eq!(rows[0].budget_amount, 5_000.0);
        assert_eq!(rows[0].spent_amount, 6_500.0);
        assert_eq!(rows[0].remaining, -1_500.0);
    }

    #[test]
    fn test_declared_order_preserved_and_unused_categories_kept() {
        let plan = PlanConfig::default();
        let purchases = vec![test_purchase_model(1, "Doors", 100.0)];
        let rows = category_budget_rows(
            10_000.0,
            &labels(&["Windows", "Doors", "Roofing"]),
            &purchases,
            &plan,
        );

        let names: Vec<&str> = rows.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(names, vec!["Windows", "Doors", "Roofing"]);
        assert_eq!(rows[0].spent_amount, 0.0);
        assert_eq!(rows[1].spent_amount, 100.0);
    }

    #[test]
    fn test_custom_plan_overrides() {
        let plan = PlanConfig {
            fractions: [("Lumber".to_string(), 0.5)].into_iter().collect(),
            default_fraction: 0.1,
        };
        let rows = category_budget_rows(1_000.0, &labels(&["Lumber", "Hardware"]), &[], &plan);
        assert_eq!(rows[0].budget_amount, 500.0);
        assert_eq!(rows[1].budget_amount, 100.0);
    }

    #[tokio::test]
    async fn test_category_budgets_integration() -> Result<()> {
        let (db, project) = setup_with_project().await?;
        let unit = create_test_unit(&db, project.id, "Apt 1").await?;
        create_test_purchase(&db, project.id, unit.id, "Kitchen", 2_000.0).await?;

        let rows = category_budgets(&db, project.id, &PlanConfig::default()).await?;

        // One row per declared category, in declared order
        assert_eq!(rows.len(), project.category_list().len());
        let kitchen = rows.iter().find(|r| r.category == "Kitchen").unwrap();
        assert_eq!(kitchen.budget_amount, round2(project.total_budget * 0.15));
        assert_eq!(kitchen.spent_amount, 2_000.0);
        assert_eq!(
            kitchen.remaining,
            round2(kitchen.budget_amount - 2_000.0)
        );

        Ok(())
    }
}
