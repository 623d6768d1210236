//! Report generation and display formatting.
//!
//! This module bundles the rollup and planner outputs into a single project
//! report and carries the user-visible judgment logic: the three-tier
//! budget status derived from a unit's cost percentage. The thresholds are
//! part of the product behavior, not styling, so they live here rather than
//! in a UI layer.

use crate::{
    core::{
        planner::{CategoryBudgetRow, PlanConfig},
        rollup::{CategorySpendingRow, UnitCostRow},
        round2,
    },
    entities::project,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Three-tier budget health derived from a cost percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    /// At or under 70% of budget
    OnTrack,
    /// Over 70% and at or under 90%
    Warning,
    /// Over 90% of budget
    OverBudget,
}

impl BudgetStatus {
    /// Classifies a cost percentage (0-100 scale, may exceed 100).
    #[must_use]
    pub fn from_cost_percentage(percentage: f64) -> Self {
        if percentage <= 70.0 {
            BudgetStatus::OnTrack
        } else if percentage <= 90.0 {
            BudgetStatus::Warning
        } else {
            BudgetStatus::OverBudget
        }
    }

    /// Display label for the status.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            BudgetStatus::OnTrack => "on track",
            BudgetStatus::Warning => "warning",
            BudgetStatus::OverBudget => "over budget",
        }
    }
}

/// Formats a dollar amount with grouped thousands, like `$1,234.56` or
/// `-$1,234.56`.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    // Cast safety: rounded dollar amounts are far inside i64 cent range
    #[allow(clippy::cast_possible_truncation)]
    let total_cents = (round2(amount).abs() * 100.0).round() as i64;
    let dollars = total_cents / 100;
    let cents = total_cents % 100;

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if round2(amount) < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{cents:02}")
}

/// Formats a percentage for display with one decimal, like `75.0%`.
#[must_use]
pub fn format_percent(percentage: f64) -> String {
    format!("{percentage:.1}%")
}

/// A complete project report: the project plus every derived view.
#[derive(Debug, Clone)]
pub struct ProjectReport {
    /// The project being reported on
    pub project: project::Model,
    /// Unit cost view, ordered by unit name
    pub unit_costs: Vec<UnitCostRow>,
    /// Category spending view, ordered by total spent descending
    pub category_spending: Vec<CategorySpendingRow>,
    /// Planned budget split, in declared category order
    pub category_budgets: Vec<CategoryBudgetRow>,
    /// Sum of `total_cost` across every purchase in the project
    pub total_spent: f64,
}

/// Generates a complete report for a project, recomputing all derived
/// views.
pub async fn generate_project_report(
    db: &DatabaseConnection,
    project_id: i64,
    plan: &PlanConfig,
) -> Result<ProjectReport> {
    let project = crate::core::project::require_project(db, project_id).await?;
    let unit_costs = crate::core::rollup::unit_costs(db, project_id).await?;
    let category_spending = crate::core::rollup::category_spending(db, project_id).await?;
    let category_budgets =
        crate::core::planner::category_budgets(db, project_id, plan).await?;

    let total_spent = round2(category_spending.iter().map(|row| row.total_spent).sum());

    Ok(ProjectReport {
        project,
        unit_costs,
        category_spending,
        category_budgets,
        total_spent,
    })
}
