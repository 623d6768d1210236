//! Tabular export building and the remote spreadsheet boundary.
//!
//! `build_workbook` turns a fully loaded project into plain string tables:
//! one per entity type plus summary tables mirroring the rollup and planner
//! outputs. Encoding those tables into an actual file format, and the
//! authenticated network push, are external concerns behind the
//! [`SpreadsheetWriter`] trait.

use crate::{
    core::{
        planner::PlanConfig,
        report::{BudgetStatus, format_currency, format_percent},
    },
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// One exported table: a title, a header row, and string-valued data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    /// Sheet/table title
    pub title: String,
    /// Column headers
    pub headers: Vec<String>,
    /// Data rows; each row has one cell per header
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    fn new(title: &str, headers: &[&str]) -> Self {
        ExportTable {
            title: title.to_string(),
            headers: headers.iter().map(ToString::to_string).collect(),
            rows: Vec::new(),
        }
    }
}

/// A full project export: all tables, in a fixed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportWorkbook {
    /// Name of the exported project
    pub project_name: String,
    /// Project, Partners, Units, Purchases, then the three summary tables
    pub tables: Vec<ExportTable>,
}

/// The remote spreadsheet boundary. Implementations own authentication and
/// transport; this crate only hands them the finished tables.
pub trait SpreadsheetWriter {
    /// Pushes a workbook to the remote spreadsheet identified by
    /// `spreadsheet_id`.
    fn push(
        &self,
        spreadsheet_id: &str,
        workbook: &ExportWorkbook,
    ) -> impl Future<Output = Result<()>> + Send;
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn opt_id(value: Option<i64>) -> String {
    value.map(|id| id.to_string()).unwrap_or_default()
}

/// Builds the tabular export for a project.
///
/// The summary tables reuse the rollup and planner computations directly,
/// so their figures always match what the report views show.
pub async fn build_workbook(
    db: &DatabaseConnection,
    project_id: i64,
    plan: &PlanConfig,
) -> Result<ExportWorkbook> {
    let project = crate::core::project::require_project(db, project_id).await?;
    let partners = crate::core::partner::get_partners_for_project(db, project_id).await?;
    let units = crate::core::unit::get_units_for_project(db, project_id).await?;
    let purchases = crate::core::purchase::get_purchases_for_project(db, project_id).await?;
    let unit_costs = crate::core::rollup::unit_costs(db, project_id).await?;
    let category_spending = crate::core::rollup::category_spending(db, project_id).await?;
    let category_budgets = crate::core::planner::category_budgets(db, project_id, plan).await?;

    let mut project_table = ExportTable::new(
        "Project",
        &["Name", "Description", "Total Budget", "Location", "Categories"],
    );
    project_table.rows.push(vec![
        project.name.clone(),
        opt(&project.description),
        format_currency(project.total_budget),
        opt(&project.location),
        project.category_list().join(", "),
    ]);

    let mut partner_table = ExportTable::new(
        "Partners",
        &["Name", "Email", "Phone", "Total Contribution", "Status"],
    );
    for partner in &partners {
        partner_table.rows.push(vec![
            partner.name.clone(),
            opt(&partner.email),
            opt(&partner.phone),
            format_currency(partner.total_contribution),
            partner.status.clone(),
        ]);
    }

    let mut unit_table = ExportTable::new(
        "Units",
        &["Name", "Type", "Budget", "Status", "Completion Date", "Partner"],
    );
    for unit in &units {
        unit_table.rows.push(vec![
            unit.name.clone(),
            unit.unit_type.clone(),
            format_currency(unit.budget),
            unit.status.clone(),
            unit.completion_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
            opt_id(unit.partner_id),
        ]);
    }

    let mut purchase_table = ExportTable::new(
        "Purchases",
        &[
            "Date",
            "Category",
            "Description",
            "Quantity",
            "Unit Price",
            "Total Cost",
            "Unit",
            "Partner",
            "Receipt",
        ],
    );
    for purchase in &purchases {
        purchase_table.rows.push(vec![
            purchase.date.to_string(),
            purchase.category.clone(),
            purchase.description.clone(),
            format!("{:.3}", purchase.quantity),
            format_currency(purchase.unit_price),
            format_currency(purchase.total_cost),
            opt_id(purchase.unit_id),
            opt_id(purchase.partner_id),
            opt(&purchase.receipt),
        ]);
    }

    let mut unit_cost_table = ExportTable::new(
        "Unit Costs",
        &["Unit", "Budget", "Actual Cost", "Cost %", "Status"],
    );
    for row in &unit_costs {
        unit_cost_table.rows.push(vec![
            row.unit_name.clone(),
            format_currency(row.budget),
            format_currency(row.actual_cost),
            format_percent(row.cost_percentage),
            BudgetStatus::from_cost_percentage(row.cost_percentage)
                .label()
                .to_string(),
        ]);
    }

    let mut spending_table = ExportTable::new(
        "Category Spending",
        &["Category", "Total Spent", "Purchases", "Average Purchase"],
    );
    for row in &category_spending {
        spending_table.rows.push(vec![
            row.category.clone(),
            format_currency(row.total_spent),
            row.purchase_count.to_string(),
            format_currency(row.average_purchase),
        ]);
    }

    let mut budget_table = ExportTable::new(
        "Budget Plan",
        &["Category", "Budget Amount", "Spent", "Remaining"],
    );
    for row in &category_budgets {
        budget_table.rows.push(vec![
            row.category.clone(),
            format_currency(row.budget_amount),
            format_currency(row.spent_amount),
            format_currency(row.remaining),
        ]);
    }

    Ok(ExportWorkbook {
        project_name: project.name,
        tables: vec![
            project_table,
            partner_table,
            unit_table,
            purchase_table,
            unit_cost_table,
            spending_table,
            budget_table,
        ],
    })
}

/// Builds a project's workbook and pushes it to a remote spreadsheet.
///
/// Writer failures surface as [`Error::Sync`]; no retries happen here.
pub async fn sync_project<W>(
    db: &DatabaseConnection,
    project_id: i64,
    spreadsheet_id: &str,
    plan: &PlanConfig,
    writer: &W,
) -> Result<()>
where
    W: SpreadsheetWriter,
{
    let workbook = build_workbook(db, project_id, plan).await?;
    tracing::info!(
        project = %workbook.project_name,
        spreadsheet_id,
        tables = workbook.tables.len(),
        "pushing project export"
    );
    writer.push(spreadsheet_id, &workbook).await
}
