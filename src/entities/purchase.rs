//! Purchase entity - A single recorded expense.
//!
//! `total_cost` is computed as `round(quantity * unit_price, 2)` when the
//! purchase is created and persisted. Updates through `core::purchase`
//! recompute it whenever quantity or unit price change, so the stored value
//! cannot drift through this API. A purchase with no `unit_id` is "general"
//! spend: it counts toward category rollups but not unit rollups.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Purchase database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchases")]
pub struct Model {
    /// Unique identifier for the purchase
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the project this purchase belongs to
    pub project_id: i64,
    /// Optional unit this expense is attributed to (None = general spend)
    pub unit_id: Option<i64>,
    /// Optional partner this expense is attributed to
    pub partner_id: Option<i64>,
    /// Date of the expense
    pub date: Date,
    /// Spending category; expected to be one of the project's categories
    pub category: String,
    /// Human-readable description of the expense
    pub description: String,
    /// Quantity purchased (strictly positive)
    pub quantity: f64,
    /// Price per unit of quantity in dollars (non-negative)
    pub unit_price: f64,
    /// Total cost in dollars, `round(quantity * unit_price, 2)` at creation
    pub total_cost: f64,
    /// Optional receipt reference (file path, URL, or receipt number)
    pub receipt: Option<String>,
    /// When the purchase row was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Purchase and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each purchase belongs to one project
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id"
    )]
    Project,
    /// Each purchase may reference one unit
    #[sea_orm(
        belongs_to = "super::unit::Entity",
        from = "Column::UnitId",
        to = "super::unit::Column::Id"
    )]
    Unit,
    /// Each purchase may reference one partner
    #[sea_orm(
        belongs_to = "super::partner::Entity",
        from = "Column::PartnerId",
        to = "super::partner::Column::Id"
    )]
    Partner,
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::unit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Unit.def()
    }
}

impl Related<super::partner::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Partner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
