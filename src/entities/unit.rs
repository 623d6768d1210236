//! Unit entity - A discrete sub-part of a project with its own budget.
//!
//! A unit's actual cost is never stored; it is always derived by summing
//! the purchases that reference the unit (see `core::rollup`).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Unit status: planned, no work started.
pub const STATUS_PLANNING: &str = "planning";
/// Unit status: work underway.
pub const STATUS_IN_PROGRESS: &str = "in_progress";
/// Unit status: work finished.
pub const STATUS_COMPLETED: &str = "completed";
/// Unit status: work paused.
pub const STATUS_ON_HOLD: &str = "on_hold";

/// The set of valid unit status strings.
pub const STATUSES: &[&str] = &[
    STATUS_PLANNING,
    STATUS_IN_PROGRESS,
    STATUS_COMPLETED,
    STATUS_ON_HOLD,
];

/// Unit database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "units")]
pub struct Model {
    /// Unique identifier for the unit
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the project this unit belongs to
    pub project_id: i64,
    /// Unit name (e.g., "Apartment 2B")
    pub name: String,
    /// Free-text classification (e.g., "apartment", "storefront")
    pub unit_type: String,
    /// Budget for this unit in dollars
    pub budget: f64,
    /// Status: `"planning"`, `"in_progress"`, `"completed"`, or `"on_hold"`
    pub status: String,
    /// Date work on the unit was completed, if any
    pub completion_date: Option<Date>,
    /// Optional partner funding this unit
    pub partner_id: Option<i64>,
    /// When the unit was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Unit and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each unit belongs to one project
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id"
    )]
    Project,
    /// Each unit may reference one partner
    #[sea_orm(
        belongs_to = "super::partner::Entity",
        from = "Column::PartnerId",
        to = "super::partner::Column::Id"
    )]
    Partner,
    /// One unit may be referenced by many purchases
    #[sea_orm(has_many = "super::purchase::Entity")]
    Purchases,
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::partner::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Partner.def()
    }
}

impl Related<super::purchase::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Purchases.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
