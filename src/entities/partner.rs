//! Partner entity - A co-investor contributing funds to a project.
//!
//! Partners are referenced (never owned) by units and purchases: deleting a
//! partner nullifies those references, it never cascades.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Partner status: actively contributing.
pub const STATUS_ACTIVE: &str = "active";
/// Partner status: no longer contributing.
pub const STATUS_INACTIVE: &str = "inactive";

/// The set of valid partner status strings.
pub const STATUSES: &[&str] = &[STATUS_ACTIVE, STATUS_INACTIVE];

/// Partner database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "partners")]
pub struct Model {
    /// Unique identifier for the partner
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the project this partner belongs to
    pub project_id: i64,
    /// Partner name
    pub name: String,
    /// Optional contact email
    pub email: Option<String>,
    /// Optional contact phone number
    pub phone: Option<String>,
    /// Total funds contributed to the project in dollars
    pub total_contribution: f64,
    /// Status: `"active"` or `"inactive"`
    pub status: String,
    /// When the partner was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Partner and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each partner belongs to one project
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id"
    )]
    Project,
    /// One partner may be referenced by many units
    #[sea_orm(has_many = "super::unit::Entity")]
    Units,
    /// One partner may be referenced by many purchases
    #[sea_orm(has_many = "super::purchase::Entity")]
    Purchases,
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
