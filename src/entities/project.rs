//! Project entity - The root of the ownership hierarchy.
//!
//! Every partner, unit, and purchase belongs to exactly one project. The
//! project carries the total budget and the list of spending categories
//! that purchases are recorded against.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Project database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    /// Unique identifier for the project
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name of the project (e.g., "Maple St Duplex")
    pub name: String,
    /// Optional longer description
    pub description: Option<String>,
    /// Total budget for the whole project in dollars
    pub total_budget: f64,
    /// Optional site location
    pub location: Option<String>,
    /// Spending category labels, stored as a JSON array of distinct strings
    pub categories: String,
    /// When the project was created
    pub created_at: DateTimeUtc,
    /// When the project was last modified
    pub updated_at: DateTimeUtc,
}

impl Model {
    /// Decodes the JSON-encoded category list.
    ///
    /// A project row always carries a valid JSON array (the create/update
    /// paths serialize it), so a malformed column yields an empty list
    /// rather than an error.
    #[must_use]
    pub fn category_list(&self) -> Vec<String> {
        serde_json::from_str(&self.categories).unwrap_or_default()
    }
}

/// Defines relationships between Project and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One project has many partners
    #[sea_orm(has_many = "super::partner::Entity")]
    Partners,
    /// One project has many units
    #[sea_orm(has_many = "super::unit::Entity")]
    Units,
    /// One project has many purchases
    #[sea_orm(has_many = "super::purchase::Entity")]
    Purchases,
}

impl Related<super::partner::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Partners.def()
    }
}

impl Related<super::unit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Units.def()
    }
}

impl Related<super::purchase::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Purchases.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
