//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod partner;
pub mod project;
pub mod purchase;
pub mod unit;

// Re-export specific types to avoid conflicts
pub use partner::{Column as PartnerColumn, Entity as Partner, Model as PartnerModel};
pub use project::{Column as ProjectColumn, Entity as Project, Model as ProjectModel};
pub use purchase::{Column as PurchaseColumn, Entity as Purchase, Model as PurchaseModel};
pub use unit::{Column as UnitColumn, Entity as Unit, Model as UnitModel};
