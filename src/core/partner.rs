//! Partner business logic - Handles all partner-related operations.
//!
//! Partners are referenced by units and purchases but never own them:
//! deleting a partner clears those references inside one transaction and
//! leaves the referencing rows in place.

use crate::{
    entities::{Partner, Purchase, Unit, partner, purchase, unit},
    errors::{Error, Result},
};
use sea_orm::{IntoActiveModel, QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};

/// Fields that can be changed on an existing partner. `None` leaves the
/// field untouched.
#[derive(Debug, Clone, Default)]
pub struct PartnerUpdate {
    /// New partner name
    pub name: Option<String>,
    /// New contact email
    pub email: Option<String>,
    /// New contact phone
    pub phone: Option<String>,
    /// New total contribution
    pub total_contribution: Option<f64>,
    /// New status (`"active"` or `"inactive"`)
    pub status: Option<String>,
}

fn validate_status(status: &str) -> Result<()> {
    if partner::STATUSES.contains(&status) {
        return Ok(());
    }
    Err(Error::validation(format!(
        "Unknown partner status {status:?}, expected one of {:?}",
        partner::STATUSES
    )))
}

fn validate_contribution(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::validation(format!(
            "Total contribution must be a non-negative amount, got {amount}"
        )));
    }
    Ok(())
}

/// Creates a new partner under a project.
///
/// Validates the name, the contribution amount, and the status string, and
/// fails with `ProjectNotFound` if the project does not resolve.
pub async fn create_partner(
    db: &DatabaseConnection,
    project_id: i64,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    total_contribution: f64,
    status: String,
) -> Result<partner::Model> {
    if name.trim().is_empty() {
        return Err(Error::validation("Partner name cannot be empty"));
    }
    validate_contribution(total_contribution)?;
    validate_status(&status)?;

    crate::core::project::require_project(db, project_id).await?;

    let model = partner::ActiveModel {
        project_id: Set(project_id),
        name: Set(name.trim().to_string()),
        email: Set(email),
        phone: Set(phone),
        total_contribution: Set(total_contribution),
        status: Set(status),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    Ok(model.insert(db).await?)
}

/// Finds a partner by its unique ID.
pub async fn get_partner_by_id(
    db: &DatabaseConnection,
    partner_id: i64,
) -> Result<Option<partner::Model>> {
    Partner::find_by_id(partner_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all partners for a project, ordered alphabetically by name.
pub async fn get_partners_for_project(
    db: &DatabaseConnection,
    project_id: i64,
) -> Result<Vec<partner::Model>> {
    Partner::find()
        .filter(partner::Column::ProjectId.eq(project_id))
        .order_by_asc(partner::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Applies a partial update to a partner.
pub async fn update_partner(
    db: &DatabaseConnection,
    partner_id: i64,
    update: PartnerUpdate,
) -> Result<partner::Model> {
    let existing = Partner::find_by_id(partner_id)
        .one(db)
        .await?
        .ok_or(Error::PartnerNotFound { id: partner_id })?;
    let mut active = existing.into_active_model();

    if let Some(name) = update.name {
        if name.trim().is_empty() {
            return Err(Error::validation("Partner name cannot be empty"));
        }
        active.name = Set(name.trim().to_string());
    }
    if let Some(email) = update.email {
        active.email = Set(Some(email));
    }
    if let Some(phone) = update.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(total_contribution) = update.total_contribution {
        validate_contribution(total_contribution)?;
        active.total_contribution = Set(total_contribution);
    }
    if let Some(status) = update.status {
        validate_status(&status)?;
        active.status = Set(status);
    }

    Ok(active.update(db).await?)
}

/// Deletes a partner, clearing the reference on any unit or purchase that
/// points at it. The nullify-then-delete sequence runs in one transaction.
pub async fn delete_partner(db: &DatabaseConnection, partner_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    Partner::find_by_id(partner_id)
        .one(&txn)
        .await?
        .ok_or(Error::PartnerNotFound { id: partner_id })?;

    Unit::update_many()
        .col_expr(unit::Column::PartnerId, Expr::value(Option::<i64>::None))
        .filter(unit::Column::PartnerId.eq(partner_id))
        .exec(&txn)
        .await?;
    Purchase::update_many()
        .col_expr(
            purchase::Column::PartnerId,
            Expr::value(Option::<i64>::None),
        )
        .filter(purchase::Column::PartnerId.eq(partner_id))
        .exec(&txn)
        .await?;
    Partner::delete_by_id(partner_id).exec(&txn).await?;

    txn.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_partner() -> Result<()> {
        let (db, project) = setup_with_project().await?;

        let partner = create_partner(
            &db,
            project.id,
            "Dana Smith".to_string(),
            Some("dana@example.com".to_string()),
            None,
            25_000.0,
            partner::STATUS_ACTIVE.to_string(),
        )
        .await?;

        assert_eq!(partner.project_id, project.id);
        assert_eq!(partner.name, "Dana Smith");
        assert_eq!(partner.total_contribution, 25_000.0);
        assert_eq!(partner.status, "active");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_partner_validation() -> Result<()> {
        let (db, project) = setup_with_project().await?;

        let result = create_partner(
            &db,
            project.id,
            "".to_string(),
            None,
            None,
            0.0,
            "active".to_string(),
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let result = create_partner(
            &db,
            project.id,
            "Neg".to_string(),
            None,
            None,
            -5.0,
            "active".to_string(),
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let result = create_partner(
            &db,
            project.id,
            "Bad status".to_string(),
            None,
            None,
            0.0,
            "retired".to_string(),
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let result = create_partner(
            &db,
            999,
            "Orphan".to_string(),
            None,
            None,
            0.0,
            "active".to_string(),
        )
        .await;
        assert!(matches!(result, Err(Error::ProjectNotFound { id: 999 })));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_partners_for_project_ordered() -> Result<()> {
        let (db, project) = setup_with_project().await?;
        create_test_partner(&db, project.id, "Zoe").await?;
        create_test_partner(&db, project.id, "Abe").await?;

        let partners = get_partners_for_project(&db, project.id).await?;
        assert_eq!(partners.len(), 2);
        assert_eq!(partners[0].name, "Abe");
        assert_eq!(partners[1].name, "Zoe");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_partner_status() -> Result<()> {
        let (db, project) = setup_with_project().await?;
        let partner = create_test_partner(&db, project.id, "Dana").await?;

        let updated = update_partner(
            &db,
            partner.id,
            PartnerUpdate {
                status: Some(partner::STATUS_INACTIVE.to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(updated.status, "inactive");

        let result = update_partner(
            &db,
            partner.id,
            PartnerUpdate {
                status: Some("gone".to_string()),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_partner_nullifies_references() -> Result<()> {
        let (db, project) = setup_with_project().await?;
        let partner = create_test_partner(&db, project.id, "Dana").await?;

        // A unit and a purchase both referencing the partner
        let unit = crate::core::unit::create_unit(
            &db,
            project.id,
            "Apt 1".to_string(),
            "apartment".to_string(),
            10_000.0,
            unit::STATUS_PLANNING.to_string(),
            None,
            Some(partner.id),
        )
        .await?;
        let purchases = crate::core::purchase::record_purchase(
            &db,
            project.id,
            crate::core::purchase::PurchaseEntry {
                date: chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                category: "Kitchen".to_string(),
                description: "Tiles".to_string(),
                quantity: 2.0,
                unit_price: 30.0,
                unit_ids: vec![unit.id],
                partner_id: Some(partner.id),
                distribute_evenly: false,
            },
        )
        .await?;

        delete_partner(&db, partner.id).await?;

        assert!(get_partner_by_id(&db, partner.id).await?.is_none());
        let unit = Unit::find_by_id(unit.id).one(&db).await?.unwrap();
        assert_eq!(unit.partner_id, None);
        let purchase = Purchase::find_by_id(purchases[0].id).one(&db).await?.unwrap();
        assert_eq!(purchase.partner_id, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_partner_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let result = delete_partner(&db, 42).await;
        assert!(matches!(result, Err(Error::PartnerNotFound { id: 42 })));
        Ok(())
    }
}
