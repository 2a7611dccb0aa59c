//! Objective business logic - creating, listing and looking up objectives.
//!
//! Objectives are scoped by owning user and are never edited after creation.

use crate::{
    core::currency::Currency,
    entities::{Objective, objective},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};

/// Fields needed to create an objective.
#[derive(Debug, Clone)]
pub struct NewObjective {
    /// Owning user
    pub user_id: String,
    /// Display name
    pub name: String,
    /// Amount to reach, must be positive
    pub target_amount: f64,
    /// Currency of the target amount
    pub target_currency: Currency,
    /// Date the objective should be reached by
    pub deadline: NaiveDate,
    /// Optional description; blank text is stored as `None`
    pub description: Option<String>,
}

/// Validates a new objective without touching the database.
pub fn validate_new_objective(new: &NewObjective) -> Result<()> {
    if new.name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Objective name cannot be empty".to_string(),
        });
    }

    if !new.target_amount.is_finite() || new.target_amount <= 0.0 {
        return Err(Error::InvalidAmount {
            amount: new.target_amount,
        });
    }

    Ok(())
}

/// Creates a new objective after validating name and target amount.
pub async fn create_objective(
    db: &DatabaseConnection,
    new: NewObjective,
) -> Result<objective::Model> {
    validate_new_objective(&new)?;

    let description = new
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    let objective = objective::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        user_id: Set(new.user_id),
        name: Set(new.name.trim().to_string()),
        target_amount: Set(new.target_amount),
        target_currency: Set(new.target_currency.code().to_string()),
        deadline: Set(new.deadline),
        description: Set(description),
        created_at: Set(chrono::Utc::now()),
    };

    let result = objective.insert(db).await?;
    tracing::info!("Created objective '{}' ({})", result.name, result.id);
    Ok(result)
}

/// Retrieves every objective owned by `user_id`, oldest first.
pub async fn get_objectives_for_user(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<objective::Model>> {
    Objective::find()
        .filter(objective::Column::UserId.eq(user_id))
        .order_by_asc(objective::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an objective by id, returning None if it does not exist.
pub async fn get_objective_by_id(
    db: &DatabaseConnection,
    objective_id: &str,
) -> Result<Option<objective::Model>> {
    Objective::find_by_id(objective_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds an objective by id that belongs to `user_id`.
pub async fn get_user_objective(
    db: &DatabaseConnection,
    user_id: &str,
    objective_id: &str,
) -> Result<objective::Model> {
    get_objective_by_id(db, objective_id)
        .await?
        .filter(|o| o.user_id == user_id)
        .ok_or_else(|| Error::ObjectiveNotFound {
            id: objective_id.to_string(),
        })
}

/// Parses the stored target currency of an objective.
pub fn target_currency(objective: &objective::Model) -> Result<Currency> {
    objective.target_currency.parse()
}
