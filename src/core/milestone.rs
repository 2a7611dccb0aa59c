//! Milestone business logic - persisting the steps of an objective.
//!
//! Display order comes from `order_index`; ties keep insertion order.

use crate::{
    entities::{Milestone, milestone},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Persists a milestone record built by the objectives screen.
pub async fn insert_milestone(
    db: &DatabaseConnection,
    record: &milestone::Model,
) -> Result<milestone::Model> {
    if record.title.trim().is_empty() {
        return Err(Error::Validation {
            message: "Milestone title cannot be empty".to_string(),
        });
    }

    let model = milestone::ActiveModel {
        id: Set(record.id.clone()),
        objective_id: Set(record.objective_id.clone()),
        title: Set(record.title.clone()),
        description: Set(record.description.clone()),
        target_date: Set(record.target_date),
        is_completed: Set(record.is_completed),
        order_index: Set(record.order_index),
    };

    model.insert(db).await.map_err(Into::into)
}

/// Retrieves all milestones for an objective in display order.
pub async fn get_milestones_for_objective(
    db: &DatabaseConnection,
    objective_id: &str,
) -> Result<Vec<milestone::Model>> {
    Milestone::find()
        .filter(milestone::Column::ObjectiveId.eq(objective_id))
        .order_by_asc(milestone::Column::OrderIndex)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Stores the completion flag of a milestone.
pub async fn set_milestone_completed(
    db: &DatabaseConnection,
    milestone_id: &str,
    is_completed: bool,
) -> Result<milestone::Model> {
    let existing = Milestone::find_by_id(milestone_id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::RecordNotFound {
            kind: "Milestone",
            id: milestone_id.to_string(),
        })?;

    let mut model: milestone::ActiveModel = existing.into();
    model.is_completed = Set(is_completed);
    model.update(db).await.map_err(Into::into)
}

/// Deletes a milestone by id.
pub async fn delete_milestone(db: &DatabaseConnection, milestone_id: &str) -> Result<()> {
    let result = Milestone::delete_by_id(milestone_id.to_string())
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::RecordNotFound {
            kind: "Milestone",
            id: milestone_id.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_milestones_listed_by_order_index() -> Result<()> {
        let (db, objective) = setup_with_objective().await?;

        let third = create_test_milestone(&db, &objective, "Reservar Acomodação", 2).await?;
        let first = create_test_milestone(&db, &objective, "Definir Roteiro", 0).await?;
        let second = create_test_milestone(&db, &objective, "Tirar Passaporte", 1).await?;

        let listed = get_milestones_for_objective(&db, &objective.id).await?;
        assert_eq!(listed, vec![first, second, third]);

        Ok(())
    }

    #[tokio::test]
    async fn test_set_completed_and_delete() -> Result<()> {
        let (db, objective) = setup_with_objective().await?;
        let milestone = create_test_milestone(&db, &objective, "Tirar Passaporte", 0).await?;
        assert!(!milestone.is_completed);

        let updated = set_milestone_completed(&db, &milestone.id, true).await?;
        assert!(updated.is_completed);

        delete_milestone(&db, &milestone.id).await?;
        assert!(get_milestones_for_objective(&db, &objective.id).await?.is_empty());

        assert!(matches!(
            set_milestone_completed(&db, &milestone.id, false).await,
            Err(Error::RecordNotFound { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_rejects_blank_title() -> Result<()> {
        let (db, objective) = setup_with_objective().await?;
        let result = create_test_milestone(&db, &objective, "  ", 0).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }
}
