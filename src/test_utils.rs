//! Shared test utilities for `FinGoal`.
//!
//! Helpers for setting up an in-memory database and creating objectives, milestones,
//! transactions and documents with sensible defaults.

use crate::{
    core::{
        currency::{Currency, ExchangeRates},
        document::{self, DocumentType},
        milestone,
        objective::{self, NewObjective},
        transaction::{self, TransactionKind},
    },
    entities,
    errors::Result,
};
use chrono::{Duration, NaiveDate};
use sea_orm::DatabaseConnection;

/// Owner of every objective created by these helpers.
pub const TEST_USER_ID: &str = "test_user";

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Fixed "today" so date-dependent assertions stay stable.
pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap_or_default()
}

/// Objective form with sensible defaults.
///
/// # Defaults
/// * `user_id`: [`TEST_USER_ID`]
/// * `target_amount`: 10000.0 BRL
/// * `deadline`: 180 days after [`test_date`]
/// * `description`: None
pub fn new_test_objective(name: &str) -> NewObjective {
    NewObjective {
        user_id: TEST_USER_ID.to_string(),
        name: name.to_string(),
        target_amount: 10000.0,
        target_currency: Currency::Brl,
        deadline: test_date() + Duration::days(180),
        description: None,
    }
}

/// Persists an objective built by [`new_test_objective`].
pub async fn create_test_objective(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::objective::Model> {
    objective::create_objective(db, new_test_objective(name)).await
}

/// Fresh database holding one objective named "Viagem".
pub async fn setup_with_objective() -> Result<(DatabaseConnection, entities::objective::Model)> {
    let db = setup_test_db().await?;
    let objective = create_test_objective(&db, "Viagem").await?;
    Ok((db, objective))
}

/// Persists a BRL transaction dated `day_offset` days after [`test_date`].
///
/// Larger offsets are newer. Category is "Outros".
pub async fn create_test_transaction(
    db: &DatabaseConnection,
    objective: &entities::objective::Model,
    kind: TransactionKind,
    amount: f64,
    day_offset: i64,
) -> Result<entities::transaction::Model> {
    let target = objective::target_currency(objective)?;
    let record = transaction::build_transaction(
        &objective.id,
        kind,
        amount,
        Currency::Brl,
        target,
        &ExchangeRates::default(),
        "Outros",
        "Test transaction",
        test_date() + Duration::days(day_offset),
    )?;
    transaction::insert_transaction(db, &record).await
}

/// Persists an open milestone.
pub async fn create_test_milestone(
    db: &DatabaseConnection,
    objective: &entities::objective::Model,
    title: &str,
    order_index: i32,
) -> Result<entities::milestone::Model> {
    milestone::insert_milestone(db, &test_milestone_model(&objective.id, title, order_index))
        .await
}

/// Persists a document dated `day_offset` days after [`test_date`].
pub async fn create_test_document(
    db: &DatabaseConnection,
    objective: &entities::objective::Model,
    name: &str,
    day_offset: i64,
) -> Result<entities::document::Model> {
    let record = entities::document::Model {
        id: uuid::Uuid::new_v4().to_string(),
        objective_id: objective.id.clone(),
        name: name.to_string(),
        file_type: DocumentType::infer(name).as_str().to_string(),
        size_label: "1.0 MB".to_string(),
        category: "Documentação".to_string(),
        date: test_date() + Duration::days(day_offset),
    };
    document::insert_document(db, &record).await
}

/// In-memory BRL objective, not persisted.
pub fn test_objective_model(name: &str, target_amount: f64) -> entities::objective::Model {
    entities::objective::Model {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: TEST_USER_ID.to_string(),
        name: name.to_string(),
        target_amount,
        target_currency: Currency::Brl.code().to_string(),
        deadline: test_date() + Duration::days(90),
        description: Some(format!("Planejamento de {name}")),
        created_at: chrono::Utc::now(),
    }
}

/// In-memory BRL transaction dated [`test_date`], with `amount == converted_amount`.
pub fn test_transaction_model(
    objective_id: &str,
    kind: &str,
    converted_amount: f64,
    category: &str,
) -> entities::transaction::Model {
    entities::transaction::Model {
        id: uuid::Uuid::new_v4().to_string(),
        objective_id: objective_id.to_string(),
        kind: kind.to_string(),
        amount: converted_amount,
        currency: Currency::Brl.code().to_string(),
        converted_amount,
        category: category.to_string(),
        description: format!("{category} test"),
        date: test_date(),
    }
}

/// In-memory open milestone.
pub fn test_milestone_model(
    objective_id: &str,
    title: &str,
    order_index: i32,
) -> entities::milestone::Model {
    entities::milestone::Model {
        id: uuid::Uuid::new_v4().to_string(),
        objective_id: objective_id.to_string(),
        title: title.to_string(),
        description: None,
        target_date: None,
        is_completed: false,
        order_index,
    }
}
