//! Placeholder data for a fresh database.
//!
//! Objectives come from `config.toml`. Milestones, transactions and documents are the
//! demo records the screens start with, written once per objective and only when the
//! objective has none of that kind yet.

use crate::{
    config::app::AppConfig,
    core::{
        currency::Currency,
        document::{self, DocumentType},
        milestone,
        objective::{self, NewObjective},
        transaction::{self, TransactionKind},
    },
    entities::{
        document as document_entity, milestone as milestone_entity,
        objective as objective_entity,
    },
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Counts of records written by [`seed_objective_data`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Milestones inserted
    pub milestones: usize,
    /// Transactions inserted
    pub transactions: usize,
    /// Documents inserted
    pub documents: usize,
}

/// Inserts the configured objectives for `user_id` if that user has none yet.
///
/// Returns the number of objectives created.
pub async fn seed_objectives(
    db: &DatabaseConnection,
    config: &AppConfig,
    user_id: &str,
) -> Result<usize> {
    if !objective::get_objectives_for_user(db, user_id).await?.is_empty() {
        return Ok(0);
    }

    for seed in &config.objectives {
        objective::create_objective(
            db,
            NewObjective {
                user_id: user_id.to_string(),
                name: seed.name.clone(),
                target_amount: seed.target_amount,
                target_currency: seed.target_currency,
                deadline: seed.deadline,
                description: seed.description.clone(),
            },
        )
        .await?;
    }

    tracing::info!(
        "Seeded {} objectives for user {user_id}",
        config.objectives.len()
    );
    Ok(config.objectives.len())
}

/// Writes placeholder milestones, transactions and documents for an objective.
pub async fn seed_objective_data(
    db: &DatabaseConnection,
    config: &AppConfig,
    objective: &objective_entity::Model,
) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    if milestone::get_milestones_for_objective(db, &objective.id)
        .await?
        .is_empty()
    {
        for record in placeholder_milestones(&objective.id) {
            milestone::insert_milestone(db, &record).await?;
            report.milestones += 1;
        }
    }

    if transaction::get_transactions_for_objective(db, &objective.id)
        .await?
        .is_empty()
    {
        let target = objective::target_currency(objective)?;
        for (kind, amount, currency, category, description, date) in placeholder_transactions() {
            let record = transaction::build_transaction(
                &objective.id,
                kind,
                amount,
                currency,
                target,
                &config.exchange_rates,
                category,
                description,
                date,
            )?;
            transaction::insert_transaction(db, &record).await?;
            report.transactions += 1;
        }
    }

    if document::get_documents_for_objective(db, &objective.id)
        .await?
        .is_empty()
    {
        for record in placeholder_documents(&objective.id) {
            document::insert_document(db, &record).await?;
            report.documents += 1;
        }
    }

    if report != SeedReport::default() {
        tracing::debug!("Seeded placeholder data for objective {}: {report:?}", objective.id);
    }
    Ok(report)
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn placeholder_milestones(objective_id: &str) -> Vec<milestone_entity::Model> {
    [
        ("Definir Roteiro Inicial", "Escolher cidades e tempo em cada uma", true),
        ("Tirar Passaporte", "Agendar na Polícia Federal", false),
        ("Reservar Acomodação", "Primeiros 15 dias em Dublin", false),
    ]
    .into_iter()
    .zip(0..)
    .map(|((title, description, is_completed), order_index)| milestone_entity::Model {
        id: uuid::Uuid::new_v4().to_string(),
        objective_id: objective_id.to_string(),
        title: title.to_string(),
        description: Some(description.to_string()),
        target_date: None,
        is_completed,
        order_index,
    })
    .collect()
}

type PlaceholderTransaction = (
    TransactionKind,
    f64,
    Currency,
    &'static str,
    &'static str,
    NaiveDate,
);

fn placeholder_transactions() -> Vec<PlaceholderTransaction> {
    use Currency::{Brl, Eur};
    use TransactionKind::{Expense, Income};

    vec![
        (Income, 8000.0, Brl, "Outros", "Reserva inicial", day(2024, 1, 5)),
        (Income, 1500.0, Brl, "Outros", "Depósito mensal", day(2024, 3, 5)),
        (Expense, 420.0, Eur, "Transporte", "Passagem aérea (sinal)", day(2024, 4, 12)),
        (Expense, 257.5, Brl, "Documentação", "Taxa do passaporte", day(2024, 5, 2)),
    ]
}

fn placeholder_documents(objective_id: &str) -> Vec<document_entity::Model> {
    [
        ("Passaporte_Copia.pdf", "1.2 MB", "Identificação", day(2024, 5, 10)),
        ("Reserva_Airbnb_Dublin.png", "3.4 MB", "Acomodação", day(2024, 6, 1)),
        ("Seguro_Viagem.pdf", "0.8 MB", "Saúde", day(2024, 6, 5)),
        ("Passagem_Aerea.pdf", "2.1 MB", "Transporte", day(2024, 6, 12)),
    ]
    .into_iter()
    .map(|(name, size_label, category, date)| document_entity::Model {
        id: uuid::Uuid::new_v4().to_string(),
        objective_id: objective_id.to_string(),
        name: name.to_string(),
        file_type: DocumentType::infer(name).as_str().to_string(),
        size_label: size_label.to_string(),
        category: category.to_string(),
        date,
    })
    .collect()
}
