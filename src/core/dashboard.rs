//! Dashboard business logic - progress towards an objective and spending breakdown.
//!
//! All figures use the converted amounts stored on transactions, so they are expressed
//! in the objective's target currency.

use crate::{
    core::{
        currency::Currency,
        milestone,
        transaction::{self, TransactionKind},
    },
    entities::{
        milestone as milestone_entity, objective as objective_entity,
        transaction as transaction_entity,
    },
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use std::collections::BTreeMap;

/// Share of total expenses spent in one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    /// Category name
    pub category: String,
    /// Converted amount spent in this category
    pub amount: f64,
    /// Percentage of all expenses (0-100)
    pub percent: u8,
}

/// Everything the dashboard shows for one objective.
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    /// The objective being reported on
    pub objective: objective_entity::Model,
    /// Target currency all amounts are expressed in
    pub currency: Currency,
    /// Sum of converted income
    pub income_total: f64,
    /// Sum of converted expenses
    pub expense_total: f64,
    /// Income minus expenses
    pub saved: f64,
    /// What is still missing to reach the target, never negative
    pub remaining: f64,
    /// Progress as a percentage (0-100)
    pub progress_percent: u8,
    /// Number of completed milestones
    pub milestones_completed: usize,
    /// Number of milestones
    pub milestones_total: usize,
    /// Days until the deadline, negative once it has passed
    pub days_left: i64,
    /// Expense breakdown, largest category first
    pub categories: Vec<CategoryShare>,
    /// Most recent transactions
    pub recent_transactions: Vec<transaction_entity::Model>,
}

/// Calculates progress as `round(saved / target * 100)` clamped to 0-100.
///
/// A non-positive or non-finite target yields 0.
#[must_use]
pub fn progress_percent(saved: f64, target: f64) -> u8 {
    if !target.is_finite() || target <= 0.0 || !saved.is_finite() {
        return 0;
    }

    // Cast safety: value is clamped to [0, 100] first.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let percent = ((saved / target) * 100.0).round().clamp(0.0, 100.0) as u8;
    percent
}

/// Groups expenses by category, largest share first.
#[must_use]
pub fn expense_breakdown(transactions: &[transaction_entity::Model]) -> Vec<CategoryShare> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for tx in transactions {
        if transaction::kind_of(tx).ok() == Some(TransactionKind::Expense) {
            *totals.entry(tx.category.as_str()).or_insert(0.0) += tx.converted_amount;
        }
    }

    let total: f64 = totals.values().sum();
    let mut shares: Vec<CategoryShare> = totals
        .into_iter()
        .map(|(category, amount)| CategoryShare {
            category: category.to_string(),
            amount,
            percent: progress_percent(amount, total),
        })
        .collect();

    shares.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    shares
}

/// Builds the dashboard summary from data already in memory.
///
/// # Arguments
/// * `objective` - The active objective
/// * `transactions` - Its transactions, newest first
/// * `milestones` - Its milestones
/// * `today` - Reference date for the deadline countdown
/// * `recent_limit` - How many recent transactions to keep
pub fn summarize(
    objective: &objective_entity::Model,
    transactions: &[transaction_entity::Model],
    milestones: &[milestone_entity::Model],
    today: NaiveDate,
    recent_limit: usize,
) -> Result<DashboardSummary> {
    let currency = crate::core::objective::target_currency(objective)?;

    let (mut income_total, mut expense_total) = (0.0, 0.0);
    for tx in transactions {
        match transaction::kind_of(tx) {
            Ok(TransactionKind::Income) => income_total += tx.converted_amount,
            Ok(TransactionKind::Expense) => expense_total += tx.converted_amount,
            Err(e) => tracing::warn!("Skipping transaction {} on dashboard: {e}", tx.id),
        }
    }

    let saved = income_total - expense_total;

    Ok(DashboardSummary {
        objective: objective.clone(),
        currency,
        income_total,
        expense_total,
        saved,
        remaining: (objective.target_amount - saved).max(0.0),
        progress_percent: progress_percent(saved, objective.target_amount),
        milestones_completed: milestones.iter().filter(|m| m.is_completed).count(),
        milestones_total: milestones.len(),
        days_left: objective.deadline.signed_duration_since(today).num_days(),
        categories: expense_breakdown(transactions),
        recent_transactions: transactions.iter().take(recent_limit).cloned().collect(),
    })
}

/// Loads an objective's transactions and milestones and summarizes them.
pub async fn generate_dashboard(
    db: &DatabaseConnection,
    objective: &objective_entity::Model,
    today: NaiveDate,
    recent_limit: Option<usize>,
) -> Result<DashboardSummary> {
    let transactions = transaction::get_transactions_for_objective(db, &objective.id).await?;
    let milestones = milestone::get_milestones_for_objective(db, &objective.id).await?;
    summarize(
        objective,
        &transactions,
        &milestones,
        today,
        recent_limit.unwrap_or(5),
    )
}

/// Generates a progress bar string like `[████████░░] 80%`.
#[must_use]
pub fn format_progress_bar(progress_percent: u8, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped = usize::from(progress_percent.min(100));

    let filled = (clamped * length + 50) / 100;
    let empty = length.saturating_sub(filled);

    let filled_str = "█".repeat(filled);
    let empty_str = "░".repeat(empty);

    format!("[{filled_str}{empty_str}] {progress_percent}%")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_progress_percent_bounds() {
        assert_eq!(progress_percent(0.0, 100.0), 0);
        assert_eq!(progress_percent(100.0, 100.0), 100);
        assert_eq!(progress_percent(150.0, 100.0), 100);
    }

    #[test]
    fn test_progress_percent_rounding_and_degenerate_targets() {
        assert_eq!(progress_percent(12500.0, 50000.0), 25);
        assert_eq!(progress_percent(1.0, 3.0), 33);
        assert_eq!(progress_percent(2.0, 3.0), 67);
        assert_eq!(progress_percent(-50.0, 100.0), 0);
        assert_eq!(progress_percent(50.0, 0.0), 0);
        assert_eq!(progress_percent(50.0, -10.0), 0);
        assert_eq!(progress_percent(f64::NAN, 100.0), 0);
    }

    #[test]
    fn test_format_progress_bar() {
        assert_eq!(format_progress_bar(100, Some(10)), "[██████████] 100%");
        assert_eq!(format_progress_bar(50, Some(10)), "[█████░░░░░] 50%");
        assert_eq!(format_progress_bar(0, Some(10)), "[░░░░░░░░░░] 0%");
        assert_eq!(format_progress_bar(25, Some(4)), "[█░░░] 25%");
    }

    #[test]
    fn test_summarize_in_memory() {
        let objective = test_objective_model("Intercâmbio", 1000.0);
        let transactions = vec![
            test_transaction_model(&objective.id, "expense", 100.0, "Transporte"),
            test_transaction_model(&objective.id, "income", 600.0, "Outros"),
            test_transaction_model(&objective.id, "expense", 300.0, "Acomodação"),
            test_transaction_model(&objective.id, "expense", 100.0, "Transporte"),
        ];
        let mut done = test_milestone_model(&objective.id, "Passaporte", 0);
        done.is_completed = true;
        let milestones = vec![done, test_milestone_model(&objective.id, "Voo", 1)];
        let today = objective.deadline - chrono::Duration::days(10);

        let summary = summarize(&objective, &transactions, &milestones, today, 2).unwrap();

        assert_eq!(summary.currency, Currency::Brl);
        assert_eq!(summary.income_total, 600.0);
        assert_eq!(summary.expense_total, 500.0);
        assert_eq!(summary.saved, 100.0);
        assert_eq!(summary.remaining, 900.0);
        assert_eq!(summary.progress_percent, 10);
        assert_eq!(summary.milestones_completed, 1);
        assert_eq!(summary.milestones_total, 2);
        assert_eq!(summary.days_left, 10);
        assert_eq!(summary.recent_transactions.len(), 2);

        assert_eq!(summary.categories.len(), 2);
        assert_eq!(summary.categories[0].category, "Acomodação");
        assert_eq!(summary.categories[0].percent, 60);
        assert_eq!(summary.categories[1].category, "Transporte");
        assert_eq!(summary.categories[1].amount, 200.0);
        assert_eq!(summary.categories[1].percent, 40);
    }

    #[test]
    fn test_summarize_overspent_clamps() {
        let objective = test_objective_model("Moto", 1000.0);
        let transactions = vec![test_transaction_model(&objective.id, "expense", 50.0, "Lazer")];
        let summary = summarize(&objective, &transactions, &[], objective.deadline, 5).unwrap();

        assert_eq!(summary.saved, -50.0);
        assert_eq!(summary.remaining, 1050.0);
        assert_eq!(summary.progress_percent, 0);
        assert_eq!(summary.days_left, 0);
    }

    #[tokio::test]
    async fn test_generate_dashboard_integration() -> Result<()> {
        let (db, objective) = setup_with_objective().await?;

        create_test_transaction(&db, &objective, TransactionKind::Income, 2500.0, 1).await?;
        create_test_transaction(&db, &objective, TransactionKind::Expense, 500.0, 2).await?;
        create_test_milestone(&db, &objective, "Definir Roteiro", 0).await?;

        let summary = generate_dashboard(&db, &objective, test_date(), None).await?;

        assert_eq!(summary.saved, 2000.0);
        assert_eq!(summary.progress_percent, 20);
        assert_eq!(summary.milestones_total, 1);
        assert_eq!(summary.recent_transactions.len(), 2);

        Ok(())
    }
}
