//! Finance screen - the transaction log of the active objective.
//!
//! New transactions are converted into the objective's currency with the static rate
//! table when they are added.

use crate::{
    core::{
        currency::{Currency, ExchangeRates, format_currency},
        objective, search,
        transaction::{self, TransactionKind},
    },
    entities::{objective as objective_entity, transaction as transaction_entity},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use std::fmt::Write;

/// Fields of the "new transaction" form.
#[derive(Debug, Clone)]
pub struct TransactionForm {
    /// Income or expense
    pub kind: TransactionKind,
    /// Amount in `currency`; zero counts as not filled in
    pub amount: f64,
    /// Currency the amount was paid in
    pub currency: Currency,
    /// Category
    pub category: String,
    /// Description
    pub description: String,
    /// Day of the transaction
    pub date: NaiveDate,
}

/// Transactions of one objective, newest first.
#[derive(Debug, Clone)]
pub struct FinanceScreen {
    objective_id: String,
    target_currency: Currency,
    rates: ExchangeRates,
    transactions: Vec<transaction_entity::Model>,
}

impl FinanceScreen {
    /// Creates the screen from transactions already loaded.
    pub fn new(
        objective: &objective_entity::Model,
        rates: ExchangeRates,
        transactions: Vec<transaction_entity::Model>,
    ) -> Result<Self> {
        let mut screen = Self {
            objective_id: objective.id.clone(),
            target_currency: objective::target_currency(objective)?,
            rates,
            transactions,
        };
        screen.sort();
        Ok(screen)
    }

    /// Loads the objective's transactions.
    pub async fn load(
        db: &DatabaseConnection,
        objective: &objective_entity::Model,
        rates: ExchangeRates,
    ) -> Result<Self> {
        let transactions = transaction::get_transactions_for_objective(db, &objective.id).await?;
        Self::new(objective, rates, transactions)
    }

    fn sort(&mut self) {
        // Stable, so same-day transactions keep their relative order
        self.transactions.sort_by(|a, b| b.date.cmp(&a.date));
    }

    /// All transactions, newest first.
    #[must_use]
    pub fn transactions(&self) -> &[transaction_entity::Model] {
        &self.transactions
    }

    /// Adds a transaction. Returns `None` when description, category or amount is
    /// missing.
    pub fn add(&mut self, form: &TransactionForm) -> Option<transaction_entity::Model> {
        if !super::all_filled(&[&form.description, &form.category]) {
            return None;
        }

        let record = transaction::build_transaction(
            &self.objective_id,
            form.kind,
            form.amount,
            form.currency,
            self.target_currency,
            &self.rates,
            &form.category,
            &form.description,
            form.date,
        )
        .ok()?;

        self.transactions.insert(0, record.clone());
        self.sort();
        Some(record)
    }

    /// Removes a transaction, returning it if it was present.
    pub fn remove(&mut self, transaction_id: &str) -> Option<transaction_entity::Model> {
        let position = self
            .transactions
            .iter()
            .position(|t| t.id == transaction_id)?;
        Some(self.transactions.remove(position))
    }

    /// Transactions whose description or category contains `query`, ignoring case.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&transaction_entity::Model> {
        self.transactions
            .iter()
            .filter(|t| search::matches_query(query, &[&t.description, &t.category]))
            .collect()
    }

    /// Sum of converted amounts of the given kind.
    #[must_use]
    pub fn total(&self, kind: TransactionKind) -> f64 {
        self.transactions
            .iter()
            .filter(|t| transaction::kind_of(t).ok() == Some(kind))
            .map(|t| t.converted_amount)
            .sum()
    }

    /// Text rendering of the page, limited to transactions matching `query`.
    pub fn render(&self, query: &str) -> Result<String> {
        let money = |amount| format_currency(amount, self.target_currency);
        let mut out = String::new();

        writeln!(
            out,
            "Entradas {} | Saídas {}",
            money(self.total(TransactionKind::Income)),
            money(self.total(TransactionKind::Expense))
        )?;

        let matches = self.search(query);
        if matches.is_empty() {
            writeln!(out, "Nenhuma transação encontrada.")?;
        }
        for t in matches {
            let sign = if t.kind == TransactionKind::Expense.as_str() { '-' } else { '+' };
            let original = t
                .currency
                .parse::<Currency>()
                .map_or_else(|_| format!("{} {:.2}", t.currency, t.amount), |c| {
                    format_currency(t.amount, c)
                });
            write!(
                out,
                "  {} {sign}{} | {} | {}",
                t.date.format("%d/%m/%Y"),
                money(t.converted_amount),
                t.category,
                t.description
            )?;
            if t.currency != self.target_currency.code() {
                write!(out, " ({original})")?;
            }
            writeln!(out, " [{}]", t.id)?;
        }

        Ok(out)
    }
}
