//! Transaction business logic - logging income and expenses against an objective.
//!
//! Every transaction keeps its original amount and currency alongside the amount
//! converted into the objective's target currency at creation time. Conversion uses the
//! static rate table, so converted values are indicative only.

use crate::{
    core::currency::{Currency, ExchangeRates},
    entities::{Transaction, transaction},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};
use std::{fmt, str::FromStr};

/// Direction of a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    /// Money saved towards the objective
    Income,
    /// Money spent on the objective
    Expense,
}

impl TransactionKind {
    /// Value stored in the `kind` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(Error::Validation {
                message: format!("Unknown transaction kind: {other}"),
            }),
        }
    }
}

/// Builds a transaction record, converting the amount into `target_currency`.
///
/// The record is not persisted; screens keep it in memory and the caller decides
/// whether to forward it with [`insert_transaction`].
#[allow(clippy::too_many_arguments)]
pub fn build_transaction(
    objective_id: &str,
    kind: TransactionKind,
    amount: f64,
    currency: Currency,
    target_currency: Currency,
    rates: &ExchangeRates,
    category: &str,
    description: &str,
    date: NaiveDate,
) -> Result<transaction::Model> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidAmount { amount });
    }

    Ok(transaction::Model {
        id: uuid::Uuid::new_v4().to_string(),
        objective_id: objective_id.to_string(),
        kind: kind.as_str().to_string(),
        amount,
        currency: currency.code().to_string(),
        converted_amount: rates.convert(amount, currency, target_currency),
        category: category.trim().to_string(),
        description: description.trim().to_string(),
        date,
    })
}

/// Persists a transaction record built with [`build_transaction`].
pub async fn insert_transaction(
    db: &DatabaseConnection,
    record: &transaction::Model,
) -> Result<transaction::Model> {
    if !record.amount.is_finite() || record.amount <= 0.0 {
        return Err(Error::InvalidAmount {
            amount: record.amount,
        });
    }

    let model = transaction::ActiveModel {
        id: Set(record.id.clone()),
        objective_id: Set(record.objective_id.clone()),
        kind: Set(record.kind.clone()),
        amount: Set(record.amount),
        currency: Set(record.currency.clone()),
        converted_amount: Set(record.converted_amount),
        category: Set(record.category.clone()),
        description: Set(record.description.clone()),
        date: Set(record.date),
    };

    model.insert(db).await.map_err(Into::into)
}

/// Retrieves all transactions for an objective, newest first.
pub async fn get_transactions_for_objective(
    db: &DatabaseConnection,
    objective_id: &str,
) -> Result<Vec<transaction::Model>> {
    Transaction::find()
        .filter(transaction::Column::ObjectiveId.eq(objective_id))
        .order_by_desc(transaction::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a transaction by id.
pub async fn delete_transaction(db: &DatabaseConnection, transaction_id: &str) -> Result<()> {
    let result = Transaction::delete_by_id(transaction_id.to_string())
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::RecordNotFound {
            kind: "Transaction",
            id: transaction_id.to_string(),
        });
    }
    Ok(())
}

/// Parses the kind column of a stored transaction.
pub fn kind_of(record: &transaction::Model) -> Result<TransactionKind> {
    record.kind.parse()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_build_transaction_converts_into_target_currency() {
        let rates = ExchangeRates::default();
        let record = build_transaction(
            "obj",
            TransactionKind::Expense,
            100.0,
            Currency::Usd,
            Currency::Brl,
            &rates,
            " Transporte ",
            "Passagem",
            test_date(),
        )
        .unwrap();

        assert_eq!(record.amount, 100.0);
        assert_eq!(record.currency, "USD");
        assert_eq!(record.converted_amount, 545.0);
        assert_eq!(record.kind, "expense");
        assert_eq!(record.category, "Transporte");
        assert_eq!(kind_of(&record).unwrap(), TransactionKind::Expense);
    }

    #[test]
    fn test_build_transaction_rejects_bad_amounts() {
        let rates = ExchangeRates::default();
        for amount in [0.0, -5.0, f64::NAN] {
            let result = build_transaction(
                "obj",
                TransactionKind::Income,
                amount,
                Currency::Brl,
                Currency::Brl,
                &rates,
                "Outros",
                "x",
                test_date(),
            );
            assert!(matches!(result, Err(Error::InvalidAmount { .. })));
        }
    }

    #[test]
    fn test_transaction_kind_parse() {
        assert_eq!(
            "Income".parse::<TransactionKind>().unwrap(),
            TransactionKind::Income
        );
        assert!("transfer".parse::<TransactionKind>().is_err());
    }

    #[tokio::test]
    async fn test_insert_list_delete_integration() -> Result<()> {
        let (db, objective) = setup_with_objective().await?;

        let older = create_test_transaction(&db, &objective, TransactionKind::Income, 200.0, 1)
            .await?;
        let newer = create_test_transaction(&db, &objective, TransactionKind::Expense, 50.0, 2)
            .await?;

        let listed = get_transactions_for_objective(&db, &objective.id).await?;
        assert_eq!(listed, vec![newer.clone(), older.clone()]);

        delete_transaction(&db, &newer.id).await?;
        let listed = get_transactions_for_objective(&db, &objective.id).await?;
        assert_eq!(listed, vec![older]);

        assert!(matches!(
            delete_transaction(&db, &newer.id).await,
            Err(Error::RecordNotFound { .. })
        ));

        Ok(())
    }
}
