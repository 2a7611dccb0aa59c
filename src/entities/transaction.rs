//! Transaction entity - Income or expense logged against an objective.
//!
//! `amount` is in the transaction's own `currency`; `converted_amount` is the same value
//! in the objective's target currency, computed once from the static rate table.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// UUID of the transaction
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Objective this transaction belongs to
    pub objective_id: String,
    /// `"income"` or `"expense"`
    pub kind: String,
    /// Positive amount in `currency`
    pub amount: f64,
    /// `"BRL"`, `"USD"` or `"EUR"`
    pub currency: String,
    /// Amount in the objective's target currency
    pub converted_amount: f64,
    /// Category, usually one of the suggested categories
    pub category: String,
    /// Free-text description
    pub description: String,
    /// Day the transaction happened
    pub date: Date,
}

/// Defines relationships between Transaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each transaction belongs to one objective
    #[sea_orm(
        belongs_to = "super::objective::Entity",
        from = "Column::ObjectiveId",
        to = "super::objective::Column::Id"
    )]
    Objective,
}

impl Related<super::objective::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Objective.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
