//! Objective entity - A financial goal the user is saving towards.
//!
//! Objectives own milestones, transactions and documents. In this client they are
//! read-only after creation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Objective database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "objectives")]
pub struct Model {
    /// UUID of the objective
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// Display name (e.g., "Intercâmbio Irlanda")
    pub name: String,
    /// Amount to reach, always positive
    pub target_amount: f64,
    /// `"BRL"`, `"USD"` or `"EUR"`
    pub target_currency: String,
    /// Date the objective should be reached by
    pub deadline: Date,
    /// Optional free-text description
    pub description: Option<String>,
    /// When the objective was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Objective and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One objective has many milestones
    #[sea_orm(has_many = "super::milestone::Entity")]
    Milestones,
    /// One objective has many transactions
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transactions,
    /// One objective has many documents
    #[sea_orm(has_many = "super::document::Entity")]
    Documents,
}

impl Related<super::milestone::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Milestones.def()
    }
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl Related<super::document::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Documents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
