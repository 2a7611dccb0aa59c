//! Entity module - SeaORM entity definitions for the local backend tables.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod document;
pub mod milestone;
pub mod objective;
pub mod system_state;
pub mod transaction;

// Re-export specific types to avoid conflicts
pub use document::{Column as DocumentColumn, Entity as Document, Model as DocumentModel};
pub use milestone::{Column as MilestoneColumn, Entity as Milestone, Model as MilestoneModel};
pub use objective::{Column as ObjectiveColumn, Entity as Objective, Model as ObjectiveModel};
pub use system_state::{
    Column as SystemStateColumn, Entity as SystemState, Model as SystemStateModel,
};
pub use transaction::{
    Column as TransactionColumn, Entity as Transaction, Model as TransactionModel,
};
