//! Document entity - Metadata for a document attached to an objective.
//!
//! No file content is stored; size and type are display labels.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Document database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    /// UUID of the document
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Objective this document belongs to
    pub objective_id: String,
    /// File name shown to the user
    pub name: String,
    /// `"PDF"`, `"Image"` or `"Other"`
    pub file_type: String,
    /// Size label such as `"1.2 MB"`
    pub size_label: String,
    /// Category (e.g., "Transporte")
    pub category: String,
    /// Day the document was registered
    pub date: Date,
}

/// Defines relationships between Document and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each document belongs to one objective
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
