//! Milestone entity - A step towards an objective, written by hand or suggested by AI.
//!
//! `order_index` drives display order only; it is neither unique nor contiguous.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Milestone database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "milestones")]
pub struct Model {
    /// UUID of the milestone
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Objective this milestone belongs to
    pub objective_id: String,
    /// Short title
    pub title: String,
    /// What has to be done
    pub description: Option<String>,
    /// Optional date the milestone should be done by
    pub target_date: Option<Date>,
    /// Whether the user checked it off
    pub is_completed: bool,
    /// Display position
    pub order_index: i32,
}

/// Defines relationships between Milestone and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each milestone belongs to one objective
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
