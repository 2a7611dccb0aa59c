//! Goal selection screen - pick the objective to work on, or create a new one.

use crate::{
    core::{
        currency::format_currency,
        objective::{self, NewObjective},
    },
    entities::objective as objective_entity,
    errors::{Error, Result},
    routes::Route,
    session::{KeyValueStorage, SessionStore},
};
use sea_orm::DatabaseConnection;
use std::fmt::Write;

/// The user's objectives.
#[derive(Debug, Clone)]
pub struct GoalSelectionScreen {
    objectives: Vec<objective_entity::Model>,
}

impl GoalSelectionScreen {
    /// Creates the screen from objectives already loaded.
    #[must_use]
    pub const fn new(objectives: Vec<objective_entity::Model>) -> Self {
        Self { objectives }
    }

    /// Loads the objectives owned by `user_id`.
    pub async fn load(db: &DatabaseConnection, user_id: &str) -> Result<Self> {
        Ok(Self::new(
            objective::get_objectives_for_user(db, user_id).await?,
        ))
    }

    /// Objectives in display order.
    #[must_use]
    pub fn objectives(&self) -> &[objective_entity::Model] {
        &self.objectives
    }

    /// Formatted target, e.g. `R$ 50.000,00`. Falls back to the raw code for an
    /// unsupported stored currency.
    #[must_use]
    pub fn target_label(objective: &objective_entity::Model) -> String {
        objective::target_currency(objective).map_or_else(
            |_| format!("{} {:.2}", objective.target_currency, objective.target_amount),
            |currency| format_currency(objective.target_amount, currency),
        )
    }

    /// Makes the objective with `objective_id` active and returns where to go next.
    pub async fn select<S: KeyValueStorage>(
        &self,
        objective_id: &str,
        session: &mut SessionStore<S>,
    ) -> Result<Route> {
        let chosen = self
            .objectives
            .iter()
            .find(|o| o.id == objective_id)
            .cloned()
            .ok_or_else(|| Error::ObjectiveNotFound {
                id: objective_id.to_string(),
            })?;

        session.select_objective(chosen).await?;
        Ok(Route::Dashboard)
    }

    /// Creates a new objective and adds it to the list.
    pub async fn create(
        &mut self,
        db: &DatabaseConnection,
        new: NewObjective,
    ) -> Result<objective_entity::Model> {
        let created = objective::create_objective(db, new).await?;
        self.objectives.push(created.clone());
        Ok(created)
    }

    /// Text rendering of the page.
    pub fn render(&self) -> Result<String> {
        let mut out = String::from("Selecione um objetivo\n");
        if self.objectives.is_empty() {
            out.push_str("  Nenhum objetivo cadastrado.\n");
        }
        for objective in &self.objectives {
            writeln!(
                out,
                "  [{}] {} | meta {} | prazo {}",
                objective.id,
                objective.name,
                Self::target_label(objective),
                objective.deadline.format("%d/%m/%Y")
            )?;
        }
        Ok(out)
    }
}
