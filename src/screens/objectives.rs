//! Objectives screen - the milestone checklist of the active objective.

use crate::{
    ai::{self, MilestoneGenerator, SuggestedMilestone, SuggestionRequest},
    core::milestone,
    entities::{milestone as milestone_entity, objective as objective_entity},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use std::fmt::Write;

/// Milestones of one objective.
///
/// The list is kept in insertion order; [`ObjectivesScreen::sorted`] gives the display
/// order.
#[derive(Debug, Clone)]
pub struct ObjectivesScreen {
    objective_id: String,
    milestones: Vec<milestone_entity::Model>,
}

impl ObjectivesScreen {
    /// Creates the screen from milestones already loaded.
    #[must_use]
    pub fn new(objective_id: &str, milestones: Vec<milestone_entity::Model>) -> Self {
        Self {
            objective_id: objective_id.to_string(),
            milestones,
        }
    }

    /// Loads the objective's milestones.
    pub async fn load(db: &DatabaseConnection, objective_id: &str) -> Result<Self> {
        let milestones = milestone::get_milestones_for_objective(db, objective_id).await?;
        Ok(Self::new(objective_id, milestones))
    }

    /// Milestones as stored.
    #[must_use]
    pub fn milestones(&self) -> &[milestone_entity::Model] {
        &self.milestones
    }

    /// Milestones ordered by `order_index`; equal indexes keep insertion order.
    #[must_use]
    pub fn sorted(&self) -> Vec<&milestone_entity::Model> {
        let mut sorted: Vec<_> = self.milestones.iter().collect();
        sorted.sort_by_key(|m| m.order_index);
        sorted
    }

    fn next_index(&self) -> i32 {
        i32::try_from(self.milestones.len()).unwrap_or(i32::MAX)
    }

    fn record(&self, title: &str, description: &str, order_index: i32) -> milestone_entity::Model {
        let description = description.trim();
        milestone_entity::Model {
            id: super::new_id(),
            objective_id: self.objective_id.clone(),
            title: title.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            target_date: None,
            is_completed: false,
            order_index,
        }
    }

    /// Adds a milestone at the end of the list. Returns `None` when the title is empty.
    pub fn add_manual(&mut self, title: &str, description: &str) -> Option<milestone_entity::Model> {
        if !super::all_filled(&[title]) {
            return None;
        }
        let record = self.record(title, description, self.next_index());
        self.milestones.push(record.clone());
        Some(record)
    }

    /// Appends suggestions after the existing milestones, in the order received.
    ///
    /// Item `idx` gets `order_index = count + idx`; the service's own `order_index` is
    /// ignored. Every item is kept, whatever its content.
    pub fn append_suggestions(
        &mut self,
        suggestions: Vec<SuggestedMilestone>,
    ) -> Vec<milestone_entity::Model> {
        let base = self.next_index();
        let added: Vec<_> = suggestions
            .into_iter()
            .enumerate()
            .map(|(idx, s)| {
                let offset = i32::try_from(idx).unwrap_or(i32::MAX);
                self.record(&s.title, &s.description, base.saturating_add(offset))
            })
            .collect();

        self.milestones.extend(added.iter().cloned());
        added
    }

    /// Asks `generator` for suggestions and appends them.
    ///
    /// A failed generation leaves the list untouched and returns an empty vector.
    pub async fn generate(
        &mut self,
        generator: &dyn MilestoneGenerator,
        objective: &objective_entity::Model,
    ) -> Vec<milestone_entity::Model> {
        let request = SuggestionRequest::from_objective(objective);
        let suggestions = ai::suggest_milestones(generator, &request).await;
        self.append_suggestions(suggestions)
    }

    /// Flips a milestone's completion flag and returns the new value.
    pub fn toggle(&mut self, milestone_id: &str) -> Option<bool> {
        let milestone = self.milestones.iter_mut().find(|m| m.id == milestone_id)?;
        milestone.is_completed = !milestone.is_completed;
        Some(milestone.is_completed)
    }

    /// Removes a milestone, returning it if it was present.
    pub fn remove(&mut self, milestone_id: &str) -> Option<milestone_entity::Model> {
        let position = self.milestones.iter().position(|m| m.id == milestone_id)?;
        Some(self.milestones.remove(position))
    }

    /// Text rendering of the checklist.
    pub fn render(&self) -> Result<String> {
        let mut out = String::new();
        let done = self.milestones.iter().filter(|m| m.is_completed).count();
        writeln!(out, "Marcos ({done}/{})", self.milestones.len())?;

        if self.milestones.is_empty() {
            writeln!(out, "Nenhum marco cadastrado.")?;
        }
        for m in self.sorted() {
            let mark = if m.is_completed { 'x' } else { ' ' };
            writeln!(out, "  [{mark}] {} [{}]", m.title, m.id)?;
            if let Some(description) = &m.description {
                writeln!(out, "      {description}")?;
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::ai::tests::FixedGenerator;
    use crate::test_utils::*;

    fn suggestion(title: &str, order_index: i64) -> SuggestedMilestone {
        SuggestedMilestone {
            title: title.to_string(),
            description: format!("Detalhes de {title}"),
            order_index,
        }
    }

    #[test]
    fn test_add_manual_uses_current_count() {
        let mut screen = ObjectivesScreen::new("obj", Vec::new());
        let first = screen.add_manual("Tirar passaporte", "").unwrap();
        let second = screen.add_manual("Comprar passagem", "Voo direto").unwrap();

        assert_eq!(first.order_index, 0);
        assert_eq!(first.description, None);
        assert_eq!(second.order_index, 1);
        assert_eq!(second.description.as_deref(), Some("Voo direto"));
        assert!(!second.is_completed);
    }

    #[test]
    fn test_add_manual_without_title_is_a_no_op() {
        let mut screen = ObjectivesScreen::new("obj", Vec::new());
        assert!(screen.add_manual("   ", "desc").is_none());
        assert!(screen.milestones().is_empty());
    }

    #[test]
    fn test_append_suggestions_after_existing() {
        let existing = vec![
            test_milestone_model("obj", "A", 0),
            test_milestone_model("obj", "B", 1),
        ];
        let mut screen = ObjectivesScreen::new("obj", existing);

        let added = screen.append_suggestions(vec![suggestion("C", 7), suggestion("D", 3)]);

        let indexes: Vec<_> = added.iter().map(|m| m.order_index).collect();
        assert_eq!(indexes, vec![2, 3]);
        let titles: Vec<_> = screen.sorted().iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_append_suggestions_keeps_every_item() {
        let mut screen = ObjectivesScreen::new("obj", vec![test_milestone_model("obj", "A", 0)]);

        let added = screen.append_suggestions(vec![
            suggestion("B", 1),
            suggestion("", 2),
            suggestion("C", 3),
        ]);

        let indexes: Vec<_> = added.iter().map(|m| m.order_index).collect();
        assert_eq!(indexes, vec![1, 2, 3]);
        assert_eq!(added[1].title, "");
        assert_eq!(screen.milestones().len(), 4);
    }

    #[test]
    fn test_sorted_orders_by_index() {
        let screen = ObjectivesScreen::new(
            "obj",
            vec![
                test_milestone_model("obj", "late", 5),
                test_milestone_model("obj", "early", 0),
                test_milestone_model("obj", "tie", 5),
            ],
        );
        let titles: Vec<_> = screen.sorted().iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["early", "late", "tie"]);
    }

    #[test]
    fn test_double_toggle_restores_state() {
        let mut screen = ObjectivesScreen::new("obj", Vec::new());
        let id = screen.add_manual("Reservar hostel", "").unwrap().id;

        assert_eq!(screen.toggle(&id), Some(true));
        assert_eq!(screen.toggle(&id), Some(false));
        assert!(!screen.milestones()[0].is_completed);
        assert_eq!(screen.toggle("missing"), None);
    }

    #[test]
    fn test_remove() {
        let mut screen = ObjectivesScreen::new("obj", Vec::new());
        let id = screen.add_manual("X", "").unwrap().id;
        assert!(screen.remove("missing").is_none());
        assert_eq!(screen.remove(&id).unwrap().title, "X");
        assert!(screen.render().unwrap().contains("Nenhum marco cadastrado."));
    }

    #[tokio::test]
    async fn test_generate_appends_parsed_suggestions() {
        let objective = test_objective_model("Intercâmbio", 50000.0);
        let mut screen = ObjectivesScreen::new(&objective.id, Vec::new());
        screen.add_manual("Manual", "").unwrap();

        let generator = FixedGenerator(Ok(
            r#"[{"title": "Passaporte", "description": "PF", "order_index": 1}]"#.to_string(),
        ));
        let added = screen.generate(&generator, &objective).await;

        assert_eq!(added.len(), 1);
        assert_eq!(added[0].order_index, 1);
        assert_eq!(added[0].objective_id, objective.id);
        assert_eq!(screen.milestones().len(), 2);
    }

    #[tokio::test]
    async fn test_generate_failure_leaves_list_untouched() {
        let objective = test_objective_model("Intercâmbio", 50000.0);
        let mut screen = ObjectivesScreen::new(&objective.id, Vec::new());

        for generator in [
            FixedGenerator(Err("quota exceeded".to_string())),
            FixedGenerator(Ok(r#"{"title": "not an array"}"#.to_string())),
        ] {
            assert!(screen.generate(&generator, &objective).await.is_empty());
        }
        assert!(screen.milestones().is_empty());
    }

    #[tokio::test]
    async fn test_load_in_display_order() -> Result<()> {
        let (db, objective) = setup_with_objective().await?;
        create_test_milestone(&db, &objective, "Segundo", 1).await?;
        create_test_milestone(&db, &objective, "Primeiro", 0).await?;

        let screen = ObjectivesScreen::load(&db, &objective.id).await?;
        assert_eq!(screen.milestones()[0].title, "Primeiro");
        assert!(screen.render()?.contains("Marcos (0/2)"));
        Ok(())
    }
}
