//! Settings screen - profile, team members and the user's objectives.
//!
//! Members live only in memory. Passwords typed into the form are never kept.

use crate::{
    core::objective,
    entities::objective as objective_entity,
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use std::{fmt, fmt::Write, str::FromStr};

/// Access level of a member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum MemberRole {
    /// Full access, including user management
    Admin,
    /// Can edit objectives and their data
    Editor,
    /// Read-only
    #[default]
    Viewer,
}

impl MemberRole {
    /// Lowercase role name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Viewer => "viewer",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "editor" => Ok(Self::Editor),
            "viewer" => Ok(Self::Viewer),
            other => Err(Error::Validation {
                message: format!("Unknown role: {other}"),
            }),
        }
    }
}

/// A user with access to the account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Login e-mail, not unique
    pub email: String,
    /// Access level
    pub role: MemberRole,
}

/// Fields of the "add member" form.
#[derive(Debug, Clone, Default)]
pub struct MemberForm {
    /// Display name
    pub name: String,
    /// Login e-mail
    pub email: String,
    /// Required, but discarded once the member is added
    pub password: String,
    /// Access level
    pub role: MemberRole,
}

/// Settings page state.
#[derive(Debug, Clone)]
pub struct SettingsScreen {
    members: Vec<Member>,
    objectives: Vec<objective_entity::Model>,
    owner_id: String,
}

impl SettingsScreen {
    /// Starts with the account owner and one editor.
    #[must_use]
    pub fn new(objectives: Vec<objective_entity::Model>) -> Self {
        let owner = Member {
            id: "1".to_string(),
            name: "João da Silva".to_string(),
            email: "joao@email.com".to_string(),
            role: MemberRole::Admin,
        };
        let editor = Member {
            id: "2".to_string(),
            name: "Maria Souza".to_string(),
            email: "maria@email.com".to_string(),
            role: MemberRole::Editor,
        };

        Self {
            owner_id: owner.id.clone(),
            members: vec![owner, editor],
            objectives,
        }
    }

    /// Builds the screen with the user's objectives.
    pub async fn load(db: &DatabaseConnection, user_id: &str) -> Result<Self> {
        let objectives = objective::get_objectives_for_user(db, user_id).await?;
        Ok(Self::new(objectives))
    }

    /// Members in insertion order.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// The member that cannot be removed.
    #[must_use]
    pub fn owner(&self) -> Option<&Member> {
        self.members.iter().find(|m| m.id == self.owner_id)
    }

    /// The user's objectives.
    #[must_use]
    pub fn objectives(&self) -> &[objective_entity::Model] {
        &self.objectives
    }

    /// Adds a member. Returns `None` when name, email or password is empty.
    pub fn add(&mut self, form: &MemberForm) -> Option<Member> {
        if !super::all_filled(&[&form.name, &form.email, &form.password]) {
            return None;
        }
        let member = Member {
            id: super::new_id(),
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            role: form.role,
        };
        self.members.push(member.clone());
        Some(member)
    }

    /// Removes a member. The owner is never removed.
    pub fn remove(&mut self, member_id: &str) -> Option<Member> {
        if member_id == self.owner_id {
            tracing::warn!("Refusing to remove the account owner");
            return None;
        }
        let position = self.members.iter().position(|m| m.id == member_id)?;
        Some(self.members.remove(position))
    }

    /// Text rendering of the page.
    pub fn render(&self) -> Result<String> {
        let mut out = String::new();

        if let Some(owner) = self.owner() {
            writeln!(out, "Perfil: {} <{}>", owner.name, owner.email)?;
        }

        writeln!(out, "Usuários ({})", self.members.len())?;
        for m in &self.members {
            writeln!(out, "  {} <{}> {} [{}]", m.name, m.email, m.role, m.id)?;
        }

        writeln!(out, "Objetivos ({})", self.objectives.len())?;
        for o in &self.objectives {
            writeln!(
                out,
                "  {} | {} | {}",
                o.name,
                super::GoalSelectionScreen::target_label(o),
                o.deadline.format("%d/%m/%Y")
            )?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn form(name: &str, email: &str, password: &str) -> MemberForm {
        MemberForm {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: MemberRole::Editor,
        }
    }

    #[test]
    fn test_placeholder_members() {
        let screen = SettingsScreen::new(Vec::new());
        assert_eq!(screen.members().len(), 2);
        assert_eq!(screen.owner().unwrap().role, MemberRole::Admin);
    }

    #[test]
    fn test_add_requires_all_fields() {
        let mut screen = SettingsScreen::new(Vec::new());
        assert!(screen.add(&form("", "a@b.com", "x")).is_none());
        assert!(screen.add(&form("Ana", "", "x")).is_none());
        assert!(screen.add(&form("Ana", "a@b.com", "")).is_none());
        assert_eq!(screen.members().len(), 2);

        let added = screen.add(&form("Ana", "a@b.com", "segredo")).unwrap();
        assert_eq!(added.role, MemberRole::Editor);
        assert_eq!(screen.members().len(), 3);
    }

    #[test]
    fn test_duplicate_emails_are_allowed() {
        let mut screen = SettingsScreen::new(Vec::new());
        screen.add(&form("Ana", "a@b.com", "1")).unwrap();
        screen.add(&form("Ana", "a@b.com", "1")).unwrap();
        assert_eq!(screen.members().len(), 4);
    }

    #[test]
    fn test_owner_cannot_be_removed() {
        let mut screen = SettingsScreen::new(Vec::new());
        let owner_id = screen.owner().unwrap().id.clone();
        assert!(screen.remove(&owner_id).is_none());
        assert!(screen.remove("2").is_some());
        assert_eq!(screen.members().len(), 1);
        assert!(screen.remove("missing").is_none());
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("Admin".parse::<MemberRole>().unwrap(), MemberRole::Admin);
        assert!("owner".parse::<MemberRole>().is_err());
    }

    #[tokio::test]
    async fn test_load_lists_objectives() -> Result<()> {
        let (db, _objective) = setup_with_objective().await?;
        let screen = SettingsScreen::load(&db, TEST_USER_ID).await?;
        assert_eq!(screen.objectives().len(), 1);

        let text = screen.render()?;
        assert!(text.contains("Perfil: João da Silva"));
        assert!(text.contains("R$ 10.000,00"));
        Ok(())
    }
}
