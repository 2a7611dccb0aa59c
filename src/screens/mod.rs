//! Screens - one view model per page of the client.
//!
//! Each screen owns its list in memory and exposes the operations its page offers. A
//! form submitted with a required field left empty is silently ignored (the operation
//! returns `None`). Screens never talk to the backend on their own; callers forward the
//! returned records when they want them persisted.

/// Objective dashboard
pub mod dashboard;
/// Document records
pub mod documents;
/// Transactions
pub mod finance;
/// Objective picker and creation
pub mod goal_selection;
/// Credential form
pub mod login;
/// Milestones
pub mod objectives;
/// Profile, members and objectives overview
pub mod settings;

pub use dashboard::DashboardScreen;
pub use documents::{DocumentForm, DocumentsScreen};
pub use finance::{FinanceScreen, TransactionForm};
pub use goal_selection::GoalSelectionScreen;
pub use login::{Authenticator, LoginScreen, StaticAuthenticator};
pub use objectives::ObjectivesScreen;
pub use settings::{Member, MemberForm, MemberRole, SettingsScreen};

/// Returns true when every field has non-whitespace content.
pub(crate) fn all_filled(fields: &[&str]) -> bool {
    fields.iter().all(|field| !field.trim().is_empty())
}

/// Fresh identifier for a record created on a screen.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
