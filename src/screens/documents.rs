//! Documents screen - metadata placeholders for files attached to an objective.

use crate::{
    core::{document::{self, DocumentType}, search},
    entities::document as document_entity,
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use std::fmt::Write;

/// Size label given to documents registered from the form.
pub const PLACEHOLDER_SIZE: &str = "0.0 KB";

/// Fields of the "new document" form.
#[derive(Debug, Clone)]
pub struct DocumentForm {
    /// File name, with or without extension
    pub name: String,
    /// Category
    pub category: String,
    /// Declared type, used to pick an extension when the name has none
    pub file_type: DocumentType,
}

/// Documents of one objective, newest first.
#[derive(Debug, Clone)]
pub struct DocumentsScreen {
    objective_id: String,
    documents: Vec<document_entity::Model>,
}

impl DocumentsScreen {
    /// Creates the screen from documents already loaded.
    #[must_use]
    pub fn new(objective_id: &str, documents: Vec<document_entity::Model>) -> Self {
        Self {
            objective_id: objective_id.to_string(),
            documents,
        }
    }

    /// Loads the objective's documents.
    pub async fn load(db: &DatabaseConnection, objective_id: &str) -> Result<Self> {
        let documents = document::get_documents_for_objective(db, objective_id).await?;
        Ok(Self::new(objective_id, documents))
    }

    /// Documents, newest first.
    #[must_use]
    pub fn documents(&self) -> &[document_entity::Model] {
        &self.documents
    }

    /// Registers a document dated `today` at the top of the list.
    ///
    /// Returns `None` when the name is empty. A name without a `.` gets the declared
    /// type's extension; the stored type is then inferred from the final name.
    pub fn add(&mut self, form: &DocumentForm, today: NaiveDate) -> Option<document_entity::Model> {
        if !super::all_filled(&[&form.name]) {
            return None;
        }

        let mut name = form.name.trim().to_string();
        if !name.contains('.') {
            if let Some(extension) = form.file_type.default_extension() {
                name.push_str(extension);
            }
        }

        let file_type = match DocumentType::infer(&name) {
            DocumentType::Other => form.file_type,
            inferred => inferred,
        };

        let record = document_entity::Model {
            id: super::new_id(),
            objective_id: self.objective_id.clone(),
            name,
            file_type: file_type.as_str().to_string(),
            size_label: PLACEHOLDER_SIZE.to_string(),
            category: form.category.trim().to_string(),
            date: today,
        };
        self.documents.insert(0, record.clone());
        Some(record)
    }

    /// Removes a document, returning it if it was present.
    pub fn remove(&mut self, document_id: &str) -> Option<document_entity::Model> {
        let position = self.documents.iter().position(|d| d.id == document_id)?;
        Some(self.documents.remove(position))
    }

    /// Documents whose name or category contains `query`, ignoring case.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&document_entity::Model> {
        self.documents
            .iter()
            .filter(|d| search::matches_query(query, &[&d.name, &d.category]))
            .collect()
    }

    /// Text rendering of the page, limited to documents matching `query`.
    pub fn render(&self, query: &str) -> Result<String> {
        let mut out = String::new();
        let matches = self.search(query);
        writeln!(out, "Documentos ({})", matches.len())?;

        for d in matches {
            let tag = match DocumentType::from_stored(&d.file_type) {
                DocumentType::Pdf => "PDF",
                DocumentType::Image => "IMG",
                DocumentType::Other => "ARQ",
            };
            writeln!(
                out,
                "  [{tag}] {} | {} | {} | {} [{}]",
                d.name,
                d.category,
                d.size_label,
                d.date.format("%d/%m/%Y"),
                d.id
            )?;
        }
        Ok(out)
    }
}
