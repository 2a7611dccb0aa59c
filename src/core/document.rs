//! Document business logic - metadata records for documents attached to an objective.
//!
//! Only names, labels and categories are kept. The type is inferred from the file name.

use crate::{
    entities::{Document, document},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use std::fmt;

/// Kind of document, inferred from its extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentType {
    /// PDF file
    Pdf,
    /// Picture (png, jpg, ...)
    Image,
    /// Anything else
    Other,
}

impl DocumentType {
    /// Value stored in the `file_type` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Image => "Image",
            Self::Other => "Other",
        }
    }

    /// Extension appended to names registered without one.
    #[must_use]
    pub const fn default_extension(self) -> Option<&'static str> {
        match self {
            Self::Pdf => Some(".pdf"),
            Self::Image => Some(".png"),
            Self::Other => None,
        }
    }

    /// Infers the type from a file name's extension.
    #[must_use]
    pub fn infer(name: &str) -> Self {
        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Self::Pdf,
            "png" | "jpg" | "jpeg" | "gif" | "webp" | "heic" => Self::Image,
            _ => Self::Other,
        }
    }

    /// Parses a stored `file_type` value; unknown values map to [`DocumentType::Other`].
    #[must_use]
    pub fn from_stored(value: &str) -> Self {
        match value {
            "PDF" => Self::Pdf,
            "Image" => Self::Image,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persists a document record built by the documents screen.
pub async fn insert_document(
    db: &DatabaseConnection,
    record: &document::Model,
) -> Result<document::Model> {
    if record.name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Document name cannot be empty".to_string(),
        });
    }

    let model = document::ActiveModel {
        id: Set(record.id.clone()),
        objective_id: Set(record.objective_id.clone()),
        name: Set(record.name.clone()),
        file_type: Set(record.file_type.clone()),
        size_label: Set(record.size_label.clone()),
        category: Set(record.category.clone()),
        date: Set(record.date),
    };

    model.insert(db).await.map_err(Into::into)
}

/// Retrieves all documents for an objective, newest first.
pub async fn get_documents_for_objective(
    db: &DatabaseConnection,
    objective_id: &str,
) -> Result<Vec<document::Model>> {
    Document::find()
        .filter(document::Column::ObjectiveId.eq(objective_id))
        .order_by_desc(document::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a document by id.
pub async fn delete_document(db: &DatabaseConnection, document_id: &str) -> Result<()> {
    let result = Document::delete_by_id(document_id.to_string())
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::RecordNotFound {
            kind: "Document",
            id: document_id.to_string(),
        });
    }
    Ok(())
}
