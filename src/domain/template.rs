//! Template records and partial updates.

use serde::Serialize;

use super::{CategoryId, TemplateId};

/// A template: a table with notes, attached to a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    pub id: TemplateId,
    pub category_id: CategoryId,
    pub name: String,
    pub position: u32,
    pub notes: String,
    pub programming_notes: String,
}

/// Partial update of a template's text fields.
///
/// Only fields set to `Some` are written.
///
/// # Examples
///
/// ```
/// use tabula::domain::TemplateUpdate;
///
/// let update = TemplateUpdate::default().notes("checked by QA");
/// assert!(update.name.is_none());
/// assert!(!update.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateUpdate {
    pub name: Option<String>,
    pub notes: Option<String>,
    pub programming_notes: Option<String>,
}

impl TemplateUpdate {
    /// Sets the new name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the new notes.
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets the new programming notes.
    pub fn programming_notes(mut self, notes: impl Into<String>) -> Self {
        self.programming_notes = Some(notes.into());
        self
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.notes.is_none() && self.programming_notes.is_none()
    }
}
