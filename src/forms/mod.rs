//! Validated input schemas for catalog entities
//!
//! A form is constructed from an optional existing record and optional
//! submitted data. Unbound forms only render; bound forms validate and,
//! when valid, save exactly one record.

pub mod album;
pub mod artist;
pub mod fields;
pub mod simple;
pub mod song;

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::db::{enums::EntityKind, record::Record};
use crate::error::Result;

pub use album::AlbumForm;
pub use artist::ArtistForm;
pub use simple::SimpleForm;
pub use song::SongForm;

/// Raw submitted field values, keyed by field name
pub type FormData = HashMap<String, String>;

/// Builds the form of one entity kind; the record, when given, is of that kind
pub type FormConstructor = fn(Option<Record>, Option<FormData>) -> Box<dyn ModelForm>;

/// Error messages per field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Widget {
    Text { max_length: usize },
    TextArea,
    Number,
    Select(Vec<Choice>),
}

/// One field ready for display: its current value and any errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundField {
    pub name: &'static str,
    pub label: &'static str,
    pub widget: Widget,
    pub required: bool,
    pub help_text: Option<&'static str>,
    pub value: String,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub is_bound: bool,
    pub fields: Vec<BoundField>,
}

impl FormView {
    pub fn field(&self, name: &str) -> Option<&BoundField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(|f| !f.errors.is_empty())
    }
}

/// Schema bound to one entity kind
#[async_trait]
pub trait ModelForm: Send + Sync {
    fn kind(&self) -> EntityKind;

    /// Whether submitted data was supplied
    fn is_bound(&self) -> bool;

    /// Validate the submitted data, collecting per-field errors
    ///
    /// Unbound forms are never valid.
    async fn is_valid(&mut self, db: &DatabaseConnection) -> Result<bool>;

    fn errors(&self) -> &FieldErrors;

    /// Persist the validated data, updating the bound record or creating a new one
    async fn save(&mut self, db: &DatabaseConnection) -> Result<Record>;

    /// Fields with their current values, for rendering
    async fn view(&self, db: &DatabaseConnection) -> Result<FormView>;
}
