use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use uuid::Uuid;

use super::fields::{clean_char, clean_text, submitted, DESCRIPTION_MAX_LENGTH};
use super::{BoundField, FieldErrors, FormData, FormView, ModelForm, Widget};
use crate::db::{entities::artist, enums::EntityKind, record::Record};
use crate::error::{AppError, Result};

struct CleanedArtist {
    description: String,
    notes: String,
}

/// Add-or-change form for artists
pub struct ArtistForm {
    instance: Option<artist::Model>,
    data: Option<FormData>,
    errors: FieldErrors,
    cleaned: Option<CleanedArtist>,
}

impl ArtistForm {
    pub fn new(instance: Option<artist::Model>, data: Option<FormData>) -> Self {
        Self {
            instance,
            data,
            errors: FieldErrors::default(),
            cleaned: None,
        }
    }

    pub fn boxed(instance: Option<Record>, data: Option<FormData>) -> Box<dyn ModelForm> {
        Box::new(Self::new(instance.and_then(Record::into_artist), data))
    }
}

#[async_trait]
impl ModelForm for ArtistForm {
    fn kind(&self) -> EntityKind {
        EntityKind::Artist
    }

    fn is_bound(&self) -> bool {
        self.data.is_some()
    }

    async fn is_valid(&mut self, _db: &DatabaseConnection) -> Result<bool> {
        let Some(data) = &self.data else {
            return Ok(false);
        };

        self.errors.clear();
        let description = clean_char(data, "description", DESCRIPTION_MAX_LENGTH, true, &mut self.errors);
        let notes = clean_text(data, "notes");

        self.cleaned = match description {
            Some(description) if self.errors.is_empty() => Some(CleanedArtist { description, notes }),
            _ => None,
        };
        Ok(self.cleaned.is_some())
    }

    fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    async fn save(&mut self, db: &DatabaseConnection) -> Result<Record> {
        let cleaned = self
            .cleaned
            .take()
            .ok_or_else(|| AppError::Internal("Artist form saved before validation".to_string()))?;

        let saved = match &self.instance {
            Some(existing) => {
                let mut active: artist::ActiveModel = existing.clone().into();
                active.description = Set(cleaned.description);
                active.notes = Set(cleaned.notes);
                active.update(db).await?
            }
            None => {
                artist::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    description: Set(cleaned.description),
                    notes: Set(cleaned.notes),
                }
                .insert(db)
                .await?
            }
        };

        self.instance = Some(saved.clone());
        Ok(Record::Artist(saved))
    }

    async fn view(&self, _db: &DatabaseConnection) -> Result<FormView> {
        let data = self.data.as_ref();
        let initial = self.instance.as_ref();

        Ok(FormView {
            is_bound: self.is_bound(),
            fields: vec![
                BoundField {
                    name: "description",
                    label: "Description",
                    widget: Widget::Text {
                        max_length: DESCRIPTION_MAX_LENGTH,
                    },
                    required: true,
                    help_text: None,
                    value: submitted(data, "description")
                        .or_else(|| initial.map(|a| a.description.clone()))
                        .unwrap_or_default(),
                    errors: self.errors.get("description").to_vec(),
                },
                BoundField {
                    name: "notes",
                    label: "Notes",
                    widget: Widget::TextArea,
                    required: false,
                    help_text: None,
                    value: submitted(data, "notes")
                        .or_else(|| initial.map(|a| a.notes.clone()))
                        .unwrap_or_default(),
                    errors: self.errors.get("notes").to_vec(),
                },
            ],
        })
    }
}
