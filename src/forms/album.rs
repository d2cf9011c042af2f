use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use uuid::Uuid;

use super::fields::{
    clean_char, clean_integer, clean_reference, submitted, DESCRIPTION_MAX_LENGTH,
    MSG_INVALID_CHOICE,
};
use super::{BoundField, Choice, FieldErrors, FormData, FormView, ModelForm, Widget};
use crate::db::{
    entities::album,
    enums::EntityKind,
    record::Record,
    repositories::ArtistRepository,
};
use crate::error::{AppError, Result};

struct CleanedAlbum {
    description: String,
    artist_id: Uuid,
    year: Option<i32>,
}

/// Add-or-change form for albums; the artist is picked from existing artists
pub struct AlbumForm {
    instance: Option<album::Model>,
    data: Option<FormData>,
    errors: FieldErrors,
    cleaned: Option<CleanedAlbum>,
}

impl AlbumForm {
    pub fn new(instance: Option<album::Model>, data: Option<FormData>) -> Self {
        Self {
            instance,
            data,
            errors: FieldErrors::default(),
            cleaned: None,
        }
    }

    pub fn boxed(instance: Option<Record>, data: Option<FormData>) -> Box<dyn ModelForm> {
        Box::new(Self::new(instance.and_then(Record::into_album), data))
    }
}

#[async_trait]
impl ModelForm for AlbumForm {
    fn kind(&self) -> EntityKind {
        EntityKind::Album
    }

    fn is_bound(&self) -> bool {
        self.data.is_some()
    }

    async fn is_valid(&mut self, db: &DatabaseConnection) -> Result<bool> {
        let Some(data) = &self.data else {
            return Ok(false);
        };

        self.errors.clear();
        let description = clean_char(data, "description", DESCRIPTION_MAX_LENGTH, true, &mut self.errors);
        let year = clean_integer(data, "year", false, &mut self.errors);
        let mut artist_id = clean_reference(data, "artist", &mut self.errors);

        if let Some(id) = artist_id {
            if ArtistRepository::new(db.clone()).find_by_id(id).await?.is_none() {
                self.errors.add("artist", MSG_INVALID_CHOICE);
                artist_id = None;
            }
        }

        self.cleaned = match (description, artist_id, year) {
            (Some(description), Some(artist_id), Some(year)) if self.errors.is_empty() => {
                Some(CleanedAlbum {
                    description,
                    artist_id,
                    year,
                })
            }
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
            .ok_or_else(|| AppError::Internal("Album form saved before validation".to_string()))?;

        let saved = match &self.instance {
            Some(existing) => {
                let mut active: album::ActiveModel = existing.clone().into();
                active.description = Set(cleaned.description);
                active.artist_id = Set(cleaned.artist_id);
                active.year = Set(cleaned.year);
                active.update(db).await?
            }
            None => {
                album::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    description: Set(cleaned.description),
                    artist_id: Set(cleaned.artist_id),
                    year: Set(cleaned.year),
                }
                .insert(db)
                .await?
            }
        };

        self.instance = Some(saved.clone());
        Ok(Record::Album(saved))
    }

    async fn view(&self, db: &DatabaseConnection) -> Result<FormView> {
        let data = self.data.as_ref();
        let initial = self.instance.as_ref();

        let choices = ArtistRepository::new(db.clone())
            .list()
            .await?
            .into_iter()
            .map(|artist| Choice {
                value: artist.id.to_string(),
                label: artist.to_string(),
            })
            .collect();

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
                    name: "artist",
                    label: "Artist",
                    widget: Widget::Select(choices),
                    required: true,
                    help_text: None,
                    value: submitted(data, "artist")
                        .or_else(|| initial.map(|a| a.artist_id.to_string()))
                        .unwrap_or_default(),
                    errors: self.errors.get("artist").to_vec(),
                },
                BoundField {
                    name: "year",
                    label: "Year",
                    widget: Widget::Number,
                    required: false,
                    help_text: None,
                    value: submitted(data, "year")
                        .or_else(|| initial.and_then(|a| a.year).map(|y| y.to_string()))
                        .unwrap_or_default(),
                    errors: self.errors.get("year").to_vec(),
                },
            ],
        })
    }
}
