use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use uuid::Uuid;

use super::fields::{
    clean_char, clean_integer, clean_reference, submitted, DESCRIPTION_MAX_LENGTH,
    MSG_INVALID_CHOICE,
};
use super::{BoundField, Choice, FieldErrors, FormData, FormView, ModelForm, Widget};
use crate::db::{
    entities::song,
    enums::EntityKind,
    record::Record,
    repositories::AlbumRepository,
};
use crate::error::{AppError, Result};

struct CleanedSong {
    description: String,
    album_id: Uuid,
    position: i32,
}

/// Add-or-change form for songs
pub struct SongForm {
    instance: Option<song::Model>,
    data: Option<FormData>,
    errors: FieldErrors,
    cleaned: Option<CleanedSong>,
}

impl SongForm {
    pub fn new(instance: Option<song::Model>, data: Option<FormData>) -> Self {
        Self {
            instance,
            data,
            errors: FieldErrors::default(),
            cleaned: None,
        }
    }

    pub fn boxed(instance: Option<Record>, data: Option<FormData>) -> Box<dyn ModelForm> {
        Box::new(Self::new(instance.and_then(Record::into_song), data))
    }
}

#[async_trait]
impl ModelForm for SongForm {
    fn kind(&self) -> EntityKind {
        EntityKind::Song
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
        // A blank position falls back to the column default
        let position = clean_integer(data, "position", false, &mut self.errors)
            .map(|p| p.unwrap_or(0));
        let mut album_id = clean_reference(data, "album", &mut self.errors);

        if let Some(id) = album_id {
            if AlbumRepository::new(db.clone()).find_by_id(id).await?.is_none() {
                self.errors.add("album", MSG_INVALID_CHOICE);
                album_id = None;
            }
        }

        self.cleaned = match (description, album_id, position) {
            (Some(description), Some(album_id), Some(position)) if self.errors.is_empty() => {
                Some(CleanedSong {
                    description,
                    album_id,
                    position,
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
            .ok_or_else(|| AppError::Internal("Song form saved before validation".to_string()))?;

        let saved = match &self.instance {
            Some(existing) => {
                let mut active: song::ActiveModel = existing.clone().into();
                active.description = Set(cleaned.description);
                active.album_id = Set(cleaned.album_id);
                active.position = Set(cleaned.position);
                active.update(db).await?
            }
            None => {
                song::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    description: Set(cleaned.description),
                    album_id: Set(cleaned.album_id),
                    position: Set(cleaned.position),
                }
                .insert(db)
                .await?
            }
        };

        self.instance = Some(saved.clone());
        Ok(Record::Song(saved))
    }

    async fn view(&self, db: &DatabaseConnection) -> Result<FormView> {
        let data = self.data.as_ref();
        let initial = self.instance.as_ref();

        let choices = AlbumRepository::new(db.clone())
            .list()
            .await?
            .into_iter()
            .map(|album| Choice {
                value: album.id.to_string(),
                label: album.to_string(),
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
                        .or_else(|| initial.map(|s| s.description.clone()))
                        .unwrap_or_default(),
                    errors: self.errors.get("description").to_vec(),
                },
                BoundField {
                    name: "album",
                    label: "Album",
                    widget: Widget::Select(choices),
                    required: true,
                    help_text: None,
                    value: submitted(data, "album")
                        .or_else(|| initial.map(|s| s.album_id.to_string()))
                        .unwrap_or_default(),
                    errors: self.errors.get("album").to_vec(),
                },
                BoundField {
                    name: "position",
                    label: "Position",
                    widget: Widget::Number,
                    required: false,
                    help_text: Some("Songs are listed by ascending position"),
                    value: submitted(data, "position")
                        .or_else(|| initial.map(|s| s.position.to_string()))
                        .unwrap_or_else(|| "0".to_string()),
                    errors: self.errors.get("position").to_vec(),
                },
            ],
        })
    }
}
