use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use super::entities::{album, artist, song};
use super::enums::EntityKind;

/// A persisted instance of any catalog entity
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "record", rename_all = "lowercase")]
pub enum Record {
    Artist(artist::Model),
    Album(album::Model),
    Song(song::Model),
}

impl Record {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Artist(_) => EntityKind::Artist,
            Self::Album(_) => EntityKind::Album,
            Self::Song(_) => EntityKind::Song,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Self::Artist(m) => m.id,
            Self::Album(m) => m.id,
            Self::Song(m) => m.id,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Artist(m) => &m.description,
            Self::Album(m) => &m.description,
            Self::Song(m) => &m.description,
        }
    }

    pub fn into_artist(self) -> Option<artist::Model> {
        match self {
            Self::Artist(m) => Some(m),
            _ => None,
        }
    }

    pub fn into_album(self) -> Option<album::Model> {
        match self {
            Self::Album(m) => Some(m),
            _ => None,
        }
    }

    pub fn into_song(self) -> Option<song::Model> {
        match self {
            Self::Song(m) => Some(m),
            _ => None,
        }
    }
}

/// Description, or the identifier when the description is blank
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_text(f, self.id(), self.description())
    }
}

pub(crate) fn display_text(f: &mut fmt::Formatter<'_>, id: Uuid, description: &str) -> fmt::Result {
    if description.is_empty() {
        write!(f, "{}", id)
    } else {
        write!(f, "{}", description)
    }
}

impl fmt::Display for artist::Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_text(f, self.id, &self.description)
    }
}

impl fmt::Display for album::Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_text(f, self.id, &self.description)
    }
}

impl fmt::Display for song::Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_text(f, self.id, &self.description)
    }
}
