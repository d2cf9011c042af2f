use serde::{Deserialize, Serialize};

/// Namespace every catalog entity is registered under
pub const CATALOG_NAMESPACE: &str = "backend";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Artist,
    Album,
    Song,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [Self::Artist, Self::Album, Self::Song];

    /// Lowercase model name, as used in URLs and permission codenames
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Artist => "artist",
            Self::Album => "album",
            Self::Song => "song",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "artist" => Some(Self::Artist),
            "album" => Some(Self::Album),
            "song" => Some(Self::Song),
            _ => None,
        }
    }

    /// Capitalized human name used in messages and page titles
    pub fn verbose_name(&self) -> &'static str {
        match self {
            Self::Artist => "Artist",
            Self::Album => "Album",
            Self::Song => "Song",
        }
    }

    pub fn verbose_name_plural(&self) -> &'static str {
        match self {
            Self::Artist => "Artists",
            Self::Album => "Albums",
            Self::Song => "Songs",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermissionAction {
    Add,
    Change,
    Delete,
}

impl PermissionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Change => "change",
            Self::Delete => "delete",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "add" => Some(Self::Add),
            "change" => Some(Self::Change),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}
