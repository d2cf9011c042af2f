use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::{
        entities::{album, artist, song},
        repositories::{AlbumRepository, ArtistRepository, SongRepository},
    },
    error::{AppError, Result},
    state::AppState,
};

#[derive(Serialize)]
pub struct ArtistResponse {
    pub id: Uuid,
    pub description: String,
    pub notes: String,
}

#[derive(Serialize)]
pub struct AlbumResponse {
    pub id: Uuid,
    pub description: String,
    pub artist_id: Uuid,
    pub year: Option<i32>,
}

#[derive(Serialize)]
pub struct SongResponse {
    pub id: Uuid,
    pub description: String,
    pub album_id: Uuid,
    pub position: i32,
}

impl From<artist::Model> for ArtistResponse {
    fn from(m: artist::Model) -> Self {
        Self {
            id: m.id,
            description: m.description,
            notes: m.notes,
        }
    }
}

impl From<album::Model> for AlbumResponse {
    fn from(m: album::Model) -> Self {
        Self {
            id: m.id,
            description: m.description,
            artist_id: m.artist_id,
            year: m.year,
        }
    }
}

impl From<song::Model> for SongResponse {
    fn from(m: song::Model) -> Self {
        Self {
            id: m.id,
            description: m.description,
            album_id: m.album_id,
            position: m.position,
        }
    }
}

fn parse_id(raw: &str, what: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::not_found(format!("{} {}", what, raw)))
}

pub async fn list_artists(State(state): State<AppState>) -> Result<Json<Vec<ArtistResponse>>> {
    let artists = ArtistRepository::new(state.db.clone()).list().await?;
    Ok(Json(artists.into_iter().map(Into::into).collect()))
}

pub async fn artist_albums(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<AlbumResponse>>> {
    let id = parse_id(&id, "Artist")?;
    ArtistRepository::new(state.db.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Artist {}", id)))?;

    let albums = AlbumRepository::new(state.db.clone()).find_by_artist(id).await?;
    Ok(Json(albums.into_iter().map(Into::into).collect()))
}

/// Songs of an album, ascending by position
pub async fn album_songs(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<SongResponse>>> {
    let id = parse_id(&id, "Album")?;
    AlbumRepository::new(state.db.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Album {}", id)))?;

    let songs = SongRepository::new(state.db.clone()).find_by_album(id).await?;
    Ok(Json(songs.into_iter().map(Into::into).collect()))
}
