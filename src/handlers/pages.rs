use axum::{
    extract::{Path, Query, State},
    response::Html,
};
use uuid::Uuid;

use super::objects::MessageQuery;
use crate::{
    auth::CurrentUser,
    crud::EntityDescriptor,
    db::{
        enums::EntityKind,
        repositories::{AlbumRepository, ArtistRepository, SongRepository},
    },
    error::{AppError, Result},
    state::AppState,
    templates::{about_page, album_detail_page, artists_and_albums_page, artists_page, index_page, songs_page},
};

fn descriptor(state: &AppState, kind: EntityKind) -> Result<&EntityDescriptor> {
    state
        .registry
        .descriptor_for(kind)
        .ok_or_else(|| AppError::Internal(format!("{} is not registered", kind.as_str())))
}

pub async fn index(Query(query): Query<MessageQuery>) -> Html<String> {
    Html(index_page(query.message.as_deref()).into_string())
}

pub async fn about() -> Html<String> {
    Html(about_page().into_string())
}

pub async fn artists(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<MessageQuery>,
) -> Result<Html<String>> {
    user.require_login()?;

    let artists = ArtistRepository::new(state.db.clone()).list().await?;
    let page = artists_page(
        descriptor(&state, EntityKind::Artist)?,
        &artists,
        query.message.as_deref(),
    );
    Ok(Html(page.into_string()))
}

pub async fn artists_and_albums(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<MessageQuery>,
) -> Result<Html<String>> {
    user.require_login()?;

    let artists = ArtistRepository::new(state.db.clone()).list().await?;
    let albums = AlbumRepository::new(state.db.clone()).list_with_artists().await?;
    let page = artists_and_albums_page(
        descriptor(&state, EntityKind::Artist)?,
        descriptor(&state, EntityKind::Album)?,
        &artists,
        &albums,
        query.message.as_deref(),
    );
    Ok(Html(page.into_string()))
}

pub async fn songs(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<MessageQuery>,
) -> Result<Html<String>> {
    user.require_login()?;

    let songs = SongRepository::new(state.db.clone()).list_with_albums().await?;
    let page = songs_page(
        descriptor(&state, EntityKind::Song)?,
        &songs,
        query.message.as_deref(),
    );
    Ok(Html(page.into_string()))
}

/// Album header and its songs in position order
pub async fn album_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    let id = Uuid::parse_str(&id).map_err(|_| AppError::not_found(format!("Album {}", id)))?;

    let (album, artist) = AlbumRepository::new(state.db.clone())
        .find_with_artist(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Album {}", id)))?;
    let songs = SongRepository::new(state.db.clone()).find_by_album(album.id).await?;

    let page = album_detail_page(
        descriptor(&state, EntityKind::Song)?,
        &album,
        artist.as_ref(),
        songs,
    );
    Ok(Html(page.into_string()))
}
