pub mod api;
pub mod health;
pub mod modal_demo;
pub mod objects;
pub mod pages;
pub mod simple_form;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/artists", get(api::list_artists))
        .route("/artists/:id/albums", get(api::artist_albums))
        .route("/albums/:id/songs", get(api::album_songs))
}

/// Generic add/change/delete/clone of any registered entity type
pub fn object_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/objects/:namespace/:model/add",
            get(objects::add_form).post(objects::add_submit),
        )
        .route(
            "/objects/:namespace/:model/:id/change",
            get(objects::change_form).post(objects::change_submit),
        )
        .route("/objects/:namespace/:model/:id/delete", post(objects::delete_object))
        .route("/objects/:namespace/:model/:id/clone", post(objects::clone_object))
}

pub fn html_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/about", get(pages::about))
        .route("/artists", get(pages::artists))
        .route("/artists-and-albums", get(pages::artists_and_albums))
        .route("/songs", get(pages::songs))
        .route("/albums/:id", get(pages::album_detail))
        .route("/simple-form", get(simple_form::show).post(simple_form::submit))
        .route("/modal-demo", get(modal_demo::index))
        .route("/simple-content", get(modal_demo::simple_content))
        .route("/simple-content-forbidden", get(modal_demo::simple_content_forbidden))
        .route("/simple-content2", get(modal_demo::simple_content_page_or_fragment))
}
