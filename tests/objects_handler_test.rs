//! Integration tests for the HTTP routes
//!
//! Drives the full router with `oneshot` requests:
//! - Generic object views (add, change, delete, clone)
//! - Authentication by bearer header and session cookie
//! - HTMX fragments versus full pages and redirects
//! - Simple form, list pages and JSON API

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use pretty_assertions::assert_eq;
use sea_orm::{EntityTrait, PaginatorTrait};
use tower::util::ServiceExt;

use music_catalog::{
    auth::Permission,
    create_router,
    db::{
        entities::{album, artist, song},
        enums::{EntityKind, PermissionAction},
        repositories::{AlbumRepository, ArtistRepository},
    },
    state::AppState,
    test_utils::*,
};

fn app(state: &AppState) -> Router {
    create_router(state.clone())
}

async fn body_string(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

async fn parse_json_response(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn form_post(uri: &str, token: Option<&str>, body: String) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body)).unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let state = setup_test_app_state().await;

    let response = app(&state).oneshot(get("/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_json_response(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_add_artist_redirects_with_message() {
    let state = setup_test_app_state().await;
    let (_, token) = create_test_user(
        &state.db,
        "editor",
        &[Permission::catalog(PermissionAction::Add, EntityKind::Artist)],
    )
    .await;

    let response = app(&state)
        .oneshot(form_post(
            "/objects/backend/artist/add",
            Some(&token),
            "description=Aphex+Twin&notes=".to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/objects/backend/artist/add?message=The%20Artist%20%22Aphex%20Twin%22%20was%20added%20successfully."
    );

    let artists = ArtistRepository::new(state.db.clone()).list().await.unwrap();
    assert_eq!(artists.len(), 1);
    assert_eq!(artists[0].description, "Aphex Twin");
    assert_eq!(artists[0].notes, "");
}

#[tokio::test]
async fn test_add_without_permission_is_forbidden() {
    let state = setup_test_app_state().await;
    let (_, token) = create_test_user(
        &state.db,
        "reader",
        &[Permission::catalog(PermissionAction::Change, EntityKind::Artist)],
    )
    .await;

    for token in [None, Some(token.as_str())] {
        let response = app(&state)
            .oneshot(form_post(
                "/objects/backend/artist/add",
                token,
                "description=Sneaky".to_string(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    assert_eq!(artist::Entity::find().count(&state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_unknown_model_and_bad_id_are_404() {
    let state = setup_test_app_state().await;
    let (_, token) = create_test_superuser(&state.db, "admin").await;

    let response = app(&state)
        .oneshot(get("/objects/backend/playlist/add", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app(&state)
        .oneshot(get("/objects/backend/song/42/change", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_change_form_htmx_fragment() {
    let state = setup_test_app_state().await;
    let artist = create_test_artist(&state.db, "Boards of Canada").await;
    let album = create_test_album(&state.db, artist.id, "Geogaddi", Some(2002)).await;
    let (_, token) = create_test_superuser(&state.db, "admin").await;

    let request = Request::builder()
        .uri(format!("/objects/backend/album/{}/change", album.id))
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header("HX-Request", "true")
        .body(Body::empty())
        .unwrap();
    let response = app(&state).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(!html.contains("<html"));
    assert!(html.contains("modal-content"));
    assert!(html.contains("value=\"Geogaddi\""));
    assert!(html.contains(&format!("/objects/backend/album/{}/change", album.id)));
}

#[tokio::test]
async fn test_invalid_change_redisplays_full_page() {
    let state = setup_test_app_state().await;
    let artist = create_test_artist(&state.db, "Autechre").await;
    let (_, token) = create_test_superuser(&state.db, "admin").await;

    let response = app(&state)
        .oneshot(form_post(
            &format!("/objects/backend/artist/{}/change", artist.id),
            Some(&token),
            "description=&notes=ignored".to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("<html"));
    assert!(html.contains("This field is required."));

    let stored = ArtistRepository::new(state.db.clone())
        .find_by_id(artist.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored, artist);
}

#[tokio::test]
async fn test_htmx_save_returns_saved_fragment() {
    let state = setup_test_app_state().await;
    let artist = create_test_artist(&state.db, "Stereolab").await;
    let (_, token) = create_test_superuser(&state.db, "admin").await;

    let request = Request::builder()
        .method("POST")
        .uri("/objects/backend/album/add")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header("HX-Request", "true")
        .body(Body::from(format!(
            "description=Emperor+Tomato+Ketchup&artist={}&year=1996",
            artist.id
        )))
        .unwrap();
    let response = app(&state).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    let album = AlbumRepository::new(state.db.clone())
        .find_by_artist(artist.id)
        .await
        .unwrap()
        .pop()
        .unwrap();
    assert!(html.contains(&format!("data-saved-id=\"{}\"", album.id)));
    assert_eq!(album.year, Some(1996));
}

#[tokio::test]
async fn test_delete_with_session_cookie() {
    let state = setup_test_app_state().await;
    let artist = create_test_artist(&state.db, "Burial").await;
    let album = create_test_album(&state.db, artist.id, "Untrue", Some(2007)).await;
    create_test_song(&state.db, album.id, "Archangel", 2).await;
    let (_, token) = create_test_user(
        &state.db,
        "janitor",
        &[Permission::catalog(PermissionAction::Delete, EntityKind::Album)],
    )
    .await;

    let request = Request::builder()
        .method("POST")
        .uri(format!("/objects/backend/album/{}/delete", album.id))
        .header(header::COOKIE, format!("session_token={}", token))
        .body(Body::empty())
        .unwrap();
    let response = app(&state).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, album.id.to_string());
    assert_eq!(album::Entity::find().count(&state.db).await.unwrap(), 0);
    assert_eq!(song::Entity::find().count(&state.db).await.unwrap(), 0);
    assert_eq!(artist::Entity::find().count(&state.db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_clone_returns_new_id() {
    let state = setup_test_app_state().await;
    let artist = create_test_artist(&state.db, "Can").await;
    let (_, token) = create_test_user(
        &state.db,
        "cloner",
        &[Permission::catalog(PermissionAction::Add, EntityKind::Artist)],
    )
    .await;

    let response = app(&state)
        .oneshot(form_post(
            &format!("/objects/backend/artist/{}/clone", artist.id),
            Some(&token),
            String::new(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let new_id: uuid::Uuid = body_string(response).await.parse().unwrap();
    assert_ne!(new_id, artist.id);

    let copy = ArtistRepository::new(state.db.clone())
        .find_by_id(new_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(copy.description, "Can (2)");
}

#[tokio::test]
async fn test_clone_without_permission_is_forbidden() {
    let state = setup_test_app_state().await;
    let artist = create_test_artist(&state.db, "Neu!").await;
    let (_, token) = create_test_user(
        &state.db,
        "changer",
        &[Permission::catalog(PermissionAction::Change, EntityKind::Artist)],
    )
    .await;

    let response = app(&state)
        .oneshot(form_post(
            &format!("/objects/backend/artist/{}/clone", artist.id),
            Some(&token),
            String::new(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(artist::Entity::find().count(&state.db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_list_pages_require_login() {
    let state = setup_test_app_state().await;
    let artist = create_test_artist(&state.db, "Broadcast").await;
    let (_, token) = create_test_user(&state.db, "viewer", &[]).await;

    for path in ["/artists", "/artists-and-albums", "/songs"] {
        let response = app(&state).oneshot(get(path, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{}", path);

        let response = app(&state).oneshot(get(path, Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{}", path);
    }

    let response = app(&state).oneshot(get("/artists", Some(&token))).await.unwrap();
    let html = body_string(response).await;
    assert!(html.contains("Broadcast"));
    assert!(html.contains(&format!("/objects/backend/artist/{}/change", artist.id)));
}

#[tokio::test]
async fn test_index_shows_flash_message() {
    let state = setup_test_app_state().await;

    let response = app(&state)
        .oneshot(get("/?message=Hello%20there", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Hello there"));
}

#[tokio::test]
async fn test_simple_form_rejects_out_of_range() {
    let state = setup_test_app_state().await;

    let response = app(&state)
        .oneshot(form_post("/simple-form", None, "value=11".to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("This value is not acceptable."));
}

#[tokio::test]
async fn test_simple_form_accepts_in_range() {
    let state = setup_test_app_state().await;

    let response = app(&state)
        .oneshot(form_post("/simple-form", None, "value=7".to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/simple-form?message=Form%20has%20been%20validated"
    );
}

#[tokio::test]
async fn test_api_album_songs_in_position_order() {
    let state = setup_test_app_state().await;
    let artist = create_test_artist(&state.db, "Slowdive").await;
    let album = create_test_album(&state.db, artist.id, "Souvlaki", Some(1993)).await;
    create_test_song(&state.db, album.id, "When the Sun Hits", 4).await;
    create_test_song(&state.db, album.id, "Alison", 1).await;
    create_test_song(&state.db, album.id, "Machine Gun", 2).await;

    let response = app(&state)
        .oneshot(get(&format!("/api/albums/{}/songs", album.id), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_json_response(response).await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["description"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Alison", "Machine Gun", "When the Sun Hits"]);
}

#[tokio::test]
async fn test_api_unknown_album_is_404() {
    let state = setup_test_app_state().await;

    let response = app(&state)
        .oneshot(get(&format!("/api/albums/{}/songs", uuid::Uuid::new_v4()), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app(&state)
        .oneshot(get("/api/artists/nope/albums", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_undecodable_body_from_anonymous_caller_is_forbidden() {
    let state = setup_test_app_state().await;
    let artist = create_test_artist(&state.db, "Harmonia").await;

    let request = Request::builder()
        .method("POST")
        .uri("/objects/backend/song/add")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"description":"Watussi"}"#))
        .unwrap();
    let response = app(&state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let request = Request::builder()
        .method("POST")
        .uri(format!("/objects/backend/artist/{}/change", artist.id))
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("description=Cluster"))
        .unwrap();
    let response = app(&state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let stored = ArtistRepository::new(state.db.clone())
        .find_by_id(artist.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.description, "Harmonia");
}

#[tokio::test]
async fn test_undecodable_body_from_unprivileged_caller_is_forbidden() {
    let state = setup_test_app_state().await;
    let (_, token) = create_test_user(
        &state.db,
        "album-adder",
        &[Permission::catalog(PermissionAction::Add, EntityKind::Album)],
    )
    .await;

    let request = Request::builder()
        .method("POST")
        .uri("/objects/backend/song/add")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let response = app(&state).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_undecodable_body_from_permitted_caller_is_rejected() {
    let state = setup_test_app_state().await;
    let (_, token) = create_test_user(
        &state.db,
        "song-adder",
        &[Permission::catalog(PermissionAction::Add, EntityKind::Song)],
    )
    .await;

    let request = Request::builder()
        .method("POST")
        .uri("/objects/backend/song/add")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let response = app(&state).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(song::Entity::find().count(&state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_simple_form_with_undecodable_body_reports_missing_value() {
    let state = setup_test_app_state().await;

    let request = Request::builder()
        .method("POST")
        .uri("/simple-form")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"value":5}"#))
        .unwrap();
    let response = app(&state).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("This field is required."));
}

#[tokio::test]
async fn test_simple_content_is_plain_text() {
    let state = setup_test_app_state().await;

    let response = app(&state)
        .oneshot(get("/simple-content", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.starts_with("Lorem ipsum dolor sit amet"));
    assert!(!body.contains('<'));
}

#[tokio::test]
async fn test_simple_content_forbidden_is_403() {
    let state = setup_test_app_state().await;
    let (_, token) = create_test_superuser(&state.db, "admin").await;

    for token in [None, Some(token.as_str())] {
        let response = app(&state)
            .oneshot(get("/simple-content-forbidden", token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}

#[tokio::test]
async fn test_simple_content2_fragment_or_page() {
    let state = setup_test_app_state().await;

    let request = Request::builder()
        .uri("/simple-content2")
        .header("HX-Request", "true")
        .body(Body::empty())
        .unwrap();
    let response = app(&state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(!html.contains("<html"));
    assert!(html.contains("modal-content"));
    assert!(html.contains("Lorem ipsum"));

    let response = app(&state)
        .oneshot(get("/simple-content2", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("<html"));
    assert!(html.contains("Lorem ipsum"));
}

#[tokio::test]
async fn test_modal_demo_links_each_endpoint() {
    let state = setup_test_app_state().await;

    let response = app(&state).oneshot(get("/modal-demo", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    for url in ["/simple-content", "/simple-content-forbidden", "/simple-content2", "/simple-form"] {
        assert!(html.contains(&format!("hx-get=\"{}\"", url)));
    }
}
