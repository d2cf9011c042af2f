use axum::{
    extract::{rejection::FormRejection, Path, Query, State},
    http::{HeaderMap, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::{
    auth::CurrentUser,
    crud::{
        dispatcher::success_message,
        urls::{add_url, change_object_url},
        EditOutcome,
    },
    error::Result,
    forms::FormData,
    state::AppState,
    templates::{generic_form_inner, generic_form_page},
};

#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    pub message: Option<String>,
}

pub fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// `path?message=<urlencoded>`
pub fn redirect_with_message(path: &str, message: &str) -> Redirect {
    Redirect::to(&format!("{}?message={}", path, urlencoding::encode(message)))
}

#[allow(clippy::too_many_arguments)]
async fn edit(
    state: &AppState,
    user: &CurrentUser,
    headers: &HeaderMap,
    uri: &Uri,
    namespace: &str,
    model: &str,
    id: Option<&str>,
    data: Option<FormData>,
    message: Option<String>,
) -> Result<Response> {
    let outcome = state
        .dispatcher()
        .edit(user, namespace, model, id, data)
        .await?;
    let descriptor = state.registry.resolve(namespace, model)?;
    let htmx = is_htmx(headers);

    let response = match outcome {
        EditOutcome::Saved { record, created } => {
            let action = change_object_url(descriptor, &record);
            if htmx {
                Html(generic_form_inner(descriptor, None, &action, None, Some(&record)).into_string())
                    .into_response()
            } else {
                redirect_with_message(uri.path(), &success_message(&record, created)).into_response()
            }
        }
        EditOutcome::Form { form, instance } => {
            let action = match &instance {
                Some(record) => change_object_url(descriptor, record),
                None => add_url(descriptor),
            };
            let markup = if htmx {
                generic_form_inner(descriptor, Some(&form), &action, instance.as_ref(), None)
            } else {
                generic_form_page(
                    descriptor,
                    &form,
                    &action,
                    instance.as_ref(),
                    message.as_deref(),
                )
            };
            Html(markup.into_string()).into_response()
        }
    };
    Ok(response)
}

/// An undecodable body is only reported to callers allowed to submit one
async fn reject_submission(
    state: &AppState,
    user: &CurrentUser,
    namespace: &str,
    model: &str,
    id: Option<&str>,
    rejection: FormRejection,
) -> Result<Response> {
    state
        .dispatcher()
        .authorize_edit(user, namespace, model, id)
        .await?;
    tracing::debug!(%rejection, "Undecodable submission");
    Ok(rejection.into_response())
}

/// Empty add form
pub async fn add_form(
    State(state): State<AppState>,
    user: CurrentUser,
    headers: HeaderMap,
    uri: Uri,
    Path((namespace, model)): Path<(String, String)>,
    Query(query): Query<MessageQuery>,
) -> Result<Response> {
    edit(&state, &user, &headers, &uri, &namespace, &model, None, None, query.message).await
}

pub async fn add_submit(
    State(state): State<AppState>,
    user: CurrentUser,
    headers: HeaderMap,
    uri: Uri,
    Path((namespace, model)): Path<(String, String)>,
    form: std::result::Result<Form<FormData>, FormRejection>,
) -> Result<Response> {
    let data = match form {
        Ok(Form(data)) => data,
        Err(rejection) => {
            return reject_submission(&state, &user, &namespace, &model, None, rejection).await
        }
    };
    edit(&state, &user, &headers, &uri, &namespace, &model, None, Some(data), None).await
}

/// Change form pre-populated from the stored record
pub async fn change_form(
    State(state): State<AppState>,
    user: CurrentUser,
    headers: HeaderMap,
    uri: Uri,
    Path((namespace, model, id)): Path<(String, String, String)>,
    Query(query): Query<MessageQuery>,
) -> Result<Response> {
    edit(
        &state,
        &user,
        &headers,
        &uri,
        &namespace,
        &model,
        Some(&id),
        None,
        query.message,
    )
    .await
}

pub async fn change_submit(
    State(state): State<AppState>,
    user: CurrentUser,
    headers: HeaderMap,
    uri: Uri,
    Path((namespace, model, id)): Path<(String, String, String)>,
    form: std::result::Result<Form<FormData>, FormRejection>,
) -> Result<Response> {
    let data = match form {
        Ok(Form(data)) => data,
        Err(rejection) => {
            return reject_submission(&state, &user, &namespace, &model, Some(&id), rejection).await
        }
    };
    edit(
        &state,
        &user,
        &headers,
        &uri,
        &namespace,
        &model,
        Some(&id),
        Some(data),
        None,
    )
    .await
}

/// Responds with the deleted id as plain text
pub async fn delete_object(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((namespace, model, id)): Path<(String, String, String)>,
) -> Result<String> {
    let deleted = state
        .dispatcher()
        .delete(&user, &namespace, &model, &id)
        .await?;
    Ok(deleted.to_string())
}

/// Responds with the id of the copy as plain text
pub async fn clone_object(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((namespace, model, id)): Path<(String, String, String)>,
) -> Result<String> {
    let copy = state
        .dispatcher()
        .clone_object(&user, &namespace, &model, &id)
        .await?;
    Ok(copy.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderValue, StatusCode};

    #[test]
    fn test_htmx_header_detection() {
        let mut headers = HeaderMap::new();
        assert!(!is_htmx(&headers));

        headers.insert("HX-Request", HeaderValue::from_static("true"));
        assert!(is_htmx(&headers));
    }

    #[test]
    fn test_redirect_carries_encoded_message() {
        let response = redirect_with_message("/objects/backend/song/add", "The Song \"A & B\" was added successfully.")
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/objects/backend/song/add?message=The%20Song%20%22A%20%26%20B%22%20was%20added%20successfully."
        );
    }
}
