use axum::{http::HeaderMap, response::Html};

use super::objects::is_htmx;
use crate::{
    error::{AppError, Result},
    templates::{modal_demo_page, simple_content_inner, simple_content_page},
};

pub const LOREM_IPSUM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. \
Proin dignissim dapibus ipsum id elementum. Morbi in justo purus. \
Duis ornare lobortis nisl eget condimentum. \
Donec quis lorem nec sapien vehicula eleifend vel sit amet nunc.";

/// Buttons opening each demo endpoint in the modal
pub async fn index() -> Html<String> {
    Html(modal_demo_page().into_string())
}

/// Plain text body, shown as-is in the modal
pub async fn simple_content() -> &'static str {
    LOREM_IPSUM
}

pub async fn simple_content_forbidden() -> Result<&'static str> {
    Err(AppError::permission_denied("This content is not available"))
}

pub async fn simple_content_page_or_fragment(headers: HeaderMap) -> Html<String> {
    let markup = if is_htmx(&headers) {
        simple_content_inner(LOREM_IPSUM)
    } else {
        simple_content_page(LOREM_IPSUM)
    };
    Html(markup.into_string())
}
