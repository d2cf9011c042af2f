use axum::{
    extract::{rejection::FormRejection, Query},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
    Form,
};

use super::objects::{is_htmx, redirect_with_message, MessageQuery};
use crate::{
    forms::{FormData, SimpleForm},
    templates::{simple_form_inner, simple_form_page},
};

pub const VALIDATED_MESSAGE: &str = "Form has been validated";

pub async fn show(headers: HeaderMap, Query(query): Query<MessageQuery>) -> Html<String> {
    let form = SimpleForm::new(None).view();
    let markup = if is_htmx(&headers) {
        simple_form_inner(&form, false)
    } else {
        simple_form_page(&form, query.message.as_deref())
    };
    Html(markup.into_string())
}

/// An undecodable body counts as a submission with no fields
pub async fn submit(
    headers: HeaderMap,
    body: std::result::Result<Form<FormData>, FormRejection>,
) -> Response {
    let data = body.map(|Form(data)| data).unwrap_or_default();
    let mut form = SimpleForm::new(Some(data));
    let accepted = form.is_valid() && form.save();

    if accepted {
        tracing::debug!(value = ?form.value(), "Simple form validated");
    }

    if is_htmx(&headers) {
        return Html(simple_form_inner(&form.view(), accepted).into_string()).into_response();
    }
    if accepted {
        return redirect_with_message("/simple-form", VALIDATED_MESSAGE).into_response();
    }
    Html(simple_form_page(&form.view(), None).into_string()).into_response()
}
