use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{header, Method, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Timelike;
use chrono_tz::Tz;
use http_body_util::LengthLimitError;
use std::error::Error as StdError;

use crate::app::AppState;
use crate::encoding::BODY_LIMIT;
use crate::error::WebhookError;
use crate::models::{Request, Response, TYPE_SIMPLE_UTTERANCE};

const NO_NEWS: &str = "Для вас нет новых сообщений.";

/// Answers one dialog turn.
///
/// Only mounted for POST; other methods go to [`method_not_allowed`].
pub async fn webhook(
    State(state): State<AppState>,
    body: Body,
) -> Result<impl IntoResponse, WebhookError> {
    tracing::debug!("decoding request");
    let bytes = to_bytes(body, BODY_LIMIT).await.map_err(|err| {
        if exceeds_limit(&err) {
            WebhookError::TooLarge(BODY_LIMIT)
        } else {
            WebhookError::Body(err)
        }
    })?;
    let request: Request = serde_json::from_slice(&bytes)?;

    let text = reply_text(&state, &request)?;

    tracing::debug!("sending HTTP 200 response");
    Ok((
        [(header::CONTENT_TYPE, "application/json")],
        Json(Response::text(text)),
    ))
}

/// Answers every method other than POST.
pub async fn method_not_allowed(method: Method) -> StatusCode {
    tracing::debug!(method = %method, "got request with bad method");
    StatusCode::METHOD_NOT_ALLOWED
}

fn exceeds_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(err) = source {
        if err.is::<LengthLimitError>() {
            return true;
        }
        source = err.source();
    }
    false
}

fn reply_text(state: &AppState, request: &Request) -> Result<String, WebhookError> {
    if request.request.kind != TYPE_SIMPLE_UTTERANCE {
        return Err(WebhookError::UnsupportedType(request.request.kind.clone()));
    }

    if !request.session.new {
        return Ok(NO_NEWS.to_string());
    }

    let tz = parse_timezone(&request.timezone)?;
    let now = state.clock.now().with_timezone(&tz);
    Ok(format!(
        "Точное время {} часов, {} минут. {}",
        now.hour(),
        now.minute(),
        NO_NEWS
    ))
}

/// Resolves an IANA zone name; the empty string means UTC.
fn parse_timezone(name: &str) -> Result<Tz, WebhookError> {
    if name.is_empty() {
        return Ok(Tz::UTC);
    }
    name.parse::<Tz>()
        .map_err(|_| WebhookError::Timezone(name.to_string()))
}
