//! Route handlers.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};
use tutor_ai::{export_bytes, AiError, LearningLevel, EXPORT_FILE_NAME, EXPORT_MIME_TYPE};
use tutor_common::SessionId;

use super::error::AppError;
use super::page::PageExtras;
use super::sessions::{session_cookie, session_id_from_headers};
use super::AppState;

#[derive(Debug, Deserialize)]
pub(super) struct ChatForm {
    #[serde(default)]
    message: String,
    level: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SettingsForm {
    level: Option<String>,
    dark_mode: Option<String>,
}

fn parse_level(raw: Option<&str>) -> Result<Option<LearningLevel>, AppError> {
    raw.map(|raw| raw.parse().map_err(AppError::BadRequest))
        .transpose()
}

/// Banner text for a failed turn. Provider details stay in the log.
fn failure_notice(err: &AiError) -> &'static str {
    match err {
        AiError::ApiError(_) => "the model service returned an error.",
        AiError::Unauthorized(_) => "the model service rejected the API key.",
        AiError::RateLimited => "too many requests, try again in a moment.",
        AiError::NetworkError(_) => "the model service could not be reached.",
        AiError::ParseError(_) => "the model sent a reply that could not be read.",
        AiError::Timeout => "the model took too long to respond.",
        AiError::MissingCredential(_) => "no API key is configured.",
    }
}

/// Attach the session cookie when the session was created by this request.
fn with_cookie(mut response: Response, id: &SessionId, created: bool) -> Response {
    if created {
        if let Ok(value) = HeaderValue::from_str(&session_cookie(id)) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}

fn redirect_home() -> Response {
    Redirect::to("/").into_response()
}

pub(super) async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let (id, session, created) = state.sessions.resolve(session_id_from_headers(&headers)).await;
    let mut session = session.lock().await;
    session.touch();

    let html = state.page.render(&session, &PageExtras::default())?;
    Ok(with_cookie(Html(html).into_response(), &id, created))
}

pub(super) async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ChatForm>,
) -> Result<Response, AppError> {
    // Rejected before a session exists, so a bad form never leaves one behind.
    let requested_level = parse_level(form.level.as_deref())?;

    let (id, session, created) = state.sessions.resolve(session_id_from_headers(&headers)).await;
    // Held across the provider call: one turn at a time per browser.
    let mut session = session.lock().await;
    session.touch();

    if let Some(level) = requested_level {
        session.level = level;
    }

    if form.message.trim().is_empty() {
        return Ok(with_cookie(redirect_home(), &id, created));
    }

    let level = session.level;
    let result = state
        .processor
        .handle_turn(
            level,
            &form.message,
            &mut session.conversation,
            state.client.as_ref(),
        )
        .await;
    session.touch();

    let response = match result {
        Ok(outcome) => {
            session.tracker.record(&outcome.usage);
            info!(
                session_id = %id,
                %level,
                messages = session.conversation.len(),
                tokens = outcome.usage.total_tokens(),
                "Turn answered"
            );
            redirect_home()
        }
        Err(e) => {
            warn!(session_id = %id, error = %e, "Turn failed");
            let extras = PageExtras {
                notice: Some(format!("The tutor could not answer: {}", failure_notice(&e))),
                draft: form.message,
            };
            let html = state.page.render(&session, &extras)?;
            (StatusCode::BAD_GATEWAY, Html(html)).into_response()
        }
    };

    Ok(with_cookie(response, &id, created))
}

pub(super) async fn settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SettingsForm>,
) -> Result<Response, AppError> {
    let requested_level = parse_level(form.level.as_deref())?;

    let (id, session, created) = state.sessions.resolve(session_id_from_headers(&headers)).await;
    let mut session = session.lock().await;
    session.touch();

    if let Some(level) = requested_level {
        session.level = level;
    }
    session.dark_mode = form.dark_mode.is_some();

    Ok(with_cookie(redirect_home(), &id, created))
}

pub(super) async fn export(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (id, session, created) = state.sessions.resolve(session_id_from_headers(&headers)).await;
    let mut session = session.lock().await;
    session.touch();

    let body = export_bytes(&session.conversation);
    let response = (
        [
            (header::CONTENT_TYPE, format!("{EXPORT_MIME_TYPE}; charset=utf-8")),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        body,
    )
        .into_response();

    with_cookie(response, &id, created)
}

pub(super) async fn reset(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (id, session, created) = state.sessions.resolve(session_id_from_headers(&headers)).await;
    let mut session = session.lock().await;
    session.reset();
    session.touch();
    info!(session_id = %id, "Conversation reset");

    with_cookie(redirect_home(), &id, created)
}

pub(super) async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "sessions": state.sessions.count().await,
    }))
}
