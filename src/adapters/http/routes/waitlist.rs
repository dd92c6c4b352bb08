//! Signup routes: the single-field quick signup and the four-step wizard.
//! Wizard drafts live server-side, keyed by a cookie-carried draft id, and
//! are never persisted to the waitlist until a successful submit.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{post, put},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult, FieldError},
    wizard::{DraftFields, DraftPatch, FormDraft, WizardStep},
};

const DRAFT_COOKIE: &str = "wizard_draft";

#[derive(Deserialize)]
struct QuickSignupPayload {
    email: String,
}

#[derive(Serialize)]
struct QuickSignupResponse {
    message: &'static str,
    id: Uuid,
    email: String,
}

#[derive(Deserialize, Default)]
struct StartWizardPayload {
    email: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WizardState {
    step: u8,
    total_steps: u8,
    fields: DraftFields,
    errors: Vec<FieldError>,
}

#[derive(Serialize)]
struct SubmitResponse {
    message: &'static str,
    id: Uuid,
}

fn wizard_state(draft: &FormDraft) -> WizardState {
    WizardState {
        step: draft.step().number(),
        total_steps: WizardStep::TOTAL,
        fields: draft.fields().clone(),
        errors: draft.step_errors(draft.step()),
    }
}

fn draft_id(jar: &CookieJar) -> Option<Uuid> {
    jar.get(DRAFT_COOKIE)
        .and_then(|cookie| cookie.value().parse().ok())
}

fn draft_cookie(id: Uuid, ttl: std::time::Duration) -> Cookie<'static> {
    Cookie::build((DRAFT_COOKIE, id.to_string()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::try_from(ttl).unwrap_or(time::Duration::minutes(30)))
        .build()
}

fn removal_cookie() -> Cookie<'static> {
    Cookie::build((DRAFT_COOKIE, "")).path("/").build()
}

/// POST /api/waitlist/quick
async fn quick_signup(
    State(app_state): State<AppState>,
    Json(payload): Json<QuickSignupPayload>,
) -> AppResult<impl IntoResponse> {
    let entry = app_state
        .waitlist_use_cases
        .quick_signup(&payload.email)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(QuickSignupResponse {
            message: "🎉 Erfolgreich angemeldet! Prüfen Sie Ihre E-Mails für die Bestätigung.",
            id: entry.id,
            email: entry.email,
        }),
    ))
}

/// POST /api/waitlist/wizard
/// Opens a fresh draft, optionally seeded with an email from the quick field.
async fn start_wizard(
    State(app_state): State<AppState>,
    jar: CookieJar,
    payload: Option<Json<StartWizardPayload>>,
) -> AppResult<impl IntoResponse> {
    // Starting over replaces any previous draft for this browser.
    if let Some(previous) = draft_id(&jar) {
        app_state.drafts.remove(previous);
    }

    let draft = match payload.and_then(|Json(p)| p.email) {
        Some(email) => FormDraft::with_email(&email),
        None => FormDraft::new(),
    };
    let state = wizard_state(&draft);
    let id = app_state.drafts.create(draft);
    let cookie = draft_cookie(id, app_state.config.draft_ttl);

    Ok((StatusCode::CREATED, jar.add(cookie), Json(state)))
}

/// GET /api/waitlist/wizard
async fn wizard_status(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> AppResult<Json<WizardState>> {
    let id = draft_id(&jar).ok_or(AppError::DraftNotFound)?;
    let draft = app_state.drafts.get(id).ok_or(AppError::DraftNotFound)?;
    Ok(Json(wizard_state(&draft)))
}

/// PUT /api/waitlist/wizard/fields
async fn update_fields(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Json(patch): Json<DraftPatch>,
) -> AppResult<Json<WizardState>> {
    let id = draft_id(&jar).ok_or(AppError::DraftNotFound)?;
    let state = app_state
        .drafts
        .update(id, |draft| {
            draft.apply(patch);
            wizard_state(draft)
        })
        .ok_or(AppError::DraftNotFound)?;
    Ok(Json(state))
}

/// POST /api/waitlist/wizard/next
/// Refused with the step's field errors while its validation gate fails.
async fn next_step(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> AppResult<Json<WizardState>> {
    let id = draft_id(&jar).ok_or(AppError::DraftNotFound)?;
    let advanced = app_state
        .drafts
        .update(id, |draft| {
            draft.advance()?;
            Ok(wizard_state(draft))
        })
        .ok_or(AppError::DraftNotFound)?;
    advanced.map(Json).map_err(AppError::Validation)
}

/// POST /api/waitlist/wizard/back
async fn back_step(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> AppResult<Json<WizardState>> {
    let id = draft_id(&jar).ok_or(AppError::DraftNotFound)?;
    let state = app_state
        .drafts
        .update(id, |draft| {
            draft.back();
            wizard_state(draft)
        })
        .ok_or(AppError::DraftNotFound)?;
    Ok(Json(state))
}

/// POST /api/waitlist/wizard/submit
/// Full-field validation plus the submission pipeline. The draft survives a
/// failed submit and is discarded only on success.
async fn submit_wizard(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    let id = draft_id(&jar).ok_or(AppError::DraftNotFound)?;
    let draft = app_state.drafts.get(id).ok_or(AppError::DraftNotFound)?;

    let signup = draft.finish().map_err(AppError::Validation)?;
    let entry = app_state.waitlist_use_cases.detailed_signup(signup).await?;

    app_state.drafts.remove(id);
    Ok((
        StatusCode::CREATED,
        jar.remove(removal_cookie()),
        Json(SubmitResponse {
            message:
                "🎉 Erfolgreich zur Warteliste hinzugefügt! Sie erhalten bald Updates zum Munich Funding Summit.",
            id: entry.id,
        }),
    ))
}

/// DELETE /api/waitlist/wizard
/// Cancel: the draft is discarded without persisting anything.
async fn cancel_wizard(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    if let Some(id) = draft_id(&jar) {
        app_state.drafts.remove(id);
    }
    Ok((StatusCode::NO_CONTENT, jar.remove(removal_cookie())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/quick", post(quick_signup))
        .route(
            "/wizard",
            post(start_wizard).get(wizard_status).delete(cancel_wizard),
        )
        .route("/wizard/fields", put(update_fields))
        .route("/wizard/next", post(next_step))
        .route("/wizard/back", post(back_step))
        .route("/wizard/submit", post(submit_wizard))
}
