use std::str::FromStr;

use axum::{
    Json,
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use mclears_inquiry::{
    Accommodation, Controller, DeliveryFailure, Error, Field, InquiryDraft, SubmissionOutcome,
    SubmissionState, ValidationError, validate_field,
};
use serde::{Deserialize, Serialize};
use strum::VariantArray;

use crate::{
    config::BusinessConfig,
    routes::AppState,
    session::SESSION_COOKIE,
    template::Template,
};

pub struct AccommodationOption {
    pub label: &'static str,
    pub selected: bool,
}

pub const ALREADY_SENT_NOTICE: &str =
    "Your previous message was sent. Use Send Another Message to send a new one.";

#[derive(askama::Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub business: BusinessConfig,
    pub draft: InquiryDraft,
    pub options: Vec<AccommodationOption>,
    pub submitting: bool,
    pub submitted: bool,
    pub banner: Option<String>,
    pub notice: Option<String>,
    pub inline_error: Option<String>,
    pub error_field: &'static str,
}

impl ContactTemplate {
    fn new(business: &BusinessConfig, state: &SubmissionState, draft: InquiryDraft) -> Self {
        let options = Accommodation::VARIANTS
            .iter()
            .map(|option| AccommodationOption {
                label: option.as_ref(),
                selected: draft.accommodation == Some(*option),
            })
            .collect();

        let banner = match state {
            SubmissionState::Failed(failure) => Some(failure.user_message(&business.phone)),
            _ => None,
        };

        Self {
            business: business.clone(),
            options,
            submitting: state.is_submitting(),
            submitted: *state == SubmissionState::Submitted,
            banner,
            notice: None,
            inline_error: None,
            error_field: "",
            draft,
        }
    }

    fn from_controller(business: &BusinessConfig, controller: &Controller) -> Self {
        Self::new(business, &controller.state(), controller.draft())
    }

    fn with_invalid(mut self, err: ValidationError) -> Self {
        self.inline_error = Some(err.to_string());
        self.error_field = err.field().form_name();
        self
    }
}

fn session_id(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_owned())
}

fn with_session(jar: CookieJar, id: String, secure: bool) -> CookieJar {
    jar.add(
        Cookie::build((SESSION_COOKIE, id))
            .path("/contact")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(secure),
    )
}

/// Renders the visitor's form. A blank form never opens a session.
pub async fn page(State(app_state): State<AppState>, jar: CookieJar) -> Response {
    let business = &app_state.config.business;

    let page = match session_id(&jar).and_then(|id| app_state.sessions.get(&id)) {
        Some(controller) => ContactTemplate::from_controller(business, &controller),
        None => ContactTemplate::new(business, &SubmissionState::Idle, InquiryDraft::default()),
    };

    Template.render(page)
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ActionInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub preferred_dates: String,
    pub accommodation: String,
    pub message: String,
}

impl ActionInput {
    fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::PreferredDates => &self.preferred_dates,
            Field::Accommodation => &self.accommodation,
            Field::Message => &self.message,
        }
    }
}

pub async fn action(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Form(input): Form<ActionInput>,
) -> impl IntoResponse {
    let (id, controller) = app_state
        .sessions
        .get_or_create(session_id(&jar).as_deref());

    // A draft that is sending or already sent is never overwritten.
    let state = controller.state();
    let outcome = if state.is_submitting() || state == SubmissionState::Submitted {
        tracing::debug!(state = state.name(), "Inquiry post ignored");
        SubmissionOutcome::Ignored
    } else {
        for field in Field::VARIANTS {
            controller.update_field(*field, input.value(*field));
        }

        // Delivery keeps going if the visitor disconnects mid-request.
        match tokio::spawn({
            let controller = controller.clone();
            async move { controller.submit().await }
        })
        .await
        {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!("Inquiry submission task failed: {err}");
                SubmissionOutcome::Failed(DeliveryFailure::Cancelled)
            }
        }
    };

    let mut page = ContactTemplate::from_controller(&app_state.config.business, &controller);

    let status = match outcome {
        SubmissionOutcome::Submitted => StatusCode::OK,
        SubmissionOutcome::Ignored if page.submitted => {
            page.notice = Some(ALREADY_SENT_NOTICE.to_owned());
            StatusCode::CONFLICT
        }
        SubmissionOutcome::Ignored => StatusCode::OK,
        SubmissionOutcome::Invalid(err) => {
            page = page.with_invalid(err);
            StatusCode::UNPROCESSABLE_ENTITY
        }
        SubmissionOutcome::Failed(_) => StatusCode::BAD_GATEWAY,
    };

    (
        with_session(jar, id, app_state.config.session.cookie_secure),
        Template.render_with_status(status, page),
    )
}

#[derive(Deserialize)]
pub struct FieldInput {
    pub field: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Serialize)]
pub struct FieldResponse {
    pub field: &'static str,
    pub error: Option<String>,
}

/// Applies a single keystroke-level edit and reports its inline validation.
pub async fn field(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Form(input): Form<FieldInput>,
) -> Response {
    let Ok(field) = Field::from_str(&input.field) else {
        return (StatusCode::BAD_REQUEST, "unknown field").into_response();
    };

    let (id, controller) = app_state
        .sessions
        .get_or_create(session_id(&jar).as_deref());

    let jar = with_session(jar, id, app_state.config.session.cookie_secure);

    if controller.state().is_submitting() {
        return (StatusCode::CONFLICT, jar, Error::Busy.to_string()).into_response();
    }

    controller.update_field(field, input.value);

    let error = validate_field(&controller.draft(), field)
        .err()
        .map(|err| err.to_string());

    (
        jar,
        Json(FieldResponse {
            field: field.form_name(),
            error,
        }),
    )
        .into_response()
}

/// "Send Another Message".
pub async fn reset(State(app_state): State<AppState>, jar: CookieJar) -> Response {
    let (id, controller) = app_state
        .sessions
        .get_or_create(session_id(&jar).as_deref());
    let jar = with_session(jar, id, app_state.config.session.cookie_secure);

    match controller.reset() {
        Ok(()) => (jar, Redirect::to("/contact")).into_response(),
        Err(err) => {
            tracing::debug!("Inquiry reset refused: {err}");
            let page = ContactTemplate::from_controller(&app_state.config.business, &controller);

            (jar, Template.render_with_status(StatusCode::CONFLICT, page)).into_response()
        }
    }
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub state: &'static str,
    pub message: Option<String>,
}

pub async fn status(State(app_state): State<AppState>, jar: CookieJar) -> Json<StatusResponse> {
    let state = session_id(&jar)
        .and_then(|id| app_state.sessions.get(&id))
        .map(|controller| controller.state())
        .unwrap_or_default();

    let message = match &state {
        SubmissionState::Failed(failure) => {
            Some(failure.user_message(&app_state.config.business.phone))
        }
        _ => None,
    };

    Json(StatusResponse {
        state: state.name(),
        message,
    })
}
