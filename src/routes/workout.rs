use std::borrow::Cow;

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use trailhead_schedule::{Completion, CompletionStatus};
use validator::{Validate, ValidationError};

use super::{AppState, action_viewer, page_viewer};
use crate::access::{Access, Viewer};
use crate::error::AppError;
use crate::session::{Action, SessionState};
use crate::template::Template;

#[derive(askama::Template)]
#[template(path = "workout.html")]
pub struct WorkoutTemplate {
    pub title: String,
    pub name: String,
    pub user: String,
    pub display_date: String,
    pub workout_html: Option<String>,
    pub status: Option<String>,
    pub comment: Option<String>,
    pub emoji: String,
    pub prior_enabled: bool,
    pub next_enabled: bool,
    pub can_record: bool,
    pub last_write: String,
}

impl WorkoutTemplate {
    fn new(title: &str, viewer: &Viewer, session: &SessionState) -> Self {
        let navigation = &session.navigation;

        Self {
            title: title.to_owned(),
            name: viewer.identity.name.to_owned(),
            user: navigation.user().to_owned(),
            display_date: navigation.display_date.to_owned(),
            workout_html: navigation
                .workout
                .as_deref()
                .map(crate::markdown::to_html),
            status: navigation.status.to_owned(),
            comment: navigation.comment.to_owned(),
            emoji: navigation.emoji.to_string(),
            prior_enabled: navigation.prior_enabled,
            next_enabled: navigation.next_enabled,
            can_record: session.calendar.is_user(navigation.user()),
            last_write: session.last_write.to_owned(),
        }
    }
}

#[tracing::instrument(skip_all)]
pub async fn page(
    template: Template,
    access: Access,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let viewer = match page_viewer(&template, access) {
        Ok(viewer) => viewer,
        Err(response) => return Ok(response),
    };

    let session = state
        .sessions
        .get_or_load(
            &viewer.sid,
            &viewer.identity.given_name,
            state.repository.as_ref(),
            state.today(),
        )
        .await?;
    let session = session.lock().await;

    Ok(template.render(WorkoutTemplate::new(&template.title, &viewer, &session)))
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NavigateAction {
    Prior,
    Next,
    Today,
}

#[derive(Debug, Deserialize)]
pub struct NavigateInput {
    pub action: NavigateAction,
}

#[tracing::instrument(skip_all, fields(action = ?input.action))]
pub async fn navigate(
    access: Access,
    State(state): State<AppState>,
    Form(input): Form<NavigateInput>,
) -> Result<Response, AppError> {
    let viewer = match action_viewer(access) {
        Ok(viewer) => viewer,
        Err(response) => return Ok(response),
    };

    let action = match input.action {
        NavigateAction::Prior => Action::Prior,
        NavigateAction::Next => Action::Next,
        NavigateAction::Today => Action::Today,
    };

    apply(&state, &viewer, action).await?;

    Ok(Redirect::to("/").into_response())
}

/// Answers to "Did you complete the workout?".
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    No,
    Kinda,
}

impl From<Answer> for CompletionStatus {
    fn from(answer: Answer) -> Self {
        match answer {
            Answer::Yes => CompletionStatus::Completed,
            Answer::No => CompletionStatus::NotCompleted,
            Answer::Kinda => CompletionStatus::PartiallyCompleted,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "explanation_required"))]
pub struct CompleteInput {
    pub completed: Answer,
    #[serde(default)]
    #[validate(length(max = 2000, message = "Explanation must be at most 2000 characters"))]
    pub explanation: String,
}

fn explanation_required(input: &CompleteInput) -> Result<(), ValidationError> {
    if input.completed == Answer::Kinda && input.explanation.trim().is_empty() {
        return Err(ValidationError::new("explanation_required").with_message(Cow::Borrowed(
            "Please explain what you were able to complete.",
        )));
    }

    Ok(())
}

impl CompleteInput {
    /// The explanation only counts for a partial completion.
    fn comment(&self) -> String {
        match self.completed {
            Answer::Kinda => self.explanation.trim().to_owned(),
            Answer::Yes | Answer::No => String::new(),
        }
    }
}

#[tracing::instrument(skip_all, fields(completed = ?input.completed))]
pub async fn complete(
    access: Access,
    State(state): State<AppState>,
    Form(input): Form<CompleteInput>,
) -> Result<Response, AppError> {
    let viewer = match action_viewer(access) {
        Ok(viewer) => viewer,
        Err(response) => return Ok(response),
    };

    input.validate()?;

    let session = state
        .sessions
        .get_or_load(
            &viewer.sid,
            &viewer.identity.given_name,
            state.repository.as_ref(),
            state.today(),
        )
        .await?;
    let mut session = session.lock().await;

    let completion = Completion {
        date: session.navigation.current(),
        user: viewer.identity.given_name.to_owned(),
        status: input.completed.into(),
        comment: input.comment(),
    };

    session
        .apply(Action::Record(completion), state.repository.as_ref(), state.today())
        .await?;

    Ok(Redirect::to("/").into_response())
}

async fn apply(state: &AppState, viewer: &Viewer, action: Action) -> Result<(), AppError> {
    let session = state
        .sessions
        .get_or_load(
            &viewer.sid,
            &viewer.identity.given_name,
            state.repository.as_ref(),
            state.today(),
        )
        .await?;

    session
        .lock()
        .await
        .apply(action, state.repository.as_ref(), state.today())
        .await?;

    Ok(())
}
