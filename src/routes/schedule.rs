use axum::{extract::State, response::Response};
use trailhead_schedule::{Calendar, table_date};

use super::{AppState, page_viewer};
use crate::access::Access;
use crate::error::AppError;
use crate::template::Template;

#[derive(askama::Template)]
#[template(path = "schedule.html")]
pub struct ScheduleTemplate {
    pub title: String,
    pub name: String,
    pub headings: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn headings(users: &[String]) -> Vec<String> {
    let mut headings = vec![
        "Date of Workout".to_owned(),
        "Day of the Week".to_owned(),
        "Workout Description".to_owned(),
    ];

    for user in users {
        headings.push(format!("{user} Completed?"));
        headings.push(format!("{user}'s Comments"));
    }

    headings
}

pub fn rows(calendar: &Calendar) -> Vec<Vec<String>> {
    calendar
        .entries()
        .iter()
        .map(|entry| {
            let mut row = vec![
                table_date(entry.date),
                entry.day_of_week.to_owned(),
                entry.workout.to_owned(),
            ];

            for user in calendar.users() {
                let record = entry.record(user).cloned().unwrap_or_default();
                row.push(record.status);
                row.push(record.comment);
            }

            row
        })
        .collect()
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

    Ok(template.render(ScheduleTemplate {
        title: template.title.to_owned(),
        name: viewer.identity.name,
        headings: headings(session.calendar.users()),
        rows: rows(&session.calendar),
    }))
}
