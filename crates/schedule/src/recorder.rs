use chrono::NaiveDate;

use crate::{
    Calendar, CompletionStatus, Error, Navigation, Result, ScheduleRepository, long_date,
};

pub const WRITE_PROMPT: &str =
    "Click Submit to write your workout completion status to Google Sheets.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub date: NaiveDate,
    pub user: String,
    pub status: CompletionStatus,
    pub comment: String,
}

/// Writes one user's completion for one day.
///
/// The change is applied to a copy of the calendar and only replaces the
/// session's calendar once the whole-table save went through, so a failed
/// save leaves both the calendar and the navigation untouched. On success the
/// navigation is refreshed from the saved calendar and the status line for
/// the write is returned.
#[tracing::instrument(skip_all, fields(user = completion.user, date = %completion.date))]
pub async fn record<R: ScheduleRepository + ?Sized>(
    repository: &R,
    calendar: &mut Calendar,
    navigation: &mut Navigation,
    completion: &Completion,
) -> Result<String> {
    if !calendar.is_user(&completion.user) {
        return Err(Error::UnknownUser(completion.user.to_owned()));
    }

    let mut updated = calendar.clone();
    let entry = updated
        .get_mut(completion.date)
        .map_err(|_| Error::UnknownDate(completion.date))?;

    let user_record = entry.records.entry(completion.user.to_owned()).or_default();
    user_record.status = completion.status.to_string();
    user_record.comment = completion.comment.to_owned();

    repository.save_calendar(&updated).await?;
    *calendar = updated;

    tracing::info!(status = %completion.status, "completion recorded");

    navigation.refresh(calendar);

    Ok(format!(
        "Status of '{}' with comment '{}' for {} has been written to Google Sheets.",
        completion.status,
        completion.comment,
        long_date(completion.date)
    ))
}
