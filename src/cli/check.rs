use anyhow::Result;
use trailhead::Config;
use trailhead_schedule::{CompletionStatus, ScheduleRepository, lookup_key};

/// Reads both worksheets once and reports what was found.
#[tracing::instrument(skip_all)]
pub async fn check(config: Config) -> Result<()> {
    let repository = super::sheet_repository(&config)?;

    let calendar = repository.load_calendar().await?;
    let catalog = repository.load_catalog().await?;

    match calendar.span() {
        Some((first, last)) => println!(
            "{}: {} days from {} to {}",
            config.sheets.calendar_worksheet,
            calendar.len(),
            lookup_key(first),
            lookup_key(last)
        ),
        None => println!("{}: no scheduled days", config.sheets.calendar_worksheet),
    }

    println!(
        "{}: {} workouts",
        config.sheets.catalog_worksheet,
        catalog.len()
    );

    for user in calendar.users() {
        let completed = calendar
            .entries()
            .iter()
            .filter_map(|entry| entry.record(user))
            .filter(|record| record.status == CompletionStatus::Completed.as_ref())
            .count();

        println!("{user}: {completed} completed");
    }

    Ok(())
}
