use trailhead_schedule::{
    DEFAULT_CALENDAR_WORKSHEET, DEFAULT_STATUS, DEFAULT_WORKOUT, Error, ScheduleRepository,
    Table,
};

mod helpers;

use helpers::{HEADER, date, march_calendar, row, setup_repository};

#[tokio::test]
async fn test_load_calendar_fills_defaults() -> anyhow::Result<()> {
    let (_, repository) = setup_repository(Table::from_values(vec![
        row(&HEADER),
        row(&["3/5/2026", "Thursday"]),
    ]));

    let calendar = repository.load_calendar().await?;
    let entry = calendar.get(date(2026, 3, 5))?;

    assert_eq!(entry.workout, DEFAULT_WORKOUT);
    for user in ["Lori", "Jonathan", "Miriam"] {
        let record = entry.record(user).unwrap();
        assert_eq!(record.status, DEFAULT_STATUS);
        assert_eq!(record.comment, "");
    }

    Ok(())
}

#[tokio::test]
async fn test_save_calendar_replaces_whole_table() -> anyhow::Result<()> {
    let (gateway, repository) = setup_repository(march_calendar());

    let calendar = repository.load_calendar().await?;
    repository.save_calendar(&calendar).await?;

    let written = gateway.table(DEFAULT_CALENDAR_WORKSHEET).unwrap();
    assert_eq!(written.columns, HEADER.map(String::from).to_vec());
    assert_eq!(written.rows.len(), 2);
    assert_eq!(
        written.rows[0],
        row(&[
            "3/1/2026",
            "Sunday",
            "Rest Day",
            "Completed",
            "",
            "Partially Completed",
            "knee hurt",
            "Not Completed",
            "",
        ])
    );

    Ok(())
}

#[tokio::test]
async fn test_load_catalog() -> anyhow::Result<()> {
    let (_, repository) = setup_repository(march_calendar());

    let catalog = repository.load_catalog().await?;

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.get("Rest Day").unwrap().url, "");
    assert_eq!(
        catalog.get("Hill repeats").unwrap().url,
        "https://example.com/hills"
    );

    Ok(())
}

#[tokio::test]
async fn test_store_failure_is_a_distinct_error() -> anyhow::Result<()> {
    let (gateway, repository) = setup_repository(march_calendar());
    gateway.set_unavailable(true);

    let result = repository.load_calendar().await;

    assert!(matches!(result, Err(Error::Store(_))));

    Ok(())
}
