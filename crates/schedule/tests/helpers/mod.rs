#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use trailhead_schedule::gateway::MemoryGateway;
use trailhead_schedule::{
    DEFAULT_CALENDAR_WORKSHEET, DEFAULT_CATALOG_WORKSHEET, SheetRepository, Table, Worksheets,
};

pub const HEADER: [&str; 9] = [
    "Date",
    "Day of the Week",
    "Workout",
    "Lori Completed",
    "Lori Comment",
    "Jonathan Completed",
    "Jonathan Comment",
    "Miriam Completed",
    "Miriam Comment",
];

pub fn users() -> Vec<String> {
    vec!["Lori".to_owned(), "Jonathan".to_owned(), "Miriam".to_owned()]
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

/// Calendar with 3/1/2026 and 3/2/2026 only.
pub fn march_calendar() -> Table {
    Table::from_values(vec![
        row(&HEADER),
        row(&[
            "3/1/2026",
            "Sunday",
            "Rest Day",
            "Completed",
            "",
            "Partially Completed",
            "knee hurt",
        ]),
        row(&[
            "3/2/2026",
            "Monday",
            "Hill repeats: **6 x 2 min**",
            "",
            "",
            "Not Completed",
            "",
            "Completed",
            "felt great",
        ]),
    ])
}

pub fn catalog() -> Table {
    Table::from_values(vec![
        row(&["Workout Name", "URL", "Notes"]),
        row(&["Hill repeats", "https://example.com/hills", "Find a steep one"]),
        row(&["Rest Day"]),
    ])
}

pub fn setup_repository(calendar: Table) -> (Arc<MemoryGateway>, SheetRepository<Arc<MemoryGateway>>) {
    let gateway = Arc::new(
        MemoryGateway::new()
            .with_table(DEFAULT_CALENDAR_WORKSHEET, calendar)
            .with_table(DEFAULT_CATALOG_WORKSHEET, catalog()),
    );
    let repository = SheetRepository::new(gateway.clone(), Worksheets::default(), users());

    (gateway, repository)
}
