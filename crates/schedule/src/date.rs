use chrono::NaiveDate;

/// Format of the `Date` cells as stored in the calendar worksheet, e.g. `3/1/2026`.
pub const LOOKUP_KEY_FORMAT: &str = "%-m/%-d/%Y";

/// Human readable form shown above the workout, e.g. `Sunday, March 01, 2026`.
pub const LONG_DATE_FORMAT: &str = "%A, %B %d, %Y";

/// Zero padded form used by the full schedule table.
pub const TABLE_DATE_FORMAT: &str = "%m/%d/%Y";

const CELL_FORMATS: [&str; 3] = ["%m/%d/%Y", "%Y-%m-%d", "%Y-%m-%d %H:%M:%S"];

pub fn lookup_key(date: NaiveDate) -> String {
    date.format(LOOKUP_KEY_FORMAT).to_string()
}

pub(crate) fn key_of(date: &NaiveDate) -> String {
    lookup_key(*date)
}

pub fn long_date(date: NaiveDate) -> String {
    date.format(LONG_DATE_FORMAT).to_string()
}

pub fn table_date(date: NaiveDate) -> String {
    date.format(TABLE_DATE_FORMAT).to_string()
}

/// Parses a `Date` cell. Sheets hands back the formatted value, which is the
/// short numeric form unless someone reformatted the column.
pub fn parse_cell_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    CELL_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}
