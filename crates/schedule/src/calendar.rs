use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::{Error, Result, Table, lookup_key, parse_cell_date};

pub const DATE_COLUMN: &str = "Date";
pub const DAY_COLUMN: &str = "Day of the Week";
pub const WORKOUT_COLUMN: &str = "Workout";

/// Shown when nobody has planned the day's workout yet.
pub const DEFAULT_WORKOUT: &str = "Nobody has figured this one out yet.";
pub const DEFAULT_STATUS: &str = "Not Completed";

pub fn completed_column(user: &str) -> String {
    format!("{user} Completed")
}

pub fn comment_column(user: &str) -> String {
    format!("{user} Comment")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub status: String,
    pub comment: String,
}

impl Default for UserRecord {
    fn default() -> Self {
        Self {
            status: DEFAULT_STATUS.to_owned(),
            comment: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEntry {
    pub date: NaiveDate,
    pub day_of_week: String,
    pub workout: String,
    pub records: BTreeMap<String, UserRecord>,
    /// Columns this app does not interpret, written back untouched.
    pub extra: BTreeMap<String, String>,
}

impl CalendarEntry {
    pub fn record(&self, user: &str) -> Option<&UserRecord> {
        self.records.get(user)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Column {
    Date,
    Day,
    Workout,
    Completed(String),
    Comment(String),
    Extra(String),
}

impl Column {
    fn classify(name: &str, users: &[String]) -> Self {
        match name {
            DATE_COLUMN => return Self::Date,
            DAY_COLUMN => return Self::Day,
            WORKOUT_COLUMN => return Self::Workout,
            _ => {}
        }

        for user in users {
            if name == completed_column(user) {
                return Self::Completed(user.to_owned());
            }
            if name == comment_column(user) {
                return Self::Comment(user.to_owned());
            }
        }

        Self::Extra(name.to_owned())
    }
}

/// The date keyed training schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    columns: Vec<String>,
    users: Vec<String>,
    entries: Vec<CalendarEntry>,
    index: HashMap<NaiveDate, usize>,
    /// Rows without a usable date, kept verbatim with the number of
    /// entries that precede them.
    undated: Vec<(usize, Vec<String>)>,
}

impl Calendar {
    /// Reads the worksheet rows, filling blank cells with the defaults.
    ///
    /// Blank rows are skipped. A row whose `Date` is missing or unreadable
    /// cannot be looked up but is still written back in place. A date that
    /// appears twice makes the whole table invalid.
    pub fn from_table(table: &Table, users: &[String]) -> Result<Self> {
        if table.column(DATE_COLUMN).is_none() {
            return Err(Error::InvalidTable(format!(
                "missing '{DATE_COLUMN}' column"
            )));
        }

        let mut columns = table.columns.clone();
        let mut required = vec![DAY_COLUMN.to_owned(), WORKOUT_COLUMN.to_owned()];
        for user in users {
            required.push(completed_column(user));
            required.push(comment_column(user));
        }
        for name in required {
            if !columns.contains(&name) {
                columns.push(name);
            }
        }

        let kinds: Vec<Column> = table
            .columns
            .iter()
            .map(|name| Column::classify(name, users))
            .collect();

        let mut calendar = Self {
            columns,
            users: users.to_vec(),
            entries: Vec::with_capacity(table.rows.len()),
            index: HashMap::with_capacity(table.rows.len()),
            undated: Vec::new(),
        };

        for (position, row) in table.rows.iter().enumerate() {
            if row.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }

            // header is sheet row 1
            let sheet_row = position + 2;
            let mut date = None;
            let mut entry = CalendarEntry {
                date: NaiveDate::MIN,
                day_of_week: String::new(),
                workout: DEFAULT_WORKOUT.to_owned(),
                records: users
                    .iter()
                    .map(|user| (user.to_owned(), UserRecord::default()))
                    .collect(),
                extra: BTreeMap::new(),
            };

            for (kind, cell) in kinds.iter().zip(row) {
                let blank = cell.trim().is_empty();
                match kind {
                    Column::Date => date = parse_cell_date(cell),
                    Column::Day => entry.day_of_week = cell.to_owned(),
                    Column::Workout if !blank => entry.workout = cell.to_owned(),
                    Column::Workout => {}
                    Column::Completed(user) if !blank => {
                        if let Some(record) = entry.records.get_mut(user) {
                            record.status = cell.to_owned();
                        }
                    }
                    Column::Comment(user) if !blank => {
                        if let Some(record) = entry.records.get_mut(user) {
                            record.comment = cell.to_owned();
                        }
                    }
                    Column::Completed(_) | Column::Comment(_) => {}
                    Column::Extra(name) => {
                        entry.extra.insert(name.to_owned(), cell.to_owned());
                    }
                }
            }

            let Some(date) = date else {
                tracing::warn!(sheet_row, "calendar row without a readable date skipped");

                let mut cells = row.clone();
                cells.resize(calendar.columns.len().max(cells.len()), String::new());
                calendar.undated.push((calendar.entries.len(), cells));
                continue;
            };

            if calendar.index.contains_key(&date) {
                return Err(Error::InvalidTable(format!(
                    "row {sheet_row}: duplicate date {}",
                    lookup_key(date)
                )));
            }

            entry.date = date;
            calendar.index.insert(date, calendar.entries.len());
            calendar.entries.push(entry);
        }

        Ok(calendar)
    }

    /// Row form of the calendar, dates restored in the lookup key format.
    pub fn to_table(&self) -> Table {
        let kinds: Vec<Column> = self
            .columns
            .iter()
            .map(|name| Column::classify(name, &self.users))
            .collect();

        let entry_row = |entry: &CalendarEntry| -> Vec<String> {
            kinds
                .iter()
                .map(|kind| match kind {
                    Column::Date => lookup_key(entry.date),
                    Column::Day => entry.day_of_week.clone(),
                    Column::Workout => entry.workout.clone(),
                    Column::Completed(user) => entry
                        .record(user)
                        .map(|r| r.status.clone())
                        .unwrap_or_default(),
                    Column::Comment(user) => entry
                        .record(user)
                        .map(|r| r.comment.clone())
                        .unwrap_or_default(),
                    Column::Extra(name) => entry.extra.get(name).cloned().unwrap_or_default(),
                })
                .collect()
        };

        let mut rows = Vec::with_capacity(self.entries.len() + self.undated.len());
        let mut undated = self.undated.iter().peekable();
        for (position, entry) in self.entries.iter().enumerate() {
            while let Some((_, cells)) = undated.next_if(|(before, _)| *before == position) {
                rows.push(cells.clone());
            }
            rows.push(entry_row(entry));
        }
        rows.extend(undated.map(|(_, cells)| cells.clone()));

        Table::new(self.columns.clone(), rows)
    }

    pub fn exists(&self, date: NaiveDate) -> bool {
        self.index.contains_key(&date)
    }

    pub fn get(&self, date: NaiveDate) -> Result<&CalendarEntry> {
        self.index
            .get(&date)
            .map(|&i| &self.entries[i])
            .ok_or(Error::NotFound(date))
    }

    pub fn get_mut(&mut self, date: NaiveDate) -> Result<&mut CalendarEntry> {
        match self.index.get(&date) {
            Some(&i) => Ok(&mut self.entries[i]),
            None => Err(Error::NotFound(date)),
        }
    }

    pub fn entries(&self) -> &[CalendarEntry] {
        &self.entries
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn users(&self) -> &[String] {
        &self.users
    }

    pub fn is_user(&self, user: &str) -> bool {
        self.users.iter().any(|u| u == user)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Earliest and latest scheduled dates.
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.index.keys().min()?;
        let last = self.index.keys().max()?;

        Some((*first, *last))
    }
}
