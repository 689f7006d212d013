//! Whole-worksheet access to the remote sheet store.

use std::sync::Arc;

use async_trait::async_trait;

use crate::StoreError;

mod google;
mod memory;

pub use google::{GoogleSheetsGateway, ServiceAccountKey, DEFAULT_API_BASE_URL};
pub use memory::MemoryGateway;

/// A worksheet as plain cells. The first row of the sheet is the header,
/// every data row is padded to the header width. Blank cells are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width.max(row.len()), String::new());
                row
            })
            .collect();

        Self { columns, rows }
    }

    /// Builds a table from raw sheet values, header first.
    pub fn from_values(values: Vec<Vec<String>>) -> Self {
        let mut values = values.into_iter();
        let columns = values
            .next()
            .unwrap_or_default()
            .into_iter()
            .map(|name| name.trim().to_owned())
            .collect();

        Self::new(columns, values.collect())
    }

    pub fn to_values(&self) -> Vec<Vec<String>> {
        let mut values = Vec::with_capacity(self.rows.len() + 1);
        values.push(self.columns.clone());
        values.extend(self.rows.iter().cloned());
        values
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }
}

#[async_trait]
pub trait SheetGateway: Send + Sync {
    /// Returns every row of the named worksheet.
    async fn read(&self, worksheet: &str) -> Result<Table, StoreError>;

    /// Replaces the whole content of the named worksheet.
    async fn write(&self, worksheet: &str, table: &Table) -> Result<(), StoreError>;
}

#[async_trait]
impl<G: SheetGateway + ?Sized> SheetGateway for Arc<G> {
    async fn read(&self, worksheet: &str) -> Result<Table, StoreError> {
        (**self).read(worksheet).await
    }

    async fn write(&self, worksheet: &str, table: &Table) -> Result<(), StoreError> {
        (**self).write(worksheet, table).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_from_values_pads_short_rows() {
        let table = Table::from_values(vec![
            strings(&["Date", "Workout", "Lori Comment"]),
            strings(&["3/1/2026", "Rest Day"]),
            strings(&["3/2/2026"]),
        ]);

        assert_eq!(table.columns, strings(&["Date", "Workout", "Lori Comment"]));
        assert_eq!(table.rows[0], strings(&["3/1/2026", "Rest Day", ""]));
        assert_eq!(table.rows[1], strings(&["3/2/2026", "", ""]));
        assert_eq!(table.column("Workout"), Some(1));
        assert_eq!(table.column("URL"), None);
    }

    #[test]
    fn test_from_values_of_empty_sheet() {
        let table = Table::from_values(vec![]);

        assert!(table.columns.is_empty());
        assert!(table.rows.is_empty());
    }
}
