use std::collections::HashMap;

use crate::{Error, Result, Table};

pub const NAME_COLUMN: &str = "Workout Name";
pub const URL_COLUMN: &str = "URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub url: String,
    /// Remaining descriptive columns in sheet order.
    pub details: Vec<(String, String)>,
}

/// Reference list of workouts keyed by name. Owned by whoever edits the sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn from_table(table: &Table) -> Result<Self> {
        let Some(name_at) = table.column(NAME_COLUMN) else {
            return Err(Error::InvalidTable(format!("missing '{NAME_COLUMN}' column")));
        };
        let url_at = table.column(URL_COLUMN);

        let mut catalog = Self::default();

        for row in &table.rows {
            if row.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }

            let name = row[name_at].trim();
            if name.is_empty() {
                tracing::warn!(?row, "workout row without a name skipped");
                continue;
            }

            if catalog.index.contains_key(name) {
                tracing::warn!(name, "duplicate workout name, keeping the first row");
                continue;
            }

            let url = url_at.map(|i| row[i].trim().to_owned()).unwrap_or_default();
            let details = table
                .columns
                .iter()
                .zip(row)
                .enumerate()
                .filter(|(i, _)| *i != name_at && Some(*i) != url_at)
                .map(|(_, (column, cell))| (column.to_owned(), cell.to_owned()))
                .collect();

            catalog.index.insert(name.to_owned(), catalog.entries.len());
            catalog.entries.push(CatalogEntry {
                name: name.to_owned(),
                url,
                details,
            });
        }

        Ok(catalog)
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
