use async_trait::async_trait;

use crate::{Calendar, Catalog, Result, SheetGateway};

pub const DEFAULT_CALENDAR_WORKSHEET: &str = "Schedule_streamlit";
pub const DEFAULT_CATALOG_WORKSHEET: &str = "Workouts";

/// Persistence of the two schedule tables.
///
/// Saves are whole-table: the calendar handed to `save_calendar` replaces
/// everything stored. Concurrent writers race and the last one wins.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn load_calendar(&self) -> Result<Calendar>;

    async fn load_catalog(&self) -> Result<Catalog>;

    async fn save_calendar(&self, calendar: &Calendar) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct Worksheets {
    pub calendar: String,
    pub catalog: String,
}

impl Default for Worksheets {
    fn default() -> Self {
        Self {
            calendar: DEFAULT_CALENDAR_WORKSHEET.to_owned(),
            catalog: DEFAULT_CATALOG_WORKSHEET.to_owned(),
        }
    }
}

pub struct SheetRepository<G> {
    gateway: G,
    worksheets: Worksheets,
    users: Vec<String>,
}

impl<G: SheetGateway> SheetRepository<G> {
    pub fn new(gateway: G, worksheets: Worksheets, users: Vec<String>) -> Self {
        Self {
            gateway,
            worksheets,
            users,
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }
}

#[async_trait]
impl<G: SheetGateway> ScheduleRepository for SheetRepository<G> {
    #[tracing::instrument(skip_all, fields(worksheet = self.worksheets.calendar))]
    async fn load_calendar(&self) -> Result<Calendar> {
        let table = self.gateway.read(&self.worksheets.calendar).await?;
        let calendar = Calendar::from_table(&table, &self.users)?;

        tracing::debug!(entries = calendar.len(), "calendar loaded");

        Ok(calendar)
    }

    #[tracing::instrument(skip_all, fields(worksheet = self.worksheets.catalog))]
    async fn load_catalog(&self) -> Result<Catalog> {
        let table = self.gateway.read(&self.worksheets.catalog).await?;
        let catalog = Catalog::from_table(&table)?;

        tracing::debug!(entries = catalog.len(), "catalog loaded");

        Ok(catalog)
    }

    #[tracing::instrument(skip_all, fields(worksheet = self.worksheets.calendar))]
    async fn save_calendar(&self, calendar: &Calendar) -> Result<()> {
        self.gateway
            .write(&self.worksheets.calendar, &calendar.to_table())
            .await?;

        Ok(())
    }
}
