mod check;
mod server;

use std::sync::Arc;

use anyhow::{Context, Result};
use trailhead::Config;
use trailhead_schedule::{
    ScheduleRepository, SheetRepository, Worksheets,
    gateway::{GoogleSheetsGateway, ServiceAccountKey},
};

pub use check::check;
pub use server::serve;

/// Schedule repository backed by the configured Google spreadsheet.
fn sheet_repository(config: &Config) -> Result<Arc<dyn ScheduleRepository>> {
    let key = ServiceAccountKey::from_file(&config.sheets.credentials_path)
        .context("Failed to read the service-account key")?;

    let gateway = GoogleSheetsGateway::new(
        &config.sheets.spreadsheet_id,
        key,
        &config.sheets.api_base_url,
    );

    let worksheets = Worksheets {
        calendar: config.sheets.calendar_worksheet.to_owned(),
        catalog: config.sheets.catalog_worksheet.to_owned(),
    };

    Ok(Arc::new(SheetRepository::new(
        gateway,
        worksheets,
        config.schedule.users.clone(),
    )))
}
