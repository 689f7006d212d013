//! Training schedule kept in a Google Sheet: the calendar and workout
//! catalog tables, day-by-day navigation over the calendar and recording of
//! each user's completion status.

mod calendar;
mod catalog;
mod date;
mod error;
pub mod gateway;
mod navigation;
mod recorder;
mod repository;
mod status;

pub use calendar::*;
pub use catalog::*;
pub use date::*;
pub use error::*;
pub use gateway::{SheetGateway, Table};
pub use navigation::*;
pub use recorder::*;
pub use repository::*;
pub use status::*;
