pub mod calendar;
pub mod config;
pub mod error;
pub mod history;
pub mod types;

pub use calendar::{Calendar, Season};
pub use config::GameConfig;
pub use error::{GameError, Result};
pub use history::{BoundedSeries, YearPoint};
