//! Geothermal Portfolio - quarterly simulation of a geothermal heat business
//!
//! The player starts with one ageing doublet and a handful of candidate
//! sites, and grows (or loses) the portfolio one quarter at a time.

pub mod competitor;
pub mod core;
pub mod economy;
pub mod events;
pub mod portfolio;
pub mod simulation;
pub mod sites;

pub mod prelude {
    pub use crate::core::calendar::{Calendar, Season};
    pub use crate::core::config::GameConfig;
    pub use crate::core::error::{GameError, Result};
    pub use crate::core::types::{DoubletId, Money, SiteId};
    pub use crate::events::{EventKind, PendingEvent};
    pub use crate::portfolio::Doublet;
    pub use crate::simulation::{
        GameOverReason, GameState, Scheduler, Speed, StateSnapshot, TickReport,
    };
    pub use crate::sites::{Site, SiteStatus};
}
