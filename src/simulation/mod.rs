pub mod actions;
pub mod game_end;
pub mod log;
pub mod scheduler;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use actions::ActionOutcome;
pub use log::GameLog;
pub use scheduler::{Scheduler, Speed, BASE_TICK_INTERVAL};
pub use snapshot::{SnapshotStats, StateSnapshot};
pub use state::{GameOverReason, GameState};
pub use tick::{advance_quarter, TickReport};
