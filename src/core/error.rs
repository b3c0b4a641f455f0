use thiserror::Error;

use crate::core::types::{DoubletId, SiteId};

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Insufficient funds: need €{required:.2}M, have €{available:.2}M")]
    InsufficientFunds { required: f64, available: f64 },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Portfolio capacity exceeded (limit {limit})")]
    CapacityExceeded { limit: usize },

    #[error("No pending event to resolve")]
    NoPendingEvent,

    #[error("An event is awaiting a decision")]
    EventPending,

    #[error("Game is over")]
    GameOver,

    #[error("Site not found: {0:?}")]
    SiteNotFound(SiteId),

    #[error("Doublet not found: {0:?}")]
    DoubletNotFound(DoubletId),

    #[error("{site:?} already investigated to level {level}")]
    AlreadyInvestigated { site: SiteId, level: u8 },

    #[error("Invalid investigation level: {0}")]
    InvalidInvestigationLevel(u8),

    #[error("Flow rate {rate} kg/s outside allowed range {min}..={max}")]
    InvalidFlowRate { rate: f64, min: f64, max: f64 },

    #[error("Invalid event choice: {0}")]
    InvalidChoice(usize),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl GameError {
    /// Short machine-friendly name of the rejection, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InsufficientFunds { .. } => "insufficient_funds",
            Self::InvalidState(_) => "invalid_state",
            Self::CapacityExceeded { .. } => "capacity_exceeded",
            Self::NoPendingEvent => "no_pending_event",
            Self::EventPending => "event_pending",
            Self::GameOver => "game_over",
            Self::SiteNotFound(_) => "site_not_found",
            Self::DoubletNotFound(_) => "doublet_not_found",
            Self::AlreadyInvestigated { .. } => "already_investigated",
            Self::InvalidInvestigationLevel(_) => "invalid_investigation_level",
            Self::InvalidFlowRate { .. } => "invalid_flow_rate",
            Self::InvalidChoice(_) => "invalid_choice",
            Self::Config(_) => "config",
            Self::IoError(_) => "io",
            Self::TomlError(_) => "toml",
            Self::SerdeError(_) => "serde",
        }
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
