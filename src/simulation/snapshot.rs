//! Serialisable view of the whole game, for display and export
//!
//! Hidden site geology is never part of a snapshot.

use serde::Serialize;

use crate::core::calendar::Calendar;
use crate::core::config::GameConfig;
use crate::core::error::Result;
use crate::core::history::YearPoint;
use crate::core::types::Money;
use crate::events::PendingEvent;
use crate::portfolio::Doublet;
use crate::simulation::state::{GameOverReason, GameState};
use crate::sites::Site;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateSnapshot {
    pub seed: u64,
    pub version: u64,
    pub calendar: Calendar,
    pub cash: Money,
    pub total_heat_delivered: f64,
    pub revenue_multiplier: f64,
    pub operating_cost_multiplier: f64,
    pub sites: Vec<Site>,
    pub doublets: Vec<Doublet>,
    pub cash_history: Vec<YearPoint>,
    pub heat_history: Vec<YearPoint>,
    pub log: Vec<String>,
    pub pending_event: Option<PendingEvent>,
    pub game_over: Option<GameOverReason>,
    pub stats: SnapshotStats,
    pub config: GameConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnapshotStats {
    pub active_doublets: usize,
    pub sites_available: usize,
    pub sites_under_construction: usize,
    pub capacity_in_use: usize,
    pub max_doublets: usize,
}

impl GameState {
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            seed: self.seed,
            version: self.version,
            calendar: self.calendar,
            cash: self.cash,
            total_heat_delivered: self.total_heat_delivered,
            revenue_multiplier: self.revenue_multiplier,
            operating_cost_multiplier: self.operating_cost_multiplier,
            sites: self.sites.clone(),
            doublets: self.portfolio.doublets().to_vec(),
            cash_history: self.cash_history.to_vec(),
            heat_history: self.heat_history.to_vec(),
            log: self.log.lines().cloned().collect(),
            pending_event: self.pending_event,
            game_over: self.game_over,
            stats: SnapshotStats {
                active_doublets: self.portfolio.active_count(),
                sites_available: self.sites.iter().filter(|s| s.is_open()).count(),
                sites_under_construction: self.sites_under_construction(),
                capacity_in_use: self.capacity_in_use(),
                max_doublets: self.config.max_doublets,
            },
            config: self.config.clone(),
        }
    }

    /// Pretty-printed JSON of [`GameState::snapshot`]
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_stats() {
        let mut state = GameState::initialize(4, GameConfig::default()).unwrap();
        state.secure(crate::core::types::SiteId(0)).unwrap();
        let snap = state.snapshot();
        assert_eq!(snap.stats.active_doublets, 1);
        assert_eq!(snap.stats.sites_available, 9);
        assert_eq!(snap.stats.sites_under_construction, 0);
        assert_eq!(snap.version, 1);
    }

    #[test]
    fn test_json_hides_geology() {
        let state = GameState::initialize(4, GameConfig::default()).unwrap();
        let json = state.to_json().unwrap();
        assert!(json.contains("\"Site A\""));
        assert!(!json.contains("geology"));

        let sites = serde_json::to_string(&state.snapshot().sites).unwrap();
        assert!(!sites.contains("construction_cost"));
    }
}
