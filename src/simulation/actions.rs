//! Player operations on a running game
//!
//! Each operation either succeeds and bumps the state version, or is
//! rejected with a reason and leaves the state untouched.

use crate::core::error::{GameError, Result};
use crate::core::types::{DoubletId, SiteId};
use crate::events;
use crate::simulation::state::GameState;
use crate::sites;

/// Log lines produced by an accepted operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionOutcome {
    pub log: Vec<String>,
}

impl GameState {
    /// Survey a site up to `level`
    pub fn investigate(&mut self, site: SiteId, level: u8) -> Result<ActionOutcome> {
        self.apply("investigate", |state| sites::investigate(state, site, level))
    }

    /// Lock an available site out of the competitors' reach
    pub fn secure(&mut self, site: SiteId) -> Result<ActionOutcome> {
        self.apply("secure", |state| sites::secure(state, site))
    }

    /// Drill a secured site at the given flow rate (kg/s)
    pub fn start_development(&mut self, site: SiteId, flow_rate: f64) -> Result<ActionOutcome> {
        self.apply("start_development", |state| {
            sites::start_development(state, site, flow_rate)
        })
    }

    /// Take a doublet out of service for good
    pub fn abandon(&mut self, doublet: DoubletId) -> Result<ActionOutcome> {
        self.apply("abandon", |state| {
            let name = state.portfolio.abandon(doublet)?.name.clone();
            tracing::info!(doublet = doublet.0, name = %name, "Doublet abandoned");
            Ok(vec![state.record(format!("Abandoned {}", name))])
        })
    }

    /// Pick one of the pending event's choices
    pub fn resolve_event(&mut self, choice: usize) -> Result<ActionOutcome> {
        self.apply("resolve_event", |state| events::resolve_event(state, choice))
    }

    fn apply<F>(&mut self, action: &'static str, op: F) -> Result<ActionOutcome>
    where
        F: FnOnce(&mut GameState) -> Result<Vec<String>>,
    {
        if self.is_game_over() {
            tracing::warn!(action, reason = "game_over", "Action rejected");
            return Err(GameError::GameOver);
        }

        match op(self) {
            Ok(log) => {
                self.version += 1;
                Ok(ActionOutcome { log })
            }
            Err(e) => {
                tracing::warn!(action, reason = e.kind(), error = %e, "Action rejected");
                Err(e)
            }
        }
    }
}
