//! Competitor activity: unsecured sites can be lost every quarter

use rand::Rng;

use crate::core::types::SiteId;
use crate::simulation::GameState;
use crate::sites::SiteStatus;

/// Give every open site an independent chance to be taken
///
/// Only `Available` sites are exposed. Secured, drilling, operating and
/// failed sites are out of reach.
pub fn competitor_turn(state: &mut GameState, log: &mut Vec<String>) -> Vec<SiteId> {
    let chance = state.config.quarterly_competitor_chance();
    let mut taken = Vec::new();

    for i in 0..state.sites.len() {
        if !state.sites[i].is_open() {
            continue;
        }
        if state.rng.gen_bool(chance) {
            state.sites[i].status = SiteStatus::TakenByCompetitor;
            let name = state.sites[i].name.clone();
            tracing::info!(site = %name, "Competitor took site");
            log.push(state.record(format!("Competitor has taken {}!", name)));
            taken.push(state.sites[i].id);
        }
    }

    taken
}
