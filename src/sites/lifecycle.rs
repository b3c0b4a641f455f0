//! Site lifecycle transitions
//!
//! `Available → Secured → UnderConstruction → Operating`, with the terminal
//! branches `TakenByCompetitor` and `DrillingFailed`. Every operation checks
//! all of its preconditions before touching state, so a rejected call
//! leaves the game exactly as it was.

use rand::Rng;

use crate::core::calendar::Calendar;
use crate::core::error::{GameError, Result};
use crate::core::types::{DoubletId, Money, SiteId};
use crate::simulation::GameState;
use crate::sites::site::SiteStatus;

/// Survey a site to `level` (1..=3), paying that level's cost
pub fn investigate(state: &mut GameState, id: SiteId, level: u8) -> Result<Vec<String>> {
    let cost = state
        .config
        .investigation_cost(level)
        .ok_or(GameError::InvalidInvestigationLevel(level))?;

    let site = state.site(id)?;
    if site.is_taken() {
        return Err(GameError::InvalidState(format!(
            "{} has been taken by a competitor",
            site.name
        )));
    }
    if site.investigation_level >= level {
        return Err(GameError::AlreadyInvestigated {
            site: id,
            level: site.investigation_level,
        });
    }
    state.ensure_funds(cost)?;

    state.cash -= cost;
    let site = state.site_mut(id)?;
    site.apply_survey(level);
    let name = site.name.clone();

    tracing::info!(site = %name, level, cost, "Site investigated");
    Ok(vec![state.record(format!("Investigated {} (Level {})", name, level))])
}

/// Secure an available site against competitors
pub fn secure(state: &mut GameState, id: SiteId) -> Result<Vec<String>> {
    let cost = state.config.secure_cost;
    let site = state.site(id)?;
    if site.status != SiteStatus::Available {
        return Err(GameError::InvalidState(format!(
            "{} cannot be secured while {}",
            site.name,
            site.status.label()
        )));
    }
    state.ensure_funds(cost)?;

    state.cash -= cost;
    let site = state.site_mut(id)?;
    site.status = SiteStatus::Secured { holding_paid: 0.0 };
    let name = site.name.clone();

    tracing::info!(site = %name, cost, "Site secured");
    Ok(vec![state.record(format!("Secured {}", name))])
}

/// Drill a secured site
///
/// The drilling cost is spent whether or not the well succeeds. A failed
/// well leaves the site permanently `DrillingFailed` and builds nothing.
pub fn start_development(state: &mut GameState, id: SiteId, flow_rate: f64) -> Result<Vec<String>> {
    let [min_flow, max_flow] = state.config.flow_rate_range;
    if !(min_flow..=max_flow).contains(&flow_rate) {
        return Err(GameError::InvalidFlowRate {
            rate: flow_rate,
            min: min_flow,
            max: max_flow,
        });
    }

    let site = state.site(id)?;
    if !site.is_secured() {
        return Err(GameError::InvalidState(format!(
            "{} must be secured before drilling (currently {})",
            site.name,
            site.status.label()
        )));
    }
    let drilling_cost = site.geology().drilling_cost;

    let limit = state.config.max_doublets;
    if state.capacity_in_use() >= limit {
        return Err(GameError::CapacityExceeded { limit });
    }
    state.ensure_funds(drilling_cost)?;

    let failed = state.rng.gen_bool(state.config.drilling_failure_rate);
    state.cash -= drilling_cost;

    let completion_year = state.year() + state.config.construction_delay;
    let site = state.site_mut(id)?;
    let name = site.name.clone();

    if failed {
        site.status = SiteStatus::DrillingFailed;
        tracing::info!(site = %name, cost = drilling_cost, "Drilling failed");
        return Ok(vec![state.record(format!("DRILLING FAILED at {}!", name))]);
    }

    site.status = SiteStatus::UnderConstruction {
        completion_year,
        planned_flow_rate: flow_rate,
    };
    tracing::info!(site = %name, flow_rate, completion_year, "Drilling started");
    Ok(vec![state.record(format!("Started drilling {}", name))])
}

/// Commission every site whose construction is due and affordable
///
/// Sites that are due but cannot be paid for stay under construction and
/// are retried on the next call. Log lines are stamped with `stamp`, the
/// quarter the tick ran in.
pub fn complete_construction(
    state: &mut GameState,
    stamp: Calendar,
    log: &mut Vec<String>,
) -> Vec<(SiteId, DoubletId)> {
    let year = state.year();
    let history_length = state.config.history_length;
    let mut completed = Vec::new();

    for i in 0..state.sites.len() {
        let SiteStatus::UnderConstruction {
            completion_year,
            planned_flow_rate,
        } = state.sites[i].status
        else {
            continue;
        };
        if completion_year > year {
            continue;
        }

        let cost = state.sites[i].geology().construction_cost;
        if state.cash < cost {
            tracing::debug!(site = %state.sites[i].name, cost, cash = state.cash, "Construction deferred");
            continue;
        }

        state.cash -= cost;
        let doublet = state
            .portfolio
            .commission(&state.sites[i], planned_flow_rate, year, history_length);
        state.sites[i].status = SiteStatus::Operating { doublet };

        let site_id = state.sites[i].id;
        let name = state.sites[i].name.clone();
        tracing::info!(site = %name, doublet = doublet.0, cost, "Doublet commissioned");
        log.push(state.record_at(stamp, format!("✓ {} is now operational!", name)));
        completed.push((site_id, doublet));
    }

    completed
}

/// Charge one quarter of holding cost on every secured site
pub fn charge_holding_costs(state: &mut GameState) -> Money {
    let per_site = state.config.quarterly_holding_cost();
    let mut total = 0.0;
    for site in &mut state.sites {
        if let SiteStatus::Secured { holding_paid } = &mut site.status {
            *holding_paid += per_site;
            total += per_site;
        }
    }
    total
}
