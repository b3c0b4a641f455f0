//! Stochastic market events
//!
//! At most one event is pending at a time. While it is pending the tick
//! scheduler refuses to run, so nothing accrues until the player decides.

pub mod catalog;

pub use catalog::{ChoiceEffect, EventChoice, EventKind, MarketEvent, STANDARD_EVENTS};

use rand::Rng;
use serde::Serialize;

use crate::core::calendar::Calendar;
use crate::core::error::{GameError, Result};
use crate::simulation::GameState;

/// An event awaiting the player's decision
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PendingEvent {
    pub event: &'static MarketEvent,
    pub triggered_at: Calendar,
}

impl PendingEvent {
    pub fn kind(&self) -> EventKind {
        self.event.kind
    }

    pub fn choices(&self) -> &'static [EventChoice] {
        self.event.choices
    }
}

/// Roll for a new event, unless one is already pending
///
/// Events are drawn in catalog order and the scan stops at the first hit,
/// so two events can never trigger in the same quarter.
pub fn check_for_event(state: &mut GameState) -> Option<EventKind> {
    if state.pending_event.is_some() {
        return None;
    }

    let scale = state.config.event_probability_scale;
    for event in STANDARD_EVENTS.iter() {
        let p = (event.probability * scale).clamp(0.0, 1.0);
        if state.rng.gen_bool(p) {
            state.pending_event = Some(PendingEvent {
                event,
                triggered_at: state.calendar,
            });
            tracing::info!(event = event.name, "Market event triggered");
            return Some(event.kind);
        }
    }
    None
}

/// Apply the player's choice and clear the pending event
///
/// Choices with a positive cost are rejected when unaffordable and the
/// event stays pending. Free choices are always accepted.
pub fn resolve_event(state: &mut GameState, choice_index: usize) -> Result<Vec<String>> {
    let pending = state.pending_event.ok_or(GameError::NoPendingEvent)?;
    let choice = pending
        .choices()
        .get(choice_index)
        .ok_or(GameError::InvalidChoice(choice_index))?;
    if choice.cost > 0.0 {
        state.ensure_funds(choice.cost)?;
    }

    state.cash -= choice.cost;
    match choice.effect {
        ChoiceEffect::None => {}
        ChoiceEffect::ScaleRevenue(factor) => state.revenue_multiplier *= factor,
        ChoiceEffect::ScaleOperatingCost(factor) => state.operating_cost_multiplier *= factor,
        ChoiceEffect::CashGrant(amount) => state.cash += amount,
    }
    state.pending_event = None;

    tracing::info!(event = pending.event.name, choice = choice.label, "Market event resolved");
    Ok(vec![state.record(format!("{} → {}", pending.event.name, choice.label))])
}
