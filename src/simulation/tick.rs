//! Quarterly tick - advances the whole simulation by one quarter
//!
//! Order within a tick:
//! event check -> competitors -> doublet operation -> holding costs ->
//! cash update -> year rollover -> construction completion -> game-end check
//!
//! A triggered event ends the tick immediately. The calendar stays put and
//! the tick has to be re-run once the event is resolved.

use serde::Serialize;

use crate::competitor::competitor_turn;
use crate::core::calendar::Calendar;
use crate::core::error::{GameError, Result};
use crate::core::history::YearPoint;
use crate::core::types::{DoubletId, Money, SiteId};
use crate::events::{check_for_event, EventKind};
use crate::simulation::game_end;
use crate::simulation::state::{GameOverReason, GameState};
use crate::sites::lifecycle::{charge_holding_costs, complete_construction};

/// What happened during one call to [`advance_quarter`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickReport {
    /// Calendar position after the tick
    pub calendar: Calendar,
    /// Set when the tick was cut short by a new market event
    pub event: Option<EventKind>,
    pub revenue: Money,
    pub operating_cost: Money,
    pub holding_costs: Money,
    /// Change in cash this quarter, holding costs included
    pub net_cash: Money,
    pub heat_gwh: f64,
    /// True if this tick closed out a year
    pub year_rolled: bool,
    pub takeovers: Vec<SiteId>,
    pub completions: Vec<(SiteId, DoubletId)>,
    pub game_over: Option<GameOverReason>,
    /// Log lines written during the tick
    pub log: Vec<String>,
}

impl TickReport {
    fn new(calendar: Calendar) -> Self {
        Self {
            calendar,
            event: None,
            revenue: 0.0,
            operating_cost: 0.0,
            holding_costs: 0.0,
            net_cash: 0.0,
            heat_gwh: 0.0,
            year_rolled: false,
            takeovers: Vec::new(),
            completions: Vec::new(),
            game_over: None,
            log: Vec::new(),
        }
    }

    /// True if the quarter actually ran
    pub fn advanced(&self) -> bool {
        self.event.is_none()
    }
}

/// Advance the simulation by one quarter
pub fn advance_quarter(state: &mut GameState) -> Result<TickReport> {
    if state.is_game_over() {
        return Err(GameError::GameOver);
    }
    if state.pending_event.is_some() {
        return Err(GameError::EventPending);
    }

    let mut report = TickReport::new(state.calendar);

    // 1. Market events
    if let Some(kind) = check_for_event(state) {
        let name = kind.definition().name;
        report.log.push(state.record(format!("EVENT: {}", name)));
        report.event = Some(kind);
        state.version += 1;
        return Ok(report);
    }

    // 2. Competitors
    report.takeovers = competitor_turn(state, &mut report.log);

    // 3. Doublet operation, priced at the current quarter
    let market = state.market();
    let quarter = state
        .portfolio
        .operate_quarter(&state.config, &market, &mut state.rng);

    // 4. Holding costs
    report.holding_costs = charge_holding_costs(state);

    // 5. Cash
    report.revenue = quarter.revenue;
    report.operating_cost = quarter.operating_cost;
    report.net_cash = quarter.net_cash - report.holding_costs;
    report.heat_gwh = quarter.heat_gwh;

    state.cash += report.net_cash;
    state.total_heat_delivered += quarter.heat_gwh;
    state.year_net_cash += report.net_cash;
    state.year_heat += quarter.heat_gwh;

    // 6. Year rollover; later log lines keep the quarter that just ran
    let stamp = state.calendar;
    if state.calendar.is_last_quarter() {
        close_year(state);
    }
    report.year_rolled = state.calendar.advance();

    // 7. Construction that came due this year
    report.completions = complete_construction(state, stamp, &mut report.log);

    // 8. Terminal conditions
    if let Some(reason) = game_end::evaluate(state) {
        state.game_over = Some(reason);
        tracing::warn!(reason = ?reason, cash = state.cash, "Game over");
        report.log.push(state.record_at(stamp, reason.to_string()));
        report.game_over = Some(reason);
    }

    report.calendar = state.calendar;
    state.version += 1;

    tracing::debug!(
        calendar = %state.calendar,
        cash = state.cash,
        net = report.net_cash,
        heat_gwh = report.heat_gwh,
        "Quarter advanced"
    );

    Ok(report)
}

/// Archive the finished year and reset the running totals
fn close_year(state: &mut GameState) {
    let year = state.calendar.year();
    state
        .cash_history
        .push(YearPoint::new(year, state.year_net_cash));
    state.heat_history.push(YearPoint::new(year, state.year_heat));
    state.portfolio.archive_year(year);

    tracing::info!(
        year,
        net_cash = state.year_net_cash,
        heat_gwh = state.year_heat,
        "Year closed"
    );

    state.year_net_cash = 0.0;
    state.year_heat = 0.0;
}

impl GameState {
    /// Advance by one quarter; see [`advance_quarter`]
    pub fn advance_quarter(&mut self) -> Result<TickReport> {
        advance_quarter(self)
    }
}
