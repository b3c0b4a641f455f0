//! Integration tests for the site lifecycle
//!
//! These tests drive sites through the public operations only:
//! - Survey -> secure -> drill -> construction -> operating doublet
//! - Drilling failure as a terminal state
//! - Competitor pressure on open versus secured sites
//! - Holding costs and the doublet capacity limit

use geothermal_portfolio::prelude::*;

fn quiet(overrides: impl FnOnce(&mut GameConfig)) -> GameConfig {
    let mut config = GameConfig {
        event_probability_scale: 0.0,
        competitor_take_chance: 0.0,
        ..GameConfig::default()
    };
    overrides(&mut config);
    config
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ============================================================================
// Full development path
// ============================================================================

#[test]
fn test_site_develops_into_doublet() {
    let config = quiet(|c| {
        c.starting_cash = 60.0;
        c.drilling_failure_rate = 0.0;
        c.sites.construction_cost = [4.0, 5.0];
    });
    let mut state = GameState::initialize(99, config).unwrap();
    let site = SiteId(2);

    state.investigate(site, 3).unwrap();
    assert!(approx(state.cash(), 56.0));

    let surveyed = state.site(site).unwrap().clone();
    let drilling = surveyed.revealed_drilling_cost.unwrap();
    let temperature = surveyed.revealed_temperature.unwrap();
    assert!(drilling.is_exact());
    assert!(temperature.is_exact());

    state.secure(site).unwrap();
    state.start_development(site, 50.0).unwrap();
    assert!(approx(state.cash(), 54.0 - drilling.min));
    assert_eq!(
        state.site(site).unwrap().status,
        SiteStatus::UnderConstruction {
            completion_year: 2027,
            planned_flow_rate: 50.0
        }
    );

    let mut completed_on = None;
    for tick in 1..=8 {
        let before = state.cash();
        let report = state.advance_quarter().unwrap();
        if !report.completions.is_empty() {
            assert!(approx(state.cash(), before + report.net_cash - 4.0));
            // Logged under the last quarter of 2026, when the tick ran
            assert_eq!(
                report.log.last().map(String::as_str),
                Some("2026 Q4: ✓ Site C is now operational!")
            );
            completed_on = Some(tick);
        }
    }

    // Two years after drilling in 2025, the doublet comes online at the 2027 rollover
    assert_eq!(completed_on, Some(8));
    assert_eq!(state.calendar(), Calendar::new(2027));

    let doublet = state.doublet(DoubletId(1)).unwrap();
    assert_eq!(doublet.name, "Site C");
    assert_eq!(doublet.flow_rate, 50.0);
    assert_eq!(doublet.initial_temp, temperature.min);
    assert_eq!(doublet.year_built, 2027);
    assert_eq!(
        state.site(site).unwrap().status,
        SiteStatus::Operating {
            doublet: DoubletId(1)
        }
    );
}

#[test]
fn test_unaffordable_construction_waits() {
    let config = quiet(|c| {
        c.starting_cash = 20.0;
        c.drilling_failure_rate = 0.0;
        c.construction_delay = 0;
        c.sites.drilling_cost = [5.0, 6.0];
        c.sites.construction_cost = [7.0, 8.0];
    });
    let mut state = GameState::initialize(5, config).unwrap();
    state.abandon(DoubletId::LEGACY).unwrap();
    for id in 0..6 {
        state.secure(SiteId(id)).unwrap();
    }
    // 20 - 12 for securing, then 5 for drilling, leaves 3 < 7
    state.start_development(SiteId(0), 40.0).unwrap();
    assert!(approx(state.cash(), 3.0));

    let report = state.advance_quarter().unwrap();
    assert!(report.completions.is_empty());
    assert!(state.site(SiteId(0)).unwrap().is_under_construction());
}

// ============================================================================
// Drilling failure
// ============================================================================

#[test]
fn test_failed_drilling_is_terminal() {
    let config = quiet(|c| {
        c.starting_cash = 40.0;
        c.drilling_failure_rate = 1.0;
    });
    let mut state = GameState::initialize(3, config).unwrap();
    state.investigate(SiteId(0), 3).unwrap();
    let drilling = state.site(SiteId(0)).unwrap().revealed_drilling_cost.unwrap().min;
    state.secure(SiteId(0)).unwrap();
    let before = state.cash();

    let outcome = state.start_development(SiteId(0), 60.0).unwrap();

    assert!(outcome.log[0].ends_with("DRILLING FAILED at Site A!"));
    assert!(approx(state.cash(), before - drilling));
    assert_eq!(state.site(SiteId(0)).unwrap().status, SiteStatus::DrillingFailed);
    assert_eq!(state.doublets().len(), 1);
    assert_eq!(state.capacity_in_use(), 1);

    // No retry, no second charge
    assert!(matches!(
        state.start_development(SiteId(0), 60.0),
        Err(GameError::InvalidState(_))
    ));
    assert!(approx(state.cash(), before - drilling));

    // A failed site never turns into a doublet, however long we wait
    for _ in 0..12 {
        state.advance_quarter().unwrap();
    }
    assert_eq!(state.doublets().len(), 1);
}

// ============================================================================
// Competitors and holding costs
// ============================================================================

#[test]
fn test_secured_site_survives_competitors() {
    let config = quiet(|c| c.competitor_take_chance = 1.0);
    let mut state = GameState::initialize(12, config).unwrap();
    state.secure(SiteId(4)).unwrap();

    let mut quarters = 0;
    while quarters < 200 && state.sites().iter().any(|s| s.is_open()) {
        state.advance_quarter().unwrap();
        quarters += 1;
    }

    assert!(state
        .sites()
        .iter()
        .filter(|s| s.id != SiteId(4))
        .all(|s| s.is_taken()));
    match state.site(SiteId(4)).unwrap().status {
        SiteStatus::Secured { holding_paid } => {
            assert!(approx(holding_paid, 0.075 * quarters as f64))
        }
        other => panic!("site should still be secured, got {:?}", other),
    }
}

#[test]
fn test_one_year_of_holding_costs() {
    let mut state = GameState::initialize(8, quiet(|_| {})).unwrap();
    state.secure(SiteId(1)).unwrap();

    let mut holding = 0.0;
    let mut net = 0.0;
    for _ in 0..4 {
        let report = state.advance_quarter().unwrap();
        holding += report.holding_costs;
        net += report.net_cash;
        assert!(approx(report.net_cash, report.revenue - report.operating_cost - report.holding_costs));
    }

    assert!(approx(holding, 0.3));
    assert!(approx(state.cash(), 13.0 + net));
    // The archived year includes the holding charges
    assert!(approx(state.cash_history().latest().unwrap().value, net));
}

// ============================================================================
// Surveys and capacity
// ============================================================================

#[test]
fn test_survey_rejected_without_funds() {
    let mut state = GameState::initialize(21, quiet(|c| c.starting_cash = 1.0)).unwrap();
    let version = state.version();

    let result = state.investigate(SiteId(0), 2);
    assert!(matches!(
        result,
        Err(GameError::InsufficientFunds { required, available })
            if approx(required, 1.5) && approx(available, 1.0)
    ));

    let site = state.site(SiteId(0)).unwrap();
    assert_eq!(site.investigation_level, 0);
    assert!(site.revealed_temperature.is_none());
    assert!(site.revealed_drilling_cost.is_none());
    assert_eq!(state.cash(), 1.0);
    assert_eq!(state.version(), version);

    // The cheaper tier still fits
    state.investigate(SiteId(0), 1).unwrap();
    assert!(approx(state.cash(), 0.5));
}

#[test]
fn test_drilling_rejected_below_true_cost() {
    // 6.0 - 2.0 to secure leaves 4.0, under the cheapest possible well
    let config = quiet(|c| {
        c.starting_cash = 6.0;
        c.sites.drilling_cost = [5.0, 13.0];
    });
    let mut state = GameState::initialize(9, config).unwrap();
    state.secure(SiteId(0)).unwrap();
    let version = state.version();

    assert!(matches!(
        state.start_development(SiteId(0), 50.0),
        Err(GameError::InsufficientFunds { available, .. }) if approx(available, 4.0)
    ));
    assert_eq!(
        state.site(SiteId(0)).unwrap().status,
        SiteStatus::Secured { holding_paid: 0.0 }
    );
    assert!(approx(state.cash(), 4.0));
    assert_eq!(state.version(), version);
    assert_eq!(state.capacity_in_use(), 1);
}

#[test]
fn test_repeat_survey_changes_nothing() {
    let mut state = GameState::initialize(21, quiet(|_| {})).unwrap();
    state.investigate(SiteId(3), 2).unwrap();
    let before = state.to_json().unwrap();

    for level in [1, 2] {
        assert!(matches!(
            state.investigate(SiteId(3), level),
            Err(GameError::AlreadyInvestigated { level: 2, .. })
        ));
    }
    assert_eq!(state.to_json().unwrap(), before);

    // A deeper survey is still allowed and charges only its own tier
    let cash = state.cash();
    state.investigate(SiteId(3), 3).unwrap();
    assert!(approx(state.cash(), cash - 4.0));
}

#[test]
fn test_capacity_counts_construction() {
    let config = quiet(|c| {
        c.starting_cash = 100.0;
        c.max_doublets = 2;
        c.drilling_failure_rate = 0.0;
    });
    let mut state = GameState::initialize(30, config).unwrap();
    state.secure(SiteId(0)).unwrap();
    state.secure(SiteId(1)).unwrap();
    state.start_development(SiteId(0), 50.0).unwrap();
    assert_eq!(state.capacity_in_use(), 2);

    let cash = state.cash();
    assert!(matches!(
        state.start_development(SiteId(1), 50.0),
        Err(GameError::CapacityExceeded { limit: 2 })
    ));
    assert_eq!(state.cash(), cash);

    // Abandoning the legacy doublet frees the slot
    state.abandon(DoubletId::LEGACY).unwrap();
    state.start_development(SiteId(1), 50.0).unwrap();
}

#[test]
fn test_operations_reject_unknown_site() {
    let mut state = GameState::initialize(1, quiet(|_| {})).unwrap();
    assert!(matches!(
        state.secure(SiteId(40)),
        Err(GameError::SiteNotFound(SiteId(40)))
    ));
    assert_eq!(state.version(), 0);
}
