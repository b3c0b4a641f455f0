//! Property tests for invariants that must hold for any seed and any
//! sequence of player actions

use std::collections::HashMap;

use geothermal_portfolio::economy::{heat_output_mw, next_temperature, ReservoirState};
use geothermal_portfolio::portfolio::DoubletOrigin;
use geothermal_portfolio::prelude::*;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Move {
    Investigate(u32, u8),
    Secure(u32),
    Drill(u32, f64),
    Abandon(u32),
    Resolve(usize),
    Wait,
}

fn any_move() -> impl Strategy<Value = Move> {
    prop_oneof![
        (0u32..10, 1u8..=3).prop_map(|(s, l)| Move::Investigate(s, l)),
        (0u32..10).prop_map(Move::Secure),
        (0u32..10, 10.0..110.0f64).prop_map(|(s, f)| Move::Drill(s, f)),
        (0u32..4).prop_map(Move::Abandon),
        (0usize..3).prop_map(Move::Resolve),
        Just(Move::Wait),
    ]
}

fn apply(state: &mut GameState, mv: &Move) {
    let _ = match *mv {
        Move::Investigate(s, l) => state.investigate(SiteId(s), l),
        Move::Secure(s) => state.secure(SiteId(s)),
        Move::Drill(s, f) => state.start_development(SiteId(s), f),
        Move::Abandon(d) => state.abandon(DoubletId(d)),
        Move::Resolve(c) => state.resolve_event(c),
        Move::Wait => return,
    };
}

fn check_invariants(state: &GameState, temps: &mut HashMap<DoubletId, f64>) {
    let config = state.config();
    let floor = config.temperature_floor();

    for doublet in state.doublets() {
        assert!(doublet.current_temp >= floor - 1e-9);
        if let Some(previous) = temps.insert(doublet.id, doublet.current_temp) {
            assert!(doublet.current_temp <= previous);
        }
    }

    assert!(state.capacity_in_use() <= config.max_doublets);

    // Each operating site owns exactly one doublet, and vice versa
    let mut operating: Vec<_> = state
        .sites()
        .iter()
        .filter_map(|s| match s.status {
            SiteStatus::Operating { doublet } => Some((s.id, doublet)),
            _ => None,
        })
        .collect();
    let mut from_sites: Vec<_> = state
        .doublets()
        .iter()
        .filter_map(|d| match d.origin {
            DoubletOrigin::Site(site) => Some((site, d.id)),
            DoubletOrigin::Legacy => None,
        })
        .collect();
    operating.sort();
    from_sites.sort();
    assert_eq!(operating, from_sites);

    assert!(state.log().len() <= config.log_length);
    assert!(state.cash_history().len() <= config.history_length);
    assert!(state.heat_history().len() <= config.history_length);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_invariants_hold_under_random_play(
        seed in any::<u64>(),
        moves in prop::collection::vec(any_move(), 0..120),
    ) {
        let mut state = GameState::initialize(seed, GameConfig {
            starting_cash: 40.0,
            ..GameConfig::default()
        })
        .unwrap();
        let mut temps = HashMap::new();
        let mut terminal: HashMap<SiteId, SiteStatus> = HashMap::new();
        let mut version = state.version();

        for mv in &moves {
            apply(&mut state, mv);
            let _ = state.advance_quarter();

            check_invariants(&state, &mut temps);

            // Failed and taken sites never come back
            for site in state.sites() {
                if let Some(status) = terminal.get(&site.id) {
                    prop_assert_eq!(site.status, *status);
                } else if matches!(site.status, SiteStatus::DrillingFailed | SiteStatus::TakenByCompetitor) {
                    terminal.insert(site.id, site.status);
                }
            }

            prop_assert!(state.version() >= version);
            version = state.version();
        }
    }

    #[test]
    fn prop_rejected_survey_leaves_state_untouched(
        seed in any::<u64>(),
        site in 0u32..10,
        first in 1u8..=3,
        repeat in 1u8..=3,
    ) {
        prop_assume!(repeat <= first);
        let mut state = GameState::initialize(seed, GameConfig::default()).unwrap();
        state.investigate(SiteId(site), first).unwrap();
        let before = state.to_json().unwrap();

        let result = state.investigate(SiteId(site), repeat);
        let rejected_as_repeat = matches!(result, Err(GameError::AlreadyInvestigated { .. }));
        prop_assert!(rejected_as_repeat);
        prop_assert_eq!(state.to_json().unwrap(), before);
    }

    #[test]
    fn prop_same_seed_same_sites(seed in any::<u64>()) {
        let a = GameState::initialize(seed, GameConfig::default()).unwrap();
        let b = GameState::initialize(seed, GameConfig::default()).unwrap();
        prop_assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
    }

    #[test]
    fn prop_temperature_never_below_floor(
        temperature in 30.0..200.0f64,
        flow_rate in 20.0..100.0f64,
        thermal_capacity in 0.5..2.0f64,
        draw in 3.0..5.0f64,
    ) {
        let config = GameConfig::default();
        let reservoir = ReservoirState { temperature, flow_rate, thermal_capacity };
        let next = next_temperature(&config, &reservoir, draw);
        prop_assert!(next <= temperature);
        prop_assert!(next >= config.temperature_floor());
    }

    #[test]
    fn prop_heat_output_non_negative(
        temperature in 0.0..200.0f64,
        flow_rate in 0.0..100.0f64,
    ) {
        let config = GameConfig::default();
        let reservoir = ReservoirState { temperature, flow_rate, thermal_capacity: 1.0 };
        let heat = heat_output_mw(&config, &reservoir);
        prop_assert!(heat >= 0.0);
        if temperature - config.reference_temp <= config.min_delta_t {
            prop_assert_eq!(heat, 0.0);
        }
    }
}
