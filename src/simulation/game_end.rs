//! Terminal condition checks, run at the end of every tick

use crate::simulation::state::{GameOverReason, GameState};

/// Check bankruptcy first, then resource exhaustion
pub fn evaluate(state: &GameState) -> Option<GameOverReason> {
    if state.cash < state.config.bankruptcy_threshold {
        return Some(GameOverReason::Bankruptcy);
    }

    let producing = state.portfolio.has_producing(&state.config);
    let developable = state.sites.iter().any(|s| s.is_developable());
    if !producing && !developable {
        return Some(GameOverReason::Exhaustion);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;
    use crate::core::types::DoubletId;
    use crate::sites::SiteStatus;

    fn state() -> GameState {
        GameState::initialize(21, GameConfig::default()).unwrap()
    }

    #[test]
    fn test_healthy_start_is_not_terminal() {
        assert_eq!(evaluate(&state()), None);
    }

    #[test]
    fn test_bankruptcy_is_strictly_below_threshold() {
        let mut state = state();
        state.cash = -10.0;
        assert_eq!(evaluate(&state), None);
        state.cash = -10.000001;
        assert_eq!(evaluate(&state), Some(GameOverReason::Bankruptcy));
    }

    #[test]
    fn test_exhaustion_needs_both_conditions() {
        let mut state = state();
        state.portfolio.abandon(DoubletId::LEGACY).unwrap();
        // Sites remain, so not yet exhausted
        assert_eq!(evaluate(&state), None);

        for site in &mut state.sites {
            site.status = SiteStatus::TakenByCompetitor;
        }
        assert_eq!(evaluate(&state), Some(GameOverReason::Exhaustion));
    }

    #[test]
    fn test_site_under_construction_still_counts_as_developable() {
        let mut state = state();
        state.portfolio.abandon(DoubletId::LEGACY).unwrap();
        for site in &mut state.sites {
            site.status = SiteStatus::DrillingFailed;
        }
        state.sites[0].status = SiteStatus::UnderConstruction {
            completion_year: 2027,
            planned_flow_rate: 50.0,
        };
        assert_eq!(evaluate(&state), None);
    }

    #[test]
    fn test_bankruptcy_reported_before_exhaustion() {
        let mut state = state();
        state.portfolio.abandon(DoubletId::LEGACY).unwrap();
        for site in &mut state.sites {
            site.status = SiteStatus::TakenByCompetitor;
        }
        state.cash = -20.0;
        assert_eq!(evaluate(&state), Some(GameOverReason::Bankruptcy));
    }
}
