//! Market event catalog

use serde::Serialize;

use crate::core::types::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventKind {
    PublicBacklash,
    SupplyChainCrisis,
    GovernmentGrant,
}

/// What picking a choice does to the economy
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ChoiceEffect {
    /// Pay the cost and nothing else changes
    None,
    /// Multiply the revenue multiplier (persists for the rest of the run)
    ScaleRevenue(f64),
    /// Multiply the operating-cost multiplier (persists for the rest of the run)
    ScaleOperatingCost(f64),
    /// Add cash immediately
    CashGrant(Money),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EventChoice {
    pub label: &'static str,
    pub cost: Money,
    pub effect: ChoiceEffect,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketEvent {
    pub kind: EventKind,
    pub name: &'static str,
    pub description: &'static str,
    /// Chance per quarter before `event_probability_scale` is applied
    pub probability: f64,
    pub choices: &'static [EventChoice],
}

/// Scanned in this order each quarter; the first hit wins
pub static STANDARD_EVENTS: [MarketEvent; 3] = [
    MarketEvent {
        kind: EventKind::PublicBacklash,
        name: "Public Backlash",
        description: "Environmental groups organizing against geothermal.",
        probability: 0.02,
        choices: &[
            EventChoice {
                label: "Launch PR Campaign (€2M)",
                cost: 2.0,
                effect: ChoiceEffect::None,
            },
            EventChoice {
                label: "Accept -20% revenue",
                cost: 0.0,
                effect: ChoiceEffect::ScaleRevenue(0.8),
            },
        ],
    },
    MarketEvent {
        kind: EventKind::SupplyChainCrisis,
        name: "Supply Chain Crisis",
        description: "Equipment and material prices are spiking.",
        probability: 0.025,
        choices: &[
            EventChoice {
                label: "Stockpile materials (€3M)",
                cost: 3.0,
                effect: ChoiceEffect::None,
            },
            EventChoice {
                label: "Accept +30% operating costs",
                cost: 0.0,
                effect: ChoiceEffect::ScaleOperatingCost(1.3),
            },
        ],
    },
    MarketEvent {
        kind: EventKind::GovernmentGrant,
        name: "Government Grant",
        description: "Green energy subsidy program announced.",
        probability: 0.015,
        choices: &[
            EventChoice {
                label: "Accept €5M grant",
                cost: 0.0,
                effect: ChoiceEffect::CashGrant(5.0),
            },
            EventChoice {
                label: "Skip (no conditions)",
                cost: 0.0,
                effect: ChoiceEffect::None,
            },
        ],
    },
];

impl EventKind {
    pub fn definition(self) -> &'static MarketEvent {
        match self {
            EventKind::PublicBacklash => &STANDARD_EVENTS[0],
            EventKind::SupplyChainCrisis => &STANDARD_EVENTS[1],
            EventKind::GovernmentGrant => &STANDARD_EVENTS[2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_event_offers_a_choice_pair() {
        for event in &STANDARD_EVENTS {
            assert!(event.choices.len() >= 2, "{} needs at least two choices", event.name);
            assert!(event.probability > 0.0 && event.probability < 1.0);
        }
    }

    #[test]
    fn test_every_event_has_a_free_choice() {
        // A player short on cash must always be able to close the event
        for event in &STANDARD_EVENTS {
            assert!(event.choices.iter().any(|c| c.cost == 0.0), "{}", event.name);
        }
    }

    #[test]
    fn test_definition_lookup() {
        for event in &STANDARD_EVENTS {
            assert_eq!(event.kind.definition().kind, event.kind);
        }
    }
}
