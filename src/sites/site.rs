//! Candidate site definition and survey disclosure

use serde::Serialize;

use crate::core::types::{DoubletId, Money, RevealedRange, SiteId};

/// Bounds applied to disclosed temperature ranges (°C)
const SURVEY_TEMP_BOUNDS: (f64, f64) = (60.0, 180.0);

/// Lowest drilling cost a survey will quote (M€)
const SURVEY_MIN_DRILLING_COST: f64 = 3.0;

/// Deepest survey level; discloses exact values
pub const MAX_INVESTIGATION_LEVEL: u8 = 3;

/// True subsurface attributes, hidden from the player until surveyed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiteGeology {
    /// Reservoir temperature (°C)
    pub temperature: f64,
    /// Thermal capacity; higher values cool more slowly
    pub thermal_capacity: f64,
    pub drilling_cost: Money,
    pub construction_cost: Money,
}

/// Development status of a site
///
/// A site is always in exactly one of these states. `Operating`,
/// `DrillingFailed` and `TakenByCompetitor` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SiteStatus {
    /// Open to survey, securing, and competitors
    Available,
    /// Protected from competitors; accrues holding cost each quarter
    Secured { holding_paid: Money },
    /// Drilled successfully; waiting for commissioning
    UnderConstruction {
        completion_year: u32,
        planned_flow_rate: f64,
    },
    /// Commissioned into a doublet
    Operating { doublet: DoubletId },
    /// Drilling failed; the site can never be developed
    DrillingFailed,
    /// Lost to a competitor
    TakenByCompetitor,
}

impl SiteStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SiteStatus::Available => "available",
            SiteStatus::Secured { .. } => "secured",
            SiteStatus::UnderConstruction { .. } => "under construction",
            SiteStatus::Operating { .. } => "operating",
            SiteStatus::DrillingFailed => "drilling failed",
            SiteStatus::TakenByCompetitor => "taken",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SiteStatus::Operating { .. } | SiteStatus::DrillingFailed | SiteStatus::TakenByCompetitor
        )
    }
}

/// A candidate location for a new doublet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Site {
    pub id: SiteId,
    pub name: String,
    #[serde(skip)]
    geology: SiteGeology,
    /// Deepest survey performed so far (0 = none)
    pub investigation_level: u8,
    pub revealed_temperature: Option<RevealedRange>,
    pub revealed_drilling_cost: Option<RevealedRange>,
    pub status: SiteStatus,
}

impl Site {
    pub fn new(id: SiteId, name: String, geology: SiteGeology) -> Self {
        Self {
            id,
            name,
            geology,
            investigation_level: 0,
            revealed_temperature: None,
            revealed_drilling_cost: None,
            status: SiteStatus::Available,
        }
    }

    pub(crate) fn geology(&self) -> &SiteGeology {
        &self.geology
    }

    /// Competitors can only take sites that are not yet secured
    pub fn is_open(&self) -> bool {
        self.status == SiteStatus::Available
    }

    pub fn is_secured(&self) -> bool {
        matches!(self.status, SiteStatus::Secured { .. })
    }

    pub fn is_under_construction(&self) -> bool {
        matches!(self.status, SiteStatus::UnderConstruction { .. })
    }

    pub fn is_taken(&self) -> bool {
        self.status == SiteStatus::TakenByCompetitor
    }

    /// Still part of the player's development pool (not developed, not taken)
    pub fn is_developable(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Disclose attribute ranges for a survey level
    ///
    /// - Temperature: ±(20 − 5·level) °C, clamped to 60..=180, exact at level 3
    /// - Drilling cost (level 2+): ±(3 − level) M€, never below 3, exact at level 3
    pub(crate) fn apply_survey(&mut self, level: u8) {
        let truth = self.geology;
        self.investigation_level = level;

        self.revealed_temperature = Some(if level >= MAX_INVESTIGATION_LEVEL {
            RevealedRange::exact(truth.temperature)
        } else {
            let variance = 20.0 - level as f64 * 5.0;
            RevealedRange::new(
                (truth.temperature - variance).max(SURVEY_TEMP_BOUNDS.0),
                (truth.temperature + variance).min(SURVEY_TEMP_BOUNDS.1),
            )
        });

        if level >= 2 {
            self.revealed_drilling_cost = Some(if level >= MAX_INVESTIGATION_LEVEL {
                RevealedRange::exact(truth.drilling_cost)
            } else {
                let variance = (MAX_INVESTIGATION_LEVEL - level) as f64;
                RevealedRange::new(
                    (truth.drilling_cost - variance).max(SURVEY_MIN_DRILLING_COST),
                    truth.drilling_cost + variance,
                )
            });
        }
    }
}
