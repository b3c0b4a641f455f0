//! Doublet portfolio
//!
//! Owns every doublet ever built. Doublets are never removed; abandoning
//! one only flags it, so ids stay stable for the whole run.

mod doublet;

pub use doublet::{Doublet, DoubletOrigin};

use rand::Rng;
use serde::Serialize;

use crate::core::config::GameConfig;
use crate::core::error::{GameError, Result};
use crate::core::history::{BoundedSeries, YearPoint};
use crate::core::types::{DoubletId, Money};
use crate::economy::{MarketConditions, ReservoirState};
use crate::sites::Site;

/// Legacy asset record for 2020-2024 (year, temperature °C)
const LEGACY_TEMPERATURES: [(u32, f64); 5] = [
    (2020, 120.0),
    (2021, 116.0),
    (2022, 112.0),
    (2023, 108.0),
    (2024, 105.0),
];

/// Legacy asset record (year, net cash M€)
const LEGACY_CASH: [(u32, f64); 5] = [(2020, 2.1), (2021, 1.9), (2022, 1.7), (2023, 1.5), (2024, 1.3)];

/// Legacy asset record (year, heat GWh)
const LEGACY_HEAT: [(u32, f64); 5] = [
    (2020, 160.0),
    (2021, 152.0),
    (2022, 144.0),
    (2023, 136.0),
    (2024, 128.0),
];

pub fn legacy_cash_history() -> impl Iterator<Item = YearPoint> {
    LEGACY_CASH.into_iter().map(|(year, value)| YearPoint::new(year, value))
}

pub fn legacy_heat_history() -> impl Iterator<Item = YearPoint> {
    LEGACY_HEAT.into_iter().map(|(year, value)| YearPoint::new(year, value))
}

fn legacy_temp_history() -> impl Iterator<Item = YearPoint> {
    LEGACY_TEMPERATURES
        .into_iter()
        .map(|(year, value)| YearPoint::new(year, value))
}

/// Aggregate result of one quarter across all active doublets
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PortfolioQuarter {
    pub revenue: Money,
    pub operating_cost: Money,
    pub net_cash: Money,
    pub heat_gwh: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Portfolio {
    doublets: Vec<Doublet>,
    next_id: u32,
}

impl Portfolio {
    pub fn new() -> Self {
        Self {
            doublets: Vec::new(),
            next_id: 1,
        }
    }

    /// Portfolio at game start: the legacy doublet, if enabled
    pub fn starting(config: &GameConfig) -> Self {
        let mut portfolio = Self::new();
        if config.legacy.enabled {
            portfolio.doublets.push(legacy_doublet(config));
        }
        portfolio
    }

    pub fn doublets(&self) -> &[Doublet] {
        &self.doublets
    }

    pub fn get(&self, id: DoubletId) -> Option<&Doublet> {
        self.doublets.iter().find(|d| d.id == id)
    }

    pub fn active(&self) -> impl Iterator<Item = &Doublet> {
        self.doublets.iter().filter(|d| d.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// True if any non-abandoned doublet still delivers heat
    pub fn has_producing(&self, config: &GameConfig) -> bool {
        self.active().any(|d| d.heat_output_mw(config) > 0.0)
    }

    /// Instantiate a doublet for a site whose construction just finished
    pub(crate) fn commission(&mut self, site: &Site, flow_rate: f64, year: u32, history_length: usize) -> DoubletId {
        let id = DoubletId(self.next_id);
        self.next_id += 1;

        let geology = site.geology();
        let reservoir = ReservoirState {
            temperature: geology.temperature,
            flow_rate,
            thermal_capacity: geology.thermal_capacity,
        };
        self.doublets.push(Doublet::new(
            id,
            DoubletOrigin::Site(site.id),
            site.name.clone(),
            reservoir,
            year,
            history_length,
        ));
        id
    }

    /// Permanently take a doublet out of service
    pub(crate) fn abandon(&mut self, id: DoubletId) -> Result<&Doublet> {
        let doublet = self
            .doublets
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(GameError::DoubletNotFound(id))?;
        if doublet.abandoned {
            return Err(GameError::InvalidState(format!("{} is already abandoned", doublet.name)));
        }
        doublet.abandoned = true;
        Ok(doublet)
    }

    /// Operate every active doublet for one quarter, in id order
    pub(crate) fn operate_quarter<R: Rng + ?Sized>(
        &mut self,
        config: &GameConfig,
        market: &MarketConditions,
        rng: &mut R,
    ) -> PortfolioQuarter {
        let mut total = PortfolioQuarter::default();
        for doublet in self.doublets.iter_mut().filter(|d| d.is_active()) {
            let output = doublet.operate(config, market, rng);
            total.revenue += output.revenue;
            total.operating_cost += output.operating_cost;
            total.net_cash += output.net_cash;
            total.heat_gwh += output.heat_gwh;
        }
        total
    }

    /// Archive per-doublet series for every active doublet
    pub(crate) fn archive_year(&mut self, year: u32) {
        for doublet in self.doublets.iter_mut().filter(|d| d.is_active()) {
            doublet.archive_year(year);
        }
    }
}

impl Default for Portfolio {
    fn default() -> Self {
        Self::new()
    }
}

fn legacy_doublet(config: &GameConfig) -> Doublet {
    let legacy = &config.legacy;
    let mut doublet = Doublet::new(
        DoubletId::LEGACY,
        DoubletOrigin::Legacy,
        "Legacy".to_string(),
        ReservoirState {
            temperature: legacy.current_temp,
            flow_rate: legacy.flow_rate,
            thermal_capacity: legacy.thermal_capacity,
        },
        legacy.year_built,
        config.history_length,
    );
    doublet.initial_temp = legacy.initial_temp;
    doublet.temp_history = BoundedSeries::from_values(config.history_length, legacy_temp_history());
    doublet.cash_history = BoundedSeries::from_values(config.history_length, legacy_cash_history());
    doublet.heat_history = BoundedSeries::from_values(config.history_length, legacy_heat_history());
    doublet
}
