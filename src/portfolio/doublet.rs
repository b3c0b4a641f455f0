//! Doublet - an operating injection/production well pair

use rand::Rng;
use serde::Serialize;

use crate::core::config::GameConfig;
use crate::core::history::{BoundedSeries, YearPoint};
use crate::core::types::{DoubletId, Money, SiteId};
use crate::economy::model::{self, MarketConditions, QuarterlyOutput, ReservoirState};

/// Where a doublet came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DoubletOrigin {
    /// Pre-existing asset the portfolio starts with
    Legacy,
    Site(SiteId),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Doublet {
    pub id: DoubletId,
    pub origin: DoubletOrigin,
    pub name: String,
    pub initial_temp: f64,
    pub current_temp: f64,
    /// Working-fluid flow (kg/s)
    pub flow_rate: f64,
    pub thermal_capacity: f64,
    pub year_built: u32,
    pub abandoned: bool,
    pub temp_history: BoundedSeries<YearPoint>,
    /// Annual net cash (M€)
    pub cash_history: BoundedSeries<YearPoint>,
    /// Annual heat delivered (GWh)
    pub heat_history: BoundedSeries<YearPoint>,
    pub year_cash: Money,
    pub year_heat: f64,
}

impl Doublet {
    pub fn new(
        id: DoubletId,
        origin: DoubletOrigin,
        name: String,
        reservoir: ReservoirState,
        year_built: u32,
        history_length: usize,
    ) -> Self {
        let mut temp_history = BoundedSeries::new(history_length);
        temp_history.push(YearPoint::new(year_built, reservoir.temperature));

        Self {
            id,
            origin,
            name,
            initial_temp: reservoir.temperature,
            current_temp: reservoir.temperature,
            flow_rate: reservoir.flow_rate,
            thermal_capacity: reservoir.thermal_capacity,
            year_built,
            abandoned: false,
            temp_history,
            cash_history: BoundedSeries::new(history_length),
            heat_history: BoundedSeries::new(history_length),
            year_cash: 0.0,
            year_heat: 0.0,
        }
    }

    pub fn reservoir(&self) -> ReservoirState {
        ReservoirState {
            temperature: self.current_temp,
            flow_rate: self.flow_rate,
            thermal_capacity: self.thermal_capacity,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.abandoned
    }

    /// Current thermal output (MW); zero once abandoned
    pub fn heat_output_mw(&self, config: &GameConfig) -> f64 {
        if self.abandoned {
            return 0.0;
        }
        model::heat_output_mw(config, &self.reservoir())
    }

    /// Run one quarter: earn at the current temperature, then cool down
    ///
    /// Abandoned doublets return zeros and do not draw from the RNG.
    pub(crate) fn operate<R: Rng + ?Sized>(
        &mut self,
        config: &GameConfig,
        market: &MarketConditions,
        rng: &mut R,
    ) -> QuarterlyOutput {
        if self.abandoned {
            return QuarterlyOutput::default();
        }

        let reservoir = self.reservoir();
        let output = model::evaluate_quarter(config, &reservoir, market);
        let draw = model::draw_decline(config, rng);
        self.current_temp = model::next_temperature(config, &reservoir, draw);

        self.year_cash += output.net_cash;
        self.year_heat += output.heat_gwh;
        output
    }

    /// Close the books on a year and start fresh accumulators
    pub(crate) fn archive_year(&mut self, year: u32) {
        self.temp_history.push(YearPoint::new(year, self.current_temp));
        self.cash_history.push(YearPoint::new(year, self.year_cash));
        self.heat_history.push(YearPoint::new(year, self.year_heat));
        self.year_cash = 0.0;
        self.year_heat = 0.0;
    }
}
