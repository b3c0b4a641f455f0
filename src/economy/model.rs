//! Per-doublet, per-quarter economics
//!
//! Pure formulas: a doublet's physical state plus the market conditions
//! of the current quarter go in, heat and money come out. The only
//! stochastic input is the temperature-decline draw, which callers pass
//! in explicitly (see [`draw_decline`]).

use rand::Rng;

use crate::core::config::GameConfig;
use crate::core::types::Money;

/// Physical state needed to evaluate one doublet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReservoirState {
    pub temperature: f64,
    pub flow_rate: f64,
    pub thermal_capacity: f64,
}

/// Global multipliers in force for the quarter being evaluated
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketConditions {
    pub quarter: u8,
    pub revenue_multiplier: f64,
    pub operating_cost_multiplier: f64,
}

/// Outcome of operating one doublet for one quarter
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QuarterlyOutput {
    /// Thermal power (MW)
    pub heat_mw: f64,
    /// Energy delivered this quarter (GWh)
    pub heat_gwh: f64,
    pub revenue: Money,
    pub operating_cost: Money,
    pub net_cash: Money,
}

/// Temperature lift above the reference (°C)
pub fn delta_t(config: &GameConfig, temperature: f64) -> f64 {
    temperature - config.reference_temp
}

/// Thermal power output in MW
///
/// Formula: flow × cp × ΔT / 1000, or zero when ΔT ≤ `min_delta_t`
/// - 50 kg/s at 105 °C (ΔT 80) = 16.72 MW
/// - 50 kg/s at 30 °C (ΔT 5) = 0 MW
pub fn heat_output_mw(config: &GameConfig, reservoir: &ReservoirState) -> f64 {
    let dt = delta_t(config, reservoir.temperature);
    if dt <= config.min_delta_t {
        return 0.0;
    }
    reservoir.flow_rate * config.heat_capacity * dt / 1000.0
}

/// Linear proxy for the work fraction of the delivered heat
///
/// Formula: clamp(ΔT / exergy_reference, 0, 1)
pub fn exergy_factor(config: &GameConfig, temperature: f64) -> f64 {
    (delta_t(config, temperature) / config.exergy_reference).clamp(0.0, 1.0)
}

/// Heat price in €/MWh
///
/// Cooler doublets pay twice: less heat, and a lower price per unit.
pub fn heat_price(config: &GameConfig, temperature: f64, market: &MarketConditions) -> f64 {
    config.base_price
        * exergy_factor(config, temperature)
        * market.revenue_multiplier
        * config.seasonal_multiplier(market.quarter)
}

/// Quarterly revenue in M€
pub fn quarterly_revenue(
    config: &GameConfig,
    reservoir: &ReservoirState,
    market: &MarketConditions,
) -> Money {
    let heat_mw = heat_output_mw(config, reservoir);
    let price = heat_price(config, reservoir.temperature, market);
    heat_mw * quarter_hours(config) * price / 1_000_000.0
}

/// Quarterly operating cost in M€
///
/// Formula: (base + flow × unit_flow_cost) × multiplier / 4
pub fn quarterly_operating_cost(
    config: &GameConfig,
    flow_rate: f64,
    market: &MarketConditions,
) -> Money {
    (config.base_operating_cost + flow_rate * config.unit_flow_cost)
        * market.operating_cost_multiplier
        / 4.0
}

/// Energy delivered in one quarter (GWh)
pub fn quarterly_heat_gwh(config: &GameConfig, reservoir: &ReservoirState) -> f64 {
    heat_output_mw(config, reservoir) * quarter_hours(config) / 1000.0
}

/// Evaluate one quarter of operation at the doublet's current temperature
pub fn evaluate_quarter(
    config: &GameConfig,
    reservoir: &ReservoirState,
    market: &MarketConditions,
) -> QuarterlyOutput {
    let heat_mw = heat_output_mw(config, reservoir);
    let revenue = quarterly_revenue(config, reservoir, market);
    let operating_cost = quarterly_operating_cost(config, reservoir.flow_rate, market);
    QuarterlyOutput {
        heat_mw,
        heat_gwh: quarterly_heat_gwh(config, reservoir),
        revenue,
        operating_cost,
        net_cash: revenue - operating_cost,
    }
}

/// Draw the annual decline coefficient for one quarter
pub fn draw_decline<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> f64 {
    let [min, max] = config.decline_range;
    rng.gen_range(min..max)
}

/// Reservoir temperature after one quarter of extraction
///
/// Formula: max(floor, T − draw × (flow / reference_flow) / capacity / 4)
///
/// Higher flow cools the reservoir faster: more heat now, shorter life.
/// The result never increases and never drops below the floor.
pub fn next_temperature(config: &GameConfig, reservoir: &ReservoirState, decline_draw: f64) -> f64 {
    let extraction_intensity = reservoir.flow_rate / config.reference_flow;
    let decline = decline_draw * extraction_intensity / reservoir.thermal_capacity / 4.0;
    let cooled = reservoir.temperature - decline.max(0.0);
    cooled.max(config.temperature_floor()).min(reservoir.temperature)
}

fn quarter_hours(config: &GameConfig) -> f64 {
    config.hours_per_year / 4.0
}
