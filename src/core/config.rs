//! Game configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other. Every field has a default, so a
//! TOML file only needs to name the values it overrides.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};
use crate::core::types::Money;

/// Configuration for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === START CONDITIONS ===
    /// Calendar year of the first quarter
    pub start_year: u32,

    /// Opening cash balance (M€)
    pub starting_cash: Money,

    /// Number of candidate sites generated at start
    pub site_count: usize,

    // === THERMODYNAMICS ===
    /// Ambient/reinjection temperature (°C)
    ///
    /// Doublets never cool below `reference_temp + min_delta_t`.
    pub reference_temp: f64,

    /// Specific heat of the working fluid (kJ/kg·K)
    pub heat_capacity: f64,

    /// Temperature lift below which a doublet delivers no heat (°C)
    pub min_delta_t: f64,

    /// Temperature lift at which the exergy factor saturates at 1.0 (°C)
    pub exergy_reference: f64,

    /// Flow rate that produces the nominal decline rate (kg/s)
    pub reference_flow: f64,

    /// Annual temperature decline at reference flow and unit capacity,
    /// drawn uniformly from `[min, max)` each quarter (°C/year)
    pub decline_range: [f64; 2],

    // === MARKET ===
    /// Full-exergy heat price (€/MWh)
    pub base_price: f64,

    /// Load hours per year
    pub hours_per_year: f64,

    /// Price multiplier per quarter, Q1 (winter) first
    pub seasonal_multipliers: [f64; 4],

    /// Fixed operating cost per doublet (M€/year)
    pub base_operating_cost: Money,

    /// Pumping cost per kg/s of flow (M€/year)
    pub unit_flow_cost: Money,

    // === SITE DEVELOPMENT ===
    /// Survey cost for levels 1, 2 and 3 (M€)
    pub investigation_costs: [Money; 3],

    /// One-off cost to secure a site against competitors (M€)
    pub secure_cost: Money,

    /// Annual holding cost of a secured but undeveloped site (M€/year)
    ///
    /// Charged as a quarter of this value every tick.
    pub holding_cost_per_year: Money,

    /// Probability that a drilling attempt fails outright
    pub drilling_failure_rate: f64,

    /// Years between drilling and commissioning
    pub construction_delay: u32,

    /// Maximum active doublets plus sites under construction
    pub max_doublets: usize,

    /// Allowed planned flow rate (kg/s)
    pub flow_rate_range: [f64; 2],

    // === RISK ===
    /// Annual chance a competitor takes an unsecured site
    ///
    /// Drawn per quarter as a quarter of this value.
    pub competitor_take_chance: f64,

    /// Scales every event trigger probability (0 disables events)
    pub event_probability_scale: f64,

    /// Cash level below which the game ends in bankruptcy (M€)
    pub bankruptcy_threshold: Money,

    // === BOOKKEEPING ===
    /// Number of annual points retained per series
    pub history_length: usize,

    /// Number of lines retained in the game log
    pub log_length: usize,

    pub sites: SiteGenerationConfig,

    pub legacy: LegacyDoubletConfig,
}

/// Ranges for the hidden attributes of generated sites
///
/// Temperatures and costs are drawn uniformly from `[min, max)` and
/// rounded down to whole numbers; capacity is kept fractional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteGenerationConfig {
    pub temperature: [f64; 2],
    pub thermal_capacity: [f64; 2],
    pub drilling_cost: [f64; 2],
    pub construction_cost: [f64; 2],
}

/// The operating asset the portfolio starts with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyDoubletConfig {
    pub enabled: bool,
    pub initial_temp: f64,
    pub current_temp: f64,
    pub flow_rate: f64,
    pub thermal_capacity: f64,
    pub year_built: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            start_year: 2025,
            starting_cash: 15.0,
            site_count: 10,

            reference_temp: 25.0,
            heat_capacity: 4.18,
            min_delta_t: 5.0,
            exergy_reference: 100.0,
            reference_flow: 50.0,
            decline_range: [3.0, 5.0],

            base_price: 80.0,
            hours_per_year: 8000.0,
            seasonal_multipliers: [1.3, 0.7, 0.6, 1.2],
            base_operating_cost: 0.3,
            unit_flow_cost: 0.005,

            investigation_costs: [0.5, 1.5, 4.0],
            secure_cost: 2.0,
            holding_cost_per_year: 0.3,
            drilling_failure_rate: 0.05,
            construction_delay: 2,
            max_doublets: 10,
            flow_rate_range: [20.0, 100.0],

            competitor_take_chance: 0.12,
            event_probability_scale: 1.0,
            bankruptcy_threshold: -10.0,

            history_length: 15,
            log_length: 10,

            sites: SiteGenerationConfig::default(),
            legacy: LegacyDoubletConfig::default(),
        }
    }
}

impl Default for SiteGenerationConfig {
    fn default() -> Self {
        Self {
            temperature: [80.0, 160.0],
            thermal_capacity: [0.5, 2.0],
            drilling_cost: [5.0, 13.0],
            construction_cost: [3.0, 8.0],
        }
    }
}

impl Default for LegacyDoubletConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            initial_temp: 120.0,
            current_temp: 105.0,
            flow_rate: 50.0,
            thermal_capacity: 1.0,
            year_built: 2020,
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Survey cost for a level in 1..=3
    pub fn investigation_cost(&self, level: u8) -> Option<Money> {
        match level {
            1..=3 => Some(self.investigation_costs[level as usize - 1]),
            _ => None,
        }
    }

    /// Seasonal price multiplier for a zero-based quarter
    pub fn seasonal_multiplier(&self, quarter: u8) -> f64 {
        self.seasonal_multipliers[(quarter % 4) as usize]
    }

    /// Lowest temperature an operating doublet can reach
    pub fn temperature_floor(&self) -> f64 {
        self.reference_temp + self.min_delta_t
    }

    /// Per-quarter competitor takeover probability
    pub fn quarterly_competitor_chance(&self) -> f64 {
        self.competitor_take_chance / 4.0
    }

    /// Per-quarter holding cost of one secured site
    pub fn quarterly_holding_cost(&self) -> Money {
        self.holding_cost_per_year / 4.0
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let probabilities = [
            ("drilling_failure_rate", self.drilling_failure_rate),
            ("competitor_take_chance", self.competitor_take_chance),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(format!("{name} ({p}) must be within 0..=1")));
            }
        }

        if self.event_probability_scale < 0.0 {
            return Err(invalid("event_probability_scale must be non-negative"));
        }

        let costs = [
            self.secure_cost,
            self.holding_cost_per_year,
            self.base_operating_cost,
            self.unit_flow_cost,
        ];
        if costs.iter().chain(self.investigation_costs.iter()).any(|c| *c < 0.0) {
            return Err(invalid("costs must be non-negative"));
        }

        let ranges = [
            ("decline_range", self.decline_range),
            ("flow_rate_range", self.flow_rate_range),
            ("sites.temperature", self.sites.temperature),
            ("sites.thermal_capacity", self.sites.thermal_capacity),
            ("sites.drilling_cost", self.sites.drilling_cost),
            ("sites.construction_cost", self.sites.construction_cost),
        ];
        for (name, [min, max]) in ranges {
            if min >= max {
                return Err(invalid(format!("{name} is empty ({min} >= {max})")));
            }
        }

        if self.sites.thermal_capacity[0] <= 0.0 || self.legacy.thermal_capacity <= 0.0 {
            return Err(invalid("thermal capacity must be positive"));
        }

        if self.reference_flow <= 0.0 || self.exergy_reference <= 0.0 {
            return Err(invalid("reference_flow and exergy_reference must be positive"));
        }

        let physical = [
            ("heat_capacity", self.heat_capacity),
            ("base_price", self.base_price),
            ("hours_per_year", self.hours_per_year),
            ("min_delta_t", self.min_delta_t),
        ];
        for (name, value) in physical {
            if value < 0.0 {
                return Err(invalid(format!("{name} ({value}) must be non-negative")));
            }
        }
        if self.seasonal_multipliers.iter().any(|m| *m < 0.0) {
            return Err(invalid("seasonal_multipliers must be non-negative"));
        }

        // Any drilled site must start at or above the floor
        if self.sites.temperature[0] < self.temperature_floor() {
            return Err(invalid(format!(
                "sites.temperature starts at {} below the temperature floor ({})",
                self.sites.temperature[0],
                self.temperature_floor()
            )));
        }

        if self.max_doublets < usize::from(self.legacy.enabled) {
            return Err(invalid("max_doublets must leave room for the legacy doublet"));
        }

        if self.site_count == 0 {
            return Err(invalid("site_count must be at least 1"));
        }

        if self.history_length == 0 || self.log_length == 0 {
            return Err(invalid("history_length and log_length must be at least 1"));
        }

        if self.legacy.enabled && self.legacy.current_temp < self.temperature_floor() {
            return Err(invalid(format!(
                "legacy.current_temp ({}) is below the temperature floor ({})",
                self.legacy.current_temp,
                self.temperature_floor()
            )));
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> GameError {
    GameError::Config(message.into())
}
