//! Economic model: converting reservoir state into heat and cash

pub mod model;

pub use model::{
    evaluate_quarter, exergy_factor, heat_output_mw, heat_price, next_temperature,
    quarterly_heat_gwh, quarterly_operating_cost, quarterly_revenue, MarketConditions,
    QuarterlyOutput, ReservoirState,
};
