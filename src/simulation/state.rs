//! GameState - the single versioned simulation record

use std::fmt;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::calendar::Calendar;
use crate::core::config::GameConfig;
use crate::core::error::{GameError, Result};
use crate::core::history::{BoundedSeries, YearPoint};
use crate::core::types::{DoubletId, Money, SiteId};
use crate::economy::MarketConditions;
use crate::events::PendingEvent;
use crate::portfolio::{Doublet, Portfolio};
use crate::simulation::log::GameLog;
use crate::sites::{generate_sites, Site};

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Cash fell below the bankruptcy threshold
    Bankruptcy,
    /// Nothing produces heat and no site is left to develop
    Exhaustion,
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOverReason::Bankruptcy => write!(f, "GAME OVER: Bankruptcy!"),
            GameOverReason::Exhaustion => write!(f, "GAME OVER: All resources exhausted!"),
        }
    }
}

/// Complete state of one run
///
/// Every stochastic decision draws from `rng`, so a seed plus a sequence of
/// operations fully determines the trajectory. Callers read through the
/// accessors and mutate only through the operations in
/// [`crate::simulation::actions`] and [`GameState::advance_quarter`].
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) seed: u64,
    pub(crate) calendar: Calendar,
    pub(crate) cash: Money,
    /// Cumulative heat delivered (GWh)
    pub(crate) total_heat_delivered: f64,
    pub(crate) sites: Vec<Site>,
    pub(crate) portfolio: Portfolio,
    pub(crate) cash_history: BoundedSeries<YearPoint>,
    pub(crate) heat_history: BoundedSeries<YearPoint>,
    /// Net cash so far this year, holding costs included
    pub(crate) year_net_cash: Money,
    pub(crate) year_heat: f64,
    pub(crate) log: GameLog,
    pub(crate) pending_event: Option<PendingEvent>,
    pub(crate) revenue_multiplier: f64,
    pub(crate) operating_cost_multiplier: f64,
    pub(crate) game_over: Option<GameOverReason>,
    pub(crate) version: u64,
    pub(crate) rng: ChaCha8Rng,
}

impl GameState {
    /// Start a new run
    pub fn initialize(seed: u64, config: GameConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let sites = generate_sites(&config, &mut rng);
        let portfolio = Portfolio::starting(&config);

        let (cash_history, heat_history) = if config.legacy.enabled {
            (
                BoundedSeries::from_values(config.history_length, crate::portfolio::legacy_cash_history()),
                BoundedSeries::from_values(config.history_length, crate::portfolio::legacy_heat_history()),
            )
        } else {
            (
                BoundedSeries::new(config.history_length),
                BoundedSeries::new(config.history_length),
            )
        };

        let calendar = Calendar::new(config.start_year);
        let mut log = GameLog::new(config.log_length);
        log.push(calendar, "Game started.");

        tracing::info!(seed, sites = sites.len(), cash = config.starting_cash, "New game initialized");

        Ok(Self {
            seed,
            calendar,
            cash: config.starting_cash,
            total_heat_delivered: 0.0,
            sites,
            portfolio,
            cash_history,
            heat_history,
            year_net_cash: 0.0,
            year_heat: 0.0,
            log,
            pending_event: None,
            revenue_multiplier: 1.0,
            operating_cost_multiplier: 1.0,
            game_over: None,
            version: 0,
            rng,
            config,
        })
    }

    /// Start over with the same seed and configuration
    pub fn reset(&mut self) -> Result<()> {
        *self = Self::initialize(self.seed, self.config.clone())?;
        Ok(())
    }

    // === READ-ONLY ACCESS ===

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn calendar(&self) -> Calendar {
        self.calendar
    }

    pub fn year(&self) -> u32 {
        self.calendar.year()
    }

    /// Zero-based quarter index (0..=3)
    pub fn quarter(&self) -> u8 {
        self.calendar.quarter()
    }

    pub fn cash(&self) -> Money {
        self.cash
    }

    pub fn total_heat_delivered(&self) -> f64 {
        self.total_heat_delivered
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn site(&self, id: SiteId) -> Result<&Site> {
        self.sites.get(id.index()).ok_or(GameError::SiteNotFound(id))
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn doublets(&self) -> &[Doublet] {
        self.portfolio.doublets()
    }

    pub fn doublet(&self, id: DoubletId) -> Result<&Doublet> {
        self.portfolio.get(id).ok_or(GameError::DoubletNotFound(id))
    }

    pub fn cash_history(&self) -> &BoundedSeries<YearPoint> {
        &self.cash_history
    }

    pub fn heat_history(&self) -> &BoundedSeries<YearPoint> {
        &self.heat_history
    }

    pub fn log(&self) -> &GameLog {
        &self.log
    }

    pub fn pending_event(&self) -> Option<&PendingEvent> {
        self.pending_event.as_ref()
    }

    pub fn revenue_multiplier(&self) -> f64 {
        self.revenue_multiplier
    }

    pub fn operating_cost_multiplier(&self) -> f64 {
        self.operating_cost_multiplier
    }

    pub fn game_over(&self) -> Option<GameOverReason> {
        self.game_over
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over.is_some()
    }

    /// True while a tick cannot run (event awaiting a decision, or game over)
    pub fn is_blocked(&self) -> bool {
        self.pending_event.is_some() || self.game_over.is_some()
    }

    /// Increments on every accepted mutation
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn sites_under_construction(&self) -> usize {
        self.sites.iter().filter(|s| s.is_under_construction()).count()
    }

    /// Active doublets plus sites under construction
    pub fn capacity_in_use(&self) -> usize {
        self.portfolio.active_count() + self.sites_under_construction()
    }

    /// Market conditions for the current quarter
    pub fn market(&self) -> MarketConditions {
        MarketConditions {
            quarter: self.calendar.quarter(),
            revenue_multiplier: self.revenue_multiplier,
            operating_cost_multiplier: self.operating_cost_multiplier,
        }
    }

    // === INTERNAL HELPERS ===

    pub(crate) fn site_mut(&mut self, id: SiteId) -> Result<&mut Site> {
        self.sites.get_mut(id.index()).ok_or(GameError::SiteNotFound(id))
    }

    /// Append a stamped line to the game log
    pub(crate) fn record(&mut self, message: impl AsRef<str>) -> String {
        self.log.push(self.calendar, message)
    }

    /// Log a line stamped with an earlier quarter
    pub(crate) fn record_at(&mut self, calendar: Calendar, message: impl AsRef<str>) -> String {
        self.log.push(calendar, message)
    }

    pub(crate) fn ensure_funds(&self, required: Money) -> Result<()> {
        if self.cash < required {
            return Err(GameError::InsufficientFunds {
                required,
                available: self.cash,
            });
        }
        Ok(())
    }
}
