//! Real-time driver for quarterly ticks
//!
//! The host feeds elapsed wall time into [`Scheduler::poll`], which runs as
//! many ticks as the current speed allows. A pending event or game over
//! pauses the scheduler until the player acts.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};
use crate::simulation::state::GameState;
use crate::simulation::tick::TickReport;

/// One quarter at normal speed
pub const BASE_TICK_INTERVAL: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Speed {
    #[default]
    Paused,
    Normal,
    Fast,
    Fastest,
}

impl Speed {
    pub fn multiplier(self) -> u32 {
        match self {
            Speed::Paused => 0,
            Speed::Normal => 1,
            Speed::Fast => 2,
            Speed::Fastest => 5,
        }
    }

    /// Wall time per tick, `None` when paused
    pub fn interval(self) -> Option<Duration> {
        match self.multiplier() {
            0 => None,
            m => Some(BASE_TICK_INTERVAL / m),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    speed: Speed,
    elapsed: Duration,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Change speed; unpausing is refused while the game is blocked
    pub fn set_speed(&mut self, speed: Speed, state: &GameState) -> Result<()> {
        if speed != Speed::Paused && state.is_blocked() {
            return Err(if state.is_game_over() {
                GameError::GameOver
            } else {
                GameError::EventPending
            });
        }
        if speed != self.speed {
            tracing::debug!(from = ?self.speed, to = ?speed, "Speed changed");
        }
        self.speed = speed;
        self.elapsed = Duration::ZERO;
        Ok(())
    }

    /// Account for `delta` of wall time and run every tick that came due
    pub fn poll(&mut self, delta: Duration, state: &mut GameState) -> Vec<TickReport> {
        let mut reports = Vec::new();
        let Some(interval) = self.speed.interval() else {
            return reports;
        };

        self.elapsed += delta;
        while self.elapsed >= interval {
            self.elapsed -= interval;
            match state.advance_quarter() {
                Ok(report) => {
                    let stop = report.event.is_some() || report.game_over.is_some();
                    reports.push(report);
                    if stop {
                        self.pause();
                        break;
                    }
                }
                Err(e) => {
                    tracing::debug!(reason = e.kind(), "Scheduler paused");
                    self.pause();
                    break;
                }
            }
        }
        reports
    }

    fn pause(&mut self) {
        self.speed = Speed::Paused;
        self.elapsed = Duration::ZERO;
    }
}
