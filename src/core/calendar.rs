//! Quarterly game calendar
//!
//! One tick advances the calendar by one fiscal quarter. Quarter 0 (Q1) is
//! winter, which drives the seasonal heat-price table.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const QUARTERS_PER_YEAR: u8 = 4;

/// Season associated with a fiscal quarter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Winter, // Q1
    Spring, // Q2
    Summer, // Q3
    Autumn, // Q4
}

impl Season {
    pub fn from_quarter(quarter: u8) -> Self {
        match quarter % QUARTERS_PER_YEAR {
            0 => Season::Winter,
            1 => Season::Spring,
            2 => Season::Summer,
            _ => Season::Autumn,
        }
    }
}

/// Calendar tracks simulation time as (year, quarter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    year: u32,
    quarter: u8,
}

impl Calendar {
    pub fn new(year: u32) -> Self {
        Self { year, quarter: 0 }
    }

    /// Advance by one quarter. Returns true when the year rolled over.
    pub fn advance(&mut self) -> bool {
        if self.quarter + 1 >= QUARTERS_PER_YEAR {
            self.quarter = 0;
            self.year += 1;
            true
        } else {
            self.quarter += 1;
            false
        }
    }

    pub fn year(&self) -> u32 {
        self.year
    }

    /// Zero-based quarter index (0..=3)
    pub fn quarter(&self) -> u8 {
        self.quarter
    }

    pub fn is_last_quarter(&self) -> bool {
        self.quarter == QUARTERS_PER_YEAR - 1
    }

    pub fn season(&self) -> Season {
        Season::from_quarter(self.quarter)
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Q{}", self.year, self.quarter + 1)
    }
}
