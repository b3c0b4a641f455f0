//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Money in millions of euros
pub type Money = f64;

/// Unique identifier for candidate sites (index into the site list)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SiteId(pub u32);

impl SiteId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Unique identifier for doublets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DoubletId(pub u32);

impl DoubletId {
    /// The pre-existing asset the portfolio starts with
    pub const LEGACY: DoubletId = DoubletId(0);

    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Inclusive numeric range disclosed by a site survey
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevealedRange {
    pub min: f64,
    pub max: f64,
}

impl RevealedRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn exact(value: f64) -> Self {
        Self { min: value, max: value }
    }

    pub fn is_exact(&self) -> bool {
        self.min == self.max
    }
}
