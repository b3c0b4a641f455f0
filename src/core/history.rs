//! Fixed-capacity series used for yearly charts and the game log

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// One archived annual value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearPoint {
    pub year: u32,
    pub value: f64,
}

impl YearPoint {
    pub fn new(year: u32, value: f64) -> Self {
        Self { year, value }
    }
}

/// Ring buffer that keeps only the most recent `capacity` entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundedSeries<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedSeries<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Build from existing values, keeping only the tail that fits
    pub fn from_values(capacity: usize, values: impl IntoIterator<Item = T>) -> Self {
        let mut series = Self::new(capacity);
        series.extend(values);
        series
    }

    /// Append a value, evicting the oldest when full
    pub fn push(&mut self, value: T) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(value);
    }

    pub fn extend(&mut self, values: impl IntoIterator<Item = T>) {
        for value in values {
            self.push(value);
        }
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&T> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T: Clone> BoundedSeries<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.entries.iter().cloned().collect()
    }
}

impl<'a, T> IntoIterator for &'a BoundedSeries<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_evicts_oldest() {
        let mut series = BoundedSeries::new(3);
        for i in 0..5 {
            series.push(i);
        }
        assert_eq!(series.to_vec(), vec![2, 3, 4]);
        assert_eq!(series.latest(), Some(&4));
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn test_from_values_keeps_tail() {
        let series = BoundedSeries::from_values(15, 0..20);
        assert_eq!(series.len(), 15);
        assert_eq!(series.iter().next(), Some(&5));
    }

    #[test]
    fn test_zero_capacity_stays_empty() {
        let mut series = BoundedSeries::new(0);
        series.push(1);
        assert!(series.is_empty());
    }

    #[test]
    fn test_year_point_values() {
        let series = BoundedSeries::from_values(
            15,
            [YearPoint::new(2020, 2.1), YearPoint::new(2021, 1.9)],
        );
        let values: Vec<f64> = series.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![2.1, 1.9]);
    }
}
