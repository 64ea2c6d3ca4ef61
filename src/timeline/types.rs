//! Timeline type definitions

use serde::{Deserialize, Serialize};

/// Snapshot of the running sum at one index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartialSumState {
    /// Current index n (>= 1)
    pub index: u64,

    /// term(n)
    pub term_value: f64,

    /// Sum of term(1)..=term(n)
    pub cumulative_sum: f64,
}

impl PartialSumState {
    /// State at n = 1
    pub fn first(term_value: f64) -> Self {
        Self {
            index: 1,
            term_value,
            cumulative_sum: term_value,
        }
    }

    /// Next state given term(n + 1)
    pub fn next(&self, term_value: f64) -> Self {
        Self {
            index: self.index + 1,
            term_value,
            cumulative_sum: self.cumulative_sum + term_value,
        }
    }
}

/// A position in plot or canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Immutable snapshot handed to a renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub state: PartialSumState,
    pub position: Point,
}

/// Maps (index, cumulative_sum) to a position.
///
/// Implemented for any `Fn(u64, f64) -> Point`, so plain closures work.
pub trait PositionMapper {
    fn map(&self, index: u64, cumulative_sum: f64) -> Point;
}

impl<F> PositionMapper for F
where
    F: Fn(u64, f64) -> Point,
{
    fn map(&self, index: u64, cumulative_sum: f64) -> Point {
        self(index, cumulative_sum)
    }
}

/// Identity mapping: x = n, y = cumulative_sum
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityMapper;

impl PositionMapper for IdentityMapper {
    fn map(&self, index: u64, cumulative_sum: f64) -> Point {
        Point::new(index as f64, cumulative_sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_progression() {
        let first = PartialSumState::first(1.0);
        assert_eq!(first.index, 1);
        assert_eq!(first.cumulative_sum, 1.0);

        let second = first.next(0.25);
        assert_eq!(second.index, 2);
        assert_eq!(second.term_value, 0.25);
        assert_eq!(second.cumulative_sum, 1.25);
    }

    #[test]
    fn test_closure_mapper() {
        let mapper = |n: u64, s: f64| Point::new(n as f64 * 2.0, s + 1.0);
        assert_eq!(mapper.map(3, 0.5), Point::new(6.0, 1.5));
    }

    #[test]
    fn test_identity_mapper() {
        assert_eq!(IdentityMapper.map(4, 1.25), Point::new(4.0, 1.25));
    }
}
