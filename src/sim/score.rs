//! Run score with a temporary multiplier

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreKeeper {
    /// Never decreases during a run
    pub points: u64,
    /// Always >= 1
    pub multiplier: u32,
}

impl Default for ScoreKeeper {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreKeeper {
    pub fn new() -> Self {
        Self {
            points: 0,
            multiplier: 1,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Add `value` scaled by the multiplier; returns the points awarded
    pub fn award(&mut self, value: u64) -> u64 {
        let awarded = value.saturating_mul(self.multiplier as u64);
        self.points = self.points.saturating_add(awarded);
        awarded
    }

    pub fn set_multiplier(&mut self, multiplier: u32) {
        self.multiplier = multiplier.max(1);
    }

    pub fn reset_multiplier(&mut self) {
        self.multiplier = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_award_uses_multiplier() {
        let mut s = ScoreKeeper::new();
        assert_eq!(s.award(5), 5);
        s.set_multiplier(3);
        assert_eq!(s.award(10), 30);
        assert_eq!(s.points, 35);
        s.reset_multiplier();
        assert_eq!(s.award(10), 10);
        assert_eq!(s.points, 45);
    }

    #[test]
    fn test_multiplier_floor() {
        let mut s = ScoreKeeper::new();
        s.set_multiplier(0);
        assert_eq!(s.multiplier, 1);
    }

    #[test]
    fn test_saturates() {
        let mut s = ScoreKeeper::new();
        s.points = u64::MAX - 1;
        s.set_multiplier(2);
        s.award(50);
        assert_eq!(s.points, u64::MAX);
    }

    #[test]
    fn test_reset() {
        let mut s = ScoreKeeper::new();
        s.set_multiplier(2);
        s.award(50);
        s.reset();
        assert_eq!(s, ScoreKeeper::new());
    }
}
