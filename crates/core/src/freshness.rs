//! Staleness rules for cached groups.
//!
//! A group's age is taken from the `created_at` of its first row, in epoch
//! milliseconds, and compared against a per-category threshold.

use serde::{Deserialize, Serialize};

/// How the age of a group is derived from `now` and `created_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeFormula {
    /// `(now - created_at)` converted to the rule's unit.
    Elapsed,
    /// `now - created_at / unit`: only the stored timestamp is converted.
    ///
    /// Evaluates to roughly `now` in milliseconds, so every group is stale.
    Legacy,
}

/// Unit a threshold is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeUnit {
    Minutes,
    Hours,
}

impl AgeUnit {
    pub const fn millis(self) -> i64 {
        match self {
            AgeUnit::Minutes => 60 * 1000,
            AgeUnit::Hours => 60 * 60 * 1000,
        }
    }
}

/// Time-to-live for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ttl {
    pub unit: AgeUnit,
    pub threshold: i64,
    pub formula: AgeFormula,
}

impl Ttl {
    pub const fn new(unit: AgeUnit, threshold: i64, formula: AgeFormula) -> Self {
        Self { unit, threshold, formula }
    }

    /// Weather groups expire after 60 minutes.
    pub const fn weather() -> Self {
        Self::new(AgeUnit::Minutes, 60, AgeFormula::Elapsed)
    }

    /// Restaurant groups expire after 23 hours.
    pub const fn restaurants() -> Self {
        Self::new(AgeUnit::Hours, 23, AgeFormula::Elapsed)
    }

    /// Age of a group created at `created_at`, in this rule's unit.
    pub fn age(&self, created_at: i64, now: i64) -> f64 {
        let unit = self.unit.millis() as f64;
        match self.formula {
            AgeFormula::Elapsed => (now - created_at) as f64 / unit,
            AgeFormula::Legacy => now as f64 - created_at as f64 / unit,
        }
    }

    pub fn is_stale(&self, created_at: i64, now: i64) -> bool {
        self.age(created_at, now) > self.threshold as f64
    }

    /// Groups whose first row has `created_at` strictly below this are stale.
    pub fn cutoff(&self, now: i64) -> i64 {
        match self.formula {
            AgeFormula::Elapsed => now.saturating_sub(self.threshold.saturating_mul(self.unit.millis())),
            AgeFormula::Legacy => now.saturating_sub(self.threshold).saturating_mul(self.unit.millis()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE: i64 = 60 * 1000;
    const HOUR: i64 = 60 * MINUTE;
    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn test_weather_fresh_within_an_hour() {
        let ttl = Ttl::weather();
        assert!(!ttl.is_stale(NOW - 5 * MINUTE, NOW));
        assert!(!ttl.is_stale(NOW - 60 * MINUTE, NOW));
        assert!(ttl.is_stale(NOW - 61 * MINUTE, NOW));
        assert!(ttl.is_stale(NOW - 120 * MINUTE, NOW));
    }

    #[test]
    fn test_restaurants_fresh_within_23_hours() {
        let ttl = Ttl::restaurants();
        assert!(!ttl.is_stale(NOW - 2 * HOUR, NOW));
        assert!(!ttl.is_stale(NOW - 23 * HOUR, NOW));
        assert!(ttl.is_stale(NOW - 23 * HOUR - 1, NOW));
    }

    #[test]
    fn test_age_in_units() {
        assert_eq!(Ttl::weather().age(NOW - 90 * MINUTE, NOW), 90.0);
        assert_eq!(Ttl::restaurants().age(NOW - 6 * HOUR, NOW), 6.0);
    }

    #[test]
    fn test_legacy_formula_always_stale() {
        let ttl = Ttl::new(AgeUnit::Minutes, 60, AgeFormula::Legacy);
        assert!(ttl.is_stale(NOW, NOW));
        assert!(ttl.is_stale(NOW - MINUTE, NOW));

        let expected = NOW as f64 - NOW as f64 / MINUTE as f64;
        assert_eq!(ttl.age(NOW, NOW), expected);
    }

    #[test]
    fn test_cutoff_matches_is_stale() {
        for ttl in [Ttl::weather(), Ttl::restaurants()] {
            let cutoff = ttl.cutoff(NOW);
            assert!(ttl.is_stale(cutoff - 1, NOW));
            assert!(!ttl.is_stale(cutoff, NOW));
        }
    }

    #[test]
    fn test_legacy_cutoff_covers_current_rows() {
        let ttl = Ttl::new(AgeUnit::Hours, 23, AgeFormula::Legacy);
        assert!(ttl.cutoff(NOW) > NOW);
    }
}
