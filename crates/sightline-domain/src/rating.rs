//! Bounded rating value objects
//!
//! Star ratings live in {1..5} and confidence percentages in [45, 95].
//! Both types can only be constructed inside their bounds, including when
//! deserialized, so no downstream stage can observe an out-of-range value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Star rating in {1, 2, 3, 4, 5}
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Stars(u8);

impl Stars {
    /// Lowest rating
    pub const MIN: u8 = 1;
    /// Highest rating
    pub const MAX: u8 = 5;

    /// Create a rating, returning `None` when out of range
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// Create a rating, clamping into range
    pub fn clamped(value: i32) -> Self {
        Self(value.clamp(i32::from(Self::MIN), i32::from(Self::MAX)) as u8)
    }

    /// Apply a signed delta, clamping into range
    pub fn offset(self, delta: i32) -> Self {
        Self::clamped(i32::from(self.0) + delta)
    }

    /// Raw value
    pub fn value(self) -> u8 {
        self.0
    }

    /// Rating normalized to [0, 1] (value / 5)
    pub fn normalized(self) -> f64 {
        f64::from(self.0) / f64::from(Self::MAX)
    }
}

impl TryFrom<u8> for Stars {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("Stars {} outside [1, 5]", value))
    }
}

impl From<Stars> for u8 {
    fn from(stars: Stars) -> Self {
        stars.0
    }
}

impl fmt::Display for Stars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.0)
    }
}

/// Confidence percentage in [45, 95]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ConfidencePct(u8);

impl ConfidencePct {
    /// Floor of the confidence range
    pub const MIN: u8 = 45;
    /// Ceiling of the confidence range
    pub const MAX: u8 = 95;

    /// Create a confidence, returning `None` when out of range
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// Create a confidence, clamping into range
    pub fn clamped(value: i32) -> Self {
        Self(value.clamp(i32::from(Self::MIN), i32::from(Self::MAX)) as u8)
    }

    /// Round a continuous value and clamp it into range
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Self(Self::MIN);
        }
        let rounded = value.round().clamp(f64::from(Self::MIN), f64::from(Self::MAX));
        Self(rounded as u8)
    }

    /// Apply a signed delta in percentage points, clamping into range
    pub fn offset(self, delta_pp: i32) -> Self {
        Self::clamped(i32::from(self.0) + delta_pp)
    }

    /// Raw value
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ConfidencePct {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("Confidence {} outside [45, 95]", value))
    }
}

impl From<ConfidencePct> for u8 {
    fn from(confidence: ConfidencePct) -> Self {
        confidence.0
    }
}

impl fmt::Display for ConfidencePct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars_bounds() {
        assert!(Stars::new(0).is_none());
        assert!(Stars::new(6).is_none());
        assert_eq!(Stars::clamped(9).value(), 5);
        assert_eq!(Stars::clamped(-3).value(), 1);
        assert_eq!(Stars::new(4).unwrap().normalized(), 0.8);
    }

    #[test]
    fn test_confidence_rounding() {
        assert_eq!(ConfidencePct::from_f64(61.5).value(), 62);
        assert_eq!(ConfidencePct::from_f64(12.0).value(), 45);
        assert_eq!(ConfidencePct::from_f64(120.0).value(), 95);
        assert_eq!(ConfidencePct::from_f64(f64::NAN).value(), 45);
    }

    #[test]
    fn test_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<Stars>("7").is_err());
        assert!(serde_json::from_str::<ConfidencePct>("30").is_err());
        assert_eq!(serde_json::from_str::<Stars>("3").unwrap().value(), 3);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: offsets never leave the star range
        #[test]
        fn test_star_offset_in_range(start in 1u8..=5, delta in -10i32..=10) {
            let stars = Stars::new(start).unwrap().offset(delta);
            prop_assert!((1..=5).contains(&stars.value()));
        }

        /// Property: offsets never leave the confidence range
        #[test]
        fn test_confidence_offset_in_range(start in 45u8..=95, delta in -100i32..=100) {
            let confidence = ConfidencePct::new(start).unwrap().offset(delta);
            prop_assert!((45..=95).contains(&confidence.value()));
        }

        /// Property: larger inputs never produce a smaller confidence
        #[test]
        fn test_confidence_monotonic(a in -200.0f64..200.0, b in -200.0f64..200.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(ConfidencePct::from_f64(lo) <= ConfidencePct::from_f64(hi));
        }
    }
}
