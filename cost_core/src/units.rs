//! # Unit Types
//!
//! Lightweight newtype wrappers for the quantities the estimator deals with.
//! They serialize as bare numbers and carry no rounding: values stay exact
//! until a presentation boundary formats them.
//!
//! ## Presentation Rounding
//!
//! Money is shown to 2 decimal places, rounding half away from zero
//! (`round_half_up`). Percentages are shown to 1 decimal place.
//!
//! ## Example
//!
//! ```rust
//! use cost_core::units::{Dollars, Meters, Percent};
//!
//! let volume = Meters(10.0) * Meters(5.0) * Meters(3.0);
//! assert_eq!(volume.0, 150.0);
//!
//! assert_eq!(Dollars(46000.0).to_string(), "$46000.00");
//! assert_eq!(Dollars(0.125).to_string(), "$0.13");
//! assert_eq!(Percent(65.2173913).to_string(), "65.2%");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// Round `value` to `places` decimal places, halves away from zero.
pub fn round_half_up(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(places as i32);
    let rounded = (value * factor).round() / factor;
    // No signed zero in output: -0.001 shows as 0.00
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

// ============================================================================
// Length / Volume
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqMeters(pub f64);

/// Volume in cubic meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMeters(pub f64);

impl Mul for Meters {
    type Output = SqMeters;
    fn mul(self, rhs: Meters) -> SqMeters {
        SqMeters(self.0 * rhs.0)
    }
}

impl Mul<Meters> for SqMeters {
    type Output = CubicMeters;
    fn mul(self, rhs: Meters) -> CubicMeters {
        CubicMeters(self.0 * rhs.0)
    }
}

// ============================================================================
// Labor
// ============================================================================

/// Labor time in hours
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hours(pub f64);

// ============================================================================
// Money / Ratios
// ============================================================================

/// Monetary amount in dollars
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dollars(pub f64);

impl Dollars {
    /// Amount rounded for display (2 places, half away from zero)
    pub fn rounded(self) -> f64 {
        round_half_up(self.0, 2)
    }
}

impl fmt::Display for Dollars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.rounded())
    }
}

/// Percentage (0-100 scale)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(pub f64);

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", round_half_up(self.0, 1))
    }
}

// ============================================================================
// Arithmetic Implementations
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(SqMeters);
impl_arithmetic!(CubicMeters);
impl_arithmetic!(Hours);
impl_arithmetic!(Dollars);
impl_arithmetic!(Percent);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_from_lengths() {
        let volume = Meters(10.0) * Meters(5.0) * Meters(3.0) * 2.0;
        assert_eq!(volume, CubicMeters(300.0));
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5, 0), 3.0);
        assert_eq!(round_half_up(0.125, 2), 0.13);
        assert_eq!(round_half_up(-0.125, 2), -0.13);
        assert_eq!(round_half_up(6000.000000000001, 2), 6000.0);
        assert!(round_half_up(f64::NAN, 2).is_nan());
    }

    #[test]
    fn test_dollars_display() {
        assert_eq!(Dollars(46000.0).to_string(), "$46000.00");
        assert_eq!(Dollars(8249.999999999998).to_string(), "$8250.00");
        assert_eq!(Dollars(0.0).to_string(), "$0.00");
        assert_eq!(Dollars(-0.0).to_string(), "$0.00");
        assert_eq!(Dollars(-0.001).to_string(), "$0.00");
        assert!(round_half_up(-0.0, 2).is_sign_positive());
    }

    #[test]
    fn test_percent_display() {
        assert_eq!(Percent(100.0).to_string(), "100.0%");
        assert_eq!(Percent(13.04347826).to_string(), "13.0%");
    }

    #[test]
    fn test_arithmetic() {
        let a = Dollars(100.0);
        let b = Dollars(40.0);
        assert_eq!((a + b).0, 140.0);
        assert_eq!((a - b).0, 60.0);
        assert_eq!((a * 0.15).0, 15.0);
        assert_eq!((a / 4.0).0, 25.0);
    }

    #[test]
    fn test_serialization() {
        let d = Dollars(12.5);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "12.5");

        let roundtrip: Dollars = serde_json::from_str(&json).unwrap();
        assert_eq!(d, roundtrip);
    }
}
