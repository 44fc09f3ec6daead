//! # Rate Table
//!
//! Unit costs per material plus the labor and overhead rates used by the
//! calculator.
//!
//! The standard table holds the published defaults:
//!
//! | Material | Unit cost ($/m³) |
//! |----------|------------------|
//! | Concrete | 100 |
//! | Steel    | 150 |
//! | Wood     | 80  |
//! | Brick    | 90  |
//!
//! Labor is billed at $50/hour and overhead is 15% of the material + labor
//! subtotal.
//!
//! A table can also come from configuration (see [`crate::config`]). Such a
//! table may leave a material out; looking that material up fails with
//! [`CostError::UnknownMaterial`] rather than yielding a made-up rate.
//!
//! ## Example
//!
//! ```rust
//! use cost_core::rates::{MaterialKind, RateTable};
//!
//! let rates = RateTable::global();
//! assert_eq!(rates.lookup(MaterialKind::Steel).unwrap(), 150.0);
//! assert_eq!(rates.labor_rate_per_hour(), 50.0);
//! assert_eq!(rates.overhead_rate(), 0.15);
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CostError, CostResult};

/// Default labor rate in dollars per hour
pub const DEFAULT_LABOR_RATE_PER_HOUR: f64 = 50.0;

/// Default overhead as a fraction of the material + labor subtotal
pub const DEFAULT_OVERHEAD_RATE: f64 = 0.15;

static STANDARD_RATES: Lazy<RateTable> = Lazy::new(RateTable::standard);

/// Primary building material
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Concrete,
    Steel,
    Wood,
    Brick,
}

impl MaterialKind {
    /// All material variants, in selection order
    pub const ALL: [MaterialKind; 4] = [
        MaterialKind::Concrete,
        MaterialKind::Steel,
        MaterialKind::Wood,
        MaterialKind::Brick,
    ];

    /// Identifier used in forms and configuration files
    pub fn code(&self) -> &'static str {
        match self {
            MaterialKind::Concrete => "concrete",
            MaterialKind::Steel => "steel",
            MaterialKind::Wood => "wood",
            MaterialKind::Brick => "brick",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            MaterialKind::Concrete => "Concrete",
            MaterialKind::Steel => "Steel",
            MaterialKind::Wood => "Wood",
            MaterialKind::Brick => "Brick",
        }
    }

    /// Parse an identifier, ignoring case and surrounding whitespace
    pub fn from_str_flexible(s: &str) -> CostResult<Self> {
        let code = s.trim().to_lowercase();
        MaterialKind::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .ok_or_else(|| CostError::unknown_material(s.trim()))
    }
}

impl FromStr for MaterialKind {
    type Err = CostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MaterialKind::from_str_flexible(s)
    }
}

impl std::fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Material unit costs plus labor and overhead rates.
///
/// Immutable once built; share it by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    /// Cost per cubic meter of building volume, by material
    material_unit_cost: BTreeMap<MaterialKind, f64>,

    /// Labor cost per hour
    labor_rate_per_hour: f64,

    /// Fraction applied to the material + labor subtotal
    overhead_rate: f64,
}

impl RateTable {
    /// The built-in rate table.
    pub fn standard() -> Self {
        let material_unit_cost = BTreeMap::from([
            (MaterialKind::Concrete, 100.0),
            (MaterialKind::Steel, 150.0),
            (MaterialKind::Wood, 80.0),
            (MaterialKind::Brick, 90.0),
        ]);

        RateTable {
            material_unit_cost,
            labor_rate_per_hour: DEFAULT_LABOR_RATE_PER_HOUR,
            overhead_rate: DEFAULT_OVERHEAD_RATE,
        }
    }

    /// Process-wide standard table, built on first use.
    pub fn global() -> &'static RateTable {
        &STANDARD_RATES
    }

    /// Build a custom table, checking the rate invariants.
    ///
    /// # Errors
    ///
    /// `InvalidRates` if any rate is non-positive or non-finite, or if the
    /// overhead rate is outside (0, 1).
    pub fn new(
        material_unit_cost: BTreeMap<MaterialKind, f64>,
        labor_rate_per_hour: f64,
        overhead_rate: f64,
    ) -> CostResult<Self> {
        let table = RateTable {
            material_unit_cost,
            labor_rate_per_hour,
            overhead_rate,
        };
        table.validate()?;
        Ok(table)
    }

    /// Check the rate invariants.
    pub fn validate(&self) -> CostResult<()> {
        for (kind, cost) in &self.material_unit_cost {
            if !cost.is_finite() || *cost <= 0.0 {
                return Err(CostError::invalid_rates(format!(
                    "unit cost for {} must be a positive number, got {}",
                    kind.code(),
                    cost
                )));
            }
        }
        if !self.labor_rate_per_hour.is_finite() || self.labor_rate_per_hour <= 0.0 {
            return Err(CostError::invalid_rates(format!(
                "labor rate must be a positive number, got {}",
                self.labor_rate_per_hour
            )));
        }
        if !(self.overhead_rate > 0.0 && self.overhead_rate < 1.0) {
            return Err(CostError::invalid_rates(format!(
                "overhead rate must be between 0 and 1 (exclusive), got {}",
                self.overhead_rate
            )));
        }
        Ok(())
    }

    /// Unit cost for a material.
    ///
    /// # Errors
    ///
    /// `UnknownMaterial` if the table holds no rate for `material`.
    pub fn lookup(&self, material: MaterialKind) -> CostResult<f64> {
        self.material_unit_cost
            .get(&material)
            .copied()
            .ok_or_else(|| CostError::unknown_material(material.code()))
    }

    /// Labor cost per hour
    pub fn labor_rate_per_hour(&self) -> f64 {
        self.labor_rate_per_hour
    }

    /// Overhead fraction
    pub fn overhead_rate(&self) -> f64 {
        self.overhead_rate
    }

    /// Materials that have a rate, in table order
    pub fn materials(&self) -> impl Iterator<Item = (MaterialKind, f64)> + '_ {
        self.material_unit_cost.iter().map(|(kind, cost)| (*kind, *cost))
    }
}

impl Default for RateTable {
    fn default() -> Self {
        RateTable::standard()
    }
}
