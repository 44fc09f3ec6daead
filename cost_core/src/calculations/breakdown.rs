//! # Breakdown Builder
//!
//! Views derived from a [`CostEstimate`] for charts and tables:
//!
//! - [`breakdown`] - each category's cost and share of the total
//! - [`comparative`] - current vs. optimized cost per category
//!
//! Both return categories in the fixed order Materials, Labor, Overhead.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CostError, CostResult};

use super::{CostCategory, CostEstimate};

/// Uniform savings multiplier used by the illustrative comparative table
pub const DEFAULT_SAVINGS_FACTOR: f64 = 0.85;

/// One row of the cost distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub category: CostCategory,
    pub cost: f64,
    /// Share of the total cost, 0-100. Zero when the total is zero.
    pub percentage_of_total: f64,
}

/// One row of the current-vs-optimized table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparativeRow {
    pub category: CostCategory,
    pub current_cost: f64,
    pub optimized_cost: f64,
    /// (1 - factor) × 100
    pub savings_percent: f64,
}

/// Per-category multiplier applied to current costs to get optimized costs.
///
/// A factor of 0.85 means the optimized cost is 85% of the current one (15%
/// savings). Categories without an explicit factor use `default_factor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsFactors {
    default_factor: f64,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    overrides: BTreeMap<CostCategory, f64>,
}

impl SavingsFactors {
    /// Same factor for every category
    pub fn uniform(factor: f64) -> Self {
        SavingsFactors {
            default_factor: factor,
            overrides: BTreeMap::new(),
        }
    }

    /// Override the factor for one category
    pub fn with_factor(mut self, category: CostCategory, factor: f64) -> Self {
        self.overrides.insert(category, factor);
        self
    }

    /// Factor applied to `category`
    pub fn factor_for(&self, category: CostCategory) -> f64 {
        self.overrides
            .get(&category)
            .copied()
            .unwrap_or(self.default_factor)
    }

    /// Every factor must be a finite number in [0, 1].
    pub fn validate(&self) -> CostResult<()> {
        for category in CostCategory::ALL {
            let factor = self.factor_for(category);
            if !factor.is_finite() || !(0.0..=1.0).contains(&factor) {
                return Err(CostError::invalid_input(
                    format!("optimization.{}", category.display_name().to_lowercase()),
                    factor.to_string(),
                    "Savings factor must be between 0 and 1",
                ));
            }
        }
        Ok(())
    }
}

impl Default for SavingsFactors {
    fn default() -> Self {
        SavingsFactors::uniform(DEFAULT_SAVINGS_FACTOR)
    }
}

/// Cost and percentage-of-total per category.
///
/// When the total is zero every percentage is reported as 0 so consumers
/// never receive NaN.
///
/// # Example
///
/// ```rust
/// use cost_core::calculations::{breakdown, CostCategory, CostEstimate};
///
/// let estimate = CostEstimate {
///     volume_m3: 300.0,
///     material_cost: 30_000.0,
///     labor_cost: 10_000.0,
///     overhead_cost: 6_000.0,
///     total_cost: 46_000.0,
/// };
///
/// let entries = breakdown(&estimate);
/// assert_eq!(entries[0].category, CostCategory::Materials);
/// let sum: f64 = entries.iter().map(|e| e.percentage_of_total).sum();
/// assert!((sum - 100.0).abs() < 1e-9);
/// ```
pub fn breakdown(estimate: &CostEstimate) -> Vec<BreakdownEntry> {
    CostCategory::ALL
        .into_iter()
        .map(|category| {
            let cost = estimate.cost_for(category);
            let percentage_of_total = if estimate.total_cost == 0.0 || !estimate.total_cost.is_finite() {
                0.0
            } else {
                cost / estimate.total_cost * 100.0
            };
            BreakdownEntry {
                category,
                cost,
                percentage_of_total,
            }
        })
        .collect()
}

/// Current vs. optimized cost per category.
pub fn comparative(before: &CostEstimate, factors: &SavingsFactors) -> Vec<ComparativeRow> {
    CostCategory::ALL
        .into_iter()
        .map(|category| {
            let factor = factors.factor_for(category);
            let current_cost = before.cost_for(category);
            ComparativeRow {
                category,
                current_cost,
                optimized_cost: current_cost * factor,
                savings_percent: (1.0 - factor) * 100.0,
            }
        })
        .collect()
}
