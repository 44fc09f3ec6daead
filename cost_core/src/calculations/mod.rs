//! # Cost Calculations
//!
//! Pure functions from a [`ProjectSpecification`](crate::project::ProjectSpecification)
//! and a [`RateTable`](crate::rates::RateTable) to cost figures. Nothing here
//! caches or mutates: every consumer recomputes, and gets the same numbers.
//!
//! ## Available Calculations
//!
//! - [`estimate`] - Volume, material, labor, overhead and total cost
//! - [`breakdown`] - Percentage-of-total and current-vs-optimized views

pub mod breakdown;
pub mod estimate;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use breakdown::{breakdown, comparative, BreakdownEntry, ComparativeRow, SavingsFactors};
pub use estimate::{estimate, CostEstimate};

/// Cost category shown in breakdowns, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CostCategory {
    Materials,
    Labor,
    Overhead,
}

impl CostCategory {
    /// All categories in the fixed breakdown order
    pub const ALL: [CostCategory; 3] = [
        CostCategory::Materials,
        CostCategory::Labor,
        CostCategory::Overhead,
    ];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            CostCategory::Materials => "Materials",
            CostCategory::Labor => "Labor",
            CostCategory::Overhead => "Overhead",
        }
    }
}

impl std::fmt::Display for CostCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
