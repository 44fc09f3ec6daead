//! # Cost Estimate
//!
//! Converts a project specification into material, labor and overhead costs.
//!
//! ## Formulas
//!
//! Applied in this order, with no intermediate rounding:
//!
//! ```text
//! volume        = length × width × height × floors
//! material_cost = volume × unit_cost[material]
//! labor_cost    = labor_hours × labor_rate_per_hour
//! overhead_cost = (material_cost + labor_cost) × overhead_rate
//! total_cost    = material_cost + labor_cost + overhead_cost
//! ```
//!
//! ## Example
//!
//! ```rust
//! use cost_core::calculations::estimate;
//! use cost_core::project::ProjectSpecification;
//! use cost_core::rates::{MaterialKind, RateTable};
//!
//! let spec = ProjectSpecification {
//!     name: "Warehouse".to_string(),
//!     length_m: 10.0,
//!     width_m: 5.0,
//!     height_m: 3.0,
//!     floors: 2,
//!     material: MaterialKind::Concrete,
//!     labor_hours: 200.0,
//!     location: "Denver".to_string(),
//! };
//!
//! let result = estimate(&spec, RateTable::global()).unwrap();
//! assert_eq!(result.volume_m3, 300.0);
//! assert_eq!(result.material_cost, 30_000.0);
//! assert_eq!(result.labor_cost, 10_000.0);
//! assert_eq!(result.total_cost, result.material_cost + result.labor_cost + result.overhead_cost);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CostError, CostResult};
use crate::project::{fields, ProjectSpecification};
use crate::rates::RateTable;
use crate::units::{Dollars, Hours, Meters};

use super::CostCategory;

/// Derived costs for one specification.
///
/// ## JSON Example
///
/// ```json
/// {
///   "volume_m3": 300.0,
///   "material_cost": 30000.0,
///   "labor_cost": 10000.0,
///   "overhead_cost": 6000.0,
///   "total_cost": 46000.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    /// Building volume (m³)
    pub volume_m3: f64,

    /// Volume × material unit cost
    pub material_cost: f64,

    /// Labor hours × labor rate
    pub labor_cost: f64,

    /// (material + labor) × overhead rate
    pub overhead_cost: f64,

    /// material + labor + overhead
    pub total_cost: f64,
}

impl CostEstimate {
    /// Cost attributed to a category
    pub fn cost_for(&self, category: CostCategory) -> f64 {
        match category {
            CostCategory::Materials => self.material_cost,
            CostCategory::Labor => self.labor_cost,
            CostCategory::Overhead => self.overhead_cost,
        }
    }

    /// Total as a display-ready amount
    pub fn total(&self) -> Dollars {
        Dollars(self.total_cost)
    }
}

/// Estimate the cost of a project.
///
/// # Errors
///
/// `UnknownMaterial` if `rates` has no unit cost for the specification's
/// material. That can only happen when a custom rate table is out of sync
/// with the material list, so it is logged and the estimate is abandoned
/// rather than priced with a substitute rate.
///
/// `InvalidInput` if a cost overflows `f64` (naming `laborHours`, or
/// `volume` when the material side overflows).
pub fn estimate(spec: &ProjectSpecification, rates: &RateTable) -> CostResult<CostEstimate> {
    let unit_cost = rates.lookup(spec.material).map_err(|e| {
        tracing::error!(
            material = spec.material.code(),
            project = %spec.name,
            "no unit cost for material; rate table and material list are out of sync"
        );
        e
    })?;

    let volume = Meters(spec.length_m) * Meters(spec.width_m) * Meters(spec.height_m) * f64::from(spec.floors);
    let material_cost = Dollars(volume.value() * unit_cost);
    let labor_cost = Dollars(Hours(spec.labor_hours).value() * rates.labor_rate_per_hour());
    let overhead_cost = (material_cost + labor_cost) * rates.overhead_rate();
    let total_cost = material_cost + labor_cost + overhead_cost;

    if !total_cost.value().is_finite() {
        let (field, value) = if labor_cost.value().is_finite() {
            ("volume", volume.value())
        } else {
            (fields::LABOR_HOURS, spec.labor_hours)
        };
        tracing::warn!(project = %spec.name, field, "estimate overflowed");
        return Err(CostError::invalid_input(
            field,
            value.to_string(),
            "Cost is too large to estimate at these rates",
        ));
    }

    tracing::debug!(
        project = %spec.name,
        volume_m3 = volume.value(),
        total_cost = total_cost.value(),
        "estimated project cost"
    );

    Ok(CostEstimate {
        volume_m3: volume.value(),
        material_cost: material_cost.value(),
        labor_cost: labor_cost.value(),
        overhead_cost: overhead_cost.value(),
        total_cost: total_cost.value(),
    })
}
