//! # Presentation Views
//!
//! Render-ready data for the three surfaces: dashboard, optimization panel and
//! report. Each view is built on its own from the specification, calling the
//! calculator itself, so the surfaces stay independent but cannot drift: the
//! same specification and rates always produce the same totals everywhere.
//!
//! ## Example
//!
//! ```rust
//! use cost_core::calculations::SavingsFactors;
//! use cost_core::project::ProjectSpecification;
//! use cost_core::rates::{MaterialKind, RateTable};
//! use cost_core::views::{verify_consistency, DashboardView, OptimizationView, ReportView};
//!
//! let spec = ProjectSpecification {
//!     name: "Warehouse".to_string(),
//!     length_m: 10.0,
//!     width_m: 5.0,
//!     height_m: 3.0,
//!     floors: 2,
//!     material: MaterialKind::Steel,
//!     labor_hours: 200.0,
//!     location: "Denver".to_string(),
//! };
//! let rates = RateTable::global();
//!
//! let dashboard = DashboardView::build(&spec, rates).unwrap();
//! let optimization = OptimizationView::build(&spec, rates, &SavingsFactors::default()).unwrap();
//! let report = ReportView::build(&spec, rates).unwrap();
//!
//! assert!(verify_consistency(&dashboard, &optimization, &report).is_ok());
//! assert_eq!(dashboard.overview.total.to_string(), "$63250.00");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{
    breakdown, comparative, estimate, BreakdownEntry, ComparativeRow, CostEstimate, SavingsFactors,
};
use crate::errors::{CostError, CostResult};
use crate::optimization::{catalog, Suggestion};
use crate::project::ProjectSpecification;
use crate::rates::RateTable;
use crate::units::Dollars;

/// The four headline figures shown as tiles and in the report summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostOverview {
    pub total: Dollars,
    pub material: Dollars,
    pub labor: Dollars,
    pub overhead: Dollars,
}

impl From<&CostEstimate> for CostOverview {
    fn from(estimate: &CostEstimate) -> Self {
        CostOverview {
            total: Dollars(estimate.total_cost),
            material: Dollars(estimate.material_cost),
            labor: Dollars(estimate.labor_cost),
            overhead: Dollars(estimate.overhead_cost),
        }
    }
}

/// Dashboard: overview tiles plus the cost distribution for charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub project_name: String,
    pub estimate: CostEstimate,
    pub overview: CostOverview,
    pub distribution: Vec<BreakdownEntry>,
}

impl DashboardView {
    pub fn build(spec: &ProjectSpecification, rates: &RateTable) -> CostResult<Self> {
        let estimate = estimate(spec, rates)?;
        Ok(DashboardView {
            project_name: spec.name.clone(),
            overview: CostOverview::from(&estimate),
            distribution: breakdown(&estimate),
            estimate,
        })
    }
}

/// Optimization panel: suggestion catalog and current-vs-optimized table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationView {
    pub estimate: CostEstimate,
    pub suggestions: Vec<Suggestion>,
    pub comparison: Vec<ComparativeRow>,
}

impl OptimizationView {
    pub fn build(spec: &ProjectSpecification, rates: &RateTable, factors: &SavingsFactors) -> CostResult<Self> {
        let estimate = estimate(spec, rates)?;
        Ok(OptimizationView {
            suggestions: catalog(),
            comparison: comparative(&estimate, factors),
            estimate,
        })
    }

    /// Sum of the optimized costs across categories
    pub fn optimized_total(&self) -> Dollars {
        Dollars(self.comparison.iter().map(|row| row.optimized_cost).sum())
    }
}

/// Printable report contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportView {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub project: ProjectSpecification,
    pub estimate: CostEstimate,
    pub summary: CostOverview,
    pub distribution: Vec<BreakdownEntry>,
    pub recommendations: Vec<String>,
    pub notes: Vec<String>,
}

impl ReportView {
    pub fn build(spec: &ProjectSpecification, rates: &RateTable) -> CostResult<Self> {
        ReportView::build_at(spec, rates, Utc::now())
    }

    /// Build with an explicit generation time (the "as of" date in the notes)
    pub fn build_at(spec: &ProjectSpecification, rates: &RateTable, generated_at: DateTime<Utc>) -> CostResult<Self> {
        let estimate = estimate(spec, rates)?;
        let recommendations = catalog().into_iter().map(|s| s.recommendation).collect();
        let notes = vec![
            format!(
                "Cost estimates are based on current market rates as of {}",
                generated_at.format("%Y-%m-%d")
            ),
            "Labor rates are averaged for the specified location".to_string(),
            "Material costs may vary based on market fluctuations".to_string(),
            "Overhead costs include general contractor fees and insurance".to_string(),
        ];

        Ok(ReportView {
            report_id: Uuid::new_v4(),
            generated_at,
            project: spec.clone(),
            summary: CostOverview::from(&estimate),
            distribution: breakdown(&estimate),
            estimate,
            recommendations,
            notes,
        })
    }

    /// Plain-text rendering of the report.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let rule = "═".repeat(47);

        out.push_str(&format!("{}\n  COST ESTIMATION REPORT\n{}\n\n", rule, rule));

        out.push_str("Project Details:\n");
        out.push_str(&format!("  Project Name:     {}\n", self.project.name));
        out.push_str(&format!("  Location:         {}\n", self.project.location));
        out.push_str(&format!("  Dimensions:       {}\n", self.project.dimensions_label()));
        out.push_str(&format!("  Number of Floors: {}\n", self.project.floors));
        out.push_str(&format!("  Primary Material: {}\n\n", self.project.material));

        out.push_str("Cost Summary:\n");
        out.push_str(&format!("  Material Costs:   {}\n", self.summary.material));
        out.push_str(&format!("  Labor Costs:      {}\n", self.summary.labor));
        out.push_str(&format!("  Overhead Costs:   {}\n", self.summary.overhead));
        out.push_str(&format!("  Total Cost:       {}\n\n", self.summary.total));

        out.push_str("Optimization Recommendations:\n");
        for line in &self.recommendations {
            out.push_str(&format!("  - {}\n", line));
        }
        out.push('\n');

        out.push_str("Notes & Assumptions:\n");
        for line in &self.notes {
            out.push_str(&format!("  - {}\n", line));
        }
        out.push('\n');

        out.push_str(&format!(
            "Report {} generated {}\n",
            self.report_id,
            self.generated_at.format("%Y-%m-%d %H:%M UTC")
        ));
        out
    }
}

/// Check that every surface carries the same estimate.
///
/// # Errors
///
/// `Internal` naming the first surface that disagrees with the dashboard.
pub fn verify_consistency(
    dashboard: &DashboardView,
    optimization: &OptimizationView,
    report: &ReportView,
) -> CostResult<()> {
    let reference = &dashboard.estimate;
    for (surface, other) in [("optimization", &optimization.estimate), ("report", &report.estimate)] {
        if other != reference {
            return Err(CostError::Internal {
                message: format!(
                    "{} total {} differs from dashboard total {}",
                    surface,
                    Dollars(other.total_cost),
                    Dollars(reference.total_cost)
                ),
            });
        }
    }
    Ok(())
}
