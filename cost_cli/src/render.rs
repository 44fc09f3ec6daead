//! Terminal rendering for the dashboard and optimization surfaces.
//!
//! The report surface renders itself (`ReportView::render_text`).

use cost_core::units::{Dollars, Percent};
use cost_core::views::{DashboardView, OptimizationView};
use cost_core::RateTable;

const RULE_WIDTH: usize = 47;
const BAR_WIDTH: usize = 30;

fn banner(title: &str) -> String {
    let rule = "═".repeat(RULE_WIDTH);
    format!("{}\n  {}\n{}\n", rule, title, rule)
}

pub fn dashboard(view: &DashboardView) -> String {
    let mut out = banner("PROJECT OVERVIEW");
    out.push_str(&format!("  Project:        {}\n\n", view.project_name));
    out.push_str(&format!("  Total Cost:     {}\n", view.overview.total));
    out.push_str(&format!("  Material Cost:  {}\n", view.overview.material));
    out.push_str(&format!("  Labor Cost:     {}\n", view.overview.labor));
    out.push_str(&format!("  Overhead Cost:  {}\n\n", view.overview.overhead));

    out.push_str("Cost Distribution:\n");
    for entry in &view.distribution {
        let filled = ((entry.percentage_of_total / 100.0) * BAR_WIDTH as f64).round() as usize;
        out.push_str(&format!(
            "  {:<10} {:<width$} {:>7}  {}\n",
            entry.category.display_name(),
            "█".repeat(filled.min(BAR_WIDTH)),
            Percent(entry.percentage_of_total).to_string(),
            Dollars(entry.cost),
            width = BAR_WIDTH
        ));
    }
    out
}

pub fn optimization(view: &OptimizationView) -> String {
    let mut out = banner("COST OPTIMIZATION SUGGESTIONS");
    for suggestion in &view.suggestions {
        out.push_str(&format!("\n  {}\n", suggestion.title));
        out.push_str(&format!("    {}\n", suggestion.description));
        out.push_str(&format!(
            "    Potential Savings: {}   Impact: {}   Complexity: {}\n",
            suggestion.savings, suggestion.impact, suggestion.complexity
        ));
    }
    out.push('\n');

    out.push_str(&banner("COMPARATIVE ANALYSIS"));
    out.push_str(&format!(
        "  {:<10} {:>14} {:>16} {:>8}\n",
        "Category", "Current Cost", "Optimized Cost", "Savings"
    ));
    for row in &view.comparison {
        out.push_str(&format!(
            "  {:<10} {:>14} {:>16} {:>8}\n",
            row.category.display_name(),
            Dollars(row.current_cost).to_string(),
            Dollars(row.optimized_cost).to_string(),
            Percent(row.savings_percent).to_string(),
        ));
    }
    out.push_str(&format!(
        "  {:<10} {:>14} {:>16}\n",
        "Total",
        Dollars(view.estimate.total_cost).to_string(),
        view.optimized_total().to_string(),
    ));
    out
}

pub fn rate_table(rates: &RateTable) -> String {
    let mut out = banner("RATE TABLE");
    for (material, unit_cost) in rates.materials() {
        out.push_str(&format!("  {:<10} {:>10} per m³\n", material.display_name(), Dollars(unit_cost).to_string()));
    }
    out.push_str(&format!(
        "  {:<10} {:>10} per hour\n",
        "Labor",
        Dollars(rates.labor_rate_per_hour()).to_string()
    ));
    out.push_str(&format!(
        "  {:<10} {:>10} of material + labor\n",
        "Overhead",
        Percent(rates.overhead_rate() * 100.0).to_string()
    ));
    out
}
