use std::collections::HashMap;

use cost_core::calculations::{breakdown, comparative, estimate, SavingsFactors};
use cost_core::project::{parse, ProjectSpecification};
use cost_core::rates::{MaterialKind, RateTable};
use cost_core::views::{verify_consistency, DashboardView, OptimizationView, ReportView};
use proptest::prelude::*;

fn material() -> impl Strategy<Value = MaterialKind> {
    prop::sample::select(MaterialKind::ALL.to_vec())
}

prop_compose! {
    fn project_spec()(
        length_m in 0.1f64..500.0,
        width_m in 0.1f64..500.0,
        height_m in 0.1f64..50.0,
        floors in 1u32..120,
        material in material(),
        labor_hours in 0.0f64..100_000.0,
    ) -> ProjectSpecification {
        ProjectSpecification {
            name: "Property Project".to_string(),
            length_m,
            width_m,
            height_m,
            floors,
            material,
            labor_hours,
            location: "Anywhere".to_string(),
        }
    }
}

proptest! {
    #[test]
    fn total_is_exact_sum_of_parts(spec in project_spec()) {
        let result = estimate(&spec, RateTable::global()).unwrap();
        prop_assert_eq!(
            result.total_cost,
            result.material_cost + result.labor_cost + result.overhead_cost
        );
    }

    #[test]
    fn overhead_follows_rate(spec in project_spec()) {
        let rates = RateTable::global();
        let result = estimate(&spec, rates).unwrap();
        let expected = (result.material_cost + result.labor_cost) * rates.overhead_rate();
        prop_assert!((result.overhead_cost - expected).abs() <= 1e-9 * expected.max(1.0));
    }

    #[test]
    fn estimate_is_idempotent(spec in project_spec()) {
        let rates = RateTable::global();
        prop_assert_eq!(estimate(&spec, rates).unwrap(), estimate(&spec, rates).unwrap());
    }

    #[test]
    fn percentages_sum_to_hundred(spec in project_spec()) {
        let result = estimate(&spec, RateTable::global()).unwrap();
        let sum: f64 = breakdown(&result).iter().map(|e| e.percentage_of_total).sum();
        prop_assert!((sum - 100.0).abs() < 1e-6, "sum was {}", sum);
    }

    #[test]
    fn zero_dimension_leaves_labor_and_overhead(
        mut spec in project_spec(),
        which in 0usize..3,
    ) {
        spec.floors = 1;
        match which {
            0 => spec.length_m = 0.0,
            1 => spec.width_m = 0.0,
            _ => spec.height_m = 0.0,
        }
        let rates = RateTable::global();
        let result = estimate(&spec, rates).unwrap();

        prop_assert_eq!(result.volume_m3, 0.0);
        prop_assert_eq!(result.material_cost, 0.0);
        let expected_overhead = result.labor_cost * rates.overhead_rate();
        prop_assert!((result.overhead_cost - expected_overhead).abs() <= 1e-9 * expected_overhead.max(1.0));
        prop_assert_eq!(result.total_cost, result.labor_cost + result.overhead_cost);
    }

    #[test]
    fn comparative_savings_match_factor(spec in project_spec(), factor in 0.0f64..=1.0) {
        let result = estimate(&spec, RateTable::global()).unwrap();
        for row in comparative(&result, &SavingsFactors::uniform(factor)) {
            prop_assert!((row.savings_percent - (1.0 - factor) * 100.0).abs() < 1e-9);
            prop_assert!(row.optimized_cost <= row.current_cost);
        }
    }

    #[test]
    fn surfaces_always_agree(spec in project_spec()) {
        let rates = RateTable::global();
        let dashboard = DashboardView::build(&spec, rates).unwrap();
        let optimization = OptimizationView::build(&spec, rates, &SavingsFactors::default()).unwrap();
        let report = ReportView::build(&spec, rates).unwrap();
        prop_assert!(verify_consistency(&dashboard, &optimization, &report).is_ok());
    }

    #[test]
    fn parsed_dimensions_feed_the_estimate(
        length in 1u32..200,
        width in 1u32..200,
        height in 1u32..20,
        floors in 1u32..40,
    ) {
        let raw: HashMap<String, String> = [
            ("projectName", "Parsed".to_string()),
            ("length", length.to_string()),
            ("width", width.to_string()),
            ("height", height.to_string()),
            ("floors", floors.to_string()),
            ("material", "brick".to_string()),
            ("laborHours", "10".to_string()),
            ("location", "Here".to_string()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let spec = parse(&raw).unwrap();
        let result = estimate(&spec, RateTable::global()).unwrap();
        let expected_volume = f64::from(length) * f64::from(width) * f64::from(height) * f64::from(floors);
        prop_assert_eq!(result.volume_m3, expected_volume);
        prop_assert_eq!(result.material_cost, expected_volume * 90.0);
    }
}

#[test]
fn zero_total_breakdown_is_all_zero() {
    let spec = ProjectSpecification {
        name: "Empty Lot".to_string(),
        length_m: 0.0,
        width_m: 10.0,
        height_m: 3.0,
        floors: 1,
        material: MaterialKind::Concrete,
        labor_hours: 0.0,
        location: "Nowhere".to_string(),
    };
    let result = estimate(&spec, RateTable::global()).unwrap();
    assert_eq!(result.total_cost, 0.0);

    let sum: f64 = breakdown(&result).iter().map(|e| e.percentage_of_total).sum();
    assert_eq!(sum, 0.0);
}
