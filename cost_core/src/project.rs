//! # Project Specification
//!
//! The validated, typed description of a building project. Raw form input
//! (field name → string) goes through [`parse`] or [`parse_all`]; whatever
//! comes out is safe to hand to the calculator.
//!
//! ## Input Fields
//!
//! ```text
//! projectName  non-empty text
//! length       number > 0 (meters)
//! width        number > 0 (meters)
//! height       number > 0 (meters)
//! floors       integer >= 1
//! material     concrete | steel | wood | brick
//! laborHours   number >= 0
//! location     non-empty text (informational only)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use cost_core::project::parse;
//! use cost_core::rates::MaterialKind;
//!
//! let raw: HashMap<String, String> = [
//!     ("projectName", "Warehouse"),
//!     ("length", "10"),
//!     ("width", "5"),
//!     ("height", "3"),
//!     ("floors", "2"),
//!     ("material", "concrete"),
//!     ("laborHours", "200"),
//!     ("location", "Denver"),
//! ]
//! .into_iter()
//! .map(|(k, v)| (k.to_string(), v.to_string()))
//! .collect();
//!
//! let spec = parse(&raw).unwrap();
//! assert_eq!(spec.material, MaterialKind::Concrete);
//! assert_eq!(spec.floors, 2);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::errors::{CostError, CostResult};
use crate::rates::MaterialKind;

/// Form field names, in validation order.
pub mod fields {
    pub const PROJECT_NAME: &str = "projectName";
    pub const LENGTH: &str = "length";
    pub const WIDTH: &str = "width";
    pub const HEIGHT: &str = "height";
    pub const FLOORS: &str = "floors";
    pub const MATERIAL: &str = "material";
    pub const LABOR_HOURS: &str = "laborHours";
    pub const LOCATION: &str = "location";

    /// Every field, in the order validation checks them
    pub const ALL: [&str; 8] = [
        PROJECT_NAME,
        LENGTH,
        WIDTH,
        HEIGHT,
        FLOORS,
        MATERIAL,
        LABOR_HOURS,
        LOCATION,
    ];
}

/// Validated project parameters.
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "Warehouse",
///   "length_m": 10.0,
///   "width_m": 5.0,
///   "height_m": 3.0,
///   "floors": 2,
///   "material": "concrete",
///   "labor_hours": 200.0,
///   "location": "Denver"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSpecification {
    /// Project name
    pub name: String,

    /// Building length in meters
    pub length_m: f64,

    /// Building width in meters
    pub width_m: f64,

    /// Height per floor in meters
    pub height_m: f64,

    /// Number of floors
    pub floors: u32,

    /// Primary building material
    pub material: MaterialKind,

    /// Estimated labor hours
    pub labor_hours: f64,

    /// Project location (not used in cost calculation)
    pub location: String,
}

impl ProjectSpecification {
    /// Dimensions formatted as `L m × W m × H m`
    pub fn dimensions_label(&self) -> String {
        format!("{}m × {}m × {}m", self.length_m, self.width_m, self.height_m)
    }
}

/// Parse raw form fields, stopping at the first invalid field.
///
/// # Errors
///
/// `MissingField` or `InvalidInput` naming the first offending field.
pub fn parse(raw: &HashMap<String, String>) -> CostResult<ProjectSpecification> {
    let spec = ProjectSpecification {
        name: required_text(raw, fields::PROJECT_NAME, "Project name")?,
        length_m: positive_number(raw, fields::LENGTH, "Length")?,
        width_m: positive_number(raw, fields::WIDTH, "Width")?,
        height_m: positive_number(raw, fields::HEIGHT, "Height")?,
        floors: floor_count(raw)?,
        material: material(raw)?,
        labor_hours: labor_hours(raw)?,
        location: required_text(raw, fields::LOCATION, "Location")?,
    };
    volume_in_range(&spec)?;
    Ok(spec)
}

/// Parse raw form fields, collecting every violation.
///
/// Errors come back in field order, at most one per field.
pub fn parse_all(raw: &HashMap<String, String>) -> Result<ProjectSpecification, Vec<CostError>> {
    let mut errors = Vec::new();

    let name = keep(required_text(raw, fields::PROJECT_NAME, "Project name"), &mut errors);
    let length_m = keep(positive_number(raw, fields::LENGTH, "Length"), &mut errors);
    let width_m = keep(positive_number(raw, fields::WIDTH, "Width"), &mut errors);
    let height_m = keep(positive_number(raw, fields::HEIGHT, "Height"), &mut errors);
    let floors = keep(floor_count(raw), &mut errors);
    let material = keep(material(raw), &mut errors);
    let labor_hours = keep(labor_hours(raw), &mut errors);
    let location = keep(required_text(raw, fields::LOCATION, "Location"), &mut errors);

    match (name, length_m, width_m, height_m, floors, material, labor_hours, location) {
        (
            Some(name),
            Some(length_m),
            Some(width_m),
            Some(height_m),
            Some(floors),
            Some(material),
            Some(labor_hours),
            Some(location),
        ) => {
            let spec = ProjectSpecification {
                name,
                length_m,
                width_m,
                height_m,
                floors,
                material,
                labor_hours,
                location,
            };
            volume_in_range(&spec).map(|()| spec).map_err(|e| vec![e])
        }
        _ => Err(errors),
    }
}

/// Reject dimensions whose product overflows, naming the factor that tipped it.
fn volume_in_range(spec: &ProjectSpecification) -> CostResult<()> {
    let mut volume = 1.0;
    for (field, factor) in [
        (fields::LENGTH, spec.length_m),
        (fields::WIDTH, spec.width_m),
        (fields::HEIGHT, spec.height_m),
        (fields::FLOORS, f64::from(spec.floors)),
    ] {
        volume *= factor;
        if !volume.is_finite() {
            return Err(CostError::invalid_input(
                field,
                factor.to_string(),
                "Building volume is too large to estimate",
            ));
        }
    }
    Ok(())
}

fn keep<T>(result: CostResult<T>, errors: &mut Vec<CostError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            errors.push(e);
            None
        }
    }
}

fn raw_value<'a>(raw: &'a HashMap<String, String>, field: &str) -> CostResult<&'a str> {
    raw.get(field)
        .map(String::as_str)
        .ok_or_else(|| CostError::missing_field(field))
}

fn required_text(raw: &HashMap<String, String>, field: &str, label: &str) -> CostResult<String> {
    let value = raw_value(raw, field)?.trim();
    if value.is_empty() {
        return Err(CostError::invalid_input(field, value, format!("{} must not be empty", label)));
    }
    Ok(value.to_string())
}

fn number(raw: &HashMap<String, String>, field: &str, label: &str) -> CostResult<f64> {
    let text = raw_value(raw, field)?.trim();
    let value: f64 = text
        .parse()
        .map_err(|_| CostError::invalid_input(field, text, format!("{} must be a number", label)))?;
    if !value.is_finite() {
        return Err(CostError::invalid_input(field, text, format!("{} must be a finite number", label)));
    }
    // "-0" parses to negative zero
    Ok(if value == 0.0 { 0.0 } else { value })
}

fn positive_number(raw: &HashMap<String, String>, field: &str, label: &str) -> CostResult<f64> {
    let value = number(raw, field, label)?;
    if value <= 0.0 {
        return Err(CostError::invalid_input(
            field,
            value.to_string(),
            format!("{} must be greater than 0", label),
        ));
    }
    Ok(value)
}

fn floor_count(raw: &HashMap<String, String>) -> CostResult<u32> {
    let field = fields::FLOORS;
    let text = raw_value(raw, field)?.trim();
    let floors: i64 = text
        .parse()
        .map_err(|_| CostError::invalid_input(field, text, "Number of floors must be a whole number"))?;
    if floors < 1 {
        return Err(CostError::invalid_input(field, text, "Number of floors must be at least 1"));
    }
    u32::try_from(floors)
        .map_err(|_| CostError::invalid_input(field, text, "Number of floors is too large"))
}

fn material(raw: &HashMap<String, String>) -> CostResult<MaterialKind> {
    let field = fields::MATERIAL;
    let text = raw_value(raw, field)?;
    MaterialKind::from_str_flexible(text).map_err(|_| {
        CostError::invalid_input(
            field,
            text.trim(),
            "Material must be one of: concrete, steel, wood, brick",
        )
    })
}

fn labor_hours(raw: &HashMap<String, String>) -> CostResult<f64> {
    let field = fields::LABOR_HOURS;
    let value = number(raw, field, "Labor hours")?;
    if value < 0.0 {
        return Err(CostError::invalid_input(field, value.to_string(), "Labor hours cannot be negative"));
    }
    Ok(value)
}

/// Holder for the current project specification.
///
/// One writer (the input form) replaces the whole specification; any number of
/// readers (dashboard, optimization panel, report) take a snapshot. Readers
/// never see a partially updated value because only the `Arc` is swapped.
#[derive(Debug, Default)]
pub struct ProjectSlot {
    current: RwLock<Option<Arc<ProjectSpecification>>>,
}

impl ProjectSlot {
    /// Create an empty ("unset") slot
    pub fn new() -> Self {
        ProjectSlot::default()
    }

    /// Replace the current specification, returning the previous one
    pub fn replace(&self, spec: ProjectSpecification) -> Option<Arc<ProjectSpecification>> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        guard.replace(Arc::new(spec))
    }

    /// Snapshot of the current specification, `None` while unset
    pub fn current(&self) -> Option<Arc<ProjectSpecification>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_input(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn valid_input() -> HashMap<String, String> {
        raw_input(&[
            ("projectName", "Warehouse"),
            ("length", "10"),
            ("width", "5"),
            ("height", "3"),
            ("floors", "2"),
            ("material", "concrete"),
            ("laborHours", "200"),
            ("location", "Denver"),
        ])
    }

    fn with(field: &str, value: &str) -> HashMap<String, String> {
        let mut raw = valid_input();
        raw.insert(field.to_string(), value.to_string());
        raw
    }

    #[test]
    fn test_parse_valid() {
        let spec = parse(&valid_input()).unwrap();
        assert_eq!(spec.name, "Warehouse");
        assert_eq!(spec.length_m, 10.0);
        assert_eq!(spec.width_m, 5.0);
        assert_eq!(spec.height_m, 3.0);
        assert_eq!(spec.floors, 2);
        assert_eq!(spec.material, MaterialKind::Concrete);
        assert_eq!(spec.labor_hours, 200.0);
        assert_eq!(spec.location, "Denver");
    }

    #[test]
    fn test_parse_trims_text() {
        let mut raw = with("projectName", "  Office Block ");
        raw.insert("location".to_string(), " Austin ".to_string());
        raw.insert("length".to_string(), " 12.5 ".to_string());
        let spec = parse(&raw).unwrap();
        assert_eq!(spec.name, "Office Block");
        assert_eq!(spec.location, "Austin");
        assert_eq!(spec.length_m, 12.5);
    }

    #[test]
    fn test_rejects_empty_name() {
        let err = parse(&with("projectName", "   ")).unwrap_err();
        assert_eq!(err.field(), Some("projectName"));
        assert!(err.is_validation());
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        for field in ["length", "width", "height"] {
            let err = parse(&with(field, "-4")).unwrap_err();
            assert_eq!(err.field(), Some(field));

            let err = parse(&with(field, "0")).unwrap_err();
            assert_eq!(err.field(), Some(field));
        }
    }

    #[test]
    fn test_rejects_non_numeric() {
        let err = parse(&with("width", "five")).unwrap_err();
        assert_eq!(err.field(), Some("width"));
        assert_eq!(err.reason(), "Width must be a number");

        let err = parse(&with("height", "NaN")).unwrap_err();
        assert_eq!(err.field(), Some("height"));

        let err = parse(&with("length", "inf")).unwrap_err();
        assert_eq!(err.field(), Some("length"));
    }

    #[test]
    fn test_floors_rules() {
        let err = parse(&with("floors", "0")).unwrap_err();
        assert_eq!(err.field(), Some("floors"));
        assert_eq!(err.reason(), "Number of floors must be at least 1");

        let err = parse(&with("floors", "2.5")).unwrap_err();
        assert_eq!(err.field(), Some("floors"));

        let err = parse(&with("floors", "-3")).unwrap_err();
        assert_eq!(err.field(), Some("floors"));

        assert_eq!(parse(&with("floors", "1")).unwrap().floors, 1);
    }

    #[test]
    fn test_rejects_unknown_material() {
        let err = parse(&with("material", "granite")).unwrap_err();
        assert_eq!(err.field(), Some("material"));
        assert_eq!(err.error_code(), "INVALID_INPUT");

        assert_eq!(parse(&with("material", "Steel")).unwrap().material, MaterialKind::Steel);
    }

    #[test]
    fn test_labor_hours_rules() {
        assert_eq!(parse(&with("laborHours", "0")).unwrap().labor_hours, 0.0);

        let err = parse(&with("laborHours", "-1")).unwrap_err();
        assert_eq!(err.field(), Some("laborHours"));
    }

    #[test]
    fn test_negative_zero_labor_is_plain_zero() {
        let spec = parse(&with("laborHours", "-0")).unwrap();
        assert_eq!(spec.labor_hours, 0.0);
        assert!(spec.labor_hours.is_sign_positive());
    }

    #[test]
    fn test_rejects_overflowing_volume() {
        let mut raw = with("length", "1e200");
        raw.insert("width".to_string(), "1e200".to_string());

        let err = parse(&raw).unwrap_err();
        assert_eq!(err.field(), Some("width"));
        assert_eq!(err.reason(), "Building volume is too large to estimate");

        let errors = parse_all(&raw).unwrap_err();
        assert_eq!(errors, vec![err]);

        let mut raw = with("length", "1e300");
        raw.insert("floors".to_string(), "1000000".to_string());
        raw.insert("height".to_string(), "1e5".to_string());
        assert_eq!(parse(&raw).unwrap_err().field(), Some("floors"));
    }

    #[test]
    fn test_rejects_empty_location() {
        let err = parse(&with("location", "")).unwrap_err();
        assert_eq!(err.field(), Some("location"));
    }

    #[test]
    fn test_missing_field() {
        let mut raw = valid_input();
        raw.remove("material");
        let err = parse(&raw).unwrap_err();
        assert_eq!(err, CostError::missing_field("material"));
    }

    #[test]
    fn test_fail_fast_reports_first_field() {
        let mut raw = with("width", "-1");
        raw.insert("floors".to_string(), "0".to_string());
        let err = parse(&raw).unwrap_err();
        assert_eq!(err.field(), Some("width"));
    }

    #[test]
    fn test_parse_all_collects_errors_in_order() {
        let mut raw = with("width", "-1");
        raw.insert("floors".to_string(), "0".to_string());
        raw.insert("material".to_string(), "granite".to_string());
        raw.remove("location");

        let errors = parse_all(&raw).unwrap_err();
        let failed: Vec<_> = errors.iter().filter_map(|e| e.field()).collect();
        assert_eq!(failed, vec!["width", "floors", "material", "location"]);
    }

    #[test]
    fn test_parse_all_matches_parse_on_valid_input() {
        let raw = valid_input();
        assert_eq!(parse_all(&raw).unwrap(), parse(&raw).unwrap());
    }

    #[test]
    fn test_spec_serialization() {
        let spec = parse(&valid_input()).unwrap();
        let json = serde_json::to_string_pretty(&spec).unwrap();
        assert!(json.contains("\"material\": \"concrete\""));

        let roundtrip: ProjectSpecification = serde_json::from_str(&json).unwrap();
        assert_eq!(spec, roundtrip);
    }

    #[test]
    fn test_dimensions_label() {
        let spec = parse(&valid_input()).unwrap();
        assert_eq!(spec.dimensions_label(), "10m × 5m × 3m");
    }

    #[test]
    fn test_project_slot_swaps_whole_spec() {
        let slot = ProjectSlot::new();
        assert!(slot.current().is_none());

        let first = parse(&valid_input()).unwrap();
        assert!(slot.replace(first.clone()).is_none());

        let reader_snapshot = slot.current().unwrap();

        let second = parse(&with("projectName", "Annex")).unwrap();
        let previous = slot.replace(second).unwrap();

        // Earlier snapshots keep the old value intact
        assert_eq!(*previous, first);
        assert_eq!(reader_snapshot.name, "Warehouse");
        assert_eq!(slot.current().unwrap().name, "Annex");
    }
}
