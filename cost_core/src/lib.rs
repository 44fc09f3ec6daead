//! # cost_core - Construction Cost Estimation Engine
//!
//! `cost_core` turns building-project parameters into a cost estimate, a cost
//! breakdown and an optimization comparison. Every presentation surface
//! (dashboard, optimization panel, printable report) calls into this crate, so
//! they all show the same numbers.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **One formula**: A single calculator shared by every consumer
//! - **JSON-First**: All outputs implement Serialize/Deserialize
//! - **Rich Errors**: Validation errors name the offending field
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//! use cost_core::calculations::{breakdown, estimate};
//! use cost_core::project::parse;
//! use cost_core::rates::RateTable;
//!
//! let raw: HashMap<String, String> = [
//!     ("projectName", "Warehouse"),
//!     ("length", "10"),
//!     ("width", "5"),
//!     ("height", "3"),
//!     ("floors", "2"),
//!     ("material", "wood"),
//!     ("laborHours", "0"),
//!     ("location", "Boise"),
//! ]
//! .into_iter()
//! .map(|(k, v)| (k.to_string(), v.to_string()))
//! .collect();
//!
//! let spec = parse(&raw).unwrap();
//! let result = estimate(&spec, RateTable::global()).unwrap();
//! assert_eq!(result.total().to_string(), "$27600.00");
//!
//! let entries = breakdown(&result);
//! assert_eq!(entries[1].percentage_of_total, 0.0);
//! ```
//!
//! ## Modules
//!
//! - [`rates`] - Material unit costs, labor and overhead rates
//! - [`project`] - Project specification and input validation
//! - [`calculations`] - Cost calculator and breakdown builder
//! - [`optimization`] - Cost-reduction suggestion catalog
//! - [`views`] - Dashboard, optimization and report view models
//! - [`pdf`] - Printable report rendering
//! - [`config`] - TOML configuration overrides
//! - [`units`] - Unit wrappers and presentation rounding
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod config;
pub mod errors;
pub mod optimization;
pub mod pdf;
pub mod project;
pub mod rates;
pub mod units;
pub mod views;

// Re-export commonly used types at crate root for convenience
pub use calculations::{breakdown, comparative, estimate, CostEstimate, SavingsFactors};
pub use config::EstimatorConfig;
pub use errors::{CostError, CostResult};
pub use project::{parse, parse_all, ProjectSlot, ProjectSpecification};
pub use rates::{MaterialKind, RateTable};
