//! # Optimization Suggestions
//!
//! The static catalog of cost-reduction ideas shown on the optimization panel
//! and summarized in the printable report.
//!
//! The savings ranges are indicative only. The comparative table does not
//! derive its factors from these suggestions; it uses the configured
//! [`SavingsFactors`](crate::calculations::SavingsFactors) instead.

use serde::{Deserialize, Serialize};

/// Relative rating used for impact and implementation complexity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rating {
    Low,
    Medium,
    High,
}

impl Rating {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Rating::Low => "Low",
            Rating::Medium => "Medium",
            Rating::High => "High",
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Indicative savings range, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavingsRange {
    pub low_percent: f64,
    pub high_percent: f64,
}

impl std::fmt::Display for SavingsRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}%", self.low_percent, self.high_percent)
    }
}

/// A cost-reduction idea.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    pub description: String,
    pub savings: SavingsRange,
    pub impact: Rating,
    pub complexity: Rating,
    /// One-line form used in the report's recommendation list
    pub recommendation: String,
}

/// The suggestion catalog, in display order.
pub fn catalog() -> Vec<Suggestion> {
    vec![
        Suggestion {
            title: "Alternative Materials".to_string(),
            description: "Consider using precast concrete elements instead of traditional concrete \
                          for faster construction and reduced labor costs."
                .to_string(),
            savings: SavingsRange {
                low_percent: 15.0,
                high_percent: 20.0,
            },
            impact: Rating::Medium,
            complexity: Rating::Medium,
            recommendation: "Consider using precast concrete elements to reduce labor costs by up to 20%"
                .to_string(),
        },
        Suggestion {
            title: "Labor Optimization".to_string(),
            description: "Implement modular construction techniques to reduce on-site labor hours."
                .to_string(),
            savings: SavingsRange {
                low_percent: 10.0,
                high_percent: 15.0,
            },
            impact: Rating::High,
            complexity: Rating::High,
            recommendation: "Implement modular construction techniques for faster completion".to_string(),
        },
        Suggestion {
            title: "Design Efficiency".to_string(),
            description: "Optimize structural design to reduce material usage while maintaining \
                          strength requirements."
                .to_string(),
            savings: SavingsRange {
                low_percent: 8.0,
                high_percent: 12.0,
            },
            impact: Rating::Medium,
            complexity: Rating::Low,
            recommendation: "Optimize structural design to reduce material usage while maintaining \
                             strength requirements"
                .to_string(),
        },
    ]
}
