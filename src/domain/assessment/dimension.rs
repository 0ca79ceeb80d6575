//! Dimension entity - a named competency axis.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DimensionId, ValidationError};

/// A named competency axis scored within an assessment,
/// e.g. "communication" or "strategic thinking".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    /// Unique identifier for this dimension.
    pub id: DimensionId,

    /// Display name.
    pub name: String,

    /// Optional description shown in reports.
    pub description: Option<String>,
}

impl Dimension {
    /// Create a new dimension.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self {
            id: DimensionId::new(),
            name,
            description: description.filter(|d| !d.trim().is_empty()),
        })
    }
}

/// Benchmark - an industry-level reference score for one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    /// Industry the reference applies to, lowercase.
    pub industry: String,

    /// The dimension being referenced.
    pub dimension_id: DimensionId,

    /// Reference score on the same 1..=5 scale as ratings.
    pub score: f64,
}

impl Benchmark {
    /// Create a benchmark, clamping nothing but validating the scale.
    pub fn new(
        industry: impl Into<String>,
        dimension_id: DimensionId,
        score: f64,
    ) -> Result<Self, ValidationError> {
        let industry = industry.into().trim().to_lowercase();
        if industry.is_empty() {
            return Err(ValidationError::empty_field("industry"));
        }
        if !(1.0..=5.0).contains(&score) {
            return Err(ValidationError::invalid_format(
                "score",
                format!("must be within the 1-5 rating scale, got {}", score),
            ));
        }
        Ok(Self {
            industry,
            dimension_id,
            score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_rejects_empty_name() {
        assert!(Dimension::new("", None).is_err());
    }

    #[test]
    fn dimension_drops_blank_description() {
        let d = Dimension::new("communication", Some("  ".into())).unwrap();
        assert_eq!(d.description, None);
    }

    #[test]
    fn benchmark_normalizes_industry() {
        let b = Benchmark::new(" Technology ", DimensionId::new(), 3.8).unwrap();
        assert_eq!(b.industry, "technology");
        assert_eq!(b.score, 3.8);
    }

    #[test]
    fn benchmark_rejects_off_scale_scores() {
        assert!(Benchmark::new("technology", DimensionId::new(), 0.5).is_err());
        assert!(Benchmark::new("technology", DimensionId::new(), 5.1).is_err());
    }
}
