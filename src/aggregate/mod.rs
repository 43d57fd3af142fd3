//! Confidence aggregation and tier classification.
//!
//! Folds every scored stream in a run into a single confidence percentage,
//! weighted by each stream's independence sub-score, and maps it onto the
//! Verified / Plausible / Speculative tiers.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::criteria::Dimension;
use crate::error::Error;
use crate::scoring::{StreamScore, STREAM_MAX_WEIGHT};

/// Strictly above this confidence a run is Verified.
pub const VERIFIED_ABOVE: f64 = 85.0;

/// At or above this confidence (and not Verified) a run is Plausible.
pub const PLAUSIBLE_FLOOR: f64 = 60.0;

/// Values this close to either boundary snap to Plausible, absorbing
/// floating-point representation error without a general tolerance compare.
pub const BOUNDARY_EPSILON: f64 = 1e-12;

/// Categorical confidence tier for a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tier {
    Verified,
    Plausible,
    Speculative,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Verified => write!(f, "Verified"),
            Tier::Plausible => write!(f, "Plausible"),
            Tier::Speculative => write!(f, "Speculative"),
        }
    }
}

/// Aggregate confidence for one evaluation run.
///
/// Wire keys match the original summary report consumed by the report
/// writer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceSummary {
    /// Number of streams in the run.
    #[serde(rename = "N")]
    pub streams: usize,
    /// Σ over streams of `w·d`.
    pub numerator: f64,
    /// `51 · N`: every stream at maximum weight and full independence.
    pub denominator: f64,
    /// Percentage in `[0, 100]` for valid input.
    pub confidence: f64,
    pub tier: Tier,
}

/// Classify a confidence percentage into its tier.
///
/// The rubric's boundary policy is asymmetric and exact: 85 is Plausible
/// (strict `>` for Verified), 60 is Plausible (inclusive floor). The epsilon
/// snap handles values that are the two boundary constants up to
/// floating-point representation error.
pub fn classify(confidence: f64) -> Tier {
    if (confidence - VERIFIED_ABOVE).abs() < BOUNDARY_EPSILON
        || (confidence - PLAUSIBLE_FLOOR).abs() < BOUNDARY_EPSILON
    {
        return Tier::Plausible;
    }
    if confidence > VERIFIED_ABOVE {
        Tier::Verified
    } else if confidence >= PLAUSIBLE_FLOOR {
        Tier::Plausible
    } else {
        Tier::Speculative
    }
}

/// Aggregate all scored streams of a run into a confidence summary.
///
/// Zero streams is a reported error; the division is never attempted.
pub fn aggregate(scores: &[StreamScore]) -> Result<ConfidenceSummary, Error> {
    if scores.is_empty() {
        return Err(Error::EmptyRun);
    }

    let numerator: f64 = scores
        .iter()
        .map(|s| f64::from(s.weight) * f64::from(s.independence))
        .sum();
    let per_stream_max = u32::from(STREAM_MAX_WEIGHT) * u32::from(Dimension::Independence.cap());
    let denominator = f64::from(per_stream_max) * scores.len() as f64;
    let confidence = 100.0 * numerator / denominator;
    let tier = classify(confidence);

    debug!(streams = scores.len(), confidence, %tier, "aggregated run confidence");

    Ok(ConfidenceSummary {
        streams: scores.len(),
        numerator,
        denominator,
        confidence,
        tier,
    })
}
