use serde::Serialize;
use tracing::trace;

use crate::criteria::{CriteriaSet, Dimension};

/// Maximum total weight a single stream can carry.
///
/// The four dimension caps sum to exactly 17, so the final clip in
/// [`score_criteria`] is a safety net rather than a normal path.
pub const STREAM_MAX_WEIGHT: u8 = 17;

/// Per-dimension sub-scores and total weight for one stream.
///
/// Wire names are the single-letter columns of the augmented scoring table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreamScore {
    /// Robustness sub-score, capped at 5.
    #[serde(rename = "r")]
    pub robustness: u8,
    /// Falsifiability sub-score, capped at 5.
    #[serde(rename = "f")]
    pub falsifiability: u8,
    /// Independence sub-score, capped at 3.
    #[serde(rename = "d")]
    pub independence: u8,
    /// Cross-corroboration sub-score: each criterion counts double, capped at 4.
    #[serde(rename = "c")]
    pub corroboration: u8,
    /// Total weight, capped at 17.
    #[serde(rename = "w")]
    pub weight: u8,
}

/// Score one stream's criteria.
///
/// Each dimension sum is clipped at its own cap, then the total is clipped
/// again at [`STREAM_MAX_WEIGHT`]. The outer clip is unreachable for binary
/// input (the caps sum to 17) but kept as rubric parity; the engine tests
/// sweep every valid combination to document that it stays dead.
pub fn score_criteria(criteria: &CriteriaSet) -> StreamScore {
    let robustness = criteria
        .count(Dimension::Robustness)
        .min(Dimension::Robustness.cap());
    let falsifiability = criteria
        .count(Dimension::Falsifiability)
        .min(Dimension::Falsifiability.cap());
    let independence = criteria
        .count(Dimension::Independence)
        .min(Dimension::Independence.cap());
    let corroboration = (criteria.count(Dimension::CrossCorroboration) * 2)
        .min(Dimension::CrossCorroboration.cap());

    let weight =
        (robustness + falsifiability + independence + corroboration).min(STREAM_MAX_WEIGHT);

    let score = StreamScore {
        robustness,
        falsifiability,
        independence,
        corroboration,
        weight,
    };
    trace!(?score, "scored stream criteria");
    score
}

/// One stream after scoring: the validated criteria plus its scores.
///
/// Serializes as the augmented table row (stream id, the 15 criterion
/// columns as 0/1, then `r,f,d,c,w`).
#[derive(Debug, Clone, Serialize)]
pub struct ScoredStream {
    pub stream: String,
    #[serde(flatten)]
    pub criteria: CriteriaSet,
    #[serde(flatten)]
    pub score: StreamScore,
}

impl ScoredStream {
    pub fn new(stream: impl Into<String>, criteria: CriteriaSet) -> Self {
        let score = score_criteria(&criteria);
        Self {
            stream: stream.into(),
            criteria,
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::{Criterion, CRITERIA_COUNT};
    use proptest::prelude::*;

    fn set_from_bits(bits: u32) -> CriteriaSet {
        let mut set = CriteriaSet::empty();
        for (i, criterion) in Criterion::ALL.into_iter().enumerate() {
            set.set(criterion, bits & (1 << i) != 0);
        }
        set
    }

    #[test]
    fn test_empty_criteria_score_zero() {
        let score = score_criteria(&CriteriaSet::empty());
        assert_eq!(
            score,
            StreamScore {
                robustness: 0,
                falsifiability: 0,
                independence: 0,
                corroboration: 0,
                weight: 0,
            }
        );
    }

    #[test]
    fn test_full_criteria_hit_every_cap() {
        let score = score_criteria(&CriteriaSet::full());
        assert_eq!(score.robustness, 5);
        assert_eq!(score.falsifiability, 5);
        assert_eq!(score.independence, 3);
        assert_eq!(score.corroboration, 4);
        assert_eq!(score.weight, 17);
    }

    #[test]
    fn test_corroboration_criteria_count_double() {
        let mut set = CriteriaSet::empty();
        set.set(Criterion::CrosscatPlus2, true);
        assert_eq!(score_criteria(&set).corroboration, 2);

        set.set(Criterion::IndepLitPlus2, true);
        assert_eq!(score_criteria(&set).corroboration, 4);
    }

    #[test]
    fn test_weight_sums_the_clipped_dimensions() {
        let mut set = CriteriaSet::empty();
        set.set(Criterion::PeerReviewed, true);
        set.set(Criterion::ReplicatedGe2, true);
        set.set(Criterion::TestMethod, true);
        set.set(Criterion::DistinctAuthorship, true);
        set.set(Criterion::CrosscatPlus2, true);

        let score = score_criteria(&set);
        assert_eq!(score.robustness, 2);
        assert_eq!(score.falsifiability, 1);
        assert_eq!(score.independence, 1);
        assert_eq!(score.corroboration, 2);
        assert_eq!(score.weight, 6);
    }

    #[test]
    fn test_outer_weight_clip_is_unreachable_for_binary_input() {
        // Exhaustive: the dimension caps already bound the sum at 17, so the
        // final min never fires for any of the 2^15 valid combinations.
        for bits in 0..(1u32 << CRITERIA_COUNT) {
            let score = score_criteria(&set_from_bits(bits));
            let raw_total = score.robustness
                + score.falsifiability
                + score.independence
                + score.corroboration;
            assert!(raw_total <= STREAM_MAX_WEIGHT);
            assert_eq!(score.weight, raw_total);
        }
    }

    #[test]
    fn test_scored_stream_serializes_augmented_row() {
        let scored = ScoredStream::new("s1", CriteriaSet::full());
        let json = serde_json::to_value(&scored).unwrap();
        assert_eq!(json["stream"], "s1");
        assert_eq!(json["peer_reviewed"], 1);
        assert_eq!(json["r"], 5);
        assert_eq!(json["f"], 5);
        assert_eq!(json["d"], 3);
        assert_eq!(json["c"], 4);
        assert_eq!(json["w"], 17);
    }

    proptest! {
        #[test]
        fn prop_sub_scores_stay_within_caps(bits in 0u32..(1 << CRITERIA_COUNT)) {
            let score = score_criteria(&set_from_bits(bits));
            prop_assert!(score.robustness <= 5);
            prop_assert!(score.falsifiability <= 5);
            prop_assert!(score.independence <= 3);
            prop_assert!(score.corroboration <= 4);
            prop_assert!(score.weight <= STREAM_MAX_WEIGHT);
        }

        #[test]
        fn prop_weight_monotone_in_satisfied_criteria(
            bits in 0u32..(1 << CRITERIA_COUNT),
            flip in 0usize..CRITERIA_COUNT,
        ) {
            // Turning one more criterion on never lowers the weight.
            let base = set_from_bits(bits & !(1 << flip));
            let mut raised = base;
            raised.set(Criterion::ALL[flip], true);
            prop_assert!(score_criteria(&raised).weight >= score_criteria(&base).weight);
        }
    }
}
