//! The fixed UECF criteria schema.
//!
//! The rubric defines exactly 15 binary criteria grouped into four scoring
//! dimensions, each with its own cap. The schema is static: representing it
//! as enums rather than free-form column lookups means a `CriteriaSet` that
//! exists at all is already well-formed.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One of the four scoring dimensions of the rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Robustness,
    Falsifiability,
    Independence,
    CrossCorroboration,
}

impl Dimension {
    /// Maximum score the dimension can contribute to a stream's weight.
    pub fn cap(self) -> u8 {
        match self {
            Dimension::Robustness => 5,
            Dimension::Falsifiability => 5,
            Dimension::Independence => 3,
            Dimension::CrossCorroboration => 4,
        }
    }
}

/// One of the 15 fixed binary criteria.
///
/// Variant order matches the canonical column order of the criteria table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    PeerReviewed,
    ReplicatedGe2,
    PhysicalEvidence,
    Conf95OrHigher,
    DataPublic,
    SpecificDates,
    TestMethod,
    Counterfactuals,
    MultiDisprovables,
    IndepTestable,
    DistinctAuthorship,
    NoSharedFunding,
    NoTop3ReferenceOverlap,
    CrosscatPlus2,
    IndepLitPlus2,
}

/// Total number of criteria in the schema.
pub const CRITERIA_COUNT: usize = 15;

impl Criterion {
    /// All criteria in canonical column order.
    pub const ALL: [Criterion; CRITERIA_COUNT] = [
        Criterion::PeerReviewed,
        Criterion::ReplicatedGe2,
        Criterion::PhysicalEvidence,
        Criterion::Conf95OrHigher,
        Criterion::DataPublic,
        Criterion::SpecificDates,
        Criterion::TestMethod,
        Criterion::Counterfactuals,
        Criterion::MultiDisprovables,
        Criterion::IndepTestable,
        Criterion::DistinctAuthorship,
        Criterion::NoSharedFunding,
        Criterion::NoTop3ReferenceOverlap,
        Criterion::CrosscatPlus2,
        Criterion::IndepLitPlus2,
    ];

    /// The three criteria filled in by the independence flag deriver.
    pub const INDEPENDENCE: [Criterion; 3] = [
        Criterion::DistinctAuthorship,
        Criterion::NoSharedFunding,
        Criterion::NoTop3ReferenceOverlap,
    ];

    /// Canonical column name in the criteria table.
    pub fn column(self) -> &'static str {
        match self {
            Criterion::PeerReviewed => "peer_reviewed",
            Criterion::ReplicatedGe2 => "replicated_ge2",
            Criterion::PhysicalEvidence => "physical_evidence",
            Criterion::Conf95OrHigher => "conf_95_or_higher",
            Criterion::DataPublic => "data_public",
            Criterion::SpecificDates => "specific_dates",
            Criterion::TestMethod => "test_method",
            Criterion::Counterfactuals => "counterfactuals",
            Criterion::MultiDisprovables => "multi_disprovables",
            Criterion::IndepTestable => "indep_testable",
            Criterion::DistinctAuthorship => "distinct_authorship",
            Criterion::NoSharedFunding => "no_shared_funding",
            Criterion::NoTop3ReferenceOverlap => "no_top3_reference_overlap",
            Criterion::CrosscatPlus2 => "crosscat_plus2",
            Criterion::IndepLitPlus2 => "indep_lit_plus2",
        }
    }

    /// Dimension the criterion is scored under.
    pub fn dimension(self) -> Dimension {
        match self {
            Criterion::PeerReviewed
            | Criterion::ReplicatedGe2
            | Criterion::PhysicalEvidence
            | Criterion::Conf95OrHigher
            | Criterion::DataPublic => Dimension::Robustness,
            Criterion::SpecificDates
            | Criterion::TestMethod
            | Criterion::Counterfactuals
            | Criterion::MultiDisprovables
            | Criterion::IndepTestable => Dimension::Falsifiability,
            Criterion::DistinctAuthorship
            | Criterion::NoSharedFunding
            | Criterion::NoTop3ReferenceOverlap => Dimension::Independence,
            Criterion::CrosscatPlus2 | Criterion::IndepLitPlus2 => {
                Dimension::CrossCorroboration
            }
        }
    }
}

/// A complete assignment of all 15 criteria for one stream.
///
/// Always well-formed: every criterion is present and strictly binary.
/// Untrusted rows are converted through [`crate::scoring::parse_row`], which
/// reports schema and domain errors instead of defaulting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CriteriaSet {
    satisfied: [bool; CRITERIA_COUNT],
}

impl CriteriaSet {
    /// All criteria unsatisfied.
    pub fn empty() -> Self {
        Self::default()
    }

    /// All criteria satisfied.
    pub fn full() -> Self {
        Self {
            satisfied: [true; CRITERIA_COUNT],
        }
    }

    pub fn get(&self, criterion: Criterion) -> bool {
        self.satisfied[criterion as usize]
    }

    pub fn set(&mut self, criterion: Criterion, value: bool) {
        self.satisfied[criterion as usize] = value;
    }

    /// Number of satisfied criteria in one dimension, before any cap.
    pub fn count(&self, dimension: Dimension) -> u8 {
        Criterion::ALL
            .iter()
            .filter(|c| c.dimension() == dimension && self.get(**c))
            .count() as u8
    }
}

// Wire format for the tabular writer: one 0/1 entry per canonical column.
impl Serialize for CriteriaSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(CRITERIA_COUNT))?;
        for criterion in Criterion::ALL {
            map.serialize_entry(criterion.column(), &(self.get(criterion) as u8))?;
        }
        map.end()
    }
}
