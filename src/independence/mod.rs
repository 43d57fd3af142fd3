//! Independence flag derivation.
//!
//! Compares every stream's citation metadata against every other stream in
//! the run and produces the three binary independence criteria: distinct
//! authorship, no shared funding, and no top-3 reference overlap.

use std::collections::HashSet;

use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

/// Citation metadata for one stream, as supplied by the metadata loader.
///
/// Missing relational fields deserialize as empty sets: absent citation
/// metadata is a normal condition, not an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CitationRecord {
    pub stream: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub funders: Vec<String>,
    #[serde(default)]
    pub top3_refs: Vec<String>,
}

/// Derived independence flags for one stream.
///
/// Serializes each flag as 0/1 for the tabular writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndependenceFlags {
    pub stream: String,
    #[serde(serialize_with = "as_bit")]
    pub distinct_authorship: bool,
    #[serde(serialize_with = "as_bit")]
    pub no_shared_funding: bool,
    #[serde(serialize_with = "as_bit")]
    pub no_top3_reference_overlap: bool,
}

fn as_bit<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(*value as u8)
}

/// Derive the three independence flags for every stream in a run.
///
/// Pairwise set-intersection over all other streams, self-comparison
/// excluded. A flag drops to 0 as soon as any other stream overlaps, so the
/// result is symmetric and independent of traversal order. A single-stream
/// run has nothing to conflict with and yields all flags set.
pub fn derive_flags(records: &[CitationRecord]) -> Vec<IndependenceFlags> {
    let authors: Vec<HashSet<&str>> = records
        .iter()
        .map(|r| r.authors.iter().map(String::as_str).collect())
        .collect();
    let funders: Vec<HashSet<&str>> = records
        .iter()
        .map(|r| r.funders.iter().map(String::as_str).collect())
        .collect();
    let refs: Vec<HashSet<&str>> = records
        .iter()
        .map(|r| r.top3_refs.iter().map(String::as_str).collect())
        .collect();

    let flags: Vec<IndependenceFlags> = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let mut distinct_authorship = true;
            let mut no_shared_funding = true;
            let mut no_top3_reference_overlap = true;

            for j in 0..records.len() {
                if i == j {
                    continue;
                }
                if !authors[i].is_disjoint(&authors[j]) {
                    distinct_authorship = false;
                }
                if !funders[i].is_disjoint(&funders[j]) {
                    no_shared_funding = false;
                }
                if !refs[i].is_disjoint(&refs[j]) {
                    no_top3_reference_overlap = false;
                }
            }

            IndependenceFlags {
                stream: record.stream.clone(),
                distinct_authorship,
                no_shared_funding,
                no_top3_reference_overlap,
            }
        })
        .collect();

    debug!(
        streams = records.len(),
        fully_independent = flags
            .iter()
            .filter(|f| f.distinct_authorship && f.no_shared_funding && f.no_top3_reference_overlap)
            .count(),
        "derived independence flags"
    );

    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(stream: &str, authors: &[&str], funders: &[&str], refs: &[&str]) -> CitationRecord {
        CitationRecord {
            stream: stream.to_string(),
            authors: authors.iter().map(|s| s.to_string()).collect(),
            funders: funders.iter().map(|s| s.to_string()).collect(),
            top3_refs: refs.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_single_stream_is_fully_independent() {
        let flags = derive_flags(&[record("a", &["smith"], &["nsf"], &["r1", "r2", "r3"])]);
        assert_eq!(flags.len(), 1);
        assert!(flags[0].distinct_authorship);
        assert!(flags[0].no_shared_funding);
        assert!(flags[0].no_top3_reference_overlap);
    }

    #[test]
    fn test_shared_author_clears_flag_on_both_streams() {
        let flags = derive_flags(&[
            record("a", &["smith", "jones"], &[], &[]),
            record("b", &["jones"], &[], &[]),
            record("c", &["lee"], &[], &[]),
        ]);
        assert!(!flags[0].distinct_authorship);
        assert!(!flags[1].distinct_authorship);
        assert!(flags[2].distinct_authorship);
    }

    #[test]
    fn test_shared_funder_only_affects_funding_flag() {
        let flags = derive_flags(&[
            record("a", &["smith"], &["nsf"], &["r1"]),
            record("b", &["lee"], &["nsf"], &["r2"]),
        ]);
        for f in &flags {
            assert!(f.distinct_authorship);
            assert!(!f.no_shared_funding);
            assert!(f.no_top3_reference_overlap);
        }
    }

    #[test]
    fn test_reference_overlap_detected_across_positions() {
        // Overlap is a set test; position within the top-3 list is irrelevant.
        let flags = derive_flags(&[
            record("a", &[], &[], &["r1", "r2", "r3"]),
            record("b", &[], &[], &["r9", "r8", "r1"]),
        ]);
        assert!(!flags[0].no_top3_reference_overlap);
        assert!(!flags[1].no_top3_reference_overlap);
    }

    #[test]
    fn test_missing_metadata_treated_as_empty() {
        let json = r#"[{"stream": "a"}, {"stream": "b", "authors": ["x"]}]"#;
        let records: Vec<CitationRecord> = serde_json::from_str(json).unwrap();
        let flags = derive_flags(&records);
        // Empty sets never intersect, so both streams stay independent.
        assert!(flags.iter().all(|f| f.distinct_authorship));
        assert!(flags.iter().all(|f| f.no_shared_funding));
        assert!(flags.iter().all(|f| f.no_top3_reference_overlap));
    }

    #[test]
    fn test_result_is_order_invariant() {
        let forward = vec![
            record("a", &["smith"], &["nsf"], &["r1"]),
            record("b", &["smith"], &["erc"], &["r2"]),
            record("c", &["lee"], &["erc"], &["r1"]),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let mut from_forward = derive_flags(&forward);
        let mut from_reversed = derive_flags(&reversed);
        from_forward.sort_by(|x, y| x.stream.cmp(&y.stream));
        from_reversed.sort_by(|x, y| x.stream.cmp(&y.stream));
        assert_eq!(from_forward, from_reversed);
    }

    #[test]
    fn test_flags_serialize_as_binary() {
        let flags = derive_flags(&[
            record("a", &["smith"], &[], &[]),
            record("b", &["smith"], &[], &[]),
        ]);
        let json = serde_json::to_value(&flags[0]).unwrap();
        assert_eq!(json["stream"], "a");
        assert_eq!(json["distinct_authorship"], 0);
        assert_eq!(json["no_shared_funding"], 1);
        assert_eq!(json["no_top3_reference_overlap"], 1);
    }
}
