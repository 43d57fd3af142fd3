//! Evaluation runs: the end-to-end flow over one claim's streams.
//!
//! Wires the independence flag deriver, the stream scorer, and the
//! confidence aggregator together. A constructed run is an immutable
//! snapshot; callers read its scored streams and summary, nothing mutates.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use crate::aggregate::{aggregate, ConfidenceSummary};
use crate::criteria::Criterion;
use crate::error::Error;
use crate::independence::{derive_flags, CitationRecord};
use crate::scoring::{parse_table, CriteriaRow, ScoredStream};

/// Full input for one stream: criteria columns plus citation metadata.
///
/// The three independence columns need not be supplied; they are derived
/// from the citation metadata and override any supplied values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamRecord {
    pub stream: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub funders: Vec<String>,
    #[serde(default)]
    pub top3_refs: Vec<String>,
    #[serde(flatten)]
    pub criteria: BTreeMap<String, i64>,
}

/// One claim's streams, scored and aggregated. Read-only once built.
#[derive(Debug, Clone)]
pub struct EvaluationRun {
    streams: Vec<ScoredStream>,
    summary: ConfidenceSummary,
}

impl EvaluationRun {
    /// Evaluate a run end to end: derive independence flags, merge them into
    /// the criteria, validate, score every stream, aggregate.
    ///
    /// Validation failures and the zero-stream case are reported before any
    /// score is produced.
    pub fn evaluate(records: &[StreamRecord]) -> Result<Self, Error> {
        if records.is_empty() {
            return Err(Error::EmptyRun);
        }

        let citations: Vec<CitationRecord> = records
            .iter()
            .map(|r| CitationRecord {
                stream: r.stream.clone(),
                authors: r.authors.clone(),
                funders: r.funders.clone(),
                top3_refs: r.top3_refs.clone(),
            })
            .collect();
        let flags = derive_flags(&citations);

        let rows: Vec<CriteriaRow> = records
            .iter()
            .zip(&flags)
            .map(|(record, flag)| {
                let mut row = CriteriaRow::new(record.stream.clone());
                row.values = record.criteria.clone();
                row.values.insert(
                    Criterion::DistinctAuthorship.column().to_string(),
                    flag.distinct_authorship as i64,
                );
                row.values.insert(
                    Criterion::NoSharedFunding.column().to_string(),
                    flag.no_shared_funding as i64,
                );
                row.values.insert(
                    Criterion::NoTop3ReferenceOverlap.column().to_string(),
                    flag.no_top3_reference_overlap as i64,
                );
                row
            })
            .collect();

        Self::from_criteria_table(&rows)
    }

    /// Score and aggregate a criteria table that already carries all 15
    /// columns, including the three independence flags.
    pub fn from_criteria_table(rows: &[CriteriaRow]) -> Result<Self, Error> {
        if rows.is_empty() {
            return Err(Error::EmptyRun);
        }

        let parsed = parse_table(rows).map_err(Error::InvalidCriteria)?;
        let streams: Vec<ScoredStream> = parsed
            .into_iter()
            .map(|(stream, criteria)| ScoredStream::new(stream, criteria))
            .collect();

        let scores: Vec<_> = streams.iter().map(|s| s.score).collect();
        let summary = aggregate(&scores)?;

        debug!(
            streams = streams.len(),
            confidence = summary.confidence,
            tier = %summary.tier,
            "evaluation run complete"
        );

        Ok(Self { streams, summary })
    }

    /// Scored streams in input order.
    pub fn streams(&self) -> &[ScoredStream] {
        &self.streams
    }

    /// Aggregate confidence for the whole run.
    pub fn summary(&self) -> &ConfidenceSummary {
        &self.summary
    }
}
