//! Unified Evidence Confidence Framework (UECF).
//!
//! Converts binary evidentiary criteria about independent evidence streams
//! into per-stream weighted scores, an aggregate confidence percentage, and
//! a categorical tier (Verified / Plausible / Speculative).
//!
//! The library is pure computation over in-memory records: no I/O, no shared
//! state, no async. Loaders and writers live outside; every boundary type
//! here is serde-ready so they can serialize without adapters.
//!
//! ```
//! use uecf::{CriteriaRow, Criterion, EvaluationRun, Tier};
//!
//! let mut row = CriteriaRow::new("dig-site-a");
//! for criterion in Criterion::ALL {
//!     row = row.with(criterion.column(), 1);
//! }
//!
//! let run = EvaluationRun::from_criteria_table(&[row]).unwrap();
//! assert_eq!(run.summary().confidence, 100.0);
//! assert_eq!(run.summary().tier, Tier::Verified);
//! ```

pub mod aggregate;
pub mod criteria;
pub mod error;
pub mod independence;
pub mod run;
pub mod scoring;

pub use aggregate::{aggregate, classify, ConfidenceSummary, Tier};
pub use criteria::{CriteriaSet, Criterion, Dimension};
pub use error::{Error, ValidationError};
pub use independence::{derive_flags, CitationRecord, IndependenceFlags};
pub use run::{EvaluationRun, StreamRecord};
pub use scoring::{score_criteria, CriteriaRow, ScoredStream, StreamScore};
