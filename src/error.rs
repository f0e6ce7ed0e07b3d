//! Error types surfaced by this crate.
//!
//! Mirrors the error-enum style used throughout the retrieval pack's SAT-solver teacher: a flat,
//! hand-written enum with one variant per failure kind, manual `Display`/`Error` impls, and no
//! `thiserror`/`anyhow` dependency.

use std::fmt;

use crate::algebra::atom::Signature;
use crate::algebra::formula::FormulaConstruct;

/// A failure raised by some operation in this crate.
#[derive(Debug, Clone, PartialEq)]
pub enum ClauseError {
    /// A path referenced a signature not present in the predicate schema (§4.5).
    MissingSchema(Signature),

    /// The evidence database refused to decode a ground atom (§4.5).
    EvidenceDecodeError {
        signature: Signature,
        atom_id: u64,
        cause: String,
    },

    /// Existential elimination required a domain absent from the supplied constants mapping (§4.1).
    SchemaError(String),

    /// The hybrid distributor encountered a construct that was not atomic, a negated atomic,
    /// an `And`, or an `Or` — indicating the normalizer did not run to completion (§4.2).
    EncodingError(FormulaConstruct),
}

impl fmt::Display for ClauseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClauseError::MissingSchema(sig) => {
                write!(f, "no schema entry for signature {sig}")
            }
            ClauseError::EvidenceDecodeError {
                signature,
                atom_id,
                cause,
            } => write!(
                f,
                "failed to decode atom {atom_id} of signature {signature}: {cause}"
            ),
            ClauseError::SchemaError(domain) => {
                write!(f, "no constants registered for domain {domain:?}")
            }
            ClauseError::EncodingError(construct) => write!(
                f,
                "expected an atomic, negated atomic, conjunction, or disjunction while encoding, got {construct:?}"
            ),
        }
    }
}

impl std::error::Error for ClauseError {}

/// Convenience alias used throughout the public API.
pub type Result<T> = std::result::Result<T, ClauseError>;
