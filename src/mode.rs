//! The mode-declaration policy and related read-only inputs (§3, §6).
//!
//! `PredicateSchema`, `ModeDeclarations`, `ConstantsMap`, and anything implementing [`Evidence`]
//! are treated as read-only for the duration of a call and may be shared across worker threads
//! (§5 "Shared-resource policy").

use rustc_hash::FxHashMap;

use crate::algebra::atom::Signature;
use crate::algebra::term::Domain;

/// A finite ordered set of ground symbols belonging to one domain.
pub type ConstantsSet = Vec<String>;

/// Maps a domain name to its constants, supplied by the caller for existential elimination
/// (§4.1) and otherwise unused.
pub type ConstantsMap = FxHashMap<Domain, ConstantsSet>;

/// The ordered list of domain names for each argument position of a predicate.
pub type PredicateSchema = FxHashMap<Signature, Vec<Domain>>;

/// Per-argument-position mode policy (§3 Glossary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placemarker {
    /// This argument position must remain a ground constant; never variabilized.
    pub constant: bool,
    /// This argument position is an input to the predicate.
    pub input: bool,
    /// This argument position is an output of the predicate.
    pub output: bool,
}

impl Placemarker {
    pub fn constant() -> Self {
        Self {
            constant: true,
            ..Default::default()
        }
    }

    pub fn input() -> Self {
        Self {
            input: true,
            ..Default::default()
        }
    }

    pub fn output() -> Self {
        Self {
            output: true,
            ..Default::default()
        }
    }
}

/// Maps a signature to its ordered placemarkers.
pub type ModeDeclarations = FxHashMap<Signature, Vec<Placemarker>>;

/// The evidence collaborator (§6): decodes a ground atom identifier into its ordered constants.
///
/// Implementations may fail (e.g. a dangling atom id); failures are surfaced to the caller as
/// [`crate::error::ClauseError::EvidenceDecodeError`] by the Path Variabilizer.
pub trait Evidence {
    fn decode(&self, signature: &Signature, atom_id: u64) -> Result<Vec<String>, String>;
}

/// A simple in-memory [`Evidence`] implementation backed by an explicit table, useful for tests
/// and small embedded deployments.
#[derive(Debug, Clone, Default)]
pub struct MapEvidence {
    table: FxHashMap<(Signature, u64), Vec<String>>,
}

impl MapEvidence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, signature: Signature, atom_id: u64, constants: Vec<String>) {
        self.table.insert((signature, atom_id), constants);
    }
}

impl Evidence for MapEvidence {
    fn decode(&self, signature: &Signature, atom_id: u64) -> Result<Vec<String>, String> {
        self.table
            .get(&(signature.clone(), atom_id))
            .cloned()
            .ok_or_else(|| format!("no evidence recorded for atom {atom_id} of {signature}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_evidence_round_trips() {
        let mut evidence = MapEvidence::new();
        let sig = Signature::new("p", 1);
        evidence.insert(sig.clone(), 7, vec!["alice".to_string()]);
        assert_eq!(evidence.decode(&sig, 7).unwrap(), vec!["alice".to_string()]);
    }

    #[test]
    fn map_evidence_fails_on_unknown_atom() {
        let evidence = MapEvidence::new();
        let sig = Signature::new("p", 1);
        assert!(evidence.decode(&sig, 1).is_err());
    }
}
