//! `HPath` and the Path Variabilizer (§3, §4.5): walks an ordered sequence of ground atoms,
//! mapping constants to fresh or reused variables under mode-declaration policy.

use rustc_hash::FxHashMap;

use crate::algebra::atom::{AtomicFormula, Signature};
use crate::algebra::term::{Domain, Term};
use crate::error::{ClauseError, Result};
use crate::log_targets;
use crate::mode::{Evidence, ModeDeclarations, PredicateSchema};

/// An ordered, non-empty sequence of ground atom occurrences discovered by the hypergraph
/// path-search (an external collaborator, §1). The orientation in which a path's elements
/// become head/body is decided by the caller (§4.5 "Head/body orientation").
pub type HPath = Vec<(u64, Signature)>;

/// The result of walking one path: a head atom and the body atoms that co-occur with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariabilizedPath {
    pub head: AtomicFormula,
    pub body: Vec<AtomicFormula>,
}

/// Walks `path` in its given order, treating the last element as the head (§4.5, CNF/Horn
/// orientation). The placemarker-`constant` check applies uniformly, including to the head.
pub fn variabilize_for_horn(
    path: &HPath,
    schema: &PredicateSchema,
    modes: &ModeDeclarations,
    evidence: &dyn Evidence,
) -> Result<VariabilizedPath> {
    let mut state = WalkState::default();
    let mut body = Vec::with_capacity(path.len().saturating_sub(1));
    let mut head = None;
    let last = path.len() - 1;
    for (index, (atom_id, signature)) in path.iter().enumerate() {
        let atom = build_atom(signature, *atom_id, schema, modes, evidence, &mut state, false)?;
        if index == last {
            head = Some(atom);
        } else {
            body.push(atom);
        }
    }
    Ok(VariabilizedPath {
        head: head.expect("HPath must be non-empty"),
        body,
    })
}

/// Walks `path` in reverse, treating the last-processed element — the path's original first
/// element — as the head (§4.5, definite-clause orientation). The placemarker-`constant` check
/// is suppressed for the head: its arguments are always variabilized.
pub fn variabilize_for_definite(
    path: &HPath,
    schema: &PredicateSchema,
    modes: &ModeDeclarations,
    evidence: &dyn Evidence,
) -> Result<VariabilizedPath> {
    let mut state = WalkState::default();
    let mut body = Vec::with_capacity(path.len().saturating_sub(1));
    let mut head = None;
    let last = path.len() - 1;
    for (index, (atom_id, signature)) in path.iter().rev().enumerate() {
        let is_head = index == last;
        let atom = build_atom(signature, *atom_id, schema, modes, evidence, &mut state, is_head)?;
        if is_head {
            head = Some(atom);
        } else {
            body.push(atom);
        }
    }
    Ok(VariabilizedPath {
        head: head.expect("HPath must be non-empty"),
        body,
    })
}

/// Per-path scratch: domain counters and the constant→variable reuse map, both reset between
/// paths (§4.5).
#[derive(Default)]
struct WalkState {
    counters: FxHashMap<Domain, u32>,
    reuse: FxHashMap<(Domain, String), Term>,
}

fn build_atom(
    signature: &Signature,
    atom_id: u64,
    schema: &PredicateSchema,
    modes: &ModeDeclarations,
    evidence: &dyn Evidence,
    state: &mut WalkState,
    suppress_constant_check: bool,
) -> Result<AtomicFormula> {
    let domains = schema
        .get(signature)
        .ok_or_else(|| ClauseError::MissingSchema(signature.clone()))?;
    let placemarkers = modes.get(signature);
    let constants = evidence
        .decode(signature, atom_id)
        .map_err(|cause| ClauseError::EvidenceDecodeError {
            signature: signature.clone(),
            atom_id,
            cause,
        })?;

    let mut terms = Vec::with_capacity(constants.len());
    for (position, constant) in constants.iter().enumerate() {
        let domain = domains.get(position).cloned().unwrap_or_default();
        let placemarker = placemarkers
            .and_then(|pms| pms.get(position))
            .copied()
            .unwrap_or_default();

        if !suppress_constant_check && placemarker.constant {
            terms.push(Term::Constant(constant.clone()));
            continue;
        }

        let reuse_key = (domain.clone(), constant.clone());
        if let Some(existing) = state.reuse.get(&reuse_key) {
            terms.push(existing.clone());
            continue;
        }

        let counter = state.counters.entry(domain.clone()).or_insert(1);
        let n = *counter;
        *counter += 1;
        let first_letter = domain.chars().next().unwrap_or('v');
        let var_name = format!("v{first_letter}{n}");
        log::trace!(
            target: log_targets::VARIABILIZE,
            "allocated {var_name} for constant {constant:?} in domain {domain}"
        );
        let term = Term::Variable(var_name, domain.clone());
        state.reuse.insert(reuse_key, term.clone());
        terms.push(term);
    }

    Ok(AtomicFormula::new(signature.predicate.clone(), terms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::MapEvidence;

    fn setup() -> (PredicateSchema, ModeDeclarations, MapEvidence) {
        let mut schema = PredicateSchema::default();
        schema.insert(Signature::new("p", 1), vec!["obj".to_string()]);
        schema.insert(Signature::new("q", 1), vec!["obj".to_string()]);
        schema.insert(Signature::new("r", 1), vec!["obj".to_string()]);
        let modes = ModeDeclarations::default();
        let mut evidence = MapEvidence::new();
        evidence.insert(Signature::new("p", 1), 1, vec!["c".to_string()]);
        evidence.insert(Signature::new("q", 1), 2, vec!["c".to_string()]);
        evidence.insert(Signature::new("r", 1), 3, vec!["c".to_string()]);
        (schema, modes, evidence)
    }

    #[test]
    fn s5_horn_path_reuses_one_variable() {
        let (schema, modes, evidence) = setup();
        let path: HPath = vec![
            (1, Signature::new("p", 1)),
            (2, Signature::new("q", 1)),
            (3, Signature::new("r", 1)),
        ];
        let result = variabilize_for_horn(&path, &schema, &modes, &evidence).unwrap();
        assert_eq!(result.head, AtomicFormula::new("r", vec![Term::Variable("vo1".into(), "obj".into())]));
        assert_eq!(result.body.len(), 2);
        for atom in &result.body {
            assert_eq!(atom.terms, vec![Term::Variable("vo1".into(), "obj".into())]);
        }
    }

    #[test]
    fn missing_schema_entry_fails() {
        let (mut schema, modes, evidence) = setup();
        schema.remove(&Signature::new("r", 1));
        let path: HPath = vec![(1, Signature::new("p", 1)), (3, Signature::new("r", 1))];
        let err = variabilize_for_horn(&path, &schema, &modes, &evidence).unwrap_err();
        assert_eq!(err, ClauseError::MissingSchema(Signature::new("r", 1)));
    }

    #[test]
    fn constant_placemarker_keeps_ground_term() {
        let (schema, mut modes, evidence) = setup();
        modes.insert(
            Signature::new("p", 1),
            vec![crate::mode::Placemarker::constant()],
        );
        let path: HPath = vec![(1, Signature::new("p", 1)), (2, Signature::new("q", 1))];
        let result = variabilize_for_horn(&path, &schema, &modes, &evidence).unwrap();
        assert_eq!(result.body, vec![AtomicFormula::new("p", vec![Term::Constant("c".to_string())])]);
    }

    #[test]
    fn definite_orientation_reverses_and_unconditionally_variabilizes_head() {
        let (schema, mut modes, evidence) = setup();
        modes.insert(
            Signature::new("p", 1),
            vec![crate::mode::Placemarker::constant()],
        );
        let path: HPath = vec![(1, Signature::new("p", 1)), (2, Signature::new("q", 1))];
        let result = variabilize_for_definite(&path, &schema, &modes, &evidence).unwrap();
        // p/1 is the original first element, so it becomes the head and ignores its
        // `constant` placemarker.
        assert!(result.head.terms[0].is_variable());
        assert_eq!(result.head.predicate, "p");
    }
}
