//! The Clause/Definite Builder (§4.6): assembles Horn, conjunction, and definite clauses from
//! variabilized paths, de-duplicating against an accumulating result and a caller-supplied
//! pre-existing set.

use crate::algebra::atom::Literal;
use crate::algebra::formula::{DefiniteClause, FormulaConstruct, Weight, WeightedDefiniteClause};
use crate::algebra::term::Term;
use crate::clause::{Clause, ClauseKind, ClauseSet};
use crate::error::Result;
use crate::log_targets;
use crate::mode::{Evidence, ModeDeclarations, PredicateSchema};
use crate::path::{variabilize_for_definite, variabilize_for_horn, HPath};

/// Call-scoped builder policy (§9 Open Questions, §10 "Configuration").
///
/// `distinct_head_terms` reproduces the teacher source's commented-out fluent-head gating (a
/// check that a path's head arguments are pairwise distinct) as an opt-in filter rather than
/// silently enabling it, per the spec's documented current behavior (no filter by default).
#[derive(Debug, Clone, Copy, Default)]
pub struct BuilderConfig {
    pub distinct_head_terms: bool,
}

/// The weight assigned to every clause produced by the Horn & conjunction builder (§4.6).
const BUILDER_WEIGHT: Weight = Weight::Soft(1.0);

/// Horn & conjunction builder (§4.6): for each variabilized path, emits the clause form(s)
/// selected by `kind`, skipping any candidate α-equivalent to one already produced or present in
/// `preexisting`. Fails with the first error reported by the Path Variabilizer.
pub fn clauses(
    paths: &[HPath],
    schema: &PredicateSchema,
    modes: &ModeDeclarations,
    evidence: &dyn Evidence,
    kind: ClauseKind,
    preexisting: &[Clause],
) -> Result<Vec<Clause>> {
    clauses_with_config(paths, schema, modes, evidence, kind, preexisting, &BuilderConfig::default())
}

/// Like [`clauses`], with an explicit [`BuilderConfig`].
pub fn clauses_with_config(
    paths: &[HPath],
    schema: &PredicateSchema,
    modes: &ModeDeclarations,
    evidence: &dyn Evidence,
    kind: ClauseKind,
    preexisting: &[Clause],
    config: &BuilderConfig,
) -> Result<Vec<Clause>> {
    let mut set = ClauseSet::new();
    for clause in preexisting {
        set.mark_seen(clause);
    }

    for path in paths {
        let variabilized = variabilize_for_horn(path, schema, modes, evidence)?;
        if config.distinct_head_terms && !has_distinct_terms(&variabilized.head.terms) {
            log::trace!(target: log_targets::BUILD, "skipped path: head terms not pairwise distinct");
            continue;
        }

        let negated_body: Vec<Literal> = variabilized
            .body
            .iter()
            .map(|atom| Literal::Negative(atom.clone()))
            .collect();

        if kind.includes_conjunction() {
            let mut literals = negated_body.clone();
            literals.push(Literal::Positive(variabilized.head.clone()));
            set.insert_dedup(Clause::new(literals, BUILDER_WEIGHT));
        }
        if kind.includes_horn() {
            let mut literals = negated_body.clone();
            literals.push(Literal::Negative(variabilized.head.clone()));
            set.insert_dedup(Clause::new(literals, BUILDER_WEIGHT));
        }
    }

    Ok(set.into_vec())
}

fn has_distinct_terms(terms: &[Term]) -> bool {
    let mut seen = std::collections::HashSet::new();
    terms.iter().all(|term| seen.insert(term.to_string()))
}

/// The function-introduction collaborator (§6): replaces auxiliary predicates in a set of
/// weighted definite clauses with functional terms. Consumed as a black-box formatter, called
/// exactly once at the end of definite-clause construction.
pub trait FunctionIntroducer {
    fn introduce_functions(&self, clauses: Vec<WeightedDefiniteClause>) -> Vec<WeightedDefiniteClause>;
}

/// A [`FunctionIntroducer`] that performs no rewriting, for callers with no auxiliary predicates
/// to fold into functional terms.
pub struct IdentityFunctionIntroducer;

impl FunctionIntroducer for IdentityFunctionIntroducer {
    fn introduce_functions(&self, clauses: Vec<WeightedDefiniteClause>) -> Vec<WeightedDefiniteClause> {
        clauses
    }
}

/// Definite builder (§4.6): emits `WeightedDefiniteClause(1.0, head ← ⋀ body)` per path, then
/// runs `introducer` once over the full accumulated set before de-duplicating against
/// `preexisting` by head/body-atom-*set* equality (order of the body's conjunction tree does
/// not matter, since distinct paths can discover the same relational content in a different
/// traversal order).
///
/// A path of length 1 has no body atoms in the definite orientation; since the formula algebra
/// has no empty/`True` conjunction to serve as a body, such paths are skipped here (the
/// single-literal case is instead produced by [`clauses`]'s Horn/conjunction path).
pub fn definite_clauses(
    paths: &[HPath],
    schema: &PredicateSchema,
    modes: &ModeDeclarations,
    evidence: &dyn Evidence,
    preexisting: &[WeightedDefiniteClause],
    introducer: &dyn FunctionIntroducer,
) -> Result<Vec<WeightedDefiniteClause>> {
    let mut produced = Vec::new();
    for path in paths {
        let variabilized = variabilize_for_definite(path, schema, modes, evidence)?;
        if variabilized.body.is_empty() {
            log::debug!(target: log_targets::BUILD, "skipped length-1 path in definite builder");
            continue;
        }
        let body = FormulaConstruct::conjunction_of(
            variabilized.body.into_iter().map(FormulaConstruct::atomic).collect(),
        );
        produced.push(WeightedDefiniteClause::new(1.0, DefiniteClause::new(variabilized.head, body)));
    }

    let introduced = introducer.introduce_functions(produced);

    let mut seen: std::collections::HashSet<String> =
        preexisting.iter().map(render_key).collect();
    let mut result = Vec::new();
    for wdc in introduced {
        let key = render_key(&wdc);
        if seen.insert(key) {
            result.push(wdc);
        } else {
            log::trace!(target: log_targets::BUILD, "dropped definite clause already in preexisting set");
        }
    }
    Ok(result)
}

/// A de-duplication key for a definite clause that is insensitive to the traversal order the
/// body's conjunction tree happened to be built in: the head plus the *sorted* set of rendered
/// body atoms, so two clauses with the same head and the same body atoms in different order
/// collide on the same key (cf. `clauses()`'s `ClauseSet`-based, equally order-insensitive
/// dedup above).
fn render_key(wdc: &WeightedDefiniteClause) -> String {
    let mut body_atoms = Vec::new();
    flatten_conjunct_atoms(&wdc.clause.body, &mut body_atoms);
    body_atoms.sort();
    format!("{} <- {}", wdc.clause.head, body_atoms.join(" & "))
}

fn flatten_conjunct_atoms(formula: &FormulaConstruct, out: &mut Vec<String>) {
    match formula {
        FormulaConstruct::And(a, b) => {
            flatten_conjunct_atoms(a, out);
            flatten_conjunct_atoms(b, out);
        }
        other => out.push(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::atom::Signature;
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

    fn path() -> HPath {
        vec![
            (1, Signature::new("p", 1)),
            (2, Signature::new("q", 1)),
            (3, Signature::new("r", 1)),
        ]
    }

    #[test]
    fn s5_horn_only() {
        let (schema, modes, evidence) = setup();
        let result = clauses(&[path()], &schema, &modes, &evidence, ClauseKind::Horn, &[]).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].literals.len(), 3);
        assert!(result[0].literals.iter().all(|lit| !lit.is_positive()));
    }

    #[test]
    fn s6_both_forms() {
        let (schema, modes, evidence) = setup();
        let result = clauses(&[path()], &schema, &modes, &evidence, ClauseKind::Both, &[]).unwrap();
        assert_eq!(result.len(), 2);
        let positive_heads = result
            .iter()
            .filter(|c| c.literals.iter().any(|l| l.is_positive()))
            .count();
        assert_eq!(positive_heads, 1);
    }

    #[test]
    fn dedup_against_preexisting() {
        let (schema, modes, evidence) = setup();
        let first = clauses(&[path()], &schema, &modes, &evidence, ClauseKind::Horn, &[]).unwrap();
        let second = clauses(&[path()], &schema, &modes, &evidence, ClauseKind::Horn, &first).unwrap();
        assert!(second.is_empty());
    }

    #[test]
    fn definite_builder_emits_implication_shaped_clause() {
        let (schema, modes, evidence) = setup();
        let result = definite_clauses(
            &[path()],
            &schema,
            &modes,
            &evidence,
            &[],
            &IdentityFunctionIntroducer,
        )
        .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].clause.head.predicate, "p");
    }

    #[test]
    fn definite_dedup_ignores_body_traversal_order() {
        let (schema, modes, evidence) = setup();
        // Both paths put p/1 first (so it becomes the definite head) and visit q/1, r/1 in
        // opposite order; the reverse-walk body ends up as [r, q] for one and [q, r] for the
        // other, but it is the same head and the same body atom set.
        let path_a: HPath = vec![
            (1, Signature::new("p", 1)),
            (2, Signature::new("q", 1)),
            (3, Signature::new("r", 1)),
        ];
        let path_b: HPath = vec![
            (1, Signature::new("p", 1)),
            (3, Signature::new("r", 1)),
            (2, Signature::new("q", 1)),
        ];
        let result = definite_clauses(
            &[path_a, path_b],
            &schema,
            &modes,
            &evidence,
            &[],
            &IdentityFunctionIntroducer,
        )
        .unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn length_one_path_skipped_by_definite_builder() {
        let (schema, modes, evidence) = setup();
        let short_path: HPath = vec![(1, Signature::new("p", 1))];
        let result =
            definite_clauses(&[short_path], &schema, &modes, &evidence, &[], &IdentityFunctionIntroducer)
                .unwrap();
        assert!(result.is_empty());
    }
}
