//! Clause, ClauseKind, the Clause Extractor, and α-equivalence (§3, §4.3, §4.7).

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::algebra::atom::{AtomicFormula, Literal};
use crate::algebra::formula::{FormulaConstruct, Weight};
use crate::log_targets;

/// Which clause form(s) the Horn & conjunction builder should emit (§4.6, §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseKind {
    Horn,
    Conjunction,
    Both,
}

impl ClauseKind {
    pub fn includes_horn(&self) -> bool {
        matches!(self, ClauseKind::Horn | ClauseKind::Both)
    }

    pub fn includes_conjunction(&self) -> bool {
        matches!(self, ClauseKind::Conjunction | ClauseKind::Both)
    }
}

/// A set of literals together with a weight; semantically the disjunction of its literals (§3).
#[derive(Debug, Clone)]
pub struct Clause {
    pub literals: Vec<Literal>,
    pub weight: Weight,
}

impl Clause {
    pub fn new(literals: Vec<Literal>, weight: Weight) -> Self {
        Self { literals, weight }
    }

    /// `true` if this clause contains both polarities of the same atom.
    pub fn is_tautology(&self) -> bool {
        self.literals.iter().any(|lit| {
            self.literals
                .iter()
                .any(|other| other.atom() == lit.atom() && other.is_positive() != lit.is_positive())
        })
    }

    /// The canonical α-equivalence key (§4.7); see [`alpha_canonical_key`] for how it is
    /// computed and why a single fixed literal ordering is not enough.
    pub fn alpha_key(&self) -> String {
        alpha_canonical_key(&self.literals)
    }
}

impl PartialEq for Clause {
    fn eq(&self, other: &Self) -> bool {
        self.alpha_key() == other.alpha_key()
    }
}
impl Eq for Clause {}

impl std::hash::Hash for Clause {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.alpha_key().hash(state);
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, lit) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, " ∨ ")?;
            }
            write!(f, "{lit}")?;
        }
        write!(f, " [{}]", self.weight)
    }
}

/// Computes the α-equivalence canonical key for a literal set (§4.7).
///
/// Canonicalizing by a single fixed literal ordering is not sound: numbering variables by
/// first appearance under an order derived from the literals' *un-renamed* text (e.g. sorting
/// by `Display`) makes the numbering depend on the pre-renaming variable names themselves.
/// Two honestly α-equivalent clauses can tie on predicate/arity and break the tie differently
/// once renamed, landing on different keys (a repeated-predicate clause sharing a variable
/// between two literals, renamed so the shared variable's name moves from first to second in
/// sort order, is a concrete case of this — see this module's tests). Instead, every ordering
/// of the clause's literals is tried as a first-occurrence traversal order for variable
/// numbering, and the lexicographically smallest rendering across all of them is kept. This is
/// `O(n!)` in the literal count, acceptable for the small clauses this crate constructs.
pub fn alpha_canonical_key(literals: &[Literal]) -> String {
    if literals.is_empty() {
        return String::new();
    }
    let mut indices: Vec<usize> = (0..literals.len()).collect();
    let mut orderings = Vec::new();
    enumerate_permutations(&mut indices, 0, &mut orderings);

    orderings
        .into_iter()
        .map(|order| render_under_ordering(literals, &order))
        .min()
        .expect("a non-empty literal list has at least one permutation")
}

/// Collects every permutation of `indices` via Heap-style recursive swapping.
fn enumerate_permutations(indices: &mut Vec<usize>, k: usize, out: &mut Vec<Vec<usize>>) {
    if k == indices.len() {
        out.push(indices.clone());
        return;
    }
    for i in k..indices.len() {
        indices.swap(k, i);
        enumerate_permutations(indices, k + 1, out);
        indices.swap(k, i);
    }
}

/// Renders `literals` with variables numbered by first appearance under `order`, then sorts the
/// rendered literal strings so the result no longer depends on `order` itself — only on the
/// variable numbering `order` induced.
fn render_under_ordering(literals: &[Literal], order: &[usize]) -> String {
    let mut renaming: FxHashMap<String, String> = FxHashMap::default();
    let mut next_index: FxHashMap<String, u32> = FxHashMap::default();

    let mut parts: Vec<String> = order
        .iter()
        .map(|&i| {
            let lit = &literals[i];
            let canon = canonicalize_atom(lit.atom(), &mut renaming, &mut next_index);
            if lit.is_positive() {
                canon.to_string()
            } else {
                format!("¬{canon}")
            }
        })
        .collect();
    parts.sort();
    parts.join(" ∨ ")
}

fn canonicalize_atom(
    atom: &AtomicFormula,
    renaming: &mut FxHashMap<String, String>,
    next_index: &mut FxHashMap<String, u32>,
) -> AtomicFormula {
    use crate::algebra::term::Term;
    let terms = atom
        .terms
        .iter()
        .map(|term| match term {
            Term::Variable(name, domain) => {
                let canonical = renaming.entry(name.clone()).or_insert_with(|| {
                    let counter = next_index.entry(domain.clone()).or_insert(0);
                    let renamed = format!("?{domain}{counter}");
                    *counter += 1;
                    renamed
                });
                Term::Variable(canonical.clone(), domain.clone())
            }
            other => other.clone(),
        })
        .collect();
    AtomicFormula::new(atom.predicate.clone(), terms)
}

/// A de-duplicating set of clauses keyed by α-equivalence (§4.7), shared by the CNF Pipeline
/// (§4.4) and the Clause/Definite Builder (§4.6) instead of each re-implementing the check.
#[derive(Debug, Default)]
pub struct ClauseSet {
    seen_keys: FxHashSet<String>,
    clauses: Vec<Clause>,
}

impl ClauseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `clause` unless an α-equivalent clause is already present. Returns `true` if the
    /// clause was newly inserted.
    pub fn insert_dedup(&mut self, clause: Clause) -> bool {
        let key = clause.alpha_key();
        if self.seen_keys.insert(key) {
            self.clauses.push(clause);
            true
        } else {
            log::trace!(target: log_targets::CLAUSE, "dropped α-equivalent duplicate clause");
            false
        }
    }

    /// Marks `clause`'s key as already present without storing it, used to seed de-duplication
    /// against a caller-supplied `preexisting` set (§4.6) without re-emitting it.
    pub fn mark_seen(&mut self, clause: &Clause) {
        self.seen_keys.insert(clause.alpha_key());
    }

    pub fn into_vec(self) -> Vec<Clause> {
        self.clauses
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// The Clause Extractor (§4.3): splits a normalized construct (a conjunction of disjunctions of
/// literals) into individual clauses, dropping tautologies and α-duplicates.
pub fn extract_clauses(formula: &FormulaConstruct, weight: Weight) -> Vec<Clause> {
    let mut raw_clauses = Vec::new();
    flatten_conjuncts(formula, &mut raw_clauses);

    let mut dedup = ClauseSet::new();
    for clause_formula in raw_clauses {
        let mut literals = Vec::new();
        flatten_disjuncts(&clause_formula, &mut literals);
        let clause = Clause::new(literals, weight);
        if clause.is_tautology() {
            log::trace!(target: log_targets::CLAUSE, "dropped tautological clause");
            continue;
        }
        dedup.insert_dedup(clause);
    }
    dedup.into_vec()
}

fn flatten_conjuncts(formula: &FormulaConstruct, out: &mut Vec<FormulaConstruct>) {
    match formula {
        FormulaConstruct::And(a, b) => {
            flatten_conjuncts(a, out);
            flatten_conjuncts(b, out);
        }
        other => out.push(other.clone()),
    }
}

fn flatten_disjuncts(formula: &FormulaConstruct, out: &mut Vec<Literal>) {
    match formula {
        FormulaConstruct::Or(a, b) => {
            flatten_disjuncts(a, out);
            flatten_disjuncts(b, out);
        }
        FormulaConstruct::Atomic(atom) => out.push(Literal::Positive(atom.clone())),
        FormulaConstruct::Not(inner) => {
            if let FormulaConstruct::Atomic(atom) = inner.as_ref() {
                out.push(Literal::Negative(atom.clone()));
            }
        }
        _ => {}
    }
}
