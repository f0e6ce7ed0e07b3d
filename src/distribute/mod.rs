//! The Hybrid Distributor (§4.2): rewrites an NNF formula into a conjunction of disjunctions of
//! literals, dispatching between a linear fast path and an exponential generic fallback.

pub mod encode;
pub mod fast;
pub mod generic;

use crate::algebra::atom::Literal;
use crate::algebra::formula::FormulaConstruct;
use crate::error::{ClauseError, Result};
use crate::log_targets;

pub use encode::Encoder;

/// Call-scoped configuration for the Hybrid Distributor (§9 "Mutable scratch inside hybrid
/// distribute", §10 "Configuration").
#[derive(Debug, Clone)]
pub struct DistributorConfig {
    /// Above this product of conjunction-group sizes, [`fast::fast_distribute_with_config`]
    /// falls back to amortized `Vec::push` growth instead of preallocating the candidate
    /// working set with `Vec::with_capacity`, so one pathological input can't force a single
    /// huge upfront allocation.
    pub preallocation_cutoff: usize,
}

impl Default for DistributorConfig {
    fn default() -> Self {
        Self {
            preallocation_cutoff: 4096,
        }
    }
}

/// Entry point: distributes `formula` (assumed to already be in NNF) into a top-level
/// conjunction of disjunctions of literals, using [`DistributorConfig::default`].
pub fn hybrid_distribute(formula: &FormulaConstruct) -> Result<FormulaConstruct> {
    hybrid_distribute_with_config(formula, &DistributorConfig::default())
}

/// Like [`hybrid_distribute`], with an explicit [`DistributorConfig`].
pub fn hybrid_distribute_with_config(
    formula: &FormulaConstruct,
    config: &DistributorConfig,
) -> Result<FormulaConstruct> {
    if fast::is_fast_distributable(formula) {
        log::trace!(target: log_targets::DISTRIBUTE, "fast-distribute path taken");
        fast::fast_distribute_with_config(formula, config)
    } else {
        log::trace!(target: log_targets::DISTRIBUTE, "generic distribute path taken");
        generic::generic_distribute(formula)
    }
}

/// Reads `formula` as a literal, i.e. an atomic formula or the negation of one.
///
/// Fails with [`ClauseError::EncodingError`] for anything else, which signals the normalizer did
/// not run to completion (§4.2).
pub(crate) fn as_literal(formula: &FormulaConstruct) -> Result<Literal> {
    match formula {
        FormulaConstruct::Atomic(atom) => Ok(Literal::Positive(atom.clone())),
        FormulaConstruct::Not(inner) => match inner.as_ref() {
            FormulaConstruct::Atomic(atom) => Ok(Literal::Negative(atom.clone())),
            _ => Err(ClauseError::EncodingError(formula.clone())),
        },
        _ => Err(ClauseError::EncodingError(formula.clone())),
    }
}

pub(crate) fn literal_to_formula(literal: &Literal) -> FormulaConstruct {
    match literal {
        Literal::Positive(atom) => FormulaConstruct::atomic(atom.clone()),
        Literal::Negative(atom) => FormulaConstruct::not(FormulaConstruct::atomic(atom.clone())),
    }
}

/// Test-only helper shared by this module's and the distributor submodules' tests: flattens a
/// top-level conjunction of disjunctions into clauses of sorted literal strings, so assertions
/// can compare clause *sets* without depending on associativity of the output tree.
#[cfg(test)]
pub(crate) mod test_support {
    use super::FormulaConstruct;

    pub(crate) fn clause_set(formula: &FormulaConstruct) -> Vec<Vec<String>> {
        fn flatten_and(f: &FormulaConstruct, out: &mut Vec<FormulaConstruct>) {
            match f {
                FormulaConstruct::And(a, b) => {
                    flatten_and(a, out);
                    flatten_and(b, out);
                }
                other => out.push(other.clone()),
            }
        }
        fn flatten_or(f: &FormulaConstruct, out: &mut Vec<String>) {
            match f {
                FormulaConstruct::Or(a, b) => {
                    flatten_or(a, out);
                    flatten_or(b, out);
                }
                other => out.push(other.to_string()),
            }
        }
        let mut clauses = Vec::new();
        flatten_and(formula, &mut clauses);
        let mut result: Vec<Vec<String>> = clauses
            .iter()
            .map(|c| {
                let mut lits = Vec::new();
                flatten_or(c, &mut lits);
                lits.sort();
                lits
            })
            .collect();
        result.sort();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::clause_set;
    use super::*;
    use crate::algebra::atom::AtomicFormula;

    fn atom(name: &str) -> FormulaConstruct {
        FormulaConstruct::atomic(AtomicFormula::new(name, vec![]))
    }

    #[test]
    fn s1_cnf_identity() {
        let f = FormulaConstruct::or(atom("a"), atom("b"));
        let result = hybrid_distribute(&f).unwrap();
        assert_eq!(clause_set(&result), vec![vec!["a()".to_string(), "b()".to_string()]]);
    }

    #[test]
    fn s2_fast_distribute_product() {
        let f = FormulaConstruct::or(
            FormulaConstruct::and(atom("a"), atom("b")),
            FormulaConstruct::and(atom("c"), atom("d")),
        );
        let result = hybrid_distribute(&f).unwrap();
        let mut expected = vec![
            vec!["a()".to_string(), "c()".to_string()],
            vec!["a()".to_string(), "d()".to_string()],
            vec!["b()".to_string(), "c()".to_string()],
            vec!["b()".to_string(), "d()".to_string()],
        ];
        expected.sort();
        assert_eq!(clause_set(&result), expected);
    }

    #[test]
    fn s3_prefix_preservation() {
        let f = FormulaConstruct::or(
            FormulaConstruct::or(atom("e"), FormulaConstruct::and(atom("a"), atom("b"))),
            atom("f"),
        );
        let result = hybrid_distribute(&f).unwrap();
        let mut expected = vec![
            vec!["a()".to_string(), "e()".to_string(), "f()".to_string()],
            vec!["b()".to_string(), "e()".to_string(), "f()".to_string()],
        ];
        expected.sort();
        assert_eq!(clause_set(&result), expected);
    }
}
