//! The fast-distribute path (§4.2): applies only when the formula is, structurally, a
//! disjunction of (conjunctions of literals, or bare literals) — i.e. every `∧` is nested
//! inside the outermost `∨` chain.
//!
//! The declarative tree-shaped test below is the restatement the spec's Open Questions call
//! for (the left-to-right integer-scan description is subtle enough to mis-handle the case of
//! an `∧` with a disjunction nested inside it); it is checked directly against S2/S3 below.

use std::collections::HashSet;

use crate::algebra::atom::Literal;
use crate::algebra::formula::FormulaConstruct;
use crate::error::Result;
use crate::log_targets;

use super::{as_literal, literal_to_formula, DistributorConfig};

/// Returns `true` if `formula` is a disjunction of literals and/or pure conjunctions of
/// literals, qualifying it for [`fast_distribute`].
pub fn is_fast_distributable(formula: &FormulaConstruct) -> bool {
    match formula {
        FormulaConstruct::Or(a, b) => is_fast_distributable(a) && is_fast_distributable(b),
        other => is_pure_conjunction_or_literal(other),
    }
}

fn is_pure_conjunction_or_literal(formula: &FormulaConstruct) -> bool {
    match formula {
        FormulaConstruct::Atomic(_) => true,
        FormulaConstruct::Not(inner) => matches!(inner.as_ref(), FormulaConstruct::Atomic(_)),
        FormulaConstruct::And(a, b) => {
            is_pure_conjunction_or_literal(a) && is_pure_conjunction_or_literal(b)
        }
        _ => false,
    }
}

/// Distributes a fast-distributable formula (§4.2 "Prefix extraction" through "Distribution
/// step") without the exponential blowup of the generic distributor, using
/// [`DistributorConfig::default`].
pub fn fast_distribute(formula: &FormulaConstruct) -> Result<FormulaConstruct> {
    fast_distribute_with_config(formula, &DistributorConfig::default())
}

/// Like [`fast_distribute`], with an explicit [`DistributorConfig`].
pub fn fast_distribute_with_config(
    formula: &FormulaConstruct,
    config: &DistributorConfig,
) -> Result<FormulaConstruct> {
    let mut disjuncts = Vec::new();
    flatten_or(formula, &mut disjuncts);

    let mut prefix = Vec::new();
    let mut groups: Vec<Vec<Literal>> = Vec::new();
    for disjunct in &disjuncts {
        match disjunct {
            FormulaConstruct::And(_, _) => groups.push(flatten_and(disjunct)?),
            other => prefix.push(as_literal(other)?),
        }
    }
    log::debug!(
        target: log_targets::DISTRIBUTE,
        "fast-distribute: prefix of {} literal(s), {} conjunction group(s)",
        prefix.len(),
        groups.len()
    );

    let mut working: Vec<Vec<Literal>> = vec![prefix];
    for group in &groups {
        let product = working.len().saturating_mul(group.len().max(1));
        let mut next: Vec<Vec<Literal>> = if product <= config.preallocation_cutoff {
            Vec::with_capacity(product)
        } else {
            log::trace!(
                target: log_targets::DISTRIBUTE,
                "candidate product {product} exceeds preallocation cutoff {}, growing amortized",
                config.preallocation_cutoff
            );
            Vec::new()
        };
        let mut seen: HashSet<Vec<String>> = HashSet::new();
        for existing in &working {
            for literal in group {
                let candidate = if existing.contains(literal) {
                    existing.clone()
                } else {
                    let mut extended = existing.clone();
                    extended.push(literal.clone());
                    extended
                };
                let key = sorted_key(&candidate);
                if seen.insert(key) {
                    next.push(candidate);
                }
            }
        }
        working = next;
    }

    let clauses: Vec<FormulaConstruct> = working
        .into_iter()
        .map(|literals| {
            let disjuncts: Vec<FormulaConstruct> = literals.iter().map(literal_to_formula).collect();
            FormulaConstruct::disjunction_of(disjuncts)
        })
        .collect();
    Ok(FormulaConstruct::conjunction_of(clauses))
}

fn sorted_key(literals: &[Literal]) -> Vec<String> {
    let mut key: Vec<String> = literals.iter().map(|l| l.to_string()).collect();
    key.sort();
    key
}

fn flatten_or(formula: &FormulaConstruct, out: &mut Vec<FormulaConstruct>) {
    match formula {
        FormulaConstruct::Or(a, b) => {
            flatten_or(a, out);
            flatten_or(b, out);
        }
        other => out.push(other.clone()),
    }
}

fn flatten_and(formula: &FormulaConstruct) -> Result<Vec<Literal>> {
    match formula {
        FormulaConstruct::And(a, b) => {
            let mut left = flatten_and(a)?;
            left.extend(flatten_and(b)?);
            Ok(left)
        }
        other => Ok(vec![as_literal(other)?]),
    }
}
