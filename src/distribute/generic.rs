//! The generic fallback distributor (§4.2): the textbook `A ∧ (B ∨ C) → (A ∧ B) ∨ (A ∧ C)`
//! rewrite applied bottom-up, exponential in the worst case.
//!
//! Grounded in the teacher's legacy `Expr::distribute_or`/`to_cnf_expr_dist` shape (the arena
//! predecessor of its current visitor-based CNF conversion).

use crate::algebra::atom::Literal;
use crate::algebra::formula::FormulaConstruct;
use crate::error::{ClauseError, Result};

use super::as_literal;

/// Distributes any NNF formula — fast-distributable or not — into a conjunction of
/// disjunctions of literals.
pub fn generic_distribute(formula: &FormulaConstruct) -> Result<FormulaConstruct> {
    match formula {
        FormulaConstruct::Atomic(_) => Ok(formula.clone()),
        FormulaConstruct::Not(inner) => match inner.as_ref() {
            FormulaConstruct::Atomic(_) => Ok(formula.clone()),
            _ => Err(ClauseError::EncodingError(formula.clone())),
        },
        FormulaConstruct::And(a, b) => {
            let da = generic_distribute(a)?;
            let db = generic_distribute(b)?;
            let mut clauses = flatten_and_clauses(&da);
            clauses.extend(flatten_and_clauses(&db));
            Ok(FormulaConstruct::conjunction_of(clauses))
        }
        FormulaConstruct::Or(a, b) => {
            let da = generic_distribute(a)?;
            let db = generic_distribute(b)?;
            let left_clauses = flatten_and_clauses(&da);
            let right_clauses = flatten_and_clauses(&db);
            let mut product = Vec::with_capacity(left_clauses.len() * right_clauses.len());
            for left in &left_clauses {
                let left_literals = flatten_clause_literals(left)?;
                for right in &right_clauses {
                    let mut literals = left_literals.clone();
                    literals.extend(flatten_clause_literals(right)?);
                    let disjuncts: Vec<FormulaConstruct> =
                        literals.into_iter().map(|l| super::literal_to_formula(&l)).collect();
                    product.push(FormulaConstruct::disjunction_of(disjuncts));
                }
            }
            Ok(FormulaConstruct::conjunction_of(product))
        }
        _ => Err(ClauseError::EncodingError(formula.clone())),
    }
}

fn flatten_and_clauses(formula: &FormulaConstruct) -> Vec<FormulaConstruct> {
    match formula {
        FormulaConstruct::And(a, b) => {
            let mut left = flatten_and_clauses(a);
            left.extend(flatten_and_clauses(b));
            left
        }
        other => vec![other.clone()],
    }
}

fn flatten_clause_literals(clause: &FormulaConstruct) -> Result<Vec<Literal>> {
    match clause {
        FormulaConstruct::Or(a, b) => {
            let mut left = flatten_clause_literals(a)?;
            left.extend(flatten_clause_literals(b)?);
            Ok(left)
        }
        other => Ok(vec![as_literal(other)?]),
    }
}
