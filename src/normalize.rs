//! The Normalizer (§4.1): implication removal, NNF, variable standardization, quantifier
//! elimination, in that fixed order.

use rustc_hash::FxHashMap;

use crate::algebra::formula::{FormulaConstruct, QuantifiedVar};
use crate::algebra::term::Term;
use crate::error::{ClauseError, Result};
use crate::log_targets;
use crate::mode::ConstantsMap;

/// Runs the full normalization pipeline described in §4.1.
///
/// Fails with [`ClauseError::SchemaError`] if an existential quantifier's domain is not present
/// in `constants`.
pub fn normalize(formula: FormulaConstruct, constants: &ConstantsMap) -> Result<FormulaConstruct> {
    let formula = remove_implications(formula);
    let formula = to_nnf(formula);
    let formula = standardize_variables(formula);
    let formula = eliminate_existentials(formula, constants)?;
    let formula = drop_universals(formula);
    log::debug!(target: log_targets::NORMALIZE, "normalized formula: {formula}");
    Ok(formula)
}

/// Step 1: rewrites `A ⇒ B` as `¬A ∨ B` and `A ⇔ B` as `(¬A ∨ B) ∧ (A ∨ ¬B)`.
pub fn remove_implications(formula: FormulaConstruct) -> FormulaConstruct {
    use FormulaConstruct::*;
    match formula {
        Atomic(_) => formula,
        Not(f) => FormulaConstruct::not(remove_implications(*f)),
        And(a, b) => FormulaConstruct::and(remove_implications(*a), remove_implications(*b)),
        Or(a, b) => FormulaConstruct::or(remove_implications(*a), remove_implications(*b)),
        Implies(a, b) => {
            let a = remove_implications(*a);
            let b = remove_implications(*b);
            FormulaConstruct::or(FormulaConstruct::not(a), b)
        }
        Iff(a, b) => {
            let a = remove_implications(*a);
            let b = remove_implications(*b);
            let left = FormulaConstruct::or(FormulaConstruct::not(a.clone()), b.clone());
            let right = FormulaConstruct::or(a, FormulaConstruct::not(b));
            FormulaConstruct::and(left, right)
        }
        Exists(var, f) => FormulaConstruct::exists(var, remove_implications(*f)),
        ForAll(var, f) => FormulaConstruct::for_all(var, remove_implications(*f)),
    }
}

/// Step 2: pushes negations down to atoms using De Morgan's laws, including through quantifiers
/// (`¬∃x.F ≡ ∀x.¬F`, `¬∀x.F ≡ ∃x.¬F`). Assumes implications have already been removed.
pub fn to_nnf(formula: FormulaConstruct) -> FormulaConstruct {
    use FormulaConstruct::*;
    match formula {
        Atomic(_) => formula,
        Not(inner) => push_negation(*inner),
        And(a, b) => FormulaConstruct::and(to_nnf(*a), to_nnf(*b)),
        Or(a, b) => FormulaConstruct::or(to_nnf(*a), to_nnf(*b)),
        Implies(_, _) | Iff(_, _) => {
            unreachable!("to_nnf requires implications to already be removed")
        }
        Exists(var, f) => FormulaConstruct::exists(var, to_nnf(*f)),
        ForAll(var, f) => FormulaConstruct::for_all(var, to_nnf(*f)),
    }
}

/// Pushes a negation one level into `inner`, recursing into the result.
fn push_negation(inner: FormulaConstruct) -> FormulaConstruct {
    use FormulaConstruct::*;
    match inner {
        Atomic(_) => FormulaConstruct::not(inner),
        Not(grandchild) => to_nnf(*grandchild),
        And(a, b) => FormulaConstruct::or(
            push_negation_wrapped(*a),
            push_negation_wrapped(*b),
        ),
        Or(a, b) => FormulaConstruct::and(
            push_negation_wrapped(*a),
            push_negation_wrapped(*b),
        ),
        Implies(_, _) | Iff(_, _) => {
            unreachable!("to_nnf requires implications to already be removed")
        }
        Exists(var, f) => FormulaConstruct::for_all(var, push_negation_wrapped(*f)),
        ForAll(var, f) => FormulaConstruct::exists(var, push_negation_wrapped(*f)),
    }
}

/// Negates `f` and continues pushing the negation inward.
fn push_negation_wrapped(f: FormulaConstruct) -> FormulaConstruct {
    to_nnf(FormulaConstruct::not(f))
}

/// Step 3: renames each quantifier's bound variable to a name unique within the whole formula,
/// so distinct quantifiers never share a variable name. Implemented as a single top-down pass
/// threading a rename environment, so inner quantifiers correctly shadow outer ones that reuse
/// the same source name.
pub fn standardize_variables(formula: FormulaConstruct) -> FormulaConstruct {
    let mut counter = 0u32;
    standardize_with(formula, &FxHashMap::default(), &mut counter)
}

fn standardize_with(
    formula: FormulaConstruct,
    env: &FxHashMap<String, String>,
    counter: &mut u32,
) -> FormulaConstruct {
    use FormulaConstruct::*;
    match formula {
        Atomic(atom) => {
            let terms = atom.terms.into_iter().map(|t| substitute_term(t, env)).collect();
            FormulaConstruct::atomic(crate::algebra::atom::AtomicFormula::new(atom.predicate, terms))
        }
        Not(f) => FormulaConstruct::not(standardize_with(*f, env, counter)),
        And(a, b) => FormulaConstruct::and(
            standardize_with(*a, env, counter),
            standardize_with(*b, env, counter),
        ),
        Or(a, b) => FormulaConstruct::or(
            standardize_with(*a, env, counter),
            standardize_with(*b, env, counter),
        ),
        Implies(a, b) => FormulaConstruct::implies(
            standardize_with(*a, env, counter),
            standardize_with(*b, env, counter),
        ),
        Iff(a, b) => FormulaConstruct::iff(
            standardize_with(*a, env, counter),
            standardize_with(*b, env, counter),
        ),
        Exists(var, f) => {
            let (new_var, new_env) = rename_bound_var(&var, env, counter);
            FormulaConstruct::exists(new_var, standardize_with(*f, &new_env, counter))
        }
        ForAll(var, f) => {
            let (new_var, new_env) = rename_bound_var(&var, env, counter);
            FormulaConstruct::for_all(new_var, standardize_with(*f, &new_env, counter))
        }
    }
}

fn rename_bound_var(
    var: &QuantifiedVar,
    env: &FxHashMap<String, String>,
    counter: &mut u32,
) -> (QuantifiedVar, FxHashMap<String, String>) {
    *counter += 1;
    let new_name = format!("{}__{}", var.name, counter);
    let mut new_env = env.clone();
    new_env.insert(var.name.clone(), new_name.clone());
    (QuantifiedVar::new(new_name, var.domain.clone()), new_env)
}

fn substitute_term(term: Term, env: &FxHashMap<String, String>) -> Term {
    match term {
        Term::Variable(name, domain) => match env.get(&name) {
            Some(renamed) => Term::Variable(renamed.clone(), domain),
            None => Term::Variable(name, domain),
        },
        Term::Constant(symbol) => Term::Constant(symbol),
        Term::Function(symbol, args) => Term::Function(
            symbol,
            args.into_iter().map(|t| substitute_term(t, env)).collect(),
        ),
    }
}

/// Step 4: replaces `∃x:domain. F` with the disjunction of `F` over every constant of `domain`.
///
/// Fails with [`ClauseError::SchemaError`] if `domain` has no entry in `constants`.
pub fn eliminate_existentials(
    formula: FormulaConstruct,
    constants: &ConstantsMap,
) -> Result<FormulaConstruct> {
    use FormulaConstruct::*;
    match formula {
        Atomic(_) => Ok(formula),
        Not(f) => Ok(FormulaConstruct::not(eliminate_existentials(*f, constants)?)),
        And(a, b) => Ok(FormulaConstruct::and(
            eliminate_existentials(*a, constants)?,
            eliminate_existentials(*b, constants)?,
        )),
        Or(a, b) => Ok(FormulaConstruct::or(
            eliminate_existentials(*a, constants)?,
            eliminate_existentials(*b, constants)?,
        )),
        Implies(a, b) => Ok(FormulaConstruct::implies(
            eliminate_existentials(*a, constants)?,
            eliminate_existentials(*b, constants)?,
        )),
        Iff(a, b) => Ok(FormulaConstruct::iff(
            eliminate_existentials(*a, constants)?,
            eliminate_existentials(*b, constants)?,
        )),
        ForAll(var, f) => Ok(FormulaConstruct::for_all(
            var,
            eliminate_existentials(*f, constants)?,
        )),
        Exists(var, f) => {
            let domain_constants = constants
                .get(&var.domain)
                .ok_or_else(|| ClauseError::SchemaError(var.domain.clone()))?;
            log::trace!(
                target: log_targets::NORMALIZE,
                "eliminating existential over {} with {} constants",
                var.domain,
                domain_constants.len()
            );
            let body = eliminate_existentials(*f, constants)?;
            let mut env = FxHashMap::default();
            let disjuncts: Vec<FormulaConstruct> = domain_constants
                .iter()
                .map(|c| {
                    env.clear();
                    env.insert(var.name.clone(), c.clone());
                    substitute_formula(&body, &env)
                })
                .collect();
            Ok(FormulaConstruct::disjunction_of(disjuncts))
        }
    }
}

/// Substitutes free occurrences of the named variable with the given ground constant.
fn substitute_formula(formula: &FormulaConstruct, renaming: &FxHashMap<String, String>) -> FormulaConstruct {
    use FormulaConstruct::*;
    match formula {
        Atomic(atom) => {
            let terms = atom
                .terms
                .iter()
                .cloned()
                .map(|t| substitute_term_const(t, renaming))
                .collect();
            FormulaConstruct::atomic(crate::algebra::atom::AtomicFormula::new(
                atom.predicate.clone(),
                terms,
            ))
        }
        Not(f) => FormulaConstruct::not(substitute_formula(f, renaming)),
        And(a, b) => FormulaConstruct::and(substitute_formula(a, renaming), substitute_formula(b, renaming)),
        Or(a, b) => FormulaConstruct::or(substitute_formula(a, renaming), substitute_formula(b, renaming)),
        Implies(a, b) => {
            FormulaConstruct::implies(substitute_formula(a, renaming), substitute_formula(b, renaming))
        }
        Iff(a, b) => FormulaConstruct::iff(substitute_formula(a, renaming), substitute_formula(b, renaming)),
        Exists(var, f) => FormulaConstruct::exists(var.clone(), substitute_formula(f, renaming)),
        ForAll(var, f) => FormulaConstruct::for_all(var.clone(), substitute_formula(f, renaming)),
    }
}

fn substitute_term_const(term: Term, renaming: &FxHashMap<String, String>) -> Term {
    match term {
        Term::Variable(name, _) if renaming.contains_key(&name) => {
            Term::Constant(renaming[&name].clone())
        }
        Term::Variable(name, domain) => Term::Variable(name, domain),
        Term::Constant(symbol) => Term::Constant(symbol),
        Term::Function(symbol, args) => Term::Function(
            symbol,
            args.into_iter().map(|t| substitute_term_const(t, renaming)).collect(),
        ),
    }
}

/// Step 5: drops every remaining universal quantifier, treating its variable as implicitly
/// universal in clausal form.
pub fn drop_universals(formula: FormulaConstruct) -> FormulaConstruct {
    use FormulaConstruct::*;
    match formula {
        Atomic(_) => formula,
        Not(f) => FormulaConstruct::not(drop_universals(*f)),
        And(a, b) => FormulaConstruct::and(drop_universals(*a), drop_universals(*b)),
        Or(a, b) => FormulaConstruct::or(drop_universals(*a), drop_universals(*b)),
        Implies(a, b) => FormulaConstruct::implies(drop_universals(*a), drop_universals(*b)),
        Iff(a, b) => FormulaConstruct::iff(drop_universals(*a), drop_universals(*b)),
        Exists(var, f) => FormulaConstruct::exists(var, drop_universals(*f)),
        ForAll(_, f) => drop_universals(*f),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::atom::AtomicFormula;

    fn atom(name: &str) -> FormulaConstruct {
        FormulaConstruct::atomic(AtomicFormula::new(name, vec![]))
    }

    #[test]
    fn removes_implication() {
        let f = FormulaConstruct::implies(atom("a"), atom("b"));
        assert_eq!(remove_implications(f).to_string(), "(¬a() ∨ b())");
    }

    #[test]
    fn removes_iff() {
        let f = FormulaConstruct::iff(atom("a"), atom("b"));
        assert_eq!(
            remove_implications(f).to_string(),
            "((¬a() ∨ b()) ∧ (a() ∨ ¬b()))"
        );
    }

    #[test]
    fn nnf_pushes_negation_through_and() {
        let f = FormulaConstruct::not(FormulaConstruct::and(atom("a"), atom("b")));
        assert_eq!(to_nnf(f).to_string(), "(¬a() ∨ ¬b())");
    }

    #[test]
    fn nnf_cancels_double_negation() {
        let f = FormulaConstruct::not(FormulaConstruct::not(atom("a")));
        assert_eq!(to_nnf(f).to_string(), "a()");
    }

    #[test]
    fn nnf_pushes_through_quantifier() {
        let var = QuantifiedVar::new("x", "obj");
        let f = FormulaConstruct::not(FormulaConstruct::exists(var, atom("p")));
        assert_eq!(to_nnf(f).to_string(), "∀x. ¬p()");
    }

    #[test]
    fn standardize_renames_distinct_quantifiers_uniquely() {
        let var_a = QuantifiedVar::new("x", "obj");
        let var_b = QuantifiedVar::new("x", "obj");
        let f = FormulaConstruct::and(
            FormulaConstruct::for_all(var_a, atom("p")),
            FormulaConstruct::for_all(var_b, atom("q")),
        );
        let standardized = standardize_variables(f);
        if let FormulaConstruct::And(a, b) = standardized {
            let (FormulaConstruct::ForAll(va, _), FormulaConstruct::ForAll(vb, _)) = (*a, *b) else {
                panic!("expected two ForAll nodes");
            };
            assert_ne!(va.name, vb.name);
        } else {
            panic!("expected And at top level");
        }
    }

    #[test]
    fn eliminate_existentials_disjuncts_over_constants() {
        use crate::algebra::term::Term;
        let var = QuantifiedVar::new("x", "obj");
        let body = FormulaConstruct::atomic(AtomicFormula::new(
            "p",
            vec![Term::Variable("x".into(), "obj".into())],
        ));
        let f = FormulaConstruct::exists(var, body);
        let mut constants = ConstantsMap::default();
        constants.insert("obj".to_string(), vec!["a".to_string(), "b".to_string()]);
        let result = eliminate_existentials(f, &constants).unwrap();
        assert_eq!(result.to_string(), "(p(a) ∨ p(b))");
    }

    #[test]
    fn eliminate_existentials_fails_on_missing_domain() {
        let var = QuantifiedVar::new("x", "obj");
        let f = FormulaConstruct::exists(var, atom("p"));
        let constants = ConstantsMap::default();
        let err = eliminate_existentials(f, &constants).unwrap_err();
        assert_eq!(err, ClauseError::SchemaError("obj".to_string()));
    }
}
