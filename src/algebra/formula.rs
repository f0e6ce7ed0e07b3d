//! The recursive formula algebra, weighted formulas, and definite clauses (§3).

use std::fmt;

use super::atom::AtomicFormula;
use super::term::Domain;

/// A variable bound by a quantifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuantifiedVar {
    pub name: String,
    pub domain: Domain,
}

impl QuantifiedVar {
    pub fn new(name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
        }
    }
}

/// A first-order formula, represented as a tagged sum with exhaustive case analysis (§9
/// "Dynamic dispatch over formula variants") rather than an open class hierarchy.
///
/// We box recursive children to keep [`FormulaConstruct`] a fixed-size enum, following the
/// teacher's preference for avoiding extra heap indirection only where the variant itself is a
/// leaf (here, only [`FormulaConstruct::Atomic`] avoids a box).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormulaConstruct {
    Atomic(AtomicFormula),
    Not(Box<FormulaConstruct>),
    And(Box<FormulaConstruct>, Box<FormulaConstruct>),
    Or(Box<FormulaConstruct>, Box<FormulaConstruct>),
    Implies(Box<FormulaConstruct>, Box<FormulaConstruct>),
    Iff(Box<FormulaConstruct>, Box<FormulaConstruct>),
    Exists(QuantifiedVar, Box<FormulaConstruct>),
    ForAll(QuantifiedVar, Box<FormulaConstruct>),
}

impl FormulaConstruct {
    pub fn atomic(atom: AtomicFormula) -> Self {
        FormulaConstruct::Atomic(atom)
    }

    pub fn not(f: FormulaConstruct) -> Self {
        FormulaConstruct::Not(Box::new(f))
    }

    pub fn and(a: FormulaConstruct, b: FormulaConstruct) -> Self {
        FormulaConstruct::And(Box::new(a), Box::new(b))
    }

    pub fn or(a: FormulaConstruct, b: FormulaConstruct) -> Self {
        FormulaConstruct::Or(Box::new(a), Box::new(b))
    }

    pub fn implies(a: FormulaConstruct, b: FormulaConstruct) -> Self {
        FormulaConstruct::Implies(Box::new(a), Box::new(b))
    }

    pub fn iff(a: FormulaConstruct, b: FormulaConstruct) -> Self {
        FormulaConstruct::Iff(Box::new(a), Box::new(b))
    }

    pub fn exists(var: QuantifiedVar, f: FormulaConstruct) -> Self {
        FormulaConstruct::Exists(var, Box::new(f))
    }

    pub fn for_all(var: QuantifiedVar, f: FormulaConstruct) -> Self {
        FormulaConstruct::ForAll(var, Box::new(f))
    }

    /// Folds a non-empty list of conjuncts of atoms into a right-associated conjunction,
    /// as used by the definite-clause body (§3) and the Horn/conjunction builder (§4.6).
    pub fn conjunction_of(mut atoms: Vec<FormulaConstruct>) -> FormulaConstruct {
        let mut result = atoms.pop().expect("conjunction_of requires a non-empty list");
        while let Some(next) = atoms.pop() {
            result = FormulaConstruct::and(next, result);
        }
        result
    }

    /// Folds a non-empty list of disjuncts into a right-associated disjunction, the dual of
    /// [`FormulaConstruct::conjunction_of`], used by existential elimination (§4.1) and the
    /// Hybrid Distributor (§4.2).
    pub fn disjunction_of(mut disjuncts: Vec<FormulaConstruct>) -> FormulaConstruct {
        let mut result = disjuncts.pop().expect("disjunction_of requires a non-empty list");
        while let Some(next) = disjuncts.pop() {
            result = FormulaConstruct::or(next, result);
        }
        result
    }
}

impl fmt::Display for FormulaConstruct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaConstruct::Atomic(atom) => write!(f, "{atom}"),
            FormulaConstruct::Not(inner) => write!(f, "¬{inner}"),
            FormulaConstruct::And(a, b) => write!(f, "({a} ∧ {b})"),
            FormulaConstruct::Or(a, b) => write!(f, "({a} ∨ {b})"),
            FormulaConstruct::Implies(a, b) => write!(f, "({a} ⇒ {b})"),
            FormulaConstruct::Iff(a, b) => write!(f, "({a} ⇔ {b})"),
            FormulaConstruct::Exists(var, inner) => write!(f, "∃{}. {inner}", var.name),
            FormulaConstruct::ForAll(var, inner) => write!(f, "∀{}. {inner}", var.name),
        }
    }
}

/// The weight attached to a formula or clause: either a real number, or `Hard` for a
/// conceptually-infinite-weight constraint (§3).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Weight {
    Hard,
    Soft(f64),
}

impl Weight {
    pub fn is_hard(&self) -> bool {
        matches!(self, Weight::Hard)
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weight::Hard => write!(f, "hard"),
            Weight::Soft(w) => write!(f, "{w}"),
        }
    }
}

/// A formula paired with its weight (§3).
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedFormula {
    pub weight: Weight,
    pub formula: FormulaConstruct,
}

impl WeightedFormula {
    pub fn new(weight: Weight, formula: FormulaConstruct) -> Self {
        Self { weight, formula }
    }

    pub fn hard(formula: FormulaConstruct) -> Self {
        Self::new(Weight::Hard, formula)
    }
}

/// A Horn clause with a non-empty body: `head ← body` (§3).
#[derive(Debug, Clone, PartialEq)]
pub struct DefiniteClause {
    pub head: AtomicFormula,
    pub body: FormulaConstruct,
}

impl DefiniteClause {
    pub fn new(head: AtomicFormula, body: FormulaConstruct) -> Self {
        Self { head, body }
    }

    /// Rewrites this definite clause as the implication `body ⇒ head` (§4.4), the form the
    /// Normalizer expects.
    pub fn into_implication(self) -> FormulaConstruct {
        FormulaConstruct::implies(self.body, FormulaConstruct::atomic(self.head))
    }
}

impl fmt::Display for DefiniteClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ← {}", self.head, self.body)
    }
}

/// A [`DefiniteClause`] paired with its weight (§3).
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedDefiniteClause {
    pub weight: f64,
    pub clause: DefiniteClause,
}

impl WeightedDefiniteClause {
    pub fn new(weight: f64, clause: DefiniteClause) -> Self {
        Self { weight, clause }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::term::Term;

    fn atom(name: &str) -> AtomicFormula {
        AtomicFormula::new(name, vec![])
    }

    #[test]
    fn conjunction_of_right_associates() {
        let f = FormulaConstruct::conjunction_of(vec![
            FormulaConstruct::atomic(atom("a")),
            FormulaConstruct::atomic(atom("b")),
            FormulaConstruct::atomic(atom("c")),
        ]);
        assert_eq!(f.to_string(), "(a() ∧ (b() ∧ c()))");
    }

    #[test]
    fn definite_clause_becomes_implication() {
        let dc = DefiniteClause::new(
            AtomicFormula::new("head", vec![Term::Variable("x".into(), "obj".into())]),
            FormulaConstruct::atomic(atom("body")),
        );
        let implication = dc.into_implication();
        assert_eq!(implication.to_string(), "(body() ⇒ head(x))");
    }
}
