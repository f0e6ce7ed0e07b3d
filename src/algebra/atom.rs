//! Atomic formulas, their signatures, and literals (§3).

use std::fmt;

use super::term::Term;

/// A predicate symbol together with its arity.
///
/// Used as the key into [`crate::mode::PredicateSchema`] and [`crate::mode::ModeDeclarations`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature {
    pub predicate: String,
    pub arity: usize,
}

impl Signature {
    pub fn new(predicate: impl Into<String>, arity: usize) -> Self {
        Self {
            predicate: predicate.into(),
            arity,
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.predicate, self.arity)
    }
}

/// A predicate symbol plus its ordered terms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AtomicFormula {
    pub predicate: String,
    pub terms: Vec<Term>,
}

impl AtomicFormula {
    pub fn new(predicate: impl Into<String>, terms: Vec<Term>) -> Self {
        Self {
            predicate: predicate.into(),
            terms,
        }
    }

    /// Returns the signature of this atom.
    pub fn signature(&self) -> Signature {
        Signature::new(self.predicate.clone(), self.terms.len())
    }
}

impl fmt::Display for AtomicFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.predicate)?;
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{term}")?;
        }
        write!(f, ")")
    }
}

/// An atom or its negation (§3).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    Positive(AtomicFormula),
    Negative(AtomicFormula),
}

impl Literal {
    /// Returns the underlying atom, regardless of polarity.
    pub fn atom(&self) -> &AtomicFormula {
        match self {
            Literal::Positive(atom) | Literal::Negative(atom) => atom,
        }
    }

    /// Returns `true` for [`Literal::Positive`].
    pub fn is_positive(&self) -> bool {
        matches!(self, Literal::Positive(_))
    }

    /// Returns the negation of this literal.
    pub fn negate(self) -> Literal {
        match self {
            Literal::Positive(atom) => Literal::Negative(atom),
            Literal::Negative(atom) => Literal::Positive(atom),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Positive(atom) => write!(f, "{atom}"),
            Literal::Negative(atom) => write!(f, "¬{atom}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_prints_predicate_and_arity() {
        let sig = Signature::new("p", 2);
        assert_eq!(sig.to_string(), "p/2");
    }

    #[test]
    fn negate_flips_polarity_and_keeps_atom() {
        let atom = AtomicFormula::new("p", vec![Term::Constant("a".into())]);
        let lit = Literal::Positive(atom.clone());
        assert_eq!(lit.negate(), Literal::Negative(atom));
    }
}
