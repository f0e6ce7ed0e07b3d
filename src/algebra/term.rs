//! Terms appearing in atomic formulas (§3).

use std::fmt;

/// The name of a domain (sort) that a variable ranges over.
pub type Domain = String;

/// A term: a constant, a variable, or a function application.
///
/// Mirrors `Term::{Var,Const}` of the pack's datalog example, extended with `Function` for
/// full first-order terms as required by §3.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// A ground symbol, e.g. `alice`.
    Constant(String),

    /// A variable with an associated domain, e.g. `vo1` ranging over `obj`.
    Variable(String, Domain),

    /// A function application, e.g. `father_of(x)`.
    Function(String, Vec<Term>),
}

impl Term {
    /// Returns the domain of this term, if it is a variable.
    pub fn domain(&self) -> Option<&str> {
        match self {
            Term::Variable(_, domain) => Some(domain),
            _ => None,
        }
    }

    /// Returns `true` if this term is a variable.
    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_, _))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Constant(symbol) => write!(f, "{symbol}"),
            Term::Variable(name, _) => write!(f, "{name}"),
            Term::Function(symbol, args) => {
                write!(f, "{symbol}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}
