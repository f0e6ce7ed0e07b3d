//! Integer encoding of NNF formulas (§4.2): a prefix-notation sequence over reserved operator
//! codes and fresh per-literal keys, with an inverse map back to literals.
//!
//! Mirrors the teacher's hash-consing `exprs`/`exprs_inv` dual-map idiom (`core::formula::Formula`),
//! adapted here to the spec's bijective-key scheme rather than full structural sharing.

use rustc_hash::FxHashMap;

use crate::algebra::atom::Literal;
use crate::algebra::formula::FormulaConstruct;
use crate::error::Result;
use crate::log_targets;

use super::{as_literal, literal_to_formula};

/// Reserved code for the `∨` operator in an encoded sequence.
pub const OR_CODE: i64 = 0;
/// Reserved code for the `∧` operator in an encoded sequence.
pub const AND_CODE: i64 = 1;
/// The first integer key available for a literal.
const FIRST_LITERAL_KEY: i64 = 2;

/// Assigns fresh integer keys to literals and encodes/decodes formulas built from
/// `{Atomic, Not(Atomic), And, Or}` against those keys.
#[derive(Debug, Default)]
pub struct Encoder {
    literal_to_key: FxHashMap<Literal, i64>,
    key_to_literal: FxHashMap<i64, Literal>,
    next_key: i64,
}

impl Encoder {
    pub fn new() -> Self {
        Self {
            literal_to_key: FxHashMap::default(),
            key_to_literal: FxHashMap::default(),
            next_key: FIRST_LITERAL_KEY,
        }
    }

    /// Returns the key for `literal`, allocating a fresh one if this is the first occurrence.
    fn key_for(&mut self, literal: Literal) -> i64 {
        if let Some(key) = self.literal_to_key.get(&literal) {
            return *key;
        }
        let key = self.next_key;
        self.next_key += 1;
        self.literal_to_key.insert(literal.clone(), key);
        self.key_to_literal.insert(key, literal);
        key
    }

    /// Encodes `formula` into a prefix-notation sequence (§4.2 "Integer encoding").
    pub fn encode(&mut self, formula: &FormulaConstruct) -> Result<Vec<i64>> {
        match formula {
            FormulaConstruct::And(a, b) => {
                let mut out = vec![AND_CODE];
                out.extend(self.encode(a)?);
                out.extend(self.encode(b)?);
                Ok(out)
            }
            FormulaConstruct::Or(a, b) => {
                let mut out = vec![OR_CODE];
                out.extend(self.encode(a)?);
                out.extend(self.encode(b)?);
                Ok(out)
            }
            _ => {
                let literal = as_literal(formula)?;
                Ok(vec![self.key_for(literal)])
            }
        }
    }

    /// Decodes a sequence produced by [`Encoder::encode`] back into a formula, by a
    /// right-to-left stack pass: atom keys push a leaf, operator codes pop two operands (the
    /// first pop is the left operand, the second the right) and push the rebuilt node.
    pub fn decode(&self, codes: &[i64]) -> FormulaConstruct {
        let mut stack: Vec<FormulaConstruct> = Vec::new();
        for &code in codes.iter().rev() {
            match code {
                OR_CODE | AND_CODE => {
                    let left = stack.pop().expect("malformed encoding: missing left operand");
                    let right = stack.pop().expect("malformed encoding: missing right operand");
                    let node = if code == OR_CODE {
                        FormulaConstruct::or(left, right)
                    } else {
                        FormulaConstruct::and(left, right)
                    };
                    stack.push(node);
                }
                key => {
                    let literal = self
                        .key_to_literal
                        .get(&key)
                        .expect("malformed encoding: unknown literal key");
                    stack.push(literal_to_formula(literal));
                }
            }
        }
        log::trace!(target: log_targets::DISTRIBUTE, "decoded {} codes into a formula", codes.len());
        stack.pop().expect("malformed encoding: empty sequence")
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
    fn encode_decode_round_trips_flat_disjunction() {
        let f = FormulaConstruct::or(atom("a"), atom("b"));
        let mut encoder = Encoder::new();
        let codes = encoder.encode(&f).unwrap();
        assert_eq!(encoder.decode(&codes), f);
    }

    #[test]
    fn encode_decode_round_trips_nested_formula() {
        let f = FormulaConstruct::and(
            FormulaConstruct::or(atom("a"), atom("b")),
            FormulaConstruct::not(atom("c")),
        );
        let mut encoder = Encoder::new();
        let codes = encoder.encode(&f).unwrap();
        assert_eq!(encoder.decode(&codes), f);
    }

    #[test]
    fn repeated_literal_reuses_key() {
        let f = FormulaConstruct::and(atom("a"), atom("a"));
        let mut encoder = Encoder::new();
        let codes = encoder.encode(&f).unwrap();
        assert_eq!(codes[1], codes[2]);
    }

    #[test]
    fn rejects_non_nnf_construct() {
        let f = FormulaConstruct::implies(atom("a"), atom("b"));
        let mut encoder = Encoder::new();
        assert!(encoder.encode(&f).is_err());
    }
}
