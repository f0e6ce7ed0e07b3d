//! The CNF Pipeline (§4.4): public entry point `make_cnf`, orchestrating
//! Normalizer → Hybrid Distributor → Clause Extractor over a set of formulas, in parallel.

use rayon::prelude::*;

use crate::algebra::formula::{DefiniteClause, FormulaConstruct, Weight, WeightedFormula};
use crate::clause::{extract_clauses, Clause, ClauseSet};
use crate::distribute::hybrid_distribute;
use crate::error::Result;
use crate::log_targets;
use crate::mode::ConstantsMap;
use crate::normalize::normalize;

/// One input to [`make_cnf`]: a bare construct and a definite clause are both wrapped as hard
/// weighted formulas (§4.4); a [`WeightedFormula`] passes its weight through unchanged.
#[derive(Debug, Clone)]
pub enum CnfInput {
    Weighted(WeightedFormula),
    Bare(FormulaConstruct),
    Definite(DefiniteClause),
}

impl CnfInput {
    fn into_weighted(self) -> WeightedFormula {
        match self {
            CnfInput::Weighted(wf) => wf,
            CnfInput::Bare(f) => WeightedFormula::hard(f),
            CnfInput::Definite(dc) => WeightedFormula::hard(dc.into_implication()),
        }
    }
}

impl From<FormulaConstruct> for CnfInput {
    fn from(f: FormulaConstruct) -> Self {
        CnfInput::Bare(f)
    }
}

impl From<WeightedFormula> for CnfInput {
    fn from(wf: WeightedFormula) -> Self {
        CnfInput::Weighted(wf)
    }
}

impl From<DefiniteClause> for CnfInput {
    fn from(dc: DefiniteClause) -> Self {
        CnfInput::Definite(dc)
    }
}

/// Compiles `formulas` into a de-duplicated clause set (§4.4, §6 entry point 1).
///
/// Each formula is processed independently — normalized, hybrid-distributed, and extracted into
/// clauses — and the per-formula work is dispatched across `rayon`'s global thread pool (§5).
/// On failure, the first error in input-index order is returned and any in-flight work for
/// later formulas is discarded.
pub fn make_cnf<I>(formulas: I, constants: &ConstantsMap) -> Result<ClauseSet>
where
    I: IntoIterator,
    I::Item: Into<CnfInput>,
{
    let inputs: Vec<WeightedFormula> = formulas.into_iter().map(|f| f.into().into_weighted()).collect();
    log::debug!(target: log_targets::CNF, "compiling {} formula(s) to CNF", inputs.len());

    let per_formula: Vec<Result<Vec<Clause>>> = inputs
        .par_iter()
        .map(|wf| compile_one(wf, constants))
        .collect();

    let mut result = ClauseSet::new();
    for (index, outcome) in per_formula.into_iter().enumerate() {
        match outcome {
            Ok(clauses) => {
                for clause in clauses {
                    result.insert_dedup(clause);
                }
            }
            Err(err) => {
                log::debug!(target: log_targets::CNF, "formula {index} failed to compile: {err}");
                return Err(err);
            }
        }
    }
    Ok(result)
}

fn compile_one(wf: &WeightedFormula, constants: &ConstantsMap) -> Result<Vec<Clause>> {
    let normalized = normalize(wf.formula.clone(), constants)?;
    let distributed = hybrid_distribute(&normalized)?;
    Ok(extract_clauses(&distributed, wf.weight))
}
