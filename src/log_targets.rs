//! Named targets for `log` call sites, grouped in one place.
//!
//! Follows the `misc::log::targets` convention of the pack's SAT-solver teacher: a flat module of
//! `&'static str` constants consumed as `log::debug!(target: targets::X, ...)`, rather than the
//! default per-module target.

/// The Normalizer (§4.1): implication removal, NNF, standardization, quantifier elimination.
pub const NORMALIZE: &str = "mln_clausal::normalize";

/// The Hybrid Distributor (§4.2): encoding, fast-distribute detection, distribution.
pub const DISTRIBUTE: &str = "mln_clausal::distribute";

/// The Clause Extractor and α-equivalence de-duplication (§4.3, §4.7).
pub const CLAUSE: &str = "mln_clausal::clause";

/// The CNF Pipeline (§4.4).
pub const CNF: &str = "mln_clausal::cnf";

/// The Path Variabilizer (§4.5).
pub const VARIABILIZE: &str = "mln_clausal::path";

/// The Clause/Definite Builder (§4.6).
pub const BUILD: &str = "mln_clausal::builder";
