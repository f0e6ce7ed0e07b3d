//! mln-clausal constructs canonical clause sets for a Markov Logic Network structure-learning
//! system: compiling arbitrary first-order formulas to CNF, and synthesizing variabilized Horn,
//! conjunction, and definite clauses from hypergraph paths under a mode-declaration policy.
//!
//! Entry points: [`cnf::make_cnf`] (CNF compilation over a formula set), [`builder::clauses`]
//! (Horn/conjunction clauses from paths), and [`builder::definite_clauses`] (definite clauses
//! from paths). [`algebra`] holds the underlying term/atom/formula representation;
//! [`mode`] holds the read-only schema/mode/evidence collaborator contracts this core consumes.
//!
//! This crate performs no I/O, reads no environment variables or files, and installs no logger
//! of its own — applications embedding it are expected to configure `log` themselves.

pub mod algebra;
pub mod builder;
pub mod clause;
pub mod cnf;
pub mod distribute;
pub mod error;
mod log_targets;
pub mod mode;
pub mod normalize;
pub mod path;

pub use builder::{clauses, definite_clauses, BuilderConfig, FunctionIntroducer, IdentityFunctionIntroducer};
pub use clause::{Clause, ClauseKind, ClauseSet};
pub use cnf::{make_cnf, CnfInput};
pub use distribute::DistributorConfig;
pub use error::{ClauseError, Result};
pub use path::HPath;
