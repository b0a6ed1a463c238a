//! Rule evaluation: regex compilation plus the three check strategies.

pub mod compiled;
pub mod engine;

pub use compiled::{CompiledCheck, CompiledRule};
pub use engine::{EvaluationResult, RuleEvaluator, Verdict};
