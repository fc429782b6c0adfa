//! The calculator's semantic error type.
//!
//! These are failures of scan functions and reduce actions, not of the
//! engine itself; the engine wraps them in
//! [`EngineError::Action`](pushdown::EngineError::Action) and surfaces them
//! verbatim.

use crate::symtab::SymTabError;
use thiserror::Error;

/// Everything a calculator scan function or semantic action can fail with.
#[derive(Debug, Error)]
pub enum CalcError {
    /// A numeric literal did not fit an `i64`.
    #[error("unable to parse number: {0}")]
    ParseInt(#[from] std::num::ParseIntError),

    /// A symbol-table operation failed.
    #[error("symbol table error: {0}")]
    SymTab(#[from] SymTabError),

    /// Division or remainder by zero.
    #[error("division by zero")]
    DivideByZero,

    /// An arithmetic result did not fit an `i64`.
    #[error("arithmetic overflow")]
    Overflow,
}
