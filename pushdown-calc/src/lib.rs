//! # pushdown-calc
//!
//! A small calculator language instantiating the [`pushdown`] engine:
//! hand-built token and parse automata, a symbol table for variable
//! bindings, and semantic actions that evaluate while parsing.
//!
//! Statements are separated by `;` and evaluated left to right inside one
//! parse; the result of a parse is the value of its last statement.
//! Assignments mutate the [`CalcContext`] passed by the caller, so bindings
//! survive across statements and across separate parses sharing a context.
//! The `exit` statement raises [`CalcContext::done`], which only the host
//! interprets.
//!
//! ## Example
//!
//! ```
//! use pushdown_calc::{evaluate, CalcContext};
//!
//! let mut context = CalcContext::default();
//! assert_eq!(evaluate(&mut context, "a = 2; a * 3").unwrap(), 6);
//! assert_eq!(evaluate(&mut context, "a + 0x10").unwrap(), 18);
//! ```

pub mod error;
pub mod grammar;
pub mod symtab;

pub use error::CalcError;
pub use grammar::{CalcContext, CalcGrammar, CalcNode, CalcProd, CalcState, CalcSym, CalcValue};
pub use symtab::{SymTab, SymTabError};

use pushdown::{Engine, EngineError};

/// Parses and evaluates `input` against `context`, returning the value of
/// the last statement.
///
/// Convenience wrapper for hosts that have the whole input at hand; it runs
/// a fresh [`Engine`] over the characters and finishes the parse. Incremental
/// hosts drive [`Engine`] with [`CalcGrammar`] directly.
pub fn evaluate(
    context: &mut CalcContext,
    input: &str,
) -> Result<i64, EngineError<CalcError>> {
    let mut engine = Engine::<CalcGrammar>::new();
    engine.feed_str(context, input)?;
    match engine.finish(context)? {
        CalcValue::Number(value) => Ok(value),
        // A bare identifier at the top evaluates to its binding.
        CalcValue::Ident(index) => context
            .vars
            .get(index)
            .map_err(|err| EngineError::Action(CalcError::SymTab(err))),
    }
}
