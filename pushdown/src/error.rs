//! Error types reported by the scanner and parser drivers.
//!
//! Every failure travels by value through `Result`; the engine performs no
//! recovery, and a failed call leaves the engine undefined until
//! [`Engine::start`](crate::Engine::start) is called again.

use smartstring::alias::String;
use thiserror::Error;

/// Errors produced while driving a parse.
///
/// `E` is the grammar's own error type: whatever the table's scan functions
/// and semantic actions can fail with is carried through verbatim in
/// [`EngineError::Action`].
#[derive(Debug, Error)]
pub enum EngineError<E> {
    /// The current token text matches no accepting node and cannot extend.
    #[error("unexpected character {ch:?} on line {line}")]
    UnexpectedChar {
        /// The character that could not be consumed.
        ch: char,
        /// 1-based input line where it occurred.
        line: usize,
    },

    /// End of input was reached in the middle of a token that never passed
    /// through an accepting node.
    #[error("unterminated token {text:?} at end of input on line {line}")]
    UnterminatedToken {
        /// The partially matched text.
        text: String,
        /// 1-based input line where the token started ending.
        line: usize,
    },

    /// The parser state offers neither shift nor reduce for the current
    /// symbol: there is no valid continuation in the grammar.
    #[error("unexpected {symbol} on line {line}")]
    Syntax {
        /// The symbol that had no action.
        symbol: String,
        /// 1-based input line of the offending token.
        line: usize,
    },

    /// The end-marker was injected but no chain of reductions reached an
    /// accepting reduction.
    #[error("unexpected end of input")]
    UnexpectedEnd,

    /// A reduce succeeded but the exposed state has no goto target for the
    /// produced nonterminal. This is a table-construction bug, never an
    /// input error.
    #[error("malformed parse tables: no goto for {symbol}")]
    MissingGoto {
        /// The nonterminal that had no goto target.
        symbol: String,
    },

    /// A scan function or semantic action failed.
    #[error("semantic action failed: {0}")]
    Action(E),
}
