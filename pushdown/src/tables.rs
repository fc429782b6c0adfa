//! Contracts between the engine and a grammar/lexer compiler.
//!
//! The engine never builds automata; it only consumes them. A grammar
//! implementation (generated or hand-built) supplies two table surfaces over
//! a shared set of associated types:
//!
//! - [`LexTables`] — the character-transition automaton used for tokenizing,
//! - [`ParseTables`] — the shift/reduce/goto automaton plus the semantic
//!   actions that fold token values into one result.
//!
//! Both tables must be deterministic: for any `(state, symbol)` pair at most
//! one of shift and reduce is defined. The engine does not resolve
//! conflicts; violating this is a table-construction bug.

use std::fmt::Debug;

/// Identifier for a terminal or nonterminal grammar symbol.
///
/// Symbols are small `Copy` values compared by identity, typically a
/// fieldless enum. Exactly one symbol is the designated end-marker: a
/// payload-free pseudo-terminal injected by the engine at end of input to
/// force the final reductions.
pub trait SymbolID: Copy + Debug + Eq {
    /// The end-marker symbol. Never produced by the token automaton.
    const END: Self;
}

/// Associated types shared by both table surfaces of one grammar.
pub trait Grammar {
    /// Terminal and nonterminal identifiers.
    type Symbol: SymbolID;

    /// Semantic payload attached to stack frames. The engine never inspects
    /// values; it only moves them from scan functions into frames and from
    /// frames into semantic actions. A tagged variant type (one variant per
    /// payload kind the grammar uses) keeps mismatches well-defined.
    type Value: Debug;

    /// Caller-owned mutable state threaded into every scan and action call.
    /// The engine itself never reads or writes it.
    type Context;

    /// Error type produced by scan functions and semantic actions.
    type Error;
}

/// The character-transition automaton consumed by the scanner driver.
///
/// Nodes form a partial function over input characters; each node optionally
/// accepts one terminal symbol. Lookups are table access only and must not
/// observe or mutate anything else.
pub trait LexTables: Grammar {
    /// Automaton node identifier.
    type Node: Copy + Debug + Eq;

    /// The initial node. Whitespace is only skipped while the scanner sits
    /// here, and the node itself must not accept (tokens are non-empty).
    fn start_node() -> Self::Node;

    /// The transition for `ch` out of `node`, if one is defined.
    fn next(node: Self::Node, ch: char) -> Option<Self::Node>;

    /// The terminal accepted at `node`, if any.
    fn accept(node: Self::Node) -> Option<Self::Symbol>;

    /// Converts the matched text of an accepted terminal into its semantic
    /// value. `Ok(None)` marks a payload-free terminal.
    fn scan(
        context: &mut Self::Context,
        symbol: Self::Symbol,
        text: &str,
    ) -> Result<Option<Self::Value>, Self::Error>;
}

/// A grammar production: left-hand nonterminal and right-hand length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Production<S> {
    /// The nonterminal produced by the reduction.
    pub lhs: S,
    /// Number of right-hand symbols, i.e. frames popped on reduce.
    pub arity: usize,
}

/// The state/rule automaton consumed by the parser driver.
///
/// Per state the tables expose three partial functions keyed by symbol:
/// shift target, reduce entry, and goto target. Shift is always consulted
/// before reduce; a state offering both for the same symbol is malformed.
pub trait ParseTables: Grammar {
    /// Automaton state identifier.
    type State: Copy + Debug + Eq;

    /// Production identifier, used to dispatch semantic actions.
    type Prod: Copy + Debug + Eq;

    /// The initial state, pushed as the sentinel bottom frame.
    fn start_state() -> Self::State;

    /// Shift target for `sym` in `state`, if defined.
    fn find_shift(state: Self::State, sym: Self::Symbol) -> Option<Self::State>;

    /// Reduce entry for `sym` in `state`, if defined. The flag marks the
    /// accepting reduction; it may only appear on entries keyed by
    /// [`SymbolID::END`].
    fn find_reduce(state: Self::State, sym: Self::Symbol) -> Option<(Self::Prod, bool)>;

    /// Goto target for the nonterminal `lhs` in `state`, if defined.
    fn find_goto(state: Self::State, lhs: Self::Symbol) -> Option<Self::State>;

    /// Left-hand nonterminal and arity of `prod`.
    fn production(prod: Self::Prod) -> Production<Self::Symbol>;

    /// The semantic action of `prod`. `args` holds the values of the popped
    /// frames in stack order (leftmost right-hand symbol first); payload-free
    /// positions are `None`. Produces the value of the new nonterminal frame.
    fn action(
        context: &mut Self::Context,
        prod: Self::Prod,
        args: Vec<Option<Self::Value>>,
    ) -> Result<Self::Value, Self::Error>;
}
