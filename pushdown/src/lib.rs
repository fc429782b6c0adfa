//! # pushdown
//!
//! A generic, table-driven incremental lexer/parser engine.
//!
//! Given a character-transition automaton for tokenizing ([`LexTables`]) and
//! a state/rule automaton for parsing ([`ParseTables`]), the [`Engine`]
//! consumes input one character at a time, produces typed semantic values
//! for recognized tokens, and drives a deterministic shift-reduce-goto parse
//! that folds those values into a single result through the grammar's
//! semantic actions. A caller-owned mutable context is threaded into every
//! scan and action call.
//!
//! Building the automata is out of scope: a grammar/lexer compiler (or a
//! hand-built table set, as in the tests) supplies them, and the engine only
//! executes them. The engine rejects rather than recovers — any failure is
//! terminal for the current parse, and [`Engine::start`] must run before the
//! engine is reused.
//!
//! ## Pipeline
//!
//! ```text
//! host --feed(char)--> Scanner --(symbol, value)--> Parser --actions--> context
//!                                                     |
//! host --finish()-------------------------------> final value
//! ```
//!
//! ## Example
//!
//! A one-token grammar that accepts a single decimal number:
//!
//! ```
//! use pushdown::{Engine, Grammar, LexTables, ParseTables, Production, SymbolID};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum Sym { Num, End, Acc }
//!
//! impl SymbolID for Sym {
//!     const END: Self = Sym::End;
//! }
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum Node { Start, Digits }
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! struct Number;
//!
//! struct Digits;
//!
//! impl Grammar for Digits {
//!     type Symbol = Sym;
//!     type Value = i64;
//!     type Context = ();
//!     type Error = std::num::ParseIntError;
//! }
//!
//! impl LexTables for Digits {
//!     type Node = Node;
//!     fn start_node() -> Node { Node::Start }
//!     fn next(_node: Node, ch: char) -> Option<Node> {
//!         ch.is_ascii_digit().then_some(Node::Digits)
//!     }
//!     fn accept(node: Node) -> Option<Sym> {
//!         (node == Node::Digits).then_some(Sym::Num)
//!     }
//!     fn scan(_: &mut (), _: Sym, text: &str) -> Result<Option<i64>, Self::Error> {
//!         Ok(Some(text.parse()?))
//!     }
//! }
//!
//! impl ParseTables for Digits {
//!     type State = u8;
//!     type Prod = Number;
//!     fn start_state() -> u8 { 0 }
//!     fn find_shift(state: u8, sym: Sym) -> Option<u8> {
//!         (state == 0 && sym == Sym::Num).then_some(1)
//!     }
//!     fn find_reduce(state: u8, sym: Sym) -> Option<(Number, bool)> {
//!         (state == 1 && sym == Sym::End).then_some((Number, true))
//!     }
//!     fn find_goto(state: u8, lhs: Sym) -> Option<u8> {
//!         (state == 0 && lhs == Sym::Acc).then_some(2)
//!     }
//!     fn production(_: Number) -> Production<Sym> {
//!         Production { lhs: Sym::Acc, arity: 1 }
//!     }
//!     fn action(_: &mut (), _: Number, mut args: Vec<Option<i64>>) -> Result<i64, Self::Error> {
//!         Ok(args.pop().flatten().unwrap())
//!     }
//! }
//!
//! let mut engine = Engine::<Digits>::new();
//! engine.feed_str(&mut (), "42").unwrap();
//! assert_eq!(engine.finish(&mut ()).unwrap(), 42);
//! ```

mod engine;
mod error;
mod parser;
mod scanner;
mod tables;

#[cfg(test)]
pub(crate) mod test_grammar;

pub use crate::engine::Engine;
pub use crate::error::EngineError;
pub use crate::parser::{Frame, ParseStats, Parser};
pub use crate::scanner::{ScanStats, Scanner};
pub use crate::tables::{Grammar, LexTables, ParseTables, Production, SymbolID};
