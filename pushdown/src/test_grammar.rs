//! Hand-built minimal tables used by the driver tests.
//!
//! The grammar is a flat sum language:
//!
//! ```text
//! Acc -> Sum          (accepting reduction, end-marker only)
//! Sum -> Sum + Num
//! Sum -> Num
//! ```
//!
//! The token automaton additionally recognizes `&&` (a two-character token
//! the parse tables never act on) so scanner tests can exercise partial
//! matches and unterminated input.

use crate::tables::{Grammar, LexTables, ParseTables, Production, SymbolID};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sym {
    // Terminals.
    Num,
    Plus,
    AndAnd,
    End,
    // Nonterminals.
    Sum,
    Acc,
}

impl SymbolID for Sym {
    const END: Self = Sym::End;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Start,
    Digits,
    PlusOp,
    Amp,
    AmpAmp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct St(pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prod {
    /// `Acc -> Sum`
    Accept,
    /// `Sum -> Num`
    First,
    /// `Sum -> Sum + Num`
    Next,
}

/// Context recording which scan and reduce actions ran.
#[derive(Debug, Default)]
pub struct TestCtx {
    pub scanned: usize,
    pub reduced: Vec<&'static str>,
}

#[derive(Debug, Error)]
pub enum TestError {
    #[error("bad number: {0}")]
    Number(#[from] std::num::ParseIntError),
}

pub struct TestGrammar;

impl Grammar for TestGrammar {
    type Symbol = Sym;
    type Value = i64;
    type Context = TestCtx;
    type Error = TestError;
}

impl LexTables for TestGrammar {
    type Node = Node;

    fn start_node() -> Node {
        Node::Start
    }

    fn next(node: Node, ch: char) -> Option<Node> {
        match (node, ch) {
            (Node::Start, c) if c.is_ascii_digit() => Some(Node::Digits),
            (Node::Start, '+') => Some(Node::PlusOp),
            (Node::Start, '&') => Some(Node::Amp),
            (Node::Digits, c) if c.is_ascii_digit() => Some(Node::Digits),
            (Node::Amp, '&') => Some(Node::AmpAmp),
            _ => None,
        }
    }

    fn accept(node: Node) -> Option<Sym> {
        match node {
            Node::Digits => Some(Sym::Num),
            Node::PlusOp => Some(Sym::Plus),
            Node::AmpAmp => Some(Sym::AndAnd),
            Node::Start | Node::Amp => None,
        }
    }

    fn scan(context: &mut TestCtx, symbol: Sym, text: &str) -> Result<Option<i64>, TestError> {
        match symbol {
            Sym::Num => {
                context.scanned += 1;
                Ok(Some(text.parse()?))
            }
            _ => Ok(None),
        }
    }
}

impl ParseTables for TestGrammar {
    type State = St;
    type Prod = Prod;

    fn start_state() -> St {
        St(0)
    }

    fn find_shift(state: St, sym: Sym) -> Option<St> {
        match (state.0, sym) {
            (0, Sym::Num) => Some(St(1)),
            (2, Sym::Plus) => Some(St(3)),
            (3, Sym::Num) => Some(St(4)),
            _ => None,
        }
    }

    fn find_reduce(state: St, sym: Sym) -> Option<(Prod, bool)> {
        match (state.0, sym) {
            (1, Sym::Plus | Sym::End) => Some((Prod::First, false)),
            (2, Sym::End) => Some((Prod::Accept, true)),
            (4, Sym::Plus | Sym::End) => Some((Prod::Next, false)),
            _ => None,
        }
    }

    fn find_goto(state: St, lhs: Sym) -> Option<St> {
        match (state.0, lhs) {
            (0, Sym::Sum) => Some(St(2)),
            (0, Sym::Acc) => Some(St(5)),
            _ => None,
        }
    }

    fn production(prod: Prod) -> Production<Sym> {
        match prod {
            Prod::Accept => Production {
                lhs: Sym::Acc,
                arity: 1,
            },
            Prod::First => Production {
                lhs: Sym::Sum,
                arity: 1,
            },
            Prod::Next => Production {
                lhs: Sym::Sum,
                arity: 3,
            },
        }
    }

    fn action(context: &mut TestCtx, prod: Prod, args: Vec<Option<i64>>) -> Result<i64, TestError> {
        match prod {
            Prod::Accept => {
                context.reduced.push("accept");
                let [Some(sum)] = args.as_slice() else {
                    unreachable!()
                };
                Ok(*sum)
            }
            Prod::First => {
                context.reduced.push("first");
                let [Some(num)] = args.as_slice() else {
                    unreachable!()
                };
                Ok(*num)
            }
            Prod::Next => {
                context.reduced.push("next");
                let [Some(sum), None, Some(num)] = args.as_slice() else {
                    unreachable!()
                };
                Ok(*sum + *num)
            }
        }
    }
}
