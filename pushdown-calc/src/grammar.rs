//! Hand-built calculator tables for the `pushdown` engine.
//!
//! The language is a sequence of statements separated by `;`:
//!
//! ```text
//! Program -> Stat | Program ; Stat
//! Stat    -> Expr | ident = Expr | exit
//! Expr    -> Expr + Term | Expr - Term | Term
//! Term    -> Term * Factor | Term / Factor | Factor
//! Factor  -> number | hexnumber | ident | ( Expr )
//! ```
//!
//! Literals are decimal or `0x` hex integers; identifiers intern into the
//! symbol table at scan time and read as 0 until assigned; `exit` raises the
//! context's `done` flag and yields 0. The parse automaton is the SLR
//! construction for the grammar above, with the accepting reductions flagged
//! only on end-marker entries. Operator precedence and left associativity
//! come entirely from the grammar shape, not from the engine.

use crate::error::CalcError;
use crate::symtab::SymTab;
use pushdown::{Grammar, LexTables, ParseTables, Production, SymbolID};

/// Terminal and nonterminal symbols of the calculator grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcSym {
    // Terminals.
    Number,
    HexNumber,
    Ident,
    Exit,
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Equals,
    Semicolon,
    End,
    // Nonterminals.
    Program,
    Stat,
    Expr,
    Term,
    Factor,
}

impl SymbolID for CalcSym {
    const END: Self = CalcSym::End;
}

/// Semantic values carried on the parse stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcValue {
    /// An evaluated integer.
    Number(i64),
    /// A symbol-table index produced by interning an identifier.
    Ident(usize),
}

/// Caller-owned state threaded through every scan and reduce action.
#[derive(Debug, Default)]
pub struct CalcContext {
    /// Variable bindings.
    pub vars: SymTab,
    /// Raised by the `exit` statement; interpreted by the host only.
    pub done: bool,
}

/// Nodes of the token automaton. Single-character punctuation shares the
/// `Punct` node, which directly carries the terminal it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcNode {
    Start,
    Int,
    Zero,
    HexMark,
    Hex,
    Word,
    WordE,
    WordEx,
    WordExi,
    WordExit,
    Punct(CalcSym),
}

/// States of the parse automaton. The numbering follows the SLR item-set
/// construction for the grammar in the module docs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalcState(pub u8);

/// Productions, named after their left-hand side and shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcProd {
    /// `Program -> Stat`
    Program,
    /// `Program -> Program ; Stat`
    ProgramSeq,
    /// `Stat -> Expr`
    StatExpr,
    /// `Stat -> ident = Expr`
    StatAssign,
    /// `Stat -> exit`
    StatExit,
    /// `Expr -> Expr + Term`
    ExprAdd,
    /// `Expr -> Expr - Term`
    ExprSub,
    /// `Expr -> Term`
    ExprTerm,
    /// `Term -> Term * Factor`
    TermMul,
    /// `Term -> Term / Factor`
    TermDiv,
    /// `Term -> Factor`
    TermFactor,
    /// `Factor -> number`
    FactorNum,
    /// `Factor -> hexnumber`
    FactorHex,
    /// `Factor -> ident`
    FactorIdent,
    /// `Factor -> ( Expr )`
    FactorParen,
}

/// The calculator grammar: both table surfaces in one zero-sized type.
pub struct CalcGrammar;

impl Grammar for CalcGrammar {
    type Symbol = CalcSym;
    type Value = CalcValue;
    type Context = CalcContext;
    type Error = CalcError;
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_ident_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

impl LexTables for CalcGrammar {
    type Node = CalcNode;

    fn start_node() -> CalcNode {
        CalcNode::Start
    }

    fn next(node: CalcNode, ch: char) -> Option<CalcNode> {
        use CalcNode::*;
        match (node, ch) {
            (Start, '0') => Some(Zero),
            (Start, c) if c.is_ascii_digit() => Some(Int),
            (Start, 'e') => Some(WordE),
            (Start, c) if is_ident_start(c) => Some(Word),
            (Start, '+') => Some(Punct(CalcSym::Plus)),
            (Start, '-') => Some(Punct(CalcSym::Minus)),
            (Start, '*') => Some(Punct(CalcSym::Star)),
            (Start, '/') => Some(Punct(CalcSym::Slash)),
            (Start, '(') => Some(Punct(CalcSym::LParen)),
            (Start, ')') => Some(Punct(CalcSym::RParen)),
            (Start, '=') => Some(Punct(CalcSym::Equals)),
            (Start, ';') => Some(Punct(CalcSym::Semicolon)),

            (Zero, 'x') => Some(HexMark),
            (Zero, c) if c.is_ascii_digit() => Some(Int),
            (Int, c) if c.is_ascii_digit() => Some(Int),
            (HexMark, c) if c.is_ascii_hexdigit() => Some(Hex),
            (Hex, c) if c.is_ascii_hexdigit() => Some(Hex),

            // The `exit` keyword is carved out of the identifier path; any
            // other identifier character falls back to a plain word.
            (WordE, 'x') => Some(WordEx),
            (WordEx, 'i') => Some(WordExi),
            (WordExi, 't') => Some(WordExit),
            (WordE | WordEx | WordExi | WordExit | Word, c) if is_ident_continue(c) => Some(Word),

            _ => None,
        }
    }

    fn accept(node: CalcNode) -> Option<CalcSym> {
        use CalcNode::*;
        match node {
            Zero | Int => Some(CalcSym::Number),
            Hex => Some(CalcSym::HexNumber),
            Word | WordE | WordEx | WordExi => Some(CalcSym::Ident),
            WordExit => Some(CalcSym::Exit),
            Punct(sym) => Some(sym),
            Start | HexMark => None,
        }
    }

    fn scan(
        context: &mut CalcContext,
        symbol: CalcSym,
        text: &str,
    ) -> Result<Option<CalcValue>, CalcError> {
        match symbol {
            CalcSym::Number => Ok(Some(CalcValue::Number(text.parse()?))),
            CalcSym::HexNumber => {
                let digits = text.strip_prefix("0x").unwrap_or(text);
                Ok(Some(CalcValue::Number(i64::from_str_radix(digits, 16)?)))
            }
            CalcSym::Ident => Ok(Some(CalcValue::Ident(context.vars.intern(text)))),
            _ => Ok(None),
        }
    }
}

impl ParseTables for CalcGrammar {
    type State = CalcState;
    type Prod = CalcProd;

    fn start_state() -> CalcState {
        CalcState(0)
    }

    fn find_shift(state: CalcState, sym: CalcSym) -> Option<CalcState> {
        use CalcSym::*;
        let next = match (state.0, sym) {
            (0 | 11, Ident) => 6,
            (0 | 11, Exit) => 7,
            (0 | 10 | 11 | 12 | 13 | 14 | 15 | 16, Number) => 8,
            (0 | 10 | 11 | 12 | 13 | 14 | 15 | 16, HexNumber) => 9,
            (0 | 10 | 11 | 12 | 13 | 14 | 15 | 16, LParen) => 10,
            (10 | 12 | 13 | 14 | 15 | 16, Ident) => 18,
            (1, Semicolon) => 11,
            (3 | 17 | 24, Plus) => 12,
            (3 | 17 | 24, Minus) => 13,
            (4 | 20 | 21, Star) => 14,
            (4 | 20 | 21, Slash) => 15,
            (6, Equals) => 16,
            (17, RParen) => 25,
            _ => return None,
        };
        Some(CalcState(next))
    }

    fn find_reduce(state: CalcState, sym: CalcSym) -> Option<(CalcProd, bool)> {
        use CalcSym::*;
        match (state.0, sym) {
            // Accept only on the end-marker; `;` continues the sequence.
            (2, End) => Some((CalcProd::Program, true)),
            (2, Semicolon) => Some((CalcProd::Program, false)),
            (19, End) => Some((CalcProd::ProgramSeq, true)),
            (19, Semicolon) => Some((CalcProd::ProgramSeq, false)),

            // FOLLOW(Stat) = { end, ; }
            (3, End | Semicolon) => Some((CalcProd::StatExpr, false)),
            (7, End | Semicolon) => Some((CalcProd::StatExit, false)),
            (24, End | Semicolon) => Some((CalcProd::StatAssign, false)),

            // FOLLOW(Expr) = { end, ;, +, -, ) }
            (4, End | Semicolon | Plus | Minus | RParen) => Some((CalcProd::ExprTerm, false)),
            (20, End | Semicolon | Plus | Minus | RParen) => Some((CalcProd::ExprAdd, false)),
            (21, End | Semicolon | Plus | Minus | RParen) => Some((CalcProd::ExprSub, false)),

            // FOLLOW(Term) = FOLLOW(Factor) = { end, ;, +, -, *, /, ) }
            (5, End | Semicolon | Plus | Minus | Star | Slash | RParen) => {
                Some((CalcProd::TermFactor, false))
            }
            (22, End | Semicolon | Plus | Minus | Star | Slash | RParen) => {
                Some((CalcProd::TermMul, false))
            }
            (23, End | Semicolon | Plus | Minus | Star | Slash | RParen) => {
                Some((CalcProd::TermDiv, false))
            }
            (8, End | Semicolon | Plus | Minus | Star | Slash | RParen) => {
                Some((CalcProd::FactorNum, false))
            }
            (9, End | Semicolon | Plus | Minus | Star | Slash | RParen) => {
                Some((CalcProd::FactorHex, false))
            }
            (6 | 18, End | Semicolon | Plus | Minus | Star | Slash | RParen) => {
                Some((CalcProd::FactorIdent, false))
            }
            (25, End | Semicolon | Plus | Minus | Star | Slash | RParen) => {
                Some((CalcProd::FactorParen, false))
            }

            _ => None,
        }
    }

    fn find_goto(state: CalcState, lhs: CalcSym) -> Option<CalcState> {
        use CalcSym::*;
        let next = match (state.0, lhs) {
            (0, Program) => 1,
            (0, Stat) => 2,
            (11, Stat) => 19,
            (0 | 11, Expr) => 3,
            (10, Expr) => 17,
            (16, Expr) => 24,
            (0 | 10 | 11 | 16, Term) => 4,
            (12, Term) => 20,
            (13, Term) => 21,
            (0 | 10 | 11 | 12 | 13 | 16, Factor) => 5,
            (14, Factor) => 22,
            (15, Factor) => 23,
            _ => return None,
        };
        Some(CalcState(next))
    }

    fn production(prod: CalcProd) -> Production<CalcSym> {
        use CalcProd::*;
        let (lhs, arity) = match prod {
            Program => (CalcSym::Program, 1),
            ProgramSeq => (CalcSym::Program, 3),
            StatExpr => (CalcSym::Stat, 1),
            StatAssign => (CalcSym::Stat, 3),
            StatExit => (CalcSym::Stat, 1),
            ExprAdd => (CalcSym::Expr, 3),
            ExprSub => (CalcSym::Expr, 3),
            ExprTerm => (CalcSym::Expr, 1),
            TermMul => (CalcSym::Term, 3),
            TermDiv => (CalcSym::Term, 3),
            TermFactor => (CalcSym::Term, 1),
            FactorNum => (CalcSym::Factor, 1),
            FactorHex => (CalcSym::Factor, 1),
            FactorIdent => (CalcSym::Factor, 1),
            FactorParen => (CalcSym::Factor, 3),
        };
        Production { lhs, arity }
    }

    fn action(
        context: &mut CalcContext,
        prod: CalcProd,
        args: Vec<Option<CalcValue>>,
    ) -> Result<CalcValue, CalcError> {
        use CalcProd::*;
        use CalcValue::*;
        match prod {
            // Pass-through productions keep the single argument's value.
            Program | StatExpr | ExprTerm | TermFactor | FactorNum | FactorHex => {
                let [Some(value)] = args.as_slice() else {
                    unreachable!()
                };
                Ok(*value)
            }
            // The sequence evaluates to its last statement.
            ProgramSeq => {
                let [Some(_), None, Some(stat)] = args.as_slice() else {
                    unreachable!()
                };
                Ok(*stat)
            }
            StatAssign => {
                let [Some(Ident(index)), None, Some(Number(value))] = args.as_slice() else {
                    unreachable!()
                };
                context.vars.set(*index, *value)?;
                Ok(Number(*value))
            }
            StatExit => {
                context.done = true;
                Ok(Number(0))
            }
            ExprAdd => {
                let [Some(Number(lhs)), None, Some(Number(rhs))] = args.as_slice() else {
                    unreachable!()
                };
                let sum = lhs.checked_add(*rhs).ok_or(CalcError::Overflow)?;
                Ok(Number(sum))
            }
            ExprSub => {
                let [Some(Number(lhs)), None, Some(Number(rhs))] = args.as_slice() else {
                    unreachable!()
                };
                let diff = lhs.checked_sub(*rhs).ok_or(CalcError::Overflow)?;
                Ok(Number(diff))
            }
            TermMul => {
                let [Some(Number(lhs)), None, Some(Number(rhs))] = args.as_slice() else {
                    unreachable!()
                };
                let product = lhs.checked_mul(*rhs).ok_or(CalcError::Overflow)?;
                Ok(Number(product))
            }
            TermDiv => {
                let [Some(Number(lhs)), None, Some(Number(rhs))] = args.as_slice() else {
                    unreachable!()
                };
                if *rhs == 0 {
                    return Err(CalcError::DivideByZero);
                }
                // `checked_div` only fails here on `i64::MIN / -1`.
                let quot = lhs.checked_div(*rhs).ok_or(CalcError::Overflow)?;
                Ok(Number(quot))
            }
            FactorIdent => {
                let [Some(Ident(index))] = args.as_slice() else {
                    unreachable!()
                };
                Ok(Number(context.vars.get(*index)?))
            }
            FactorParen => {
                let [None, Some(expr), None] = args.as_slice() else {
                    unreachable!()
                };
                Ok(*expr)
            }
        }
    }
}
