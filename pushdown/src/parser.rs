//! The parser driver: a deterministic shift-reduce-goto automaton over the
//! token stream.
//!
//! The stack holds composite frames of `(state, symbol, value)` so the
//! lockstep invariant between parser states, grammar symbols, and semantic
//! values is structural. The bottom frame is a sentinel carrying the start
//! state; it is never popped during normal operation, so the stack depth is
//! always at least one.

use crate::error::EngineError;
use crate::tables::{ParseTables, Production, SymbolID};

/// One stack frame: automaton state, the grammar symbol that produced it,
/// and the symbol's semantic value (`None` for payload-free terminals and
/// the sentinel). Frames are pushed and popped atomically.
pub struct Frame<G>
where
    G: ParseTables,
{
    /// Parser state entered when this frame was pushed.
    pub state: G::State,
    /// The terminal or nonterminal that was shifted or produced.
    pub symbol: G::Symbol,
    /// The semantic value owned by this frame.
    pub value: Option<G::Value>,
}

/// Counters accumulated over one parse, reset by [`Parser::start`].
#[derive(Debug, Clone, Default)]
pub struct ParseStats {
    /// Tokens consumed, including the end-marker.
    pub tokens: usize,
    /// Shift steps performed.
    pub shifts: usize,
    /// Reduce steps performed.
    pub reductions: usize,
}

/// Shift-reduce executor over a grammar's state/rule automaton.
///
/// Tokens arrive one at a time through [`advance`](Self::advance); an
/// unbounded number of reductions may run before each token is finally
/// shifted. Semantic actions receive the external context on every call.
pub struct Parser<G>
where
    G: ParseTables,
{
    frames: Vec<Frame<G>>,
    stats: ParseStats,
}

impl<G> Parser<G>
where
    G: ParseTables,
{
    /// Creates a parser holding only the sentinel bottom frame.
    pub fn new() -> Self {
        let mut parser = Self {
            frames: Vec::new(),
            stats: ParseStats::default(),
        };
        parser.start();
        parser
    }

    /// Clears the stack back to the sentinel bottom frame, dropping any
    /// partially built values.
    pub fn start(&mut self) {
        self.frames.clear();
        self.frames.push(Frame {
            state: G::start_state(),
            symbol: <G::Symbol as SymbolID>::END,
            value: None,
        });
        self.stats = ParseStats::default();
    }

    /// Current stack depth. Always ≥ 1.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Counters accumulated since the last [`start`](Self::start).
    pub fn stats(&self) -> ParseStats {
        self.stats.clone()
    }

    /// Consumes one token: the symbol, its value, and its input line for
    /// diagnostics.
    ///
    /// Runs reductions until the symbol can be shifted. Returns `Ok(true)`
    /// when the accepting reduction ran (the parse is complete and the
    /// symbol is considered consumed), `Ok(false)` when the symbol was
    /// shifted.
    ///
    /// # Errors
    ///
    /// [`EngineError::Syntax`] when the top state offers neither shift nor
    /// reduce for the symbol, [`EngineError::MissingGoto`] on malformed
    /// tables, and [`EngineError::Action`] when a semantic action fails.
    pub fn advance(
        &mut self,
        context: &mut G::Context,
        sym: G::Symbol,
        value: Option<G::Value>,
        line: usize,
    ) -> Result<bool, EngineError<G::Error>> {
        self.stats.tokens += 1;
        loop {
            if log::log_enabled!(log::Level::Trace) {
                self.dump_stack(sym);
            }
            let top = self.frames[self.frames.len() - 1].state;
            if let Some(next) = G::find_shift(top, sym) {
                log::trace!("shift {:?} -> {:?}", sym, next);
                self.frames.push(Frame {
                    state: next,
                    symbol: sym,
                    value,
                });
                self.stats.shifts += 1;
                return Ok(false);
            }
            let Some((prod, accept)) = G::find_reduce(top, sym) else {
                return Err(EngineError::Syntax {
                    symbol: format!("{sym:?}").into(),
                    line,
                });
            };
            let Production { lhs, arity } = G::production(prod);
            log::trace!("reduce {:?} -> {:?} (arity {})", prod, lhs, arity);
            debug_assert!(self.frames.len() > arity, "reduce would pop the sentinel");
            let split = self.frames.len() - arity;
            let args: Vec<Option<G::Value>> = self.frames.drain(split..).map(|f| f.value).collect();
            let result = G::action(context, prod, args).map_err(EngineError::Action)?;
            let base = self.frames[self.frames.len() - 1].state;
            let Some(next) = G::find_goto(base, lhs) else {
                return Err(EngineError::MissingGoto {
                    symbol: format!("{lhs:?}").into(),
                });
            };
            self.frames.push(Frame {
                state: next,
                symbol: lhs,
                value: Some(result),
            });
            self.stats.reductions += 1;
            if accept {
                // Well-formed tables flag accept only on end-marker entries.
                debug_assert!(
                    sym == <G::Symbol as SymbolID>::END,
                    "accept on ordinary symbol"
                );
                log::trace!("accept");
                return Ok(true);
            }
        }
    }

    /// Pops the top frame and returns its value: the parse result after the
    /// accepting reduction. `None` means the frame carried no value, which
    /// well-formed tables never produce at that point.
    pub fn take_result(&mut self) -> Option<G::Value> {
        self.frames.pop().and_then(|frame| frame.value)
    }

    fn dump_stack(&self, incoming: G::Symbol) {
        let mut out = String::new();
        for frame in &self.frames {
            out.push_str(&format!("<{:?}> {:?}  ", frame.state, frame.symbol));
        }
        log::trace!("{}<- {:?}", out, incoming);
    }
}

impl<G> Default for Parser<G>
where
    G: ParseTables,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Parser;
    use crate::error::EngineError;
    use crate::test_grammar::{Sym, TestCtx, TestGrammar};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn single_token_then_end_accepts() {
        init_logger();
        let mut ctx = TestCtx::default();
        let mut parser = Parser::<TestGrammar>::new();
        assert!(!parser.advance(&mut ctx, Sym::Num, Some(5), 1).unwrap());
        assert!(parser.advance(&mut ctx, Sym::End, None, 1).unwrap());
        assert_eq!(parser.take_result(), Some(5));
    }

    #[test]
    fn reductions_chain_between_shifts() {
        init_logger();
        let mut ctx = TestCtx::default();
        let mut parser = Parser::<TestGrammar>::new();
        for (sym, value) in [
            (Sym::Num, Some(1)),
            (Sym::Plus, None),
            (Sym::Num, Some(2)),
            (Sym::Plus, None),
            (Sym::Num, Some(3)),
        ] {
            assert!(!parser.advance(&mut ctx, sym, value, 1).unwrap());
            assert!(parser.depth() >= 1);
        }
        assert!(parser.advance(&mut ctx, Sym::End, None, 1).unwrap());
        assert_eq!(parser.take_result(), Some(6));
        // Sum -> Num once, Sum -> Sum + Num twice, accept once.
        assert_eq!(ctx.reduced, vec!["first", "next", "next", "accept"]);
    }

    #[test]
    fn syntax_error_when_no_action_applies() {
        init_logger();
        let mut ctx = TestCtx::default();
        let mut parser = Parser::<TestGrammar>::new();
        parser.advance(&mut ctx, Sym::Num, Some(1), 1).unwrap();
        let err = parser.advance(&mut ctx, Sym::Num, Some(2), 1).unwrap_err();
        assert!(matches!(err, EngineError::Syntax { .. }));
    }

    #[test]
    fn end_without_input_is_syntax_error() {
        init_logger();
        let mut ctx = TestCtx::default();
        let mut parser = Parser::<TestGrammar>::new();
        let err = parser.advance(&mut ctx, Sym::End, None, 1).unwrap_err();
        assert!(matches!(err, EngineError::Syntax { .. }));
    }

    #[test]
    fn start_resets_stack_to_sentinel() {
        init_logger();
        let mut ctx = TestCtx::default();
        let mut parser = Parser::<TestGrammar>::new();
        parser.advance(&mut ctx, Sym::Num, Some(1), 1).unwrap();
        parser.advance(&mut ctx, Sym::Plus, None, 1).unwrap();
        assert!(parser.depth() > 1);
        parser.start();
        assert_eq!(parser.depth(), 1);
        // The parse runs again from scratch.
        assert!(!parser.advance(&mut ctx, Sym::Num, Some(9), 1).unwrap());
        assert!(parser.advance(&mut ctx, Sym::End, None, 1).unwrap());
        assert_eq!(parser.take_result(), Some(9));
    }
}
