//! Composition of scanner and parser behind a `start` / `feed` / `finish`
//! contract, so a host never sees automaton internals.

use crate::error::EngineError;
use crate::parser::{ParseStats, Parser};
use crate::scanner::{ScanStats, Scanner};
use crate::tables::{LexTables, ParseTables, SymbolID};

/// An incremental lexer/parser engine over one grammar's tables.
///
/// The host supplies input one character at a time with
/// [`feed`](Self::feed) and closes the parse with [`finish`](Self::finish),
/// which returns the single remaining semantic value. Every call threads
/// the caller-owned context into the grammar's scan functions and semantic
/// actions.
///
/// A failed call leaves the engine in an undefined state;
/// [`start`](Self::start) must run before reuse.
pub struct Engine<G>
where
    G: LexTables + ParseTables,
{
    scanner: Scanner<G>,
    parser: Parser<G>,
}

impl<G> Engine<G>
where
    G: LexTables + ParseTables,
{
    /// Creates a started engine: scanner at the initial node, parser stack
    /// holding the sentinel frame.
    pub fn new() -> Self {
        Self {
            scanner: Scanner::new(),
            parser: Parser::new(),
        }
    }

    /// Resets scanner and parser to initial conditions indistinguishable
    /// from a freshly constructed engine. Pending text and partially built
    /// values are discarded.
    pub fn start(&mut self) {
        self.scanner.start();
        self.parser.start();
    }

    /// Consumes one input character.
    ///
    /// A token finalized by this character is forwarded to the parser,
    /// which may perform any number of reductions before shifting it.
    ///
    /// # Errors
    ///
    /// Propagates scanner and parser failures verbatim; on error the host
    /// must abort the parse.
    pub fn feed(&mut self, context: &mut G::Context, ch: char) -> Result<(), EngineError<G::Error>> {
        if let Some((symbol, value)) = self.scanner.feed(context, ch)? {
            let line = self.scanner.line_no();
            self.parser.advance(context, symbol, value, line)?;
        }
        Ok(())
    }

    /// Feeds every character of `input` in order.
    pub fn feed_str(
        &mut self,
        context: &mut G::Context,
        input: &str,
    ) -> Result<(), EngineError<G::Error>> {
        for ch in input.chars() {
            self.feed(context, ch)?;
        }
        Ok(())
    }

    /// Ends the input: flushes the pending token, injects the end-marker to
    /// drain the remaining reductions, and returns the final value.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnterminatedToken`] when input ended mid-token, and
    /// [`EngineError::UnexpectedEnd`] when the end-marker fails to reach an
    /// accepting reduction. Scan and action failures propagate verbatim.
    pub fn finish(&mut self, context: &mut G::Context) -> Result<G::Value, EngineError<G::Error>> {
        if let Some((symbol, value)) = self.scanner.finish(context)? {
            let line = self.scanner.line_no();
            self.parser.advance(context, symbol, value, line)?;
        }
        let line = self.scanner.line_no();
        match self
            .parser
            .advance(context, <G::Symbol as SymbolID>::END, None, line)
        {
            Ok(true) => self.parser.take_result().ok_or(EngineError::UnexpectedEnd),
            Ok(false) => Err(EngineError::UnexpectedEnd),
            Err(EngineError::Syntax { .. }) => Err(EngineError::UnexpectedEnd),
            Err(err) => Err(err),
        }
    }

    /// Scanner counters for the current parse.
    pub fn scan_stats(&self) -> ScanStats {
        self.scanner.stats()
    }

    /// Parser counters for the current parse.
    pub fn parse_stats(&self) -> ParseStats {
        self.parser.stats()
    }
}

impl<G> Default for Engine<G>
where
    G: LexTables + ParseTables,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Engine;
    use crate::error::EngineError;
    use crate::test_grammar::{TestCtx, TestGrammar};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn eval(engine: &mut Engine<TestGrammar>, ctx: &mut TestCtx, input: &str) -> Result<i64, EngineError<crate::test_grammar::TestError>> {
        engine.start();
        engine.feed_str(ctx, input)?;
        engine.finish(ctx)
    }

    #[test]
    fn single_number() {
        init_logger();
        let mut ctx = TestCtx::default();
        let mut engine = Engine::new();
        assert_eq!(eval(&mut engine, &mut ctx, "5").unwrap(), 5);
    }

    #[test]
    fn sums_without_spaces() {
        init_logger();
        let mut ctx = TestCtx::default();
        let mut engine = Engine::new();
        assert_eq!(eval(&mut engine, &mut ctx, "1+2+3").unwrap(), 6);
    }

    #[test]
    fn sums_with_whitespace() {
        init_logger();
        let mut ctx = TestCtx::default();
        let mut engine = Engine::new();
        assert_eq!(eval(&mut engine, &mut ctx, " 10 +\n 20 ").unwrap(), 30);
    }

    #[test]
    fn empty_input_is_unexpected_end() {
        init_logger();
        let mut ctx = TestCtx::default();
        let mut engine = Engine::<TestGrammar>::new();
        assert!(matches!(
            engine.finish(&mut ctx),
            Err(EngineError::UnexpectedEnd)
        ));
    }

    #[test]
    fn trailing_operator_is_unexpected_end() {
        init_logger();
        let mut ctx = TestCtx::default();
        let mut engine = Engine::new();
        assert!(matches!(
            eval(&mut engine, &mut ctx, "1+"),
            Err(EngineError::UnexpectedEnd)
        ));
    }

    #[test]
    fn mid_token_end_is_unterminated() {
        init_logger();
        let mut ctx = TestCtx::default();
        let mut engine = Engine::new();
        assert!(matches!(
            eval(&mut engine, &mut ctx, "1+2&"),
            Err(EngineError::UnterminatedToken { .. })
        ));
    }

    #[test]
    fn restart_after_failure_reproduces_results() {
        init_logger();
        let mut ctx = TestCtx::default();
        let mut engine = Engine::new();
        assert!(eval(&mut engine, &mut ctx, "1?").is_err());
        // `start` runs inside `eval`; the engine behaves like a fresh one.
        assert_eq!(eval(&mut engine, &mut ctx, "1+2+3").unwrap(), 6);
        assert_eq!(eval(&mut engine, &mut ctx, "1+2+3").unwrap(), 6);
    }

    #[test]
    fn context_observes_every_action() {
        init_logger();
        let mut ctx = TestCtx::default();
        let mut engine = Engine::new();
        eval(&mut engine, &mut ctx, "1+2").unwrap();
        assert_eq!(ctx.scanned, 2);
        assert_eq!(ctx.reduced, vec!["first", "next", "accept"]);
    }

    #[test]
    fn stats_count_steps() {
        init_logger();
        let mut ctx = TestCtx::default();
        let mut engine = Engine::new();
        eval(&mut engine, &mut ctx, "1+2").unwrap();
        let scan = engine.scan_stats();
        assert_eq!((scan.chars, scan.tokens), (3, 3));
        let parse = engine.parse_stats();
        assert_eq!(parse.shifts, 3);
        // Sum -> Num, Sum -> Sum + Num, accepting reduction.
        assert_eq!(parse.reductions, 3);
    }
}
