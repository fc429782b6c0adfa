//! The scanner driver: characters in, `(symbol, value)` token events out.
//!
//! Matching is maximal munch with one character of lookahead and no
//! backtracking within a token: the scanner walks the token automaton until
//! a character has no transition, finalizes the token accepted at the
//! current node, and then reprocesses that same character from the initial
//! node. The reprocessed character either starts the next token, is skipped
//! as whitespace, or fails — it is never lost.

use crate::error::EngineError;
use crate::tables::LexTables;
use smartstring::alias::String;

/// Counters accumulated over one scan, reset by [`Scanner::start`].
#[derive(Debug, Clone, Default)]
pub struct ScanStats {
    /// Characters fed, including whitespace.
    pub chars: usize,
    /// Tokens emitted downstream.
    pub tokens: usize,
}

/// Incremental tokenizer over a grammar's character-transition automaton.
///
/// One `feed` call consumes exactly one character and emits at most one
/// token; `finish` flushes the pending token, if any. The external context
/// is passed through to the grammar's scan functions untouched.
pub struct Scanner<G>
where
    G: LexTables,
{
    node: G::Node,
    text: String,
    line_no: usize,
    stats: ScanStats,
}

impl<G> Scanner<G>
where
    G: LexTables,
{
    /// Creates a scanner positioned at the automaton's initial node.
    pub fn new() -> Self {
        Self {
            node: G::start_node(),
            text: String::new(),
            line_no: 1,
            stats: ScanStats::default(),
        }
    }

    /// Resets to the initial node with an empty buffer, discarding any
    /// partially matched text.
    pub fn start(&mut self) {
        self.node = G::start_node();
        self.text.clear();
        self.line_no = 1;
        self.stats = ScanStats::default();
    }

    /// 1-based line number of the character most recently consumed.
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Counters accumulated since the last [`start`](Self::start).
    pub fn stats(&self) -> ScanStats {
        self.stats.clone()
    }

    /// Consumes one character.
    ///
    /// Returns the token finalized by this character, if any. The returned
    /// token ended *before* `ch`; `ch` itself has been carried over into the
    /// next token (or skipped as whitespace).
    ///
    /// # Errors
    ///
    /// [`EngineError::UnexpectedChar`] when the partially matched text
    /// cannot extend with `ch` and resolves to no terminal, and
    /// [`EngineError::Action`] when a scan function fails.
    ///
    /// When the failure strikes while reprocessing `ch`, a token finalized
    /// earlier in the same call is discarded: its scan function has already
    /// run against the context, but the token is never returned. The error
    /// is terminal, so the caller observes no difference beyond the context
    /// side effects.
    pub fn feed(
        &mut self,
        context: &mut G::Context,
        ch: char,
    ) -> Result<Option<(G::Symbol, Option<G::Value>)>, EngineError<G::Error>> {
        self.stats.chars += 1;
        let mut emitted = None;
        loop {
            if self.node == G::start_node() {
                if ch.is_whitespace() {
                    if ch == '\n' {
                        self.line_no += 1;
                    }
                    return Ok(emitted);
                }
                if G::next(self.node, ch).is_none() {
                    // No token starts with this character.
                    return Err(EngineError::UnexpectedChar {
                        ch,
                        line: self.line_no,
                    });
                }
            }
            match G::next(self.node, ch) {
                Some(next) => {
                    self.text.push(ch);
                    if ch == '\n' {
                        self.line_no += 1;
                    }
                    self.node = next;
                    return Ok(emitted);
                }
                None => {
                    // The token ending before `ch` must close now; `ch` is
                    // reprocessed from the initial node on the next turn of
                    // the loop.
                    let Some(symbol) = G::accept(self.node) else {
                        return Err(EngineError::UnexpectedChar {
                            ch,
                            line: self.line_no,
                        });
                    };
                    emitted = Some(self.close_token(context, symbol)?);
                }
            }
        }
    }

    /// Flushes the pending token at end of input, if any.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnterminatedToken`] when the scanner sits mid-token on
    /// a node that accepts nothing, and [`EngineError::Action`] when the
    /// scan function fails.
    pub fn finish(
        &mut self,
        context: &mut G::Context,
    ) -> Result<Option<(G::Symbol, Option<G::Value>)>, EngineError<G::Error>> {
        if let Some(symbol) = G::accept(self.node) {
            return Ok(Some(self.close_token(context, symbol)?));
        }
        if self.node != G::start_node() {
            return Err(EngineError::UnterminatedToken {
                text: self.text.clone(),
                line: self.line_no,
            });
        }
        Ok(None)
    }

    fn close_token(
        &mut self,
        context: &mut G::Context,
        symbol: G::Symbol,
    ) -> Result<(G::Symbol, Option<G::Value>), EngineError<G::Error>> {
        let value = G::scan(context, symbol, &self.text).map_err(EngineError::Action)?;
        log::trace!("token {:?} {:?}", symbol, self.text);
        self.stats.tokens += 1;
        self.node = G::start_node();
        self.text.clear();
        Ok((symbol, value))
    }
}

impl<G> Default for Scanner<G>
where
    G: LexTables,
{
    fn default() -> Self {
        Self::new()
    }
}
