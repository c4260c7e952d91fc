//! Streaming token matching.
//!
//! The matcher recognizes an expected byte sequence in the incoming stream
//! while holding nothing but a cursor per pattern: no receive buffer, no
//! copy of the scanned bytes. Everything it reads is consumed, including
//! the matched token and any noise scanned through on the way.

use std::time::{Duration, Instant};

use crate::{Engine, Transport};

/// Outcome of a single-pattern match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum MatchOutcome {
    /// The token was seen in full.
    Matched,
    /// The deadline passed before the token appeared.
    TimedOut,
}

/// Outcome of a dual-pattern (pass/fail) match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum EitherOutcome {
    /// The pass token was seen first.
    Pass,
    /// The fail token was seen first.
    Fail,
    /// The deadline passed before either token appeared.
    TimedOut,
}

/// Per-pattern match progress: how many leading bytes of the token the
/// stream has produced consecutively.
struct Cursor<'p> {
    token: &'p [u8],
    matched: usize,
}

impl<'p> Cursor<'p> {
    fn new(token: &'p [u8]) -> Self {
        Cursor { token, matched: 0 }
    }

    /// Advance on one stream byte. Returns true once the full token has
    /// been seen.
    ///
    /// A byte that fails to extend a partial match resets the cursor and is
    /// NOT re-examined as a fresh start: bytes cannot be pushed back into
    /// the stream, so this is a naive streaming matcher, not a restartable
    /// one. A token occurrence that overlaps the prefix of a just-failed
    /// partial match is missed. Known limitation, kept deliberately.
    fn advance(&mut self, byte: u8) -> bool {
        if byte == self.token[self.matched] {
            self.matched += 1;
            self.matched == self.token.len()
        } else {
            self.matched = 0;
            false
        }
    }
}

impl<'a, T: Transport> Engine<'a, T> {
    /// Scan the stream for `token`, consuming every byte read.
    ///
    /// Returns [`MatchOutcome::Matched`] as soon as the final byte of the
    /// token arrives; the stream is then positioned immediately after it.
    /// Returns [`MatchOutcome::TimedOut`] if the deadline passes first.
    ///
    /// An empty token matches immediately.
    pub fn await_token(&mut self, token: &[u8], timeout: Duration) -> MatchOutcome {
        self.await_token_until(token, Self::deadline(timeout))
    }

    pub(crate) fn await_token_until(&mut self, token: &[u8], deadline: Instant) -> MatchOutcome {
        if token.is_empty() {
            return MatchOutcome::Matched;
        }
        let mut cursor = Cursor::new(token);
        while Instant::now() < deadline {
            let Some(byte) = self.poll_byte() else {
                continue;
            };
            if cursor.advance(byte) {
                return MatchOutcome::Matched;
            }
        }
        log::trace!(
            "await_token: no {:?} before deadline",
            String::from_utf8_lossy(token)
        );
        MatchOutcome::TimedOut
    }

    /// Scan the stream for either of two tokens, consuming every byte read.
    ///
    /// The two cursors advance independently over the same bytes; whichever
    /// token completes first wins and the other's progress is discarded.
    /// Shares [`await_token`](Engine::await_token)'s restart limitation.
    pub fn await_either(
        &mut self,
        pass_token: &[u8],
        fail_token: &[u8],
        timeout: Duration,
    ) -> EitherOutcome {
        self.await_either_until(pass_token, fail_token, Self::deadline(timeout))
    }

    pub(crate) fn await_either_until(
        &mut self,
        pass_token: &[u8],
        fail_token: &[u8],
        deadline: Instant,
    ) -> EitherOutcome {
        if pass_token.is_empty() {
            return EitherOutcome::Pass;
        }
        if fail_token.is_empty() {
            return EitherOutcome::Fail;
        }
        let mut pass = Cursor::new(pass_token);
        let mut fail = Cursor::new(fail_token);
        while Instant::now() < deadline {
            let Some(byte) = self.poll_byte() else {
                continue;
            };
            if pass.advance(byte) {
                return EitherOutcome::Pass;
            }
            if fail.advance(byte) {
                return EitherOutcome::Fail;
            }
        }
        log::trace!(
            "await_either: neither {:?} nor {:?} before deadline",
            String::from_utf8_lossy(pass_token),
            String::from_utf8_lossy(fail_token)
        );
        EitherOutcome::TimedOut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedTransport;

    const SHORT: Duration = Duration::from_millis(10);
    const LONG: Duration = Duration::from_secs(1);

    #[test]
    fn test_await_token_consumes_through_match() {
        let mut link = ScriptedTransport::new();
        link.feed(b"noise OK\r\nrest");

        let mut engine = Engine::new(&mut link);
        assert_eq!(engine.await_token(b"OK\r\n", LONG), MatchOutcome::Matched);
        drop(engine);

        // Everything through the token is gone; trailing bytes are intact.
        assert_eq!(link.unread(), b"rest");
    }

    #[test]
    fn test_await_token_times_out_without_match() {
        let mut link = ScriptedTransport::new();
        link.feed(b"ERROR\r\n");

        let mut engine = Engine::new(&mut link);
        assert_eq!(engine.await_token(b"OK\r\n", SHORT), MatchOutcome::TimedOut);
    }

    #[test]
    fn test_await_token_misses_overlapping_prefix() {
        // "aab" occurs at offset 1 of "aaab", but the 'a' that broke the
        // partial match is never reconsidered, so the occurrence is missed.
        let mut link = ScriptedTransport::new();
        link.feed(b"aaab");

        let mut engine = Engine::new(&mut link);
        assert_eq!(engine.await_token(b"aab", SHORT), MatchOutcome::TimedOut);
    }

    #[test]
    fn test_await_token_matches_without_overlap() {
        let mut link = ScriptedTransport::new();
        link.feed(b"xaab");

        let mut engine = Engine::new(&mut link);
        assert_eq!(engine.await_token(b"aab", LONG), MatchOutcome::Matched);
    }

    #[test]
    fn test_await_token_restarts_after_full_mismatch() {
        // A broken match still leaves later, non-overlapping occurrences
        // findable.
        let mut link = ScriptedTransport::new();
        link.feed(b"OK!xOK\r\n");

        let mut engine = Engine::new(&mut link);
        assert_eq!(engine.await_token(b"OK\r\n", LONG), MatchOutcome::Matched);
    }

    #[test]
    fn test_await_either_pass_before_fail() {
        let mut link = ScriptedTransport::new();
        link.feed(b"OK\r\nFAIL\r\n");

        let mut engine = Engine::new(&mut link);
        let outcome = engine.await_either(b"OK\r\n", b"FAIL\r\n", LONG);
        assert_eq!(outcome, EitherOutcome::Pass);
    }

    #[test]
    fn test_await_either_fail_before_pass() {
        let mut link = ScriptedTransport::new();
        link.feed(b"FAIL\r\nOK\r\n");

        let mut engine = Engine::new(&mut link);
        let outcome = engine.await_either(b"OK\r\n", b"FAIL\r\n", LONG);
        assert_eq!(outcome, EitherOutcome::Fail);
    }

    #[test]
    fn test_await_either_times_out_on_neither() {
        let mut link = ScriptedTransport::new();
        link.feed(b"busy p...\r\n");

        let mut engine = Engine::new(&mut link);
        let outcome = engine.await_either(b"OK\r\n", b"FAIL\r\n", SHORT);
        assert_eq!(outcome, EitherOutcome::TimedOut);
    }

    #[test]
    fn test_sequential_matches_are_independent() {
        // No cursor state survives between calls.
        let mut first = ScriptedTransport::new();
        first.feed(b"O");
        let mut engine = Engine::new(&mut first);
        assert_eq!(engine.await_token(b"OK\r\n", SHORT), MatchOutcome::TimedOut);
        drop(engine);

        let mut second = ScriptedTransport::new();
        second.feed(b"OK\r\n");
        let mut engine = Engine::new(&mut second);
        assert_eq!(engine.await_token(b"OK\r\n", LONG), MatchOutcome::Matched);
    }
}
