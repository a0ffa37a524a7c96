//! Composition of raw-content file suffixes.
//!
//! Every filter in a format may contribute a suffix token. A token ending
//! in [`CONTINUATION`] is *open*: it decorates the name and expects a later
//! token to close it (`"autop."`). Any other token is *closing*: it names
//! the file type (`"txt"`).
//!
//! Tokens are folded in chain order:
//!
//! | accumulator | open token `T`                          | closing token `T` |
//! |-------------|-----------------------------------------|-------------------|
//! | empty       | `T`                                     | `T`               |
//! | open        | `S + T`                                 | `S + T`           |
//! | closed      | `T` inserted before the last segment    | ignored           |
//!
//! An empty result becomes [`DEFAULT_EXTENSION`]; a result still open gets
//! it appended.

/// Marks a token as open.
pub const CONTINUATION: char = '.';

/// Closing segment used when no filter supplied one.
pub const DEFAULT_EXTENSION: &str = "html";

/// Kind of a suffix token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Ends with the continuation marker and expects a closing token.
    Open,
    /// A terminal extension segment.
    Closing,
}

impl TokenKind {
    pub fn of(token: &str) -> Self {
        if token.ends_with(CONTINUATION) {
            TokenKind::Open
        } else {
            TokenKind::Closing
        }
    }
}

/// Outcome of feeding one token to a [`SuffixComposer`].
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Push {
    Applied,
    /// A closing token arrived after the suffix was already closed.
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Accumulator {
    #[default]
    Empty,
    Open(String),
    Closed(String),
}

/// Left fold of suffix tokens into one file suffix.
#[derive(Debug, Clone, Default)]
pub struct SuffixComposer {
    acc: Accumulator,
}

impl SuffixComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next token in chain order. Empty tokens contribute nothing.
    pub fn push(&mut self, token: &str) -> Push {
        if token.is_empty() {
            return Push::Applied;
        }
        let kind = TokenKind::of(token);

        let (next, outcome) = match (std::mem::take(&mut self.acc), kind) {
            (Accumulator::Empty, TokenKind::Open) => (Accumulator::Open(token.to_string()), Push::Applied),
            (Accumulator::Empty, TokenKind::Closing) => {
                (Accumulator::Closed(token.to_string()), Push::Applied)
            }
            (Accumulator::Open(s), TokenKind::Open) => (Accumulator::Open(s + token), Push::Applied),
            (Accumulator::Open(s), TokenKind::Closing) => (Accumulator::Closed(s + token), Push::Applied),
            (Accumulator::Closed(s), TokenKind::Open) => {
                (Accumulator::Closed(insert_before_last(&s, token)), Push::Applied)
            }
            (closed @ Accumulator::Closed(_), TokenKind::Closing) => (closed, Push::Ignored),
        };

        self.acc = next;
        outcome
    }

    /// The suffix so far, before defaults are applied.
    #[cfg(test)]
    pub fn current(&self) -> Option<&str> {
        match &self.acc {
            Accumulator::Empty => None,
            Accumulator::Open(s) | Accumulator::Closed(s) => Some(s),
        }
    }

    /// Finish the fold, applying the default extension where needed.
    pub fn finish(self) -> String {
        match self.acc {
            Accumulator::Empty => DEFAULT_EXTENSION.to_string(),
            Accumulator::Open(s) => s + DEFAULT_EXTENSION,
            Accumulator::Closed(s) => s,
        }
    }
}

/// Splice an open token in front of the last segment of a closed suffix.
///
/// `"php.txt"` + `"zz."` -> `"php.zz.txt"`, `"txt"` + `"zz."` -> `"zz.txt"`.
fn insert_before_last(closed: &str, token: &str) -> String {
    match closed.rsplit_once(CONTINUATION) {
        Some((prefix, last)) => format!("{prefix}{CONTINUATION}{token}{last}"),
        None => format!("{token}{closed}"),
    }
}
