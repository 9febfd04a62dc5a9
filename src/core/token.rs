//! Word tokens and token sequences
//!
//! A [`Token`] names exactly one recorded clip, so it has to be usable as a
//! file stem. A [`TokenSequence`] is one utterance and is never empty.

use crate::error::{PoppyError, PoppyResult};
use serde::Serialize;
use std::fmt;

/// Symbolic word identifier mapped 1:1 to a recorded clip
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Create a token, rejecting anything that cannot be a clip file stem
    pub fn new(word: impl Into<String>) -> PoppyResult<Self> {
        let word = word.into();
        if is_valid(&word) {
            Ok(Self(word))
        } else {
            Err(PoppyError::InvalidToken(word))
        }
    }

    /// Token from a word this crate generated itself
    pub(crate) fn known(word: impl Into<String>) -> Self {
        let word = word.into();
        debug_assert!(is_valid(&word), "generated an invalid token: {word:?}");
        Self(word)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid(word: &str) -> bool {
    !word.is_empty()
        && word != "."
        && word != ".."
        && !word
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_whitespace())
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One utterance: an ordered, non-empty run of tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TokenSequence(Vec<Token>);

impl TokenSequence {
    pub fn starting_with(first: Token) -> Self {
        Self(vec![first])
    }

    pub fn push(&mut self, token: Token) {
        self.0.push(token);
    }

    /// Append a fixed word
    pub(crate) fn word(&mut self, word: &str) {
        self.0.push(Token::known(word));
    }

    pub fn tokens(&self) -> &[Token] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> &Token {
        // Non-empty by construction
        &self.0[self.0.len() - 1]
    }

    /// Borrowed word strings, mostly handy for comparisons and display
    pub fn words(&self) -> Vec<&str> {
        self.0.iter().map(Token::as_str).collect()
    }
}

impl Extend<Token> for TokenSequence {
    fn extend<I: IntoIterator<Item = Token>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl TryFrom<Vec<Token>> for TokenSequence {
    type Error = PoppyError;

    fn try_from(tokens: Vec<Token>) -> PoppyResult<Self> {
        if tokens.is_empty() {
            return Err(PoppyError::InvalidToken(
                "token sequence must not be empty".to_string(),
            ));
        }
        Ok(Self(tokens))
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for TokenSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.words().join(" "))
    }
}
