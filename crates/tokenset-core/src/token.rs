//! Token validation and the input shapes accepted by mutating operations.
//!
//! A token is a non-empty string containing no whitespace, compared
//! byte-for-byte. Callers hand tokens to [`crate::TokenSet`] in one of three
//! shapes, modeled as an explicit enum rather than runtime type sniffing:
//!
//! - [`TokenInput::Raw`] — one token, validated as-is, never split
//! - [`TokenInput::Split`] — a whitespace-delimited string, split first
//! - [`TokenInput::Seq`] — a sequence of individual tokens
//!
//! Every shape lowers to a fully validated candidate list *before* the set
//! is touched, so a bad token in a batch aborts the whole call with no
//! partial mutation.

use crate::error::{Result, TokenSetError};

/// Check that `token` is non-empty and whitespace-free.
pub fn validate(token: &str) -> Result<()> {
    if token.is_empty() {
        return Err(TokenSetError::InvalidToken {
            token: token.to_string(),
            reason: "token must not be empty",
        });
    }
    if token.chars().any(char::is_whitespace) {
        return Err(TokenSetError::InvalidToken {
            token: token.to_string(),
            reason: "token must not contain whitespace",
        });
    }
    Ok(())
}

/// Input shapes accepted by `add`, `remove`, and set construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenInput {
    /// A single token. Not split: `Raw("foo bar")` fails validation.
    Raw(String),
    /// A whitespace-delimited string. Split on Unicode whitespace with
    /// empty fragments discarded, so `"  a   b "` yields two candidates and
    /// `"   "` yields none. The empty string is a single empty candidate
    /// and therefore invalid.
    Split(String),
    /// Individually supplied tokens, each validated as-is.
    Seq(Vec<String>),
}

impl TokenInput {
    /// One token that must already be whitespace-free.
    pub fn raw(token: impl Into<String>) -> Self {
        TokenInput::Raw(token.into())
    }

    /// Lower this input to a validated candidate list.
    ///
    /// Validation is eager across the whole batch: the first bad candidate
    /// fails the call and nothing is returned for the caller to apply.
    pub(crate) fn into_candidates(self) -> Result<Vec<String>> {
        let candidates: Vec<String> = match self {
            TokenInput::Raw(token) => vec![token],
            TokenInput::Split(s) => {
                // The empty string is one empty candidate, not zero
                // candidates; only genuine separators are discarded.
                if s.is_empty() {
                    validate(&s)?;
                }
                s.split_whitespace().map(str::to_string).collect()
            }
            TokenInput::Seq(tokens) => tokens,
        };
        for token in &candidates {
            validate(token)?;
        }
        Ok(candidates)
    }
}

impl From<&str> for TokenInput {
    fn from(s: &str) -> Self {
        TokenInput::Split(s.to_string())
    }
}

impl From<String> for TokenInput {
    fn from(s: String) -> Self {
        TokenInput::Split(s)
    }
}

impl From<Vec<String>> for TokenInput {
    fn from(tokens: Vec<String>) -> Self {
        TokenInput::Seq(tokens)
    }
}

impl From<&[&str]> for TokenInput {
    fn from(tokens: &[&str]) -> Self {
        TokenInput::Seq(tokens.iter().map(|t| t.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for TokenInput {
    fn from(tokens: [&str; N]) -> Self {
        TokenInput::Seq(tokens.iter().map(|t| t.to_string()).collect())
    }
}
