//! TokenSet — an ordered collection of unique, validated string tokens.
//!
//! Implements the classList-style token-list semantics: insertion order is
//! preserved, duplicates are silently skipped, and every token is validated
//! (non-empty, no whitespace) before any mutation is applied. The canonical
//! string form joins the tokens with single spaces.
//!
//! Indices are contiguous by construction: removal goes through
//! `Vec::remove`, which compacts the sequence, so there is never a gap to
//! reindex away.
//!
//! # Example
//! ```
//! use tokenset_core::TokenSet;
//!
//! let mut set = TokenSet::from_input("foo baz").unwrap();
//! set.add("qux").unwrap();
//! assert!(set.contains("baz").unwrap());
//! assert_eq!(set.value(), "foo baz qux");
//! ```
//!
//! # Iteration
//!
//! [`TokenSet::iter`] is an index-based external iterator borrowing the
//! set. The borrow checker therefore rules out mutation during iteration —
//! the skip/repeat hazard a shared internal cursor would have under
//! concurrent shrinkage cannot occur here.

use std::fmt;
use std::ops::Index;

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::token::{validate, TokenInput};

/// An ordered, duplicate-free collection of whitespace-free tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    tokens: Vec<String>,
    /// Bumped on every change to `tokens`. The attribute-binding layer
    /// compares revisions around a delegated call to decide whether to
    /// push the serialization into its sink.
    rev: u64,
}

impl TokenSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set seeded from any [`TokenInput`] shape. Seeds are
    /// validated and de-duplicated through the same path as [`add`].
    ///
    /// [`add`]: TokenSet::add
    pub fn from_input(input: impl Into<TokenInput>) -> Result<Self> {
        let mut set = Self::new();
        set.add(input)?;
        Ok(set)
    }

    /// Add tokens. Candidates already present are silently skipped; new
    /// candidates are appended in the order given. Returns the set for
    /// chaining.
    ///
    /// Fails with [`InvalidToken`] before mutating anything if any
    /// candidate is empty or contains whitespace.
    ///
    /// [`InvalidToken`]: crate::TokenSetError::InvalidToken
    pub fn add(&mut self, input: impl Into<TokenInput>) -> Result<&mut Self> {
        let candidates = input.into().into_candidates()?;
        let mut changed = false;
        for token in candidates {
            if !self.tokens.contains(&token) {
                self.tokens.push(token);
                changed = true;
            }
        }
        if changed {
            self.rev += 1;
        }
        Ok(self)
    }

    /// Remove tokens. Candidates not present are ignored without error.
    /// Returns the set for chaining.
    pub fn remove(&mut self, input: impl Into<TokenInput>) -> Result<&mut Self> {
        let candidates = input.into().into_candidates()?;
        let mut changed = false;
        for token in &candidates {
            if let Some(pos) = self.position(token) {
                self.tokens.remove(pos);
                changed = true;
            }
        }
        if changed {
            self.rev += 1;
        }
        Ok(self)
    }

    /// Remove the token at `index`. Out-of-range indices are ignored.
    /// The sequence stays contiguous, same as remove-by-value.
    pub fn remove_at(&mut self, index: usize) -> &mut Self {
        if index < self.tokens.len() {
            self.tokens.remove(index);
            self.rev += 1;
        }
        self
    }

    /// Rename `old` to `new` in place, preserving its position. Position 0
    /// is a valid match like any other.
    ///
    /// If `old` is not present the set is left untouched and `new` is NOT
    /// added; returns whether a replacement happened.
    pub fn replace(&mut self, old: &str, new: &str) -> Result<bool> {
        validate(old)?;
        validate(new)?;
        let Some(pos) = self.position(old) else {
            return Ok(false);
        };
        if old != new {
            // `new` may already exist elsewhere; renaming must not introduce
            // a duplicate, so drop the other occurrence first.
            if let Some(dup) = self.position(new) {
                self.tokens.remove(dup);
                let pos = self.position(old).unwrap_or(pos);
                self.tokens[pos] = new.to_string();
            } else {
                self.tokens[pos] = new.to_string();
            }
            self.rev += 1;
        }
        Ok(true)
    }

    /// Toggle membership of `token`, optionally forced.
    ///
    /// - present, `force` != `Some(true)` → removed, returns `false`
    /// - present, `force` == `Some(true)` → kept, returns `true`
    /// - absent, `force` == `Some(false)` → still absent, returns `false`
    /// - absent, otherwise → added, returns `true`
    ///
    /// The return value is the resulting membership, not the set.
    pub fn toggle(&mut self, token: &str, force: Option<bool>) -> Result<bool> {
        validate(token)?;
        if let Some(pos) = self.position(token) {
            if force == Some(true) {
                return Ok(true);
            }
            self.tokens.remove(pos);
            self.rev += 1;
            Ok(false)
        } else {
            if force == Some(false) {
                return Ok(false);
            }
            self.tokens.push(token.to_string());
            self.rev += 1;
            Ok(true)
        }
    }

    /// Exact, case-sensitive membership test. The token is validated first,
    /// so `contains("a b")` is an error rather than `false`.
    pub fn contains(&self, token: &str) -> Result<bool> {
        validate(token)?;
        Ok(self.position(token).is_some())
    }

    /// The token at `index`, or `None` when out of range. Never panics.
    pub fn item(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Canonical serialization: tokens joined with a single U+0020, no
    /// surrounding whitespace. The empty set serializes to `""`.
    pub fn value(&self) -> String {
        self.tokens.join(" ")
    }

    /// Iterate the tokens in order.
    pub fn iter(&self) -> Iter<'_> {
        Iter { set: self, pos: 0 }
    }

    /// Current revision. Moves exactly when the token sequence changes;
    /// no-op calls (duplicate add, absent remove) leave it alone.
    pub(crate) fn revision(&self) -> u64 {
        self.rev
    }

    fn position(&self, token: &str) -> Option<usize> {
        self.tokens.iter().position(|t| t == token)
    }
}

impl fmt::Display for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value())
    }
}

/// Panicking positional access, `Vec` parity. [`TokenSet::item`] is the
/// non-panicking form.
impl Index<usize> for TokenSet {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.tokens[index]
    }
}

/// Index-based external iterator over a borrowed set.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    set: &'a TokenSet,
    pos: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let item = self.set.item(self.pos);
        if item.is_some() {
            self.pos += 1;
        }
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.set.len().saturating_sub(self.pos);
        (rest, Some(rest))
    }
}

impl<'a> ExactSizeIterator for Iter<'a> {}

impl<'a> IntoIterator for &'a TokenSet {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Serializes as the canonical string form, e.g. `"foo baz qux"`.
impl Serialize for TokenSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value())
    }
}

/// Deserializes from a whitespace-delimited string, validating and
/// de-duplicating like [`TokenSet::add`].
impl<'de> Deserialize<'de> for TokenSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct TokenSetVisitor;

        impl<'de> Visitor<'de> for TokenSetVisitor {
            type Value = TokenSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a whitespace-delimited token string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<TokenSet, E> {
                // The empty string is the canonical form of the empty set,
                // so it round-trips even though `add("")` is an error.
                if v.is_empty() {
                    return Ok(TokenSet::new());
                }
                TokenSet::from_input(v).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(TokenSetVisitor)
    }
}
