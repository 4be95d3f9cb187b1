//! Word tokenization and signature selection.
//!
//! A word is a maximal run of alphanumeric or `_` characters, lowercased.
//! Tokens are kept in a set: Jaccard similarity is defined on sets, so
//! repeated words inside one block collapse.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Set of lowercase word tokens, iterated in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSet(BTreeSet<String>);

impl TokenSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    /// Tokens in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    /// `|self ∩ other|`
    pub fn intersection_len(&self, other: &TokenSet) -> usize {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.0.iter().filter(|t| large.0.contains(*t)).count()
    }

    /// `|self ∪ other|`
    pub fn union_len(&self, other: &TokenSet) -> usize {
        self.len() + other.len() - self.intersection_len(other)
    }
}

impl<S: Into<String>> FromIterator<S> for TokenSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// The K smallest tokens of a block, used only as candidate-index keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature(Vec<String>);

impl Signature {
    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[String]> for Signature {
    fn as_ref(&self) -> &[String] {
        &self.0
    }
}

/// Split `text` into its set of lowercase word tokens.
pub fn tokenize(text: &str) -> TokenSet {
    let mut tokens = BTreeSet::new();
    let mut current = String::new();

    for ch in text.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            current.extend(ch.to_lowercase());
        } else if !current.is_empty() {
            tokens.insert(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.insert(current);
    }

    TokenSet(tokens)
}

/// The `k` lexicographically smallest tokens (fewer if the set is smaller).
///
/// An empty token set yields an empty signature: the block is never indexed
/// and can never be found as a candidate.
pub fn select_signature(tokens: &TokenSet, k: usize) -> Signature {
    Signature(tokens.iter().take(k).map(str::to_string).collect())
}
