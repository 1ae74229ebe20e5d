//! Set of ad tokens that have already been handled.

use std::collections::HashSet;

use super::id::AdToken;

/// Tokens that were already notified (or deliberately skipped).
///
/// Only membership matters; iteration order is unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenTokens {
    tokens: HashSet<AdToken>,
}

impl SeenTokens {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, token: &AdToken) -> bool {
        self.tokens.contains(token)
    }

    /// Record a token. Returns `false` if it was already present.
    pub fn insert(&mut self, token: AdToken) -> bool {
        self.tokens.insert(token)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AdToken> {
        self.tokens.iter()
    }

    /// Candidates not yet seen, in candidate order.
    ///
    /// A token listed twice among the candidates is returned once.
    #[must_use]
    pub fn unseen(&self, candidates: &[AdToken]) -> Vec<AdToken> {
        let mut emitted = HashSet::new();
        candidates
            .iter()
            .filter(|token| !self.contains(token))
            .filter(|token| emitted.insert(*token))
            .cloned()
            .collect()
    }

    /// Tokens in sorted order, for deterministic persistence.
    #[must_use]
    pub fn to_sorted_vec(&self) -> Vec<AdToken> {
        let mut tokens: Vec<AdToken> = self.tokens.iter().cloned().collect();
        tokens.sort();
        tokens
    }
}

impl FromIterator<AdToken> for SeenTokens {
    fn from_iter<I: IntoIterator<Item = AdToken>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl Extend<AdToken> for SeenTokens {
    fn extend<I: IntoIterator<Item = AdToken>>(&mut self, iter: I) {
        self.tokens.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(ids: &[&str]) -> Vec<AdToken> {
        ids.iter().map(|id| AdToken::try_new(*id).unwrap()).collect()
    }

    #[test]
    fn unseen_keeps_candidate_order() {
        let seen: SeenTokens = tokens(&["a"]).into_iter().collect();
        let fresh = seen.unseen(&tokens(&["c", "a", "b"]));
        assert_eq!(fresh, tokens(&["c", "b"]));
    }

    #[test]
    fn unseen_drops_duplicate_candidates() {
        let seen = SeenTokens::new();
        let fresh = seen.unseen(&tokens(&["x", "y", "x"]));
        assert_eq!(fresh, tokens(&["x", "y"]));
    }

    #[test]
    fn insert_reports_novelty() {
        let mut seen = SeenTokens::new();
        let token = AdToken::try_new("t1").unwrap();
        assert!(seen.insert(token.clone()));
        assert!(!seen.insert(token.clone()));
        assert_eq!(seen.len(), 1);
        assert!(seen.contains(&token));
    }

    #[test]
    fn sorted_vec_is_deterministic() {
        let seen: SeenTokens = tokens(&["b", "c", "a"]).into_iter().collect();
        assert_eq!(seen.to_sorted_vec(), tokens(&["a", "b", "c"]));
    }
}
