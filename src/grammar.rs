//! Round-based string rewriting.

use std::collections::BTreeMap;

/// Expands `axiom` by `iterations` rounds of simultaneous substitution.
///
/// Every character of the current string is replaced by its rule, or kept as-is
/// when it has none. The loop always runs exactly `iterations` times, whether or
/// not further rules would still apply.
pub fn rewrite(axiom: &str, rules: &BTreeMap<char, String>, iterations: u32) -> String {
    let mut current = axiom.to_owned();
    for _ in 0..iterations {
        if current.is_empty() {
            break;
        }
        let mut next = String::with_capacity(current.len() * 2);
        for c in current.chars() {
            match rules.get(&c) {
                Some(replacement) => next.push_str(replacement),
                None => next.push(c),
            }
        }
        current = next;
    }
    current
}

/// An axiom together with its production rules.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Grammar {
    pub axiom: String,
    pub rules: BTreeMap<char, String>,
}

impl Grammar {
    pub fn new(axiom: impl Into<String>) -> Self {
        Self {
            axiom: axiom.into(),
            rules: BTreeMap::new(),
        }
    }

    pub fn with_rule(mut self, symbol: char, replacement: impl Into<String>) -> Self {
        self.rules.insert(symbol, replacement.into());
        self
    }

    /// See [`rewrite`].
    pub fn expand(&self, iterations: u32) -> String {
        rewrite(&self.axiom, &self.rules, iterations)
    }
}
