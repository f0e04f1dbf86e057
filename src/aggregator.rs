//! Deduplicated rule collection and merge.

use ahash::AHashMap;
use std::collections::BTreeMap;

use crate::{Rule, RuleType};

/// A set of classified rules keyed by canonical string.
///
/// Merging is pure set union: commutative and idempotent, so merging the
/// same source twice yields the same set. The aggregator is the single
/// owner during merge; fetch workers never touch it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RuleSet {
    rules: AHashMap<String, Rule>,
}

impl RuleSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one rule. Returns `true` if it was not already present.
    pub fn insert(&mut self, rule: Rule) -> bool {
        self.rules.insert(rule.canonical(), rule).is_none()
    }

    /// Insert every rule from an iterator.
    pub fn extend(&mut self, rules: impl IntoIterator<Item = Rule>) {
        for rule in rules {
            self.insert(rule);
        }
    }

    /// Union another set into this one.
    pub fn merge(&mut self, other: RuleSet) {
        self.rules.extend(other.rules);
    }

    /// Number of unique rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether a canonical string is present.
    pub fn contains(&self, canonical: &str) -> bool {
        self.rules.contains_key(canonical)
    }

    /// Per-type counts over the final set.
    ///
    /// Recomputed from scratch rather than maintained incrementally, so a
    /// partial merge can never leave the counts out of step with the set.
    pub fn type_counts(&self) -> BTreeMap<RuleType, usize> {
        let mut counts = BTreeMap::new();
        for rule in self.rules.values() {
            *counts.entry(rule.rule_type).or_insert(0) += 1;
        }
        counts
    }

    /// Canonical strings in lexicographic order: the output body.
    pub fn sorted_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.rules.keys().cloned().collect();
        lines.sort();
        lines
    }
}
