#![forbid(unsafe_code)]

//! Retention keep-set: which panels stay mounted off-screen.
//!
//! With retention on, a panel's rendered content is preserved when the view
//! navigates away instead of being torn down. [`RetentionCache`] tracks the
//! keys of retained panels, stamped by display order, and evicts the
//! least-recently-displayed key when a bound is exceeded.
//!
//! # Invariants
//!
//! 1. Every retained key passes the include filter (if any) and fails the
//!    exclude filter (if any).
//! 2. `len() <= max` whenever a bound is set.
//! 3. The most recently displayed key is never the one evicted.
//!
//! A bound of `0` is treated as "no bound".

use ahash::AHashMap;

/// Key filter for retention.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "policy-config", serde(rename_all = "snake_case"))]
pub enum RetentionFilter {
    /// Exact key matches.
    Names(Vec<String>),
    /// Regular expression matched against the key.
    #[cfg(feature = "regex-filter")]
    Pattern(PatternFilter),
}

impl RetentionFilter {
    /// Filter matching exactly the given keys.
    #[must_use]
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Names(names.into_iter().map(Into::into).collect())
    }

    /// Filter from a comma-separated list, as written in markup (`"a,b"`).
    #[must_use]
    pub fn from_csv(list: &str) -> Self {
        Self::names(
            list.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty()),
        )
    }

    /// Filter matching keys against a regular expression.
    #[cfg(feature = "regex-filter")]
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        PatternFilter::new(pattern).map(Self::Pattern)
    }

    /// Whether `key` matches.
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        match self {
            Self::Names(names) => names.iter().any(|name| name == key),
            #[cfg(feature = "regex-filter")]
            Self::Pattern(pattern) => pattern.is_match(key),
        }
    }
}

/// Compiled regular expression filter, compared by source text.
#[cfg(feature = "regex-filter")]
#[derive(Debug, Clone)]
pub struct PatternFilter(regex::Regex);

#[cfg(feature = "regex-filter")]
impl PatternFilter {
    /// Compile `pattern`.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        regex::Regex::new(pattern).map(Self)
    }

    /// Source text of the pattern.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether `key` matches.
    #[must_use]
    pub fn is_match(&self, key: &str) -> bool {
        self.0.is_match(key)
    }
}

#[cfg(feature = "regex-filter")]
impl PartialEq for PatternFilter {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

#[cfg(all(feature = "regex-filter", feature = "policy-config"))]
impl serde::Serialize for PatternFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(all(feature = "regex-filter", feature = "policy-config"))]
impl<'de> serde::Deserialize<'de> for PatternFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Self::new(&source).map_err(serde::de::Error::custom)
    }
}

/// Bounded keep-set with least-recently-displayed eviction.
#[derive(Debug, Clone, Default)]
pub struct RetentionCache {
    include: Option<RetentionFilter>,
    exclude: Option<RetentionFilter>,
    max: Option<usize>,
    /// Key to display stamp; larger is more recent.
    stamps: AHashMap<String, u64>,
    clock: u64,
}

impl RetentionCache {
    /// Create an unbounded cache without filters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bound. `0` means unbounded.
    #[must_use]
    pub fn max(mut self, max: usize) -> Self {
        self.set_max(Some(max));
        self
    }

    /// Only retain keys matching `filter`.
    #[must_use]
    pub fn include(mut self, filter: RetentionFilter) -> Self {
        self.include = Some(filter);
        self.prune_filtered();
        self
    }

    /// Never retain keys matching `filter`.
    #[must_use]
    pub fn exclude(mut self, filter: RetentionFilter) -> Self {
        self.exclude = Some(filter);
        self.prune_filtered();
        self
    }

    /// Replace both filters, dropping keys that no longer pass.
    pub fn set_filters(
        &mut self,
        include: Option<RetentionFilter>,
        exclude: Option<RetentionFilter>,
    ) -> Vec<String> {
        self.include = include;
        self.exclude = exclude;
        self.prune_filtered()
    }

    /// Replace the bound, evicting the oldest keys if over it.
    pub fn set_max(&mut self, max: Option<usize>) -> Vec<String> {
        self.max = max.filter(|&m| m > 0);
        self.enforce_bound()
    }

    /// Whether `key` passes the filters.
    #[must_use]
    pub fn admits(&self, key: &str) -> bool {
        if let Some(include) = &self.include
            && !include.matches(key)
        {
            return false;
        }
        if let Some(exclude) = &self.exclude
            && exclude.matches(key)
        {
            return false;
        }
        true
    }

    /// Record that `key` was displayed. Returns keys evicted as a result.
    pub fn record_display(&mut self, key: &str) -> Vec<String> {
        if !self.admits(key) {
            return Vec::new();
        }
        self.clock += 1;
        let clock = self.clock;
        match self.stamps.get_mut(key) {
            Some(stamp) => *stamp = clock,
            None => {
                self.stamps.insert(key.to_owned(), clock);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(message = "panels.retain", key, retained = self.stamps.len());

        self.enforce_bound()
    }

    /// Keep only keys for which `keep` returns true. Returns removed keys.
    pub fn retain_keys(&mut self, mut keep: impl FnMut(&str) -> bool) -> Vec<String> {
        let removed: Vec<String> = self
            .stamps
            .keys()
            .filter(|key| !keep(key.as_str()))
            .cloned()
            .collect();
        for key in &removed {
            self.stamps.remove(key);
        }
        removed
    }

    /// Retained keys, least recently displayed first.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut entries: Vec<(&str, u64)> = self
            .stamps
            .iter()
            .map(|(key, stamp)| (key.as_str(), *stamp))
            .collect();
        entries.sort_unstable_by_key(|&(_, stamp)| stamp);
        entries.into_iter().map(|(key, _)| key).collect()
    }

    /// Whether `key` is retained.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.stamps.contains_key(key)
    }

    /// Number of retained keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    /// Whether nothing is retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    /// Drop every retained key.
    pub fn clear(&mut self) {
        self.stamps.clear();
    }

    // ── Internal helpers ──────────────────────────────────────────

    fn prune_filtered(&mut self) -> Vec<String> {
        let include = self.include.clone();
        let exclude = self.exclude.clone();
        self.retain_keys(|key| {
            include.as_ref().is_none_or(|f| f.matches(key))
                && !exclude.as_ref().is_some_and(|f| f.matches(key))
        })
    }

    fn enforce_bound(&mut self) -> Vec<String> {
        let mut evicted = Vec::new();
        let Some(max) = self.max else {
            return evicted;
        };
        while self.stamps.len() > max {
            let Some(oldest) = self
                .stamps
                .iter()
                .min_by_key(|(_, stamp)| **stamp)
                .map(|(key, _)| key.clone())
            else {
                break;
            };
            self.stamps.remove(&oldest);

            #[cfg(feature = "tracing")]
            tracing::debug!(message = "panels.evict", key = oldest.as_str(), max);

            evicted.push(oldest);
        }
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_display_order() {
        let mut cache = RetentionCache::new();
        cache.record_display("a");
        cache.record_display("b");
        cache.record_display("c");
        assert_eq!(cache.keys(), ["a", "b", "c"]);
        cache.record_display("a");
        assert_eq!(cache.keys(), ["b", "c", "a"]);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn evicts_least_recently_displayed() {
        let mut cache = RetentionCache::new().max(2);
        assert!(cache.record_display("a").is_empty());
        assert!(cache.record_display("b").is_empty());
        cache.record_display("a");
        assert_eq!(cache.record_display("c"), vec!["b".to_string()]);
        assert_eq!(cache.keys(), ["a", "c"]);
    }

    #[test]
    fn most_recent_survives_bound_of_one() {
        let mut cache = RetentionCache::new().max(1);
        cache.record_display("a");
        assert_eq!(cache.record_display("b"), vec!["a".to_string()]);
        assert_eq!(cache.keys(), ["b"]);
    }

    #[test]
    fn zero_bound_is_unbounded() {
        let mut cache = RetentionCache::new().max(0);
        for key in ["a", "b", "c", "d"] {
            cache.record_display(key);
        }
        assert_eq!(cache.len(), 4);
    }

    #[test]
    fn lowering_bound_evicts_oldest() {
        let mut cache = RetentionCache::new();
        for key in ["a", "b", "c"] {
            cache.record_display(key);
        }
        let evicted = cache.set_max(Some(1));
        assert_eq!(evicted, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(cache.keys(), ["c"]);
    }

    #[test]
    fn include_filter_limits_admission() {
        let mut cache = RetentionCache::new().include(RetentionFilter::names(["a", "c"]));
        cache.record_display("a");
        cache.record_display("b");
        cache.record_display("c");
        assert_eq!(cache.keys(), ["a", "c"]);
        assert!(!cache.admits("b"));
    }

    #[test]
    fn exclude_filter_blocks_admission() {
        let mut cache = RetentionCache::new().exclude(RetentionFilter::from_csv("b, c"));
        for key in ["a", "b", "c"] {
            cache.record_display(key);
        }
        assert_eq!(cache.keys(), ["a"]);
    }

    #[test]
    fn changing_filters_prunes() {
        let mut cache = RetentionCache::new();
        for key in ["a", "b", "c"] {
            cache.record_display(key);
        }
        let mut removed = cache.set_filters(None, Some(RetentionFilter::names(["b"])));
        removed.sort();
        assert_eq!(removed, vec!["b".to_string()]);
        assert!(!cache.contains("b"));
        assert!(cache.contains("a"));
    }

    #[test]
    fn csv_ignores_blank_entries() {
        assert_eq!(
            RetentionFilter::from_csv(" a,,b ,"),
            RetentionFilter::names(["a", "b"])
        );
    }

    #[test]
    fn retain_keys_reports_removed() {
        let mut cache = RetentionCache::new();
        cache.record_display("keep");
        cache.record_display("drop");
        let removed = cache.retain_keys(|key| key == "keep");
        assert_eq!(removed, vec!["drop".to_string()]);
        assert_eq!(cache.keys(), ["keep"]);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[cfg(feature = "regex-filter")]
    #[test]
    fn pattern_filter_matches_keys() {
        let filter = RetentionFilter::pattern("^step-[0-9]+$").expect("valid pattern");
        assert!(filter.matches("step-12"));
        assert!(!filter.matches("summary"));

        let mut cache = RetentionCache::new().include(filter);
        cache.record_display("step-1");
        cache.record_display("summary");
        assert_eq!(cache.keys(), ["step-1"]);
    }

    #[cfg(feature = "regex-filter")]
    #[test]
    fn invalid_pattern_is_rejected() {
        assert!(RetentionFilter::pattern("(").is_err());
    }
}
