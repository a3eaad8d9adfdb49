//! Candidate URL deduplication

use std::collections::HashSet;

/// A set of listing URLs without duplicates
///
/// Identity is exact string equality: no case folding, trailing-slash or
/// query-order normalization. Iteration follows first-seen order, so batches
/// built from the same discovery output are reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniqueUrlSet {
    urls: Vec<String>,
}

impl UniqueUrlSet {
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.iter().any(|u| u == url)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.urls.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.urls
    }

    /// Drops every URL for which `keep` returns false
    ///
    /// Removal cannot introduce duplicates, so the set invariant holds.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.urls.retain(|url| keep(url));
    }
}

impl FromIterator<String> for UniqueUrlSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        dedupe(iter)
    }
}

impl IntoIterator for UniqueUrlSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.urls.into_iter()
    }
}

/// Merges candidate URLs into a unique set
///
/// # Example
///
/// ```
/// use immo_harvest::dedupe;
///
/// let set = dedupe(vec!["a".to_string(), "b".to_string(), "a".to_string()]);
/// assert_eq!(set.len(), 2);
/// ```
pub fn dedupe<I>(candidates: I) -> UniqueUrlSet
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    let urls = candidates
        .into_iter()
        .filter(|url| seen.insert(url.clone()))
        .collect();

    UniqueUrlSet { urls }
}
