/// Filter for links that point at aggregate listings
///
/// Project pages group several units under one URL. They are harvested through
/// a different path, so admitting them here would mix project-level rows into
/// a unit-level dataset.
///
/// A link is excluded when it contains any of the configured patterns as a
/// plain substring. Matching is case-sensitive.
///
/// # Examples
///
/// ```
/// use immo_harvest::catalog::ExclusionFilter;
///
/// let filter = ExclusionFilter::new(vec!["/projectdetail/".to_string()]);
/// assert!(filter.is_excluded("https://immovlan.be/fr/projectdetail/2573463-7554937"));
/// assert!(!filter.is_excluded("https://immovlan.be/en/detail/villa/for-sale/5000/namur/vbd1"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExclusionFilter {
    patterns: Vec<String>,
}

impl ExclusionFilter {
    pub fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }

    /// Returns true if the link must not be harvested
    pub fn is_excluded(&self, link: &str) -> bool {
        self.patterns
            .iter()
            .any(|pattern| link.contains(pattern.as_str()))
    }
}
