//! Catalog structure for Immo-Harvest
//!
//! This module describes the fixed shape of the listing catalog:
//! - Search partitions and the seed URL built for each of them
//! - Page handles produced from a partition's pagination bound
//! - Property typing from a listing URL's path
//! - Exclusion of aggregate (multi-unit) listing links

mod exclusion;
mod path;

pub use exclusion::ExclusionFilter;
pub use path::{property_kind_from_url, PropertyKind, HOUSE_SUBTYPES};

use crate::config::CatalogConfig;
use std::fmt;
use std::sync::Arc;

/// One geographic search scope
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Partition {
    /// A whole province, e.g. `namur`
    Province(String),
    /// A single municipality, e.g. `1030-schaarbeek`
    Town(String),
}

impl Partition {
    /// Query parameter that selects this kind of partition
    pub fn query_key(&self) -> &'static str {
        match self {
            Partition::Province(_) => "provinces",
            Partition::Town(_) => "towns",
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            Partition::Province(slug) | Partition::Town(slug) => slug,
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.query_key(), self.slug())
    }
}

/// The filtered search URL for one partition, before pagination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedQuery {
    partition: Partition,
    url: String,
}

impl SeedQuery {
    /// Builds the seed for a partition from the fixed catalog filters
    ///
    /// Filter lists are joined with commas and left unencoded, matching the
    /// URLs the catalog itself produces.
    pub fn new(partition: Partition, catalog: &CatalogConfig) -> Self {
        let url = format!(
            "{}?transactiontypes={}&propertytypes={}&propertysubtypes={}&{}={}&noindex=1",
            catalog.base_url,
            catalog.transaction_types.join(","),
            catalog.property_types.join(","),
            catalog.property_subtypes.join(","),
            partition.query_key(),
            partition.slug(),
        );

        Self { partition, url }
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// The first results page (no explicit page parameter)
    pub fn url(&self) -> &str {
        &self.url
    }

    /// URL of the given results page
    pub fn page_url(&self, index: u32) -> String {
        format!("{}&page={}", self.url, index)
    }
}

/// Builds one seed per configured province, then one per configured town
pub fn seed_queries(catalog: &CatalogConfig) -> Vec<Arc<SeedQuery>> {
    let provinces = catalog
        .provinces
        .iter()
        .map(|slug| Partition::Province(slug.clone()));
    let towns = catalog
        .towns
        .iter()
        .map(|slug| Partition::Town(slug.clone()));

    provinces
        .chain(towns)
        .map(|partition| Arc::new(SeedQuery::new(partition, catalog)))
        .collect()
}

/// A single results page of a partition, crawled exactly once
#[derive(Debug, Clone)]
pub struct PageHandle {
    pub seed: Arc<SeedQuery>,
    /// 1-based page index
    pub index: u32,
    pub url: String,
}

/// Expands a pagination bound into the handles for pages `1..=bound`
///
/// A bound of 0 is treated as 1: every partition has at least its first page.
pub fn page_handles(seed: &Arc<SeedQuery>, bound: u32) -> Vec<PageHandle> {
    (1..=bound.max(1))
        .map(|index| PageHandle {
            seed: Arc::clone(seed),
            index,
            url: seed.page_url(index),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> CatalogConfig {
        CatalogConfig {
            base_url: "https://example.com/en/real-estate".to_string(),
            transaction_types: vec!["for-sale".to_string(), "in-public-sale".to_string()],
            property_types: vec!["house".to_string()],
            property_subtypes: vec!["villa".to_string(), "loft".to_string()],
            provinces: vec!["namur".to_string()],
            towns: vec!["1030-schaarbeek".to_string()],
            exclude_patterns: vec![],
        }
    }

    #[test]
    fn test_province_seed_url() {
        let seed = SeedQuery::new(Partition::Province("namur".to_string()), &catalog());
        assert_eq!(
            seed.url(),
            "https://example.com/en/real-estate?transactiontypes=for-sale,in-public-sale\
             &propertytypes=house&propertysubtypes=villa,loft&provinces=namur&noindex=1"
        );
    }

    #[test]
    fn test_town_seed_uses_towns_key() {
        let seed = SeedQuery::new(Partition::Town("1030-schaarbeek".to_string()), &catalog());
        assert!(seed.url().contains("&towns=1030-schaarbeek&"));
        assert!(!seed.url().contains("provinces="));
    }

    #[test]
    fn test_seed_queries_order() {
        let seeds = seed_queries(&catalog());
        assert_eq!(seeds.len(), 2);
        assert_eq!(
            seeds[0].partition(),
            &Partition::Province("namur".to_string())
        );
        assert_eq!(
            seeds[1].partition(),
            &Partition::Town("1030-schaarbeek".to_string())
        );
    }

    #[test]
    fn test_default_catalog_has_one_seed_per_partition() {
        let seeds = seed_queries(&CatalogConfig::default());
        assert_eq!(seeds.len(), 29);
    }

    #[test]
    fn test_page_handles() {
        let seed = seed_queries(&catalog()).remove(0);
        let handles = page_handles(&seed, 3);

        assert_eq!(handles.len(), 3);
        assert_eq!(handles[0].index, 1);
        assert_eq!(handles[2].index, 3);
        assert!(handles[2].url.ends_with("&noindex=1&page=3"));
    }

    #[test]
    fn test_page_handles_zero_bound() {
        let seed = seed_queries(&catalog()).remove(0);
        assert_eq!(page_handles(&seed, 0).len(), 1);
    }

    #[test]
    fn test_partition_display() {
        assert_eq!(
            Partition::Town("1000-brussels".to_string()).to_string(),
            "towns=1000-brussels"
        );
    }
}
