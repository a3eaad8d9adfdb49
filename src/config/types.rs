use serde::Deserialize;

/// Main configuration structure for Immo-Harvest
///
/// Every section and key has a default, so an empty file (or no file at all)
/// yields the catalog's standard harvesting setup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub harvester: HarvesterConfig,
    pub http: HttpConfig,
    pub catalog: CatalogConfig,
    pub output: OutputConfig,
}

/// Concurrency and batching behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HarvesterConfig {
    /// Worker pool size for the scout and page-crawl stage
    pub crawl_concurrency: usize,

    /// Worker pool size for the detail extraction stage
    pub extract_concurrency: usize,

    /// Number of URLs persisted together as one durability unit
    pub batch_size: usize,

    /// Extra pages crawled past the highest advertised page index
    pub page_margin: u32,
}

impl Default for HarvesterConfig {
    fn default() -> Self {
        Self {
            crawl_concurrency: 10,
            extract_concurrency: 20,
            batch_size: 100,
            page_margin: crate::crawler::DEFAULT_PAGE_MARGIN,
        }
    }
}

/// Request identification and timeouts
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HttpConfig {
    /// Value sent in the `User-Agent` header
    pub user_agent: String,

    /// Value sent in the `Accept-Language` header
    pub accept_language: String,

    /// Per-request timeout (seconds)
    pub request_timeout_secs: u64,

    /// TCP connect timeout (seconds)
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            request_timeout_secs: 10,
            connect_timeout_secs: 5,
        }
    }
}

/// Search partitions and the fixed catalog filters
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CatalogConfig {
    /// Search endpoint, without query string
    pub base_url: String,

    pub transaction_types: Vec<String>,
    pub property_types: Vec<String>,
    pub property_subtypes: Vec<String>,

    /// Province slugs, one search partition each
    pub provinces: Vec<String>,

    /// Town slugs (`zip-name`), one search partition each
    pub towns: Vec<String>,

    /// Substrings marking aggregate listings that must not be harvested
    pub exclude_patterns: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();

        Self {
            base_url: "https://immovlan.be/en/real-estate".to_string(),
            transaction_types: owned(&["for-sale", "in-public-sale"]),
            property_types: owned(&["house", "apartment"]),
            property_subtypes: owned(&[
                "residence",
                "villa",
                "mixed-building",
                "master-house",
                "cottage",
                "bungalow",
                "chalet",
                "mansion",
                "apartment",
                "penthouse",
                "ground-floor",
                "duplex",
                "studio",
                "loft",
                "triplex",
            ]),
            provinces: owned(&[
                "namur",
                "liege",
                "hainaut",
                "luxembourg",
                "brabant-wallon",
                "east-flanders",
                "west-flanders",
                "antwerp",
                "limburg",
                "vlaams-brabant",
            ]),
            towns: owned(&[
                "1000-brussels",
                "1020-laken",
                "1030-schaarbeek",
                "1040-etterbeek",
                "1050-elsene",
                "1060-sint-gillis",
                "1070-anderlecht",
                "1080-sint-jans-molenbeek",
                "1090-jette",
                "1120-neder-over-heembeek",
                "1130-haren",
                "1140-evere",
                "1150-sint-pieters-woluwe",
                "1160-oudergem",
                "1170-watermaal-bosvoorde",
                "1180-ukkel",
                "1190-vorst",
                "1200-sint-lambrechts-woluwe",
                "1210-sint-joost-ten-node",
            ]),
            exclude_patterns: owned(&["/projectdetail/"]),
        }
    }
}

/// Output file locations
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Discovered listing URLs, written by the crawl stage
    pub urls_path: String,

    /// Harvested records, appended batch by batch
    pub records_path: String,

    /// Rescaled dataset produced by the clean stage
    pub cleaned_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            urls_path: "./data/property_urls.csv".to_string(),
            records_path: "./data/immo_eliza_dataset.csv".to_string(),
            cleaned_path: "./data/immo_eliza_dataset_cleaned.csv".to_string(),
        }
    }
}
