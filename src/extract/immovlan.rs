use crate::catalog::property_kind_from_url;
use crate::extract::text::{clean_numeric, flag_value};
use crate::extract::{Record, RecordExtractor};
use scraper::{ElementRef, Html, Selector};

/// Financial summary block, checked for excluded sale structures
const FINANCIAL_SELECTOR: &str = "div.financial.w-100";

/// Zip code and town line
const LOCALITY_SELECTOR: &str = "span.city-line";

/// Asking price in the page header
const PRICE_SELECTOR: &str = "span.detail__header_price_data";

/// Block of `<h4>` labels, each followed by a `<p>` value
const GENERAL_INFO_SELECTOR: &str = "div.general-info.w-100";

/// Sale structure that is not a plain sale (life annuity)
const EXCLUDED_FINANCIAL_TERM: &str = "annuity";

/// Extraction rules for immovlan.be detail pages
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmovlanExtractor;

impl ImmovlanExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl RecordExtractor for ImmovlanExtractor {
    fn extract(&self, url: &str, document: &Html) -> Option<Record> {
        if is_annuity_sale(document) {
            tracing::debug!("Excluding annuity sale {}", url);
            return None;
        }

        let mut record = Record::new(url);

        record.locality = select_text(document, LOCALITY_SELECTOR);
        record.zip_code = record.locality.as_deref().and_then(clean_numeric);

        let kind = property_kind_from_url(url);
        record.property_type = kind.property_type;
        record.subtype = kind.subtype;
        record.sale_type = kind.sale_type;

        record.price = select_text(document, PRICE_SELECTOR)
            .as_deref()
            .and_then(clean_numeric);

        for (label, value) in general_info(document) {
            apply_general_info(&mut record, &label, value);
        }

        Some(record)
    }
}

fn is_annuity_sale(document: &Html) -> bool {
    let Ok(selector) = Selector::parse(FINANCIAL_SELECTOR) else {
        return false;
    };

    document.select(&selector).next().is_some_and(|block| {
        block
            .text()
            .collect::<String>()
            .to_lowercase()
            .contains(EXCLUDED_FINANCIAL_TERM)
    })
}

/// Text of the first element matching `selector`, if non-empty
fn select_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
}

/// Concatenates an element's text fragments, each stripped of whitespace
fn element_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

/// Pairs every `<h4>` label of the general info block with the next `<p>`
fn general_info(document: &Html) -> Vec<(String, String)> {
    let Ok(selector) = Selector::parse(GENERAL_INFO_SELECTOR) else {
        return Vec::new();
    };
    let Some(block) = document.select(&selector).next() else {
        return Vec::new();
    };

    let mut pairs = Vec::new();
    let mut label: Option<String> = None;

    for element in block.descendants().filter_map(ElementRef::wrap) {
        match element.value().name() {
            "h4" => label = Some(element_text(element)),
            "p" => {
                if let Some(label) = label.take() {
                    pairs.push((label, element_text(element)));
                }
            }
            _ => {}
        }
    }

    pairs
}

fn apply_general_info(record: &mut Record, label: &str, value: String) {
    let text = Some(value.clone()).filter(|v| !v.is_empty());
    let number = clean_numeric(&value);
    let flag = Some(flag_value(&value));

    match label {
        "State of the property" => record.building_state = text,
        "Number of bedrooms" => record.rooms = number,
        "Livable surface" => record.living_area = number,
        "Kitchen equipment" => record.kitchen = text,
        "Furnished" => record.furnished = flag,
        "Fireplace" => record.open_fire = flag,
        "Terrace" => record.terrace = flag,
        "Terrace Area" => record.terrace_area = number,
        "Garden" => record.garden = flag,
        "Surface garden" => record.garden_area = number,
        "Total land surface" => record.land_surface = number,
        "Number of facades" => record.facades = number,
        "Swimming pool" => record.swimming_pool = flag,
        _ => {}
    }
}
