/// Subtype slugs classified as houses; every other subtype is an apartment
pub const HOUSE_SUBTYPES: [&str; 4] = ["residence", "villa", "mixed-building", "master-house"];

const SUBTYPE_SEGMENT: usize = 5;
const SALE_TYPE_SEGMENT: usize = 6;

/// Property typing read from a listing URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyKind {
    /// `House` or `Apartment`
    pub property_type: Option<String>,
    /// Subtype slug as it appears in the URL
    pub subtype: Option<String>,
    /// Sale type with dashes turned into spaces, e.g. `for sale`
    pub sale_type: Option<String>,
}

/// Infers property type, subtype and sale type from a detail URL
///
/// Detail URLs have the shape
/// `https://host/{lang}/detail/{subtype}/{sale-type}/{zip}/{town}/{id}`, so
/// splitting on `/` puts the subtype at segment 5 and the sale type at
/// segment 6. A URL too short to carry a subtype yields an unknown kind
/// (all fields `None`); a missing or empty sale-type segment only leaves the
/// sale type unknown.
///
/// # Examples
///
/// ```
/// use immo_harvest::catalog::property_kind_from_url;
///
/// let kind = property_kind_from_url(
///     "https://immovlan.be/en/detail/villa/for-sale/5000/namur/vbd1",
/// );
/// assert_eq!(kind.property_type.as_deref(), Some("House"));
/// assert_eq!(kind.subtype.as_deref(), Some("villa"));
/// assert_eq!(kind.sale_type.as_deref(), Some("for sale"));
/// ```
pub fn property_kind_from_url(url: &str) -> PropertyKind {
    let segments: Vec<&str> = url.split('/').collect();

    let subtype = match segments.get(SUBTYPE_SEGMENT) {
        Some(segment) if !segment.is_empty() => *segment,
        _ => return PropertyKind::default(),
    };

    let is_house = HOUSE_SUBTYPES
        .iter()
        .any(|house| house.eq_ignore_ascii_case(subtype));

    let sale_type = segments
        .get(SALE_TYPE_SEGMENT)
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.replace('-', " "));

    PropertyKind {
        property_type: Some(if is_house { "House" } else { "Apartment" }.to_string()),
        subtype: Some(subtype.to_string()),
        sale_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apartment_url() {
        let kind = property_kind_from_url(
            "https://immovlan.be/en/detail/penthouse/for-sale/1030/schaerbeek/vbd88427",
        );
        assert_eq!(kind.property_type.as_deref(), Some("Apartment"));
        assert_eq!(kind.subtype.as_deref(), Some("penthouse"));
        assert_eq!(kind.sale_type.as_deref(), Some("for sale"));
    }

    #[test]
    fn test_house_subtypes() {
        for subtype in HOUSE_SUBTYPES {
            let url = format!("https://immovlan.be/en/detail/{}/for-sale/1000/brussels/x", subtype);
            assert_eq!(
                property_kind_from_url(&url).property_type.as_deref(),
                Some("House"),
                "{} should be a house",
                subtype
            );
        }
    }

    #[test]
    fn test_house_match_ignores_case() {
        let kind = property_kind_from_url("https://immovlan.be/en/detail/Mixed-Building/for-sale/1/x/y");
        assert_eq!(kind.property_type.as_deref(), Some("House"));
        assert_eq!(kind.subtype.as_deref(), Some("Mixed-Building"));
    }

    #[test]
    fn test_public_sale() {
        let kind = property_kind_from_url(
            "https://immovlan.be/en/detail/residence/in-public-sale/4000/liege/rbu1",
        );
        assert_eq!(kind.sale_type.as_deref(), Some("in public sale"));
    }

    #[test]
    fn test_short_url_is_unknown() {
        assert_eq!(
            property_kind_from_url("https://immovlan.be/en"),
            PropertyKind::default()
        );
        assert_eq!(property_kind_from_url(""), PropertyKind::default());
    }

    #[test]
    fn test_empty_subtype_segment_is_unknown() {
        assert_eq!(
            property_kind_from_url("https://immovlan.be/en/detail//for-sale"),
            PropertyKind::default()
        );
    }

    #[test]
    fn test_missing_sale_type_segment() {
        let kind = property_kind_from_url("https://immovlan.be/en/detail/villa");
        assert_eq!(kind.property_type.as_deref(), Some("House"));
        assert_eq!(kind.sale_type, None);

        let kind = property_kind_from_url("https://immovlan.be/en/detail/villa/");
        assert_eq!(kind.sale_type, None);
    }
}
