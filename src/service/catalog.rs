use crate::models::propertymodel::{Property, PropertyStatus, PropertyType};

/// Shown whenever a listing has no photos of its own.
pub const PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1564013799919-ab600027ffc6?w=800&auto=format&fit=crop&q=60";

/// Type criterion for the listing filter. `All` is the "all" sentinel and
/// matches every listing without inspecting it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypeFilter {
    All,
    Only(PropertyType),
}

impl TypeFilter {
    /// Parses a query value. Absent, empty and "all" select everything;
    /// anything unrecognized also falls back to `All` rather than
    /// silently filtering out the whole catalog.
    pub fn parse(value: Option<&str>) -> TypeFilter {
        match value {
            None => TypeFilter::All,
            Some(raw) => {
                let raw = raw.trim();
                if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
                    TypeFilter::All
                } else {
                    raw.parse::<PropertyType>()
                        .map(TypeFilter::Only)
                        .unwrap_or(TypeFilter::All)
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListingCriteria {
    pub location_text: String,
    pub type_filter: TypeFilter,
}

impl ListingCriteria {
    pub fn new(location_text: Option<String>, property_type: Option<&str>) -> Self {
        ListingCriteria {
            location_text: location_text.unwrap_or_default(),
            type_filter: TypeFilter::parse(property_type),
        }
    }
}

/// Whether a single listing satisfies the criteria. Location matching is a
/// case-insensitive substring test against `location` OR `colony`; a missing
/// colony counts as an empty string, never as a whole-record failure.
pub fn matches(property: &Property, criteria: &ListingCriteria) -> bool {
    let location_ok = {
        let needle = criteria.location_text.trim().to_lowercase();
        if needle.is_empty() {
            true
        } else {
            let colony = property.colony.as_deref().unwrap_or("");
            property.location.to_lowercase().contains(&needle)
                || colony.to_lowercase().contains(&needle)
        }
    };

    let type_ok = match criteria.type_filter {
        TypeFilter::All => true,
        TypeFilter::Only(wanted) => property.property_type == wanted,
    };

    location_ok && type_ok
}

/// Narrows a fetched listing collection in memory, preserving the source
/// order (descending created_at from the fetch). Pure and idempotent; an
/// empty result is a valid outcome.
pub fn filter_listings<'a>(
    listings: &'a [Property],
    criteria: &ListingCriteria,
) -> Vec<&'a Property> {
    listings.iter().filter(|p| matches(p, criteria)).collect()
}

/// First image of the listing, or the documented placeholder when the
/// listing has none.
pub fn cover_image(property: &Property) -> &str {
    property
        .images
        .first()
        .map(|img| img.image.as_str())
        .unwrap_or(PLACEHOLDER_IMAGE)
}

/// Room counts where zero or absent means "not applicable". Such counts
/// are dropped entirely so nothing ever renders "0 Beds".
pub fn applicable_rooms(count: Option<i32>) -> Option<i32> {
    count.filter(|n| *n > 0)
}

/// Why a lead submission must be refused before any write reaches the
/// store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LeadRefusal {
    /// Unknown id, or a pending listing that is invisible to the public
    /// catalog; visitors cannot tell the two apart.
    NotFound,
    /// Completed sale; no enquiry is meaningful.
    Sold,
}

/// Server-side acceptance check for a buyer enquiry against a fetched
/// listing. A pending (unverified) listing is refused exactly like an
/// unknown id, matching what the public detail endpoint serves.
pub fn lead_target(property: Option<&Property>) -> Result<&Property, LeadRefusal> {
    let property = property
        .filter(|p| p.verified)
        .ok_or(LeadRefusal::NotFound)?;

    if property.status == PropertyStatus::Sold {
        return Err(LeadRefusal::Sold);
    }

    Ok(property)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::propertymodel::PropertyImage;
    use chrono::Utc;
    use uuid::Uuid;

    fn listing(title: &str, location: &str, colony: Option<&str>, kind: PropertyType) -> Property {
        Property {
            id: Uuid::new_v4(),
            submitted_by: Uuid::new_v4(),
            title: title.to_string(),
            price: "45 Lakh".to_string(),
            area: "200 sq yd".to_string(),
            location: location.to_string(),
            colony: colony.map(|c| c.to_string()),
            property_type: kind,
            beds: None,
            baths: None,
            status: PropertyStatus::Available,
            description: None,
            verified: true,
            created_at: Utc::now(),
            images: vec![],
        }
    }

    fn sample_catalog() -> Vec<Property> {
        vec![
            listing("Kothi near bus stand", "Sangrur", Some("Model Town"), PropertyType::House),
            listing("Corner plot", "Dhuri", Some("Shastri Nagar"), PropertyType::Plot),
            listing("Shop on main road", "Sangrur", None, PropertyType::Commercial),
        ]
    }

    #[test]
    fn empty_criteria_is_identity() {
        let catalog = sample_catalog();
        let criteria = ListingCriteria::new(None, None);

        let result = filter_listings(&catalog, &criteria);
        assert_eq!(result.len(), catalog.len());
        for (got, want) in result.iter().zip(catalog.iter()) {
            assert_eq!(got.id, want.id);
        }
    }

    #[test]
    fn location_matches_colony_case_insensitively() {
        let catalog = sample_catalog();
        let criteria = ListingCriteria::new(Some("model".to_string()), Some("all"));

        let result = filter_listings(&catalog, &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Kothi near bus stand");
    }

    #[test]
    fn type_and_location_combine_with_and() {
        let catalog = sample_catalog();

        // Same search text, narrowed to plots: the Model Town house drops out.
        let criteria = ListingCriteria::new(Some("model".to_string()), Some("Plot"));
        assert!(filter_listings(&catalog, &criteria).is_empty());

        let criteria = ListingCriteria::new(Some("dhuri".to_string()), Some("Plot"));
        assert_eq!(filter_listings(&catalog, &criteria).len(), 1);
    }

    #[test]
    fn missing_colony_is_treated_as_empty() {
        let catalog = sample_catalog();
        let criteria = ListingCriteria::new(Some("sangrur".to_string()), None);

        // The colony-less shop still matches on its location field.
        let result = filter_listings(&catalog, &criteria);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn filter_is_idempotent() {
        let catalog = sample_catalog();
        let criteria = ListingCriteria::new(Some("sangrur".to_string()), Some("house"));

        let once: Vec<Property> = filter_listings(&catalog, &criteria)
            .into_iter()
            .cloned()
            .collect();
        let twice = filter_listings(&once, &criteria);

        assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(twice.iter()) {
            assert_eq!(a.id, b.id);
        }
    }

    #[test]
    fn order_is_preserved() {
        let catalog = sample_catalog();
        let criteria = ListingCriteria::new(Some("sangrur".to_string()), None);

        let result = filter_listings(&catalog, &criteria);
        assert_eq!(result[0].title, "Kothi near bus stand");
        assert_eq!(result[1].title, "Shop on main road");
    }

    #[test]
    fn unknown_type_value_falls_back_to_all() {
        assert_eq!(TypeFilter::parse(Some("castle")), TypeFilter::All);
        assert_eq!(TypeFilter::parse(Some("")), TypeFilter::All);
        assert_eq!(
            TypeFilter::parse(Some("Commercial")),
            TypeFilter::Only(PropertyType::Commercial)
        );
    }

    #[test]
    fn cover_image_falls_back_to_placeholder() {
        let mut property = listing("Bare plot", "Sangrur", None, PropertyType::Plot);
        assert_eq!(cover_image(&property), PLACEHOLDER_IMAGE);

        property.images.push(PropertyImage {
            id: Uuid::new_v4(),
            property_id: property.id,
            image: "https://cdn.example.com/p/1.jpg".to_string(),
            position: 0,
        });
        assert_eq!(cover_image(&property), "https://cdn.example.com/p/1.jpg");
    }

    #[test]
    fn zero_rooms_count_as_absent() {
        assert_eq!(applicable_rooms(Some(3)), Some(3));
        assert_eq!(applicable_rooms(Some(0)), None);
        assert_eq!(applicable_rooms(None), None);
    }

    #[test]
    fn lead_against_unknown_listing_is_refused() {
        assert!(matches!(lead_target(None), Err(LeadRefusal::NotFound)));
    }

    #[test]
    fn lead_against_pending_listing_is_refused_like_unknown() {
        let mut property = listing("Kothi", "Sangrur", None, PropertyType::House);
        property.verified = false;

        assert!(matches!(
            lead_target(Some(&property)),
            Err(LeadRefusal::NotFound)
        ));
    }

    #[test]
    fn lead_against_sold_listing_is_refused() {
        let mut property = listing("Kothi", "Sangrur", None, PropertyType::House);
        property.status = PropertyStatus::Sold;

        assert!(matches!(lead_target(Some(&property)), Err(LeadRefusal::Sold)));
    }

    #[test]
    fn lead_against_live_listing_is_accepted() {
        let property = listing("Kothi", "Sangrur", None, PropertyType::House);

        let accepted = lead_target(Some(&property)).expect("available listing takes leads");
        assert_eq!(accepted.id, property.id);

        let mut reserved = listing("Plot", "Dhuri", None, PropertyType::Plot);
        reserved.status = PropertyStatus::Reserved;
        assert!(lead_target(Some(&reserved)).is_ok());
    }
}
