use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::propertymodel::{Property, PropertyImage, PropertyStatus, PropertyType};
use crate::service::catalog;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreatePropertyDto {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,

    // Display string, e.g. "45 Lakh"; never parsed as a number
    #[validate(length(min = 1, max = 100, message = "Price is required"))]
    pub price: String,

    #[validate(length(min = 1, max = 200, message = "Location is required"))]
    pub location: String,

    pub colony: Option<String>,

    #[serde(rename = "type")]
    pub property_type: PropertyType,

    #[validate(length(min = 1, max = 100, message = "Area is required"))]
    pub area: String,

    // 0 means "not applicable", negatives are nonsense
    #[validate(range(min = 0, message = "Beds cannot be negative"))]
    pub beds: Option<i32>,

    #[validate(range(min = 0, message = "Baths cannot be negative"))]
    pub baths: Option<i32>,

    #[serde(default)]
    pub status: Option<PropertyStatus>,

    pub description: Option<String>,

    // Image URLs in display order; an empty list is valid and the catalog
    // falls back to the placeholder
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdatePropertyStatusDto {
    pub status: PropertyStatus,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct PropertyListQueryDto {
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterPropertyDto {
    pub id: String,
    pub title: String,
    pub price: String,
    pub location: String,
    pub colony: Option<String>,
    #[serde(rename = "type")]
    pub property_type: String,
    pub area: String,

    // 0/absent room counts are "not applicable" and are omitted entirely
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beds: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baths: Option<i32>,

    pub status: String,
    pub description: Option<String>,
    pub verified: bool,
    pub images: Vec<PropertyImage>,
    pub cover_image: String,
    pub submitted_by: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl FilterPropertyDto {
    pub fn filter_property(property: &Property) -> Self {
        FilterPropertyDto {
            id: property.id.to_string(),
            title: property.title.clone(),
            price: property.price.clone(),
            location: property.location.clone(),
            colony: property.colony.clone(),
            property_type: property.property_type.to_str().to_string(),
            area: property.area.clone(),
            beds: catalog::applicable_rooms(property.beds),
            baths: catalog::applicable_rooms(property.baths),
            status: property.status.to_str().to_string(),
            description: property.description.clone(),
            verified: property.verified,
            images: property.images.clone(),
            cover_image: catalog::cover_image(property).to_string(),
            submitted_by: property.submitted_by.to_string(),
            created_at: property.created_at,
        }
    }

    pub fn filter_properties(properties: &[&Property]) -> Vec<FilterPropertyDto> {
        properties
            .iter()
            .map(|p| FilterPropertyDto::filter_property(p))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn negative_room_counts_are_rejected() {
        let dto = CreatePropertyDto {
            title: "Kothi near bus stand".to_string(),
            price: "45 Lakh".to_string(),
            location: "Sangrur".to_string(),
            colony: Some("Model Town".to_string()),
            property_type: PropertyType::House,
            area: "200 sq yd".to_string(),
            beds: Some(-1),
            baths: None,
            status: None,
            description: None,
            images: vec![],
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn out_of_range_paging_is_rejected() {
        let query = PropertyListQueryDto {
            page: Some(0),
            limit: None,
            location: None,
            property_type: None,
        };
        assert!(query.validate().is_err());

        let query = PropertyListQueryDto {
            page: Some(1),
            limit: Some(500),
            location: None,
            property_type: None,
        };
        assert!(query.validate().is_err());

        let query = PropertyListQueryDto {
            page: None,
            limit: None,
            location: Some("Sangrur".to_string()),
            property_type: None,
        };
        assert!(query.validate().is_ok());
    }

    #[test]
    fn under_negotiation_deserializes_as_reserved() {
        let dto: CreatePropertyDto = serde_json::from_value(serde_json::json!({
            "title": "Shop on main road",
            "price": "1.5 Cr",
            "location": "Sangrur",
            "type": "Commercial",
            "area": "500 sq ft",
            "status": "Under negotiation"
        }))
        .unwrap();
        assert_eq!(dto.status, Some(PropertyStatus::Reserved));
    }

    #[test]
    fn zero_rooms_are_stripped_from_display() {
        let property = Property {
            id: Uuid::new_v4(),
            submitted_by: Uuid::new_v4(),
            title: "Corner plot".to_string(),
            price: "30 Lakh".to_string(),
            area: "150 sq yd".to_string(),
            location: "Dhuri".to_string(),
            colony: None,
            property_type: PropertyType::Plot,
            beds: Some(0),
            baths: None,
            status: PropertyStatus::Available,
            description: None,
            verified: true,
            created_at: Utc::now(),
            images: vec![],
        };

        let filtered = FilterPropertyDto::filter_property(&property);
        assert_eq!(filtered.beds, None);

        let json = serde_json::to_value(&filtered).unwrap();
        assert!(json.get("beds").is_none());
        assert_eq!(json["cover_image"], catalog::PLACEHOLDER_IMAGE);
    }
}
