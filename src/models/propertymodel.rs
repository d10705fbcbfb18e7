use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "property_type", rename_all = "lowercase")]
pub enum PropertyType {
    House,
    Plot,
    Commercial,
}

impl PropertyType {
    pub fn to_str(&self) -> &str {
        match self {
            PropertyType::House => "House",
            PropertyType::Plot => "Plot",
            PropertyType::Commercial => "Commercial",
        }
    }
}

impl std::str::FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "house" => Ok(PropertyType::House),
            "plot" => Ok(PropertyType::Plot),
            "commercial" => Ok(PropertyType::Commercial),
            other => Err(format!("unknown property type: {}", other)),
        }
    }
}

/// Listing status. Legacy records sometimes carry "Under negotiation",
/// which is treated as `Reserved` on input.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "property_status", rename_all = "lowercase")]
pub enum PropertyStatus {
    Available,
    #[serde(alias = "Under negotiation", alias = "under_negotiation")]
    Reserved,
    Sold,
}

impl PropertyStatus {
    pub fn to_str(&self) -> &str {
        match self {
            PropertyStatus::Available => "Available",
            PropertyStatus::Reserved => "Reserved",
            PropertyStatus::Sold => "Sold",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct PropertyImage {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub property_id: Uuid,
    pub image: String,
    #[serde(skip_serializing)]
    pub position: i32,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Property {
    pub id: Uuid,
    pub submitted_by: Uuid,
    pub title: String,

    // Display strings, never parsed (e.g. "45 Lakh", "200 sq yd")
    pub price: String,
    pub area: String,

    pub location: String,
    pub colony: Option<String>,
    pub property_type: PropertyType,

    // None or 0 means "not applicable", hidden from display
    pub beds: Option<i32>,
    pub baths: Option<i32>,

    pub status: PropertyStatus,
    pub description: Option<String>,

    // Only verified listings appear in the public catalog
    pub verified: bool,

    pub created_at: DateTime<Utc>,

    // Loaded from property_images after the row fetch
    #[sqlx(skip)]
    #[serde(default)]
    pub images: Vec<PropertyImage>,
}
