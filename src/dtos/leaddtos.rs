use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::leadmodel::Lead;

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateLeadDto {
    #[serde(rename = "property")]
    pub property_id: Uuid,

    #[validate(
        length(min = 1, max = 200, message = "Buyer name is required"),
        custom = "validate_not_blank"
    )]
    pub buyer_name: String,

    #[validate(
        length(min = 1, max = 20, message = "Buyer phone is required"),
        custom = "validate_not_blank"
    )]
    pub buyer_phone: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterLeadDto {
    pub id: String,
    #[serde(rename = "property")]
    pub property_id: String,
    pub buyer_name: String,
    pub buyer_phone: String,
    pub status: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl FilterLeadDto {
    pub fn filter_lead(lead: &Lead) -> Self {
        FilterLeadDto {
            id: lead.id.to_string(),
            property_id: lead.property_id.to_string(),
            buyer_name: lead.buyer_name.clone(),
            buyer_phone: lead.buyer_phone.clone(),
            status: lead.status.to_str().to_string(),
            created_at: lead.created_at,
        }
    }

    pub fn filter_leads(leads: &[Lead]) -> Vec<FilterLeadDto> {
        leads.iter().map(FilterLeadDto::filter_lead).collect()
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateContactDto {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(length(min = 1, max = 200, message = "Subject is required"))]
    pub subject: String,

    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_buyer_name_fails_before_any_io() {
        let dto = CreateLeadDto {
            property_id: Uuid::new_v4(),
            buyer_name: "   ".to_string(),
            buyer_phone: "9876543210".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn valid_lead_passes_validation() {
        let dto = CreateLeadDto {
            property_id: Uuid::new_v4(),
            buyer_name: "Harjit Kaur".to_string(),
            buyer_phone: "9876543210".to_string(),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn lead_body_uses_property_key_on_the_wire() {
        let dto: CreateLeadDto = serde_json::from_value(serde_json::json!({
            "property": Uuid::new_v4(),
            "buyer_name": "Harjit Kaur",
            "buyer_phone": "9876543210"
        }))
        .unwrap();
        assert_eq!(dto.buyer_name, "Harjit Kaur");
    }
}
