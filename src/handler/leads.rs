use std::sync::Arc;

use axum::{response::IntoResponse, routing::post, Extension, Json, Router};
use validator::Validate;

use crate::{
    db::{leaddb::LeadExt, propertydb::PropertyExt},
    dtos::leaddtos::{CreateLeadDto, FilterLeadDto},
    error::{ErrorMessage, HttpError},
    service::catalog::{self, LeadRefusal},
    AppState,
};

pub fn lead_handler() -> Router {
    Router::new().route("/", post(create_lead))
}

/// Anonymous buyer enquiry. Validation happens before any store access;
/// the in-flight permit is claimed before the property lookup so a
/// double-click cannot race two identical writes, and it is released on
/// every exit path by dropping the permit.
pub async fn create_lead(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateLeadDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let buyer_name = body.buyer_name.trim().to_string();
    let buyer_phone = body.buyer_phone.trim().to_string();

    let inflight_key = format!("{}:{}", body.property_id, buyer_phone);
    let _permit = app_state
        .lead_inflight
        .try_begin(inflight_key)
        .ok_or_else(|| {
            HttpError::too_many_requests(ErrorMessage::SubmissionInFlight.to_string())
        })?;

    let property = app_state
        .db_client
        .get_property_by_id(body.property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    // Pending listings are invisible to the public catalog, so an enquiry
    // against one gets the same 404 as an unknown id; sold listings get 409.
    // Enforced here, not only in the UI.
    let property = catalog::lead_target(property.as_ref()).map_err(|refusal| match refusal {
        LeadRefusal::NotFound => HttpError::not_found(ErrorMessage::PropertyNotFound.to_string()),
        LeadRefusal::Sold => HttpError::conflict(ErrorMessage::PropertySold.to_string()),
    })?;

    let lead = app_state
        .db_client
        .save_lead(body.property_id, &buyer_name, &buyer_phone)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(property_id = %property.id, lead_id = %lead.id, "new lead recorded");

    let filtered_lead = FilterLeadDto::filter_lead(&lead);

    Ok((
        axum::http::StatusCode::CREATED,
        Json(serde_json::json!({
            "status": "success",
            "message": "Request submitted successfully",
            "data": {
                "lead": filtered_lead
            }
        })),
    ))
}
