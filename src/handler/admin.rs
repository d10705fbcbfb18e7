use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::{delete, get, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{leaddb::LeadExt, propertydb::PropertyExt},
    dtos::{
        leaddtos::FilterLeadDto,
        propertydtos::{FilterPropertyDto, UpdatePropertyStatusDto},
        userdtos::{RequestQueryDto, Response},
    },
    error::{ErrorMessage, HttpError},
    models::leadmodel::LeadStatus,
    AppState,
};

/// Moderation surface. The whole router is layered with auth + admin
/// role_check in routes.rs.
pub fn admin_handler() -> Router {
    Router::new()
        .route("/properties/pending", get(get_pending_properties))
        .route("/properties/:property_id/verify", put(verify_property))
        .route("/properties/:property_id/status", put(update_property_status))
        .route("/properties/:property_id", delete(delete_property))
        .route("/leads", get(get_leads))
        .route("/leads/:lead_id/contacted", put(mark_lead_contacted))
}

pub async fn get_pending_properties(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let properties = app_state
        .db_client
        .get_pending_properties()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let refs: Vec<&_> = properties.iter().collect();
    let filtered_properties = FilterPropertyDto::filter_properties(&refs);

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "properties": filtered_properties,
            "total": filtered_properties.len()
        }
    })))
}

pub async fn verify_property(
    Path(property_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let property = app_state
        .db_client
        .verify_property(property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::PropertyNotFound.to_string()))?;

    let filtered_property = FilterPropertyDto::filter_property(&property);

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Property verified and published",
        "data": {
            "property": filtered_property
        }
    })))
}

pub async fn update_property_status(
    Path(property_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdatePropertyStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let property = app_state
        .db_client
        .update_property_status(property_id, body.status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::PropertyNotFound.to_string()))?;

    let filtered_property = FilterPropertyDto::filter_property(&property);

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Property status updated",
        "data": {
            "property": filtered_property
        }
    })))
}

pub async fn delete_property(
    Path(property_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .db_client
        .delete_property(property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if deleted == 0 {
        return Err(HttpError::not_found(
            ErrorMessage::PropertyNotFound.to_string(),
        ));
    }

    Ok(Json(Response {
        status: "success",
        message: "Property deleted".to_string(),
    }))
}

pub async fn get_leads(
    Query(query_params): Query<RequestQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = u32::try_from(query_params.page.unwrap_or(1)).unwrap_or(1);
    let limit = query_params.limit.unwrap_or(10);

    let leads = app_state
        .db_client
        .get_leads(page, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let filtered_leads = FilterLeadDto::filter_leads(&leads);

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "leads": filtered_leads,
            "pagination": {
                "page": page,
                "limit": limit,
                "total": filtered_leads.len()
            }
        }
    })))
}

/// New -> Contacted is the only lead transition and it is admin-only.
pub async fn mark_lead_contacted(
    Path(lead_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let lead = app_state
        .db_client
        .update_lead_status(lead_id, LeadStatus::Contacted)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::LeadNotFound.to_string()))?;

    let filtered_lead = FilterLeadDto::filter_lead(&lead);

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Lead marked as contacted",
        "data": {
            "lead": filtered_lead
        }
    })))
}
