use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::propertydb::PropertyExt,
    dtos::propertydtos::{CreatePropertyDto, FilterPropertyDto, PropertyListQueryDto},
    error::{ErrorMessage, HttpError},
    middleware::{auth, JWTAuthMiddeware},
    models::usermodel::UserRole,
    service::catalog::{self, ListingCriteria},
    AppState,
};

pub fn property_handler() -> Router {
    Router::new()
        .route("/", get(list_properties))
        .route("/create", post(create_property).layer(middleware::from_fn(auth)))
        .route(
            "/my-properties",
            get(get_my_properties).layer(middleware::from_fn(auth)),
        )
        .route("/:property_id", get(get_property_by_id))
}

/// Public catalog. The page is fetched once from the store in descending
/// created_at order; location/type narrowing is applied in memory over that
/// fetched collection and never triggers a second fetch.
pub async fn list_properties(
    Query(query_params): Query<PropertyListQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query_params.page.unwrap_or(1);
    let limit = query_params.limit.unwrap_or(50);

    let properties = app_state
        .db_client
        .get_verified_properties(page, limit as usize)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let criteria = ListingCriteria::new(
        query_params.location.clone(),
        query_params.property_type.as_deref(),
    );
    let matched = catalog::filter_listings(&properties, &criteria);
    let filtered_properties = FilterPropertyDto::filter_properties(&matched);

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "properties": filtered_properties,
            "pagination": {
                "page": page,
                "limit": limit,
                "total": filtered_properties.len()
            }
        }
    })))
}

pub async fn get_property_by_id(
    Path(property_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let property = app_state
        .db_client
        .get_property_by_id(property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .filter(|p| p.verified)
        .ok_or_else(|| HttpError::not_found(ErrorMessage::PropertyNotFound.to_string()))?;

    let filtered_property = FilterPropertyDto::filter_property(&property);

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "property": filtered_property
        }
    })))
}

/// Authenticated submission. Listings from regular users start pending and
/// stay out of the public catalog until an admin verifies them; admin
/// submissions publish immediately.
pub async fn create_property(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreatePropertyDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let verified = user.user.role == UserRole::Admin;

    let property = app_state
        .db_client
        .save_property(user.user.id, body, verified)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let filtered_property = FilterPropertyDto::filter_property(&property);

    let message = if verified {
        "Property listed successfully"
    } else {
        "Property submitted successfully and is awaiting verification"
    };

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": message,
        "data": {
            "property": filtered_property
        }
    })))
}

pub async fn get_my_properties(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let properties = app_state
        .db_client
        .get_properties_by_owner(user.user.id)
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
