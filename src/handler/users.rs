use std::sync::Arc;

use axum::{response::IntoResponse, routing::get, Extension, Json, Router};

use crate::{
    db::leaddb::LeadExt,
    dtos::{
        leaddtos::FilterLeadDto,
        userdtos::{FilterUserDto, UserData, UserResponseDto},
    },
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn users_handler() -> Router {
    Router::new()
        .route("/me", get(get_me))
        .route("/me/leads", get(get_my_leads))
}

pub async fn get_me(
    Extension(_app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let filtered_user = FilterUserDto::filter_user(&user.user);

    Ok(Json(UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: filtered_user,
        },
    }))
}

/// Leads submitted against any property the authenticated user listed.
pub async fn get_my_leads(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let leads = app_state
        .db_client
        .get_leads_for_owner(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let filtered_leads = FilterLeadDto::filter_leads(&leads);

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "leads": filtered_leads,
            "total": filtered_leads.len()
        }
    })))
}
