use std::sync::Arc;

use axum::{response::IntoResponse, routing::post, Extension, Json, Router};
use validator::Validate;

use crate::{
    db::contactdb::ContactExt,
    dtos::{leaddtos::CreateContactDto, userdtos::Response},
    error::HttpError,
    AppState,
};

pub fn contact_handler() -> Router {
    Router::new().route("/", post(create_contact_message))
}

pub async fn create_contact_message(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateContactDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    app_state
        .db_client
        .save_contact_message(body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(Response {
        status: "success",
        message: "Your message has been received. We will get back to you shortly.".to_string(),
    }))
}
