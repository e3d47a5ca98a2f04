// src/handlers/dashboard.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError, config::AppState, middleware::auth::AuthenticatedCompany,
};

pub async fn get_summary(
    State(app_state): State<AppState>,
    _company: AuthenticatedCompany,
    Path(company_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.dashboard_service.get_summary(company_id).await?;
    Ok((StatusCode::OK, Json(summary)))
}
