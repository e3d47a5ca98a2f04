// src/handlers/companies.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError, config::AppState, middleware::auth::AuthenticatedCompany,
};

pub async fn get_all_companies(
    State(app_state): State<AppState>,
    _company: AuthenticatedCompany,
) -> Result<impl IntoResponse, AppError> {
    let companies = app_state.company_service.get_all().await?;
    Ok((StatusCode::OK, Json(companies)))
}

pub async fn get_company(
    State(app_state): State<AppState>,
    _company: AuthenticatedCompany,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let company = app_state.company_service.get_company(id).await?;
    Ok((StatusCode::OK, Json(company)))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanyPayload {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    // Se vier, o hash é recalculado no serviço.
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: Option<String>,
}

// A empresa autenticada só edita o próprio cadastro.
pub async fn update_my_company(
    State(app_state): State<AppState>,
    company: AuthenticatedCompany,
    Json(payload): Json<UpdateCompanyPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let updated = app_state
        .company_service
        .update_company(
            company.0.id,
            payload.name.as_deref(),
            payload.phone.as_deref(),
            payload.description.as_deref(),
            payload.password.as_deref(),
        )
        .await?;
    Ok((StatusCode::OK, Json(updated)))
}

pub async fn delete_my_company(
    State(app_state): State<AppState>,
    company: AuthenticatedCompany,
) -> Result<impl IntoResponse, AppError> {
    app_state.company_service.delete_company(company.0.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
