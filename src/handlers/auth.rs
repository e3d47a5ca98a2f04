// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedCompany,
    models::{
        auth::{AuthResponse, LoginPayload},
        company::RegisterCompanyPayload,
    },
};

pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterCompanyPayload>,
) -> Result<impl IntoResponse, AppError> {
    // Validação padrão do Validator
    payload.validate()?;

    // Nossa validação de consistência manual (um único endereço principal)
    payload.validate_main_address().map_err(|e| {
        let mut errors = validator::ValidationErrors::new();
        errors.add("addresses", e);
        AppError::ValidationError(errors)
    })?;

    let token = app_state.auth_service.register_company(payload).await?;

    Ok((StatusCode::CREATED, Json(AuthResponse { token })))
}

pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let token = app_state
        .auth_service
        .login_company(&payload.email, &payload.password)
        .await?;

    Ok((StatusCode::OK, Json(AuthResponse { token })))
}

// Dados da empresa autenticada (com endereços).
pub async fn get_me(
    State(app_state): State<AppState>,
    company: AuthenticatedCompany,
) -> Result<impl IntoResponse, AppError> {
    let me = app_state.company_service.get_company(company.0.id).await?;
    Ok((StatusCode::OK, Json(me)))
}
