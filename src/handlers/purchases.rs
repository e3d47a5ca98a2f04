// src/handlers/purchases.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedCompany,
    models::transaction::{PartyRole, TransactionStatus},
};

// ---
// Validação Customizada
// ---
fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor deve ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: CreatePurchase
// ---
// O comprador é a empresa autenticada; o vendedor vem declarado no corpo.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchasePayload {
    pub seller_id: Uuid,
    pub material_id: Uuid,

    #[validate(custom(function = "validate_positive"))]
    pub quantity: Decimal,

    #[validate(custom(function = "validate_positive"))]
    pub unit_price: Decimal,

    // Valor negociado: não precisa bater com quantity * unitPrice.
    #[validate(custom(function = "validate_positive"))]
    pub total_value: Decimal,
}

pub async fn create_purchase(
    State(app_state): State<AppState>,
    company: AuthenticatedCompany,
    Json(payload): Json<CreatePurchasePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let purchase = app_state
        .purchase_service
        .create_purchase(
            company.0.id,
            payload.seller_id,
            payload.material_id,
            payload.quantity,
            payload.unit_price,
            payload.total_value,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(purchase)))
}

// ---
// Transições (sempre ações do vendedor autenticado)
// ---

#[derive(Debug, Default, Deserialize)]
pub struct ReasonPayload {
    pub reason: Option<String>,
}

pub async fn approve_purchase(
    State(app_state): State<AppState>,
    company: AuthenticatedCompany,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let purchase = app_state
        .purchase_service
        .approve_purchase(id, company.0.id)
        .await?;
    Ok((StatusCode::OK, Json(purchase)))
}

pub async fn deny_purchase(
    State(app_state): State<AppState>,
    company: AuthenticatedCompany,
    Path(id): Path<Uuid>,
    payload: Option<Json<ReasonPayload>>,
) -> Result<impl IntoResponse, AppError> {
    let reason = payload.and_then(|Json(p)| p.reason);
    let purchase = app_state
        .purchase_service
        .deny_purchase(id, company.0.id, reason.as_deref())
        .await?;
    Ok((StatusCode::OK, Json(purchase)))
}

pub async fn cancel_purchase(
    State(app_state): State<AppState>,
    company: AuthenticatedCompany,
    Path(id): Path<Uuid>,
    payload: Option<Json<ReasonPayload>>,
) -> Result<impl IntoResponse, AppError> {
    let reason = payload.and_then(|Json(p)| p.reason);
    let purchase = app_state
        .purchase_service
        .cancel_purchase(id, company.0.id, reason.as_deref())
        .await?;
    Ok((StatusCode::OK, Json(purchase)))
}

pub async fn complete_purchase(
    State(app_state): State<AppState>,
    company: AuthenticatedCompany,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let purchase = app_state
        .purchase_service
        .complete_purchase(id, company.0.id)
        .await?;
    Ok((StatusCode::OK, Json(purchase)))
}

// ---
// Listagens
// ---

#[derive(Debug, Deserialize)]
pub struct RoleQuery {
    pub role: PartyRole,
}

pub async fn get_company_purchases(
    State(app_state): State<AppState>,
    _company: AuthenticatedCompany,
    Path(company_id): Path<Uuid>,
    Query(query): Query<RoleQuery>,
) -> Result<impl IntoResponse, AppError> {
    let purchases = app_state
        .purchase_service
        .get_company_purchases(company_id, query.role)
        .await?;
    Ok((StatusCode::OK, Json(purchases)))
}

pub async fn get_all_purchases(
    State(app_state): State<AppState>,
    _company: AuthenticatedCompany,
) -> Result<impl IntoResponse, AppError> {
    let purchases = app_state.purchase_service.get_all().await?;
    Ok((StatusCode::OK, Json(purchases)))
}

pub async fn get_purchase(
    State(app_state): State<AppState>,
    _company: AuthenticatedCompany,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let purchase = app_state.purchase_service.get_by_id(id).await?;
    Ok((StatusCode::OK, Json(purchase)))
}

// ---
// Escotilhas administrativas
// ---

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePurchasePayload {
    #[validate(custom(function = "validate_positive"))]
    pub quantity: Option<Decimal>,
    #[validate(custom(function = "validate_positive"))]
    pub unit_price: Option<Decimal>,
    #[validate(custom(function = "validate_positive"))]
    pub total_value: Option<Decimal>,
    pub denial_reason: Option<String>,
    pub cancellation_reason: Option<String>,
}

pub async fn update_purchase(
    State(app_state): State<AppState>,
    _company: AuthenticatedCompany,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePurchasePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let purchase = app_state
        .purchase_service
        .update(
            id,
            payload.quantity,
            payload.unit_price,
            payload.total_value,
            payload.denial_reason.as_deref(),
            payload.cancellation_reason.as_deref(),
        )
        .await?;
    Ok((StatusCode::OK, Json(purchase)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusPayload {
    pub status: TransactionStatus,
}

// Override administrativo: sem guarda de papel e sem efeito de estoque.
pub async fn update_purchase_status(
    State(app_state): State<AppState>,
    _company: AuthenticatedCompany,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let purchase = app_state
        .purchase_service
        .update_status(id, payload.status)
        .await?;
    Ok((StatusCode::OK, Json(purchase)))
}

pub async fn delete_purchase(
    State(app_state): State<AppState>,
    _company: AuthenticatedCompany,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.purchase_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
