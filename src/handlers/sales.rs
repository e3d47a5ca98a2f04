// src/handlers/sales.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedCompany,
    models::transaction::TransactionStatus,
    services::sale_service::{NewSale, SaleChanges},
};

fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor deve ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: CreateSale
// ---
// A relação com a contraparte fica gravada como "seller", mesmo quando
// conceitualmente é um comprador.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalePayload {
    #[validate(length(min = 1, message = "O número do contrato é obrigatório."))]
    pub contract_number: String,

    pub seller_id: Uuid,
    pub material_id: Uuid,

    #[validate(custom(function = "validate_positive"))]
    pub quantity: Decimal,

    #[validate(custom(function = "validate_positive"))]
    pub unit_price: Decimal,

    #[validate(custom(function = "validate_positive"))]
    pub total_value: Decimal,

    pub sale_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub purchase_id: Option<Uuid>,
}

pub async fn create_sale(
    State(app_state): State<AppState>,
    _company: AuthenticatedCompany,
    Json(payload): Json<CreateSalePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let sale = app_state
        .sale_service
        .create_sale(NewSale {
            contract_number: payload.contract_number,
            seller_id: payload.seller_id,
            material_id: payload.material_id,
            quantity: payload.quantity,
            unit_price: payload.unit_price,
            total_value: payload.total_value,
            sale_date: payload.sale_date,
            notes: payload.notes,
            purchase_id: payload.purchase_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(sale)))
}

// ---
// Transições (sempre ações do vendedor autenticado)
// ---

#[derive(Debug, Default, Deserialize)]
pub struct ReasonPayload {
    pub reason: Option<String>,
}

pub async fn approve_sale(
    State(app_state): State<AppState>,
    company: AuthenticatedCompany,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let sale = app_state.sale_service.approve_sale(id, company.0.id).await?;
    Ok((StatusCode::OK, Json(sale)))
}

pub async fn deny_sale(
    State(app_state): State<AppState>,
    company: AuthenticatedCompany,
    Path(id): Path<Uuid>,
    payload: Option<Json<ReasonPayload>>,
) -> Result<impl IntoResponse, AppError> {
    let reason = payload.and_then(|Json(p)| p.reason);
    let sale = app_state
        .sale_service
        .deny_sale(id, company.0.id, reason.as_deref())
        .await?;
    Ok((StatusCode::OK, Json(sale)))
}

pub async fn cancel_sale(
    State(app_state): State<AppState>,
    company: AuthenticatedCompany,
    Path(id): Path<Uuid>,
    payload: Option<Json<ReasonPayload>>,
) -> Result<impl IntoResponse, AppError> {
    let reason = payload.and_then(|Json(p)| p.reason);
    let sale = app_state
        .sale_service
        .cancel_sale(id, company.0.id, reason.as_deref())
        .await?;
    Ok((StatusCode::OK, Json(sale)))
}

pub async fn complete_sale(
    State(app_state): State<AppState>,
    company: AuthenticatedCompany,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let sale = app_state
        .sale_service
        .complete_sale(id, company.0.id)
        .await?;
    Ok((StatusCode::OK, Json(sale)))
}

// ---
// Listagens
// ---

pub async fn get_company_sales(
    State(app_state): State<AppState>,
    _company: AuthenticatedCompany,
    Path(company_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let sales = app_state.sale_service.get_company_sales(company_id).await?;
    Ok((StatusCode::OK, Json(sales)))
}

pub async fn get_all_sales(
    State(app_state): State<AppState>,
    _company: AuthenticatedCompany,
) -> Result<impl IntoResponse, AppError> {
    let sales = app_state.sale_service.get_all().await?;
    Ok((StatusCode::OK, Json(sales)))
}

pub async fn get_sale(
    State(app_state): State<AppState>,
    _company: AuthenticatedCompany,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let sale = app_state.sale_service.get_by_id(id).await?;
    Ok((StatusCode::OK, Json(sale)))
}

// ---
// Escotilhas administrativas
// ---

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSalePayload {
    pub contract_number: Option<String>,
    #[validate(custom(function = "validate_positive"))]
    pub quantity: Option<Decimal>,
    #[validate(custom(function = "validate_positive"))]
    pub unit_price: Option<Decimal>,
    #[validate(custom(function = "validate_positive"))]
    pub total_value: Option<Decimal>,
    pub sale_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    pub payment_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

pub async fn update_sale(
    State(app_state): State<AppState>,
    _company: AuthenticatedCompany,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSalePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let sale = app_state
        .sale_service
        .update(
            id,
            SaleChanges {
                contract_number: payload.contract_number,
                quantity: payload.quantity,
                unit_price: payload.unit_price,
                total_value: payload.total_value,
                sale_date: payload.sale_date,
                delivery_date: payload.delivery_date,
                payment_date: payload.payment_date,
                notes: payload.notes,
            },
        )
        .await?;
    Ok((StatusCode::OK, Json(sale)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusPayload {
    pub status: TransactionStatus,
}

// Override administrativo: sem guarda de papel e sem efeito de estoque.
pub async fn update_sale_status(
    State(app_state): State<AppState>,
    _company: AuthenticatedCompany,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let sale = app_state
        .sale_service
        .update_status(id, payload.status)
        .await?;
    Ok((StatusCode::OK, Json(sale)))
}

pub async fn delete_sale(
    State(app_state): State<AppState>,
    _company: AuthenticatedCompany,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.sale_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
