// src/handlers/materials.rs

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
    common::error::AppError, config::AppState, middleware::auth::AuthenticatedCompany,
};

fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: CreateMaterial
// ---
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaterialPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(length(min = 1, message = "A categoria é obrigatória."))]
    pub category: String,

    pub description: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    pub price: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)] // Se o JSON não tiver esse campo, assume 0
    pub quantity: Decimal,

    #[validate(length(min = 1, message = "A unidade é obrigatória."))]
    pub unit: String,
}

// O material é sempre anunciado pela empresa autenticada.
pub async fn create_material(
    State(app_state): State<AppState>,
    company: AuthenticatedCompany,
    Json(payload): Json<CreateMaterialPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let material = app_state
        .material_service
        .create_material(
            company.0.id,
            &payload.name,
            &payload.category,
            payload.description.as_deref(),
            payload.price,
            payload.quantity,
            &payload.unit,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(material)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMaterialsQuery {
    #[serde(default)]
    pub only_active: bool,
}

pub async fn get_all_materials(
    State(app_state): State<AppState>,
    _company: AuthenticatedCompany,
    Query(query): Query<ListMaterialsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let materials = app_state.material_service.get_all(query.only_active).await?;
    Ok((StatusCode::OK, Json(materials)))
}

pub async fn get_material(
    State(app_state): State<AppState>,
    _company: AuthenticatedCompany,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let material = app_state.material_service.get_by_id(id).await?;
    Ok((StatusCode::OK, Json(material)))
}

pub async fn get_company_materials(
    State(app_state): State<AppState>,
    _company: AuthenticatedCompany,
    Path(company_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let materials = app_state
        .material_service
        .get_company_materials(company_id)
        .await?;
    Ok((StatusCode::OK, Json(materials)))
}

// ---
// Payload: UpdateMaterial (parcial; quantity fica de fora de propósito,
// o saldo só muda pelo motor de transações)
// ---
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaterialPayload {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "validate_not_negative"))]
    pub price: Option<Decimal>,
    pub unit: Option<String>,
    pub is_active: Option<bool>,
}

pub async fn update_material(
    State(app_state): State<AppState>,
    _company: AuthenticatedCompany,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMaterialPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let material = app_state
        .material_service
        .update_material(
            id,
            payload.name.as_deref(),
            payload.category.as_deref(),
            payload.description.as_deref(),
            payload.price,
            payload.unit.as_deref(),
            payload.is_active,
        )
        .await?;
    Ok((StatusCode::OK, Json(material)))
}

pub async fn delete_material(
    State(app_state): State<AppState>,
    _company: AuthenticatedCompany,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.material_service.delete_material(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
