// src/models/material.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Anúncio de material excedente. `quantity` é o saldo disponível e só é
// alterado pelo motor de transações (conclusão consome, cancelamento repõe).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: Decimal,
    pub unit: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
