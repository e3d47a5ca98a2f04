// src/models/transaction.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// --- Status compartilhado por Compras e Vendas ---
// As strings ('pending', 'approved'...) são contrato da API e do banco:
// qualquer mudança aqui quebra clientes e dados já gravados.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "transaction_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Approved,
    Denied,
    Cancelled,
    Completed,
}

impl TransactionStatus {
    /// String exata gravada no banco e exposta na API.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Approved => "approved",
            TransactionStatus::Denied => "denied",
            TransactionStatus::Cancelled => "cancelled",
            TransactionStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Papel da empresa numa Compra, usado nos filtros de listagem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyRole {
    Buyer,
    Seller,
}

// --- Tipo da transação, usado em mensagens de erro e logs ---
// Compras e Vendas compartilham a mesma tabela de transições.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Purchase,
    Sale,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Purchase => f.write_str("compra"),
            TransactionKind::Sale => f.write_str("venda"),
        }
    }
}

// --- Compra (iniciada pelo comprador) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub material_id: Uuid,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    // Valor negociado, preservado como veio (pode embutir desconto).
    pub total_value: Decimal,
    pub status: TransactionStatus,
    pub denial_reason: Option<String>,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Venda (iniciada pelo vendedor, em nome de uma contraparte) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    pub contract_number: String,
    pub seller_id: Uuid,
    pub material_id: Uuid,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total_value: Decimal,
    pub status: TransactionStatus,
    pub sale_date: NaiveDate,
    pub delivery_date: Option<NaiveDate>,
    pub payment_date: Option<NaiveDate>,
    pub notes: Option<String>,
    // Compra que originou esta venda, quando houver.
    pub purchase_id: Option<Uuid>,
    pub reason: Option<String>,
    pub status_change_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Resumos usados nas listagens com relações carregadas ---
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialSummary {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub unit: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseWithRelations {
    #[serde(flatten)]
    pub purchase: Purchase,
    pub buyer: CompanySummary,
    pub seller: CompanySummary,
    pub material: MaterialSummary,
}

// Linha "achatada" do JOIN de compras com comprador/vendedor/material.
// Só existe para decodificar a query; a API expõe PurchaseWithRelations.
#[derive(Debug, FromRow)]
pub struct PurchaseRelationsRow {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub material_id: Uuid,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total_value: Decimal,
    pub status: TransactionStatus,
    pub denial_reason: Option<String>,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub buyer_name: String,
    pub buyer_email: String,
    pub seller_name: String,
    pub seller_email: String,
    pub material_name: String,
    pub material_category: String,
    pub material_unit: String,
}

impl From<PurchaseRelationsRow> for PurchaseWithRelations {
    fn from(row: PurchaseRelationsRow) -> Self {
        PurchaseWithRelations {
            purchase: Purchase {
                id: row.id,
                buyer_id: row.buyer_id,
                seller_id: row.seller_id,
                material_id: row.material_id,
                quantity: row.quantity,
                unit_price: row.unit_price,
                total_value: row.total_value,
                status: row.status,
                denial_reason: row.denial_reason,
                cancellation_reason: row.cancellation_reason,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            buyer: CompanySummary {
                id: row.buyer_id,
                name: row.buyer_name,
                email: row.buyer_email,
            },
            seller: CompanySummary {
                id: row.seller_id,
                name: row.seller_name,
                email: row.seller_email,
            },
            material: MaterialSummary {
                id: row.material_id,
                name: row.material_name,
                category: row.material_category,
                unit: row.material_unit,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializa_com_as_strings_do_contrato() {
        let casos = [
            (TransactionStatus::Pending, "\"pending\""),
            (TransactionStatus::Approved, "\"approved\""),
            (TransactionStatus::Denied, "\"denied\""),
            (TransactionStatus::Cancelled, "\"cancelled\""),
            (TransactionStatus::Completed, "\"completed\""),
        ];
        for (status, esperado) in casos {
            assert_eq!(serde_json::to_string(&status).unwrap(), esperado);
        }
    }
}
