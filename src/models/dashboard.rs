// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;

// Totais crus vindos do banco, antes da formatação de data.
#[derive(Debug, Clone)]
pub struct DashboardTotals {
    pub total_purchases: i64,
    pub total_spent: Decimal,
    pub total_sales: i64,
    pub total_revenue: Decimal,
    pub active_materials: i64,
    pub last_purchase_at: Option<chrono::DateTime<chrono::Utc>>,
}

// Resumo exibido no painel da empresa. Compras contam apenas as
// concluídas; vendas contam todas, independentemente do status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_purchases: i64,
    pub total_spent: Decimal,
    pub total_sales: i64,
    pub total_revenue: Decimal,
    pub active_materials: i64,
    // dd/mm/aaaa da última compra concluída, ou string vazia.
    pub last_purchase_date: String,
}
