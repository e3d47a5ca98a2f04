// src/db/dashboard_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::dashboard::DashboardTotals};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Totais do painel de uma empresa.
    ///
    /// Compras contam apenas as com status 'completed'; vendas contam
    /// todas, sem filtro de status. Essa assimetria é comportamento
    /// esperado pelo frontend, não mexer.
    pub async fn get_totals(&self, company_id: Uuid) -> Result<DashboardTotals, AppError> {
        // Iniciamos uma transação (snapshot consistente dos dados)
        let mut tx = self.pool.begin().await?;

        // A. Compras concluídas como compradora
        let (total_purchases, total_spent) = sqlx::query_as::<_, (i64, Decimal)>(
            r#"
            SELECT COUNT(*), COALESCE(SUM(total_value), 0)
            FROM purchases
            WHERE buyer_id = $1 AND status = 'completed'
            "#,
        )
        .bind(company_id)
        .fetch_one(&mut *tx)
        .await?;

        // B. Vendas como vendedora (todas, sem filtro de status)
        let (total_sales, total_revenue) = sqlx::query_as::<_, (i64, Decimal)>(
            r#"
            SELECT COUNT(*), COALESCE(SUM(total_value), 0)
            FROM sales
            WHERE seller_id = $1
            "#,
        )
        .bind(company_id)
        .fetch_one(&mut *tx)
        .await?;

        // C. Materiais ativos
        let active_materials = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM materials WHERE company_id = $1 AND is_active = true",
        )
        .bind(company_id)
        .fetch_one(&mut *tx)
        .await?;

        // D. Data da última compra concluída
        let last_purchase_at = sqlx::query_scalar::<_, Option<DateTime<Utc>>>(
            r#"
            SELECT MAX(created_at)
            FROM purchases
            WHERE buyer_id = $1 AND status = 'completed'
            "#,
        )
        .bind(company_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(DashboardTotals {
            total_purchases,
            total_spent,
            total_sales,
            total_revenue,
            active_materials,
            last_purchase_at,
        })
    }
}
