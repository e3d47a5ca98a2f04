// src/db/purchase_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::transaction::{Purchase, PurchaseRelationsRow, TransactionStatus},
};

// Colunas do JOIN com comprador, vendedor e material.
const PURCHASE_RELATIONS_SELECT: &str = r#"
    SELECT
        p.*,
        b.name AS buyer_name, b.email AS buyer_email,
        s.name AS seller_name, s.email AS seller_email,
        m.name AS material_name, m.category AS material_category, m.unit AS material_unit
    FROM purchases p
    JOIN companies b ON p.buyer_id = b.id
    JOIN companies s ON p.seller_id = s.id
    JOIN materials m ON p.material_id = m.id
"#;

#[derive(Clone)]
pub struct PurchaseRepository {
    pool: PgPool,
}

impl PurchaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Funções de "Leitura" (Getters)
    // ---

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Purchase>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let purchase = sqlx::query_as::<_, Purchase>("SELECT * FROM purchases WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(purchase)
    }

    pub async fn get_all(&self) -> Result<Vec<Purchase>, AppError> {
        let purchases =
            sqlx::query_as::<_, Purchase>("SELECT * FROM purchases ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(purchases)
    }

    /// Compras de uma empresa como compradora ou vendedora, com as
    /// relações carregadas, da mais recente para a mais antiga.
    pub async fn find_by_company(
        &self,
        company_id: Uuid,
        as_seller: bool,
    ) -> Result<Vec<PurchaseRelationsRow>, AppError> {
        let sql = format!(
            "{PURCHASE_RELATIONS_SELECT}
            WHERE (($2 = true AND p.seller_id = $1) OR ($2 = false AND p.buyer_id = $1))
            ORDER BY p.created_at DESC"
        );
        let rows = sqlx::query_as::<_, PurchaseRelationsRow>(&sql)
            .bind(company_id)
            .bind(as_seller)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    // ---
    // Funções de "Escrita" (Transacionais)
    // ---

    pub async fn create<'e, E>(
        &self,
        executor: E,
        buyer_id: Uuid,
        seller_id: Uuid,
        material_id: Uuid,
        quantity: Decimal,
        unit_price: Decimal,
        total_value: Decimal,
    ) -> Result<Purchase, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let purchase = sqlx::query_as::<_, Purchase>(
            r#"
            INSERT INTO purchases (buyer_id, seller_id, material_id, quantity, unit_price, total_value)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(buyer_id)
        .bind(seller_id)
        .bind(material_id)
        .bind(quantity)
        .bind(unit_price)
        .bind(total_value)
        .fetch_one(executor)
        .await?;
        Ok(purchase)
    }

    /// Escrita condicionada do status: só grava se a linha ainda estiver
    /// no status lido pela guarda ("compare-and-swap"). Retorna None se
    /// outra requisição moveu a compra antes de nós.
    pub async fn transition_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        from: TransactionStatus,
        to: TransactionStatus,
        denial_reason: Option<&str>,
        cancellation_reason: Option<&str>,
    ) -> Result<Option<Purchase>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let purchase = sqlx::query_as::<_, Purchase>(
            r#"
            UPDATE purchases SET
                status = $3,
                denial_reason = COALESCE($4, denial_reason),
                cancellation_reason = COALESCE($5, cancellation_reason),
                updated_at = now()
            WHERE id = $1 AND status = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(from)
        .bind(to)
        .bind(denial_reason)
        .bind(cancellation_reason)
        .fetch_optional(executor)
        .await?;
        Ok(purchase)
    }

    /// Atualização parcial administrativa. Nunca toca no status.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        quantity: Option<Decimal>,
        unit_price: Option<Decimal>,
        total_value: Option<Decimal>,
        denial_reason: Option<&str>,
        cancellation_reason: Option<&str>,
    ) -> Result<Purchase, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let purchase = sqlx::query_as::<_, Purchase>(
            r#"
            UPDATE purchases SET
                quantity = COALESCE($2, quantity),
                unit_price = COALESCE($3, unit_price),
                total_value = COALESCE($4, total_value),
                denial_reason = COALESCE($5, denial_reason),
                cancellation_reason = COALESCE($6, cancellation_reason),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(quantity)
        .bind(unit_price)
        .bind(total_value)
        .bind(denial_reason)
        .bind(cancellation_reason)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::PurchaseNotFound)?;
        Ok(purchase)
    }

    /// Override administrativo: grava o status direto, sem guarda de papel
    /// e sem efeito de estoque.
    pub async fn set_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: TransactionStatus,
    ) -> Result<Purchase, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let purchase = sqlx::query_as::<_, Purchase>(
            "UPDATE purchases SET status = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::PurchaseNotFound)?;
        Ok(purchase)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM purchases WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::PurchaseNotFound);
        }
        Ok(())
    }
}
