// src/db/sale_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::transaction::{Sale, TransactionStatus},
};

#[derive(Clone)]
pub struct SaleRepository {
    pool: PgPool,
}

impl SaleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Funções de "Leitura" (Getters)
    // ---

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Sale>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(sale)
    }

    pub async fn get_all(&self) -> Result<Vec<Sale>, AppError> {
        let sales = sqlx::query_as::<_, Sale>("SELECT * FROM sales ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(sales)
    }

    pub async fn find_by_seller(&self, seller_id: Uuid) -> Result<Vec<Sale>, AppError> {
        let sales = sqlx::query_as::<_, Sale>(
            "SELECT * FROM sales WHERE seller_id = $1 ORDER BY created_at DESC",
        )
        .bind(seller_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(sales)
    }

    // ---
    // Funções de "Escrita" (Transacionais)
    // ---

    pub async fn create<'e, E>(
        &self,
        executor: E,
        contract_number: &str,
        seller_id: Uuid,
        material_id: Uuid,
        quantity: Decimal,
        unit_price: Decimal,
        total_value: Decimal,
        sale_date: Option<NaiveDate>,
        notes: Option<&str>,
        purchase_id: Option<Uuid>,
    ) -> Result<Sale, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales
                (contract_number, seller_id, material_id, quantity, unit_price,
                 total_value, sale_date, notes, purchase_id)
            VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, CURRENT_DATE), $8, $9)
            RETURNING *
            "#,
        )
        .bind(contract_number)
        .bind(seller_id)
        .bind(material_id)
        .bind(quantity)
        .bind(unit_price)
        .bind(total_value)
        .bind(sale_date)
        .bind(notes)
        .bind(purchase_id)
        .fetch_one(executor)
        .await?;
        Ok(sale)
    }

    /// Escrita condicionada do status (mesmo "compare-and-swap" das compras).
    /// Registra também o motivo e o instante da mudança.
    pub async fn transition_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        from: TransactionStatus,
        to: TransactionStatus,
        reason: Option<&str>,
    ) -> Result<Option<Sale>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            UPDATE sales SET
                status = $3,
                reason = COALESCE($4, reason),
                status_change_date = now(),
                updated_at = now()
            WHERE id = $1 AND status = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(from)
        .bind(to)
        .bind(reason)
        .fetch_optional(executor)
        .await?;
        Ok(sale)
    }

    /// Atualização parcial administrativa (contrato, datas, notas, valores).
    /// Nunca toca no status.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        contract_number: Option<&str>,
        quantity: Option<Decimal>,
        unit_price: Option<Decimal>,
        total_value: Option<Decimal>,
        sale_date: Option<NaiveDate>,
        delivery_date: Option<NaiveDate>,
        payment_date: Option<NaiveDate>,
        notes: Option<&str>,
    ) -> Result<Sale, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            UPDATE sales SET
                contract_number = COALESCE($2, contract_number),
                quantity = COALESCE($3, quantity),
                unit_price = COALESCE($4, unit_price),
                total_value = COALESCE($5, total_value),
                sale_date = COALESCE($6, sale_date),
                delivery_date = COALESCE($7, delivery_date),
                payment_date = COALESCE($8, payment_date),
                notes = COALESCE($9, notes),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(contract_number)
        .bind(quantity)
        .bind(unit_price)
        .bind(total_value)
        .bind(sale_date)
        .bind(delivery_date)
        .bind(payment_date)
        .bind(notes)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::SaleNotFound)?;
        Ok(sale)
    }

    /// Override administrativo: grava o status direto, sem guardas.
    pub async fn set_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: TransactionStatus,
    ) -> Result<Sale, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sale = sqlx::query_as::<_, Sale>(
            "UPDATE sales SET status = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::SaleNotFound)?;
        Ok(sale)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM sales WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::SaleNotFound);
        }
        Ok(())
    }
}
