// src/db/material_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::material::Material};

#[derive(Clone)]
pub struct MaterialRepository {
    pool: PgPool,
}

impl MaterialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Funções de "Leitura" (Getters)
    // ---

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Material>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let material = sqlx::query_as::<_, Material>("SELECT * FROM materials WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(material)
    }

    pub async fn get_all(&self, only_active: bool) -> Result<Vec<Material>, AppError> {
        let materials = sqlx::query_as::<_, Material>(
            "SELECT * FROM materials WHERE ($1 = false OR is_active = true) ORDER BY name ASC",
        )
        .bind(only_active)
        .fetch_all(&self.pool)
        .await?;
        Ok(materials)
    }

    pub async fn find_by_company(&self, company_id: Uuid) -> Result<Vec<Material>, AppError> {
        let materials = sqlx::query_as::<_, Material>(
            "SELECT * FROM materials WHERE company_id = $1 ORDER BY name ASC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(materials)
    }

    // ---
    // Funções de "Escrita" (Transacionais)
    // ---

    pub async fn create<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        name: &str,
        category: &str,
        description: Option<&str>,
        price: Decimal,
        quantity: Decimal,
        unit: &str,
    ) -> Result<Material, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let material = sqlx::query_as::<_, Material>(
            r#"
            INSERT INTO materials (company_id, name, category, description, price, quantity, unit)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(name)
        .bind(category)
        .bind(description)
        .bind(price)
        .bind(quantity)
        .bind(unit)
        .fetch_one(executor)
        .await?;
        Ok(material)
    }

    /// Atualização parcial do anúncio. Não mexe em `quantity`: o saldo
    /// só muda pelo motor de transações (adjust_quantity).
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: Option<&str>,
        category: Option<&str>,
        description: Option<&str>,
        price: Option<Decimal>,
        unit: Option<&str>,
        is_active: Option<bool>,
    ) -> Result<Material, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let material = sqlx::query_as::<_, Material>(
            r#"
            UPDATE materials SET
                name = COALESCE($2, name),
                category = COALESCE($3, category),
                description = COALESCE($4, description),
                price = COALESCE($5, price),
                unit = COALESCE($6, unit),
                is_active = COALESCE($7, is_active),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(category)
        .bind(description)
        .bind(price)
        .bind(unit)
        .bind(is_active)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::MaterialNotFound)?;
        Ok(material)
    }

    /// Única porta de entrada para mexer no saldo: repõe (delta positivo)
    /// ou consome (delta negativo) estoque na mesma transação da mudança
    /// de status. O CHECK (quantity >= 0) do banco barra saldo negativo.
    pub async fn adjust_quantity<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        delta: Decimal,
    ) -> Result<Material, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Material>(
            r#"
            UPDATE materials SET
                quantity = quantity + $2,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(delta)
        .fetch_optional(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_check_violation() {
                    return AppError::InsufficientQuantity;
                }
            }
            e.into()
        })?
        .ok_or(AppError::MaterialNotFound)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM materials WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::MaterialNotFound);
        }
        Ok(())
    }
}
