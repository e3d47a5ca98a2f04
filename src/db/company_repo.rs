// src/db/company_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::company::{Address, Company},
};

// O repositório de empresas, responsável por todas as interações com a
// tabela 'companies' (e seus endereços).
#[derive(Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Funções de "Leitura" (Getters)
    // ---

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(company)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Company>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(company)
    }

    pub async fn get_all(&self) -> Result<Vec<Company>, AppError> {
        let companies = sqlx::query_as::<_, Company>("SELECT * FROM companies ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(companies)
    }

    pub async fn find_addresses(&self, company_id: Uuid) -> Result<Vec<Address>, AppError> {
        let addresses = sqlx::query_as::<_, Address>(
            "SELECT * FROM addresses WHERE company_id = $1 ORDER BY is_main DESC, created_at ASC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(addresses)
    }

    // ---
    // Funções de "Escrita" (Transacionais)
    // ---
    // Estas usam o padrão genérico 'Executor' para rodar dentro de uma transação.

    pub async fn create<'e, E>(
        &self,
        executor: E,
        name: &str,
        cnpj: &str,
        email: &str,
        phone: Option<&str>,
        description: Option<&str>,
        password_hash: &str,
    ) -> Result<Company, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (name, cnpj, email, phone, description, password_hash)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(cnpj)
        .bind(email)
        .bind(phone)
        .bind(description)
        .bind(password_hash)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            // Converte violação de chave única em um erro mais amigável
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    let constraint = db_err.constraint().unwrap_or_default();
                    if constraint.contains("cnpj") {
                        return AppError::CnpjAlreadyExists;
                    }
                    return AppError::EmailAlreadyExists;
                }
            }
            e.into()
        })
    }

    pub async fn create_address<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        street: &str,
        number: &str,
        complement: Option<&str>,
        district: &str,
        city: &str,
        state: &str,
        zip_code: &str,
        is_main: bool,
    ) -> Result<Address, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let address = sqlx::query_as::<_, Address>(
            r#"
            INSERT INTO addresses (company_id, street, number, complement, district, city, state, zip_code, is_main)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(street)
        .bind(number)
        .bind(complement)
        .bind(district)
        .bind(city)
        .bind(state)
        .bind(zip_code)
        .bind(is_main)
        .fetch_one(executor)
        .await?;
        Ok(address)
    }

    /// Atualização parcial: campos ausentes mantêm o valor atual (COALESCE).
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
        description: Option<&str>,
        password_hash: Option<&str>,
    ) -> Result<Company, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let company = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                description = COALESCE($4, description),
                password_hash = COALESCE($5, password_hash),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(phone)
        .bind(description)
        .bind(password_hash)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::CompanyNotFound)?;
        Ok(company)
    }

    // Os endereços caem junto via ON DELETE CASCADE.
    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::CompanyNotFound);
        }
        Ok(())
    }
}
