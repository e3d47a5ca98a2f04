// src/services/company_service.rs

use bcrypt::hash;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CompanyRepository,
    models::company::{Company, CompanyWithAddresses},
};

#[derive(Clone)]
pub struct CompanyService {
    company_repo: CompanyRepository,
    pool: PgPool,
}

impl CompanyService {
    pub fn new(company_repo: CompanyRepository, pool: PgPool) -> Self {
        Self { company_repo, pool }
    }

    pub async fn get_company(&self, id: Uuid) -> Result<CompanyWithAddresses, AppError> {
        let company = self
            .company_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::CompanyNotFound)?;
        let addresses = self.company_repo.find_addresses(id).await?;
        Ok(CompanyWithAddresses { company, addresses })
    }

    pub async fn get_all(&self) -> Result<Vec<Company>, AppError> {
        self.company_repo.get_all().await
    }

    /// Atualização parcial. Se vier uma senha nova, o hash é recalculado
    /// aqui; o texto puro nunca chega ao repositório.
    pub async fn update_company(
        &self,
        id: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
        description: Option<&str>,
        password: Option<&str>,
    ) -> Result<Company, AppError> {
        let password_hash = match password {
            Some(password) => {
                let password = password.to_owned();
                let hashed =
                    tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
                        .await
                        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
                Some(hashed)
            }
            None => None,
        };

        self.company_repo
            .update(
                &self.pool,
                id,
                name,
                phone,
                description,
                password_hash.as_deref(),
            )
            .await
    }

    // Os endereços caem em cascata no banco.
    pub async fn delete_company(&self, id: Uuid) -> Result<(), AppError> {
        self.company_repo.delete(&self.pool, id).await?;
        tracing::info!("Empresa {} removida (endereços em cascata)", id);
        Ok(())
    }
}
