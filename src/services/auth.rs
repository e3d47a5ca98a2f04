// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CompanyRepository,
    models::{
        auth::Claims,
        company::{Company, RegisterCompanyPayload},
    },
};

#[derive(Clone)]
pub struct AuthService {
    company_repo: CompanyRepository,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(company_repo: CompanyRepository, jwt_secret: String, pool: PgPool) -> Self {
        Self {
            company_repo,
            jwt_secret,
            pool,
        }
    }

    /// Registra a empresa e seus endereços numa única transação e já
    /// devolve o token de acesso.
    pub async fn register_company(
        &self,
        payload: RegisterCompanyPayload,
    ) -> Result<String, AppError> {
        // 1. Hashing (fora da transação, não toca no banco)
        let password = payload.password.clone();
        let password_hash =
            tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        // --- INÍCIO DA TRANSAÇÃO ---
        let mut tx = self.pool.begin().await?;

        let new_company = self
            .company_repo
            .create(
                &mut *tx,
                &payload.name,
                &payload.cnpj,
                &payload.email,
                payload.phone.as_deref(),
                payload.description.as_deref(),
                &password_hash,
            )
            .await?;

        // Endereços entram na mesma transação: se um falhar, a empresa
        // criada acima é desfeita.
        for address in &payload.addresses {
            self.company_repo
                .create_address(
                    &mut *tx,
                    new_company.id,
                    &address.street,
                    &address.number,
                    address.complement.as_deref(),
                    &address.district,
                    &address.city,
                    &address.state,
                    &address.zip_code,
                    address.is_main,
                )
                .await?;
        }

        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        tracing::info!("Empresa {} registrada ({})", new_company.id, new_company.name);
        self.create_token(new_company.id)
    }

    pub async fn login_company(&self, email: &str, password: &str) -> Result<String, AppError> {
        let company = self
            .company_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password = password.to_owned();
        let password_hash = company.password_hash.clone();

        // Executa a verificação em uma thread separada
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password, &password_hash))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.create_token(company.id)
    }

    pub async fn validate_token(&self, token: &str) -> Result<Company, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.company_repo
            .find_by_id(&self.pool, token_data.claims.sub)
            .await?
            .ok_or(AppError::CompanyNotFound)
    }

    fn create_token(&self, company_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: company_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
