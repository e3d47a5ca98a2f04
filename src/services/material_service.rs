// src/services/material_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CompanyRepository, MaterialRepository},
    models::material::Material,
};

#[derive(Clone)]
pub struct MaterialService {
    material_repo: MaterialRepository,
    company_repo: CompanyRepository,
    pool: PgPool,
}

impl MaterialService {
    pub fn new(
        material_repo: MaterialRepository,
        company_repo: CompanyRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            material_repo,
            company_repo,
            pool,
        }
    }

    pub async fn create_material(
        &self,
        company_id: Uuid,
        name: &str,
        category: &str,
        description: Option<&str>,
        price: Decimal,
        quantity: Decimal,
        unit: &str,
    ) -> Result<Material, AppError> {
        let mut tx = self.pool.begin().await?;

        self.company_repo
            .find_by_id(&mut *tx, company_id)
            .await?
            .ok_or(AppError::CompanyNotFound)?;

        let material = self
            .material_repo
            .create(
                &mut *tx,
                company_id,
                name,
                category,
                description,
                price,
                quantity,
                unit,
            )
            .await?;

        tx.commit().await?;
        Ok(material)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Material, AppError> {
        self.material_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::MaterialNotFound)
    }

    pub async fn get_all(&self, only_active: bool) -> Result<Vec<Material>, AppError> {
        self.material_repo.get_all(only_active).await
    }

    pub async fn get_company_materials(&self, company_id: Uuid) -> Result<Vec<Material>, AppError> {
        self.material_repo.find_by_company(company_id).await
    }

    pub async fn update_material(
        &self,
        id: Uuid,
        name: Option<&str>,
        category: Option<&str>,
        description: Option<&str>,
        price: Option<Decimal>,
        unit: Option<&str>,
        is_active: Option<bool>,
    ) -> Result<Material, AppError> {
        self.material_repo
            .update(&self.pool, id, name, category, description, price, unit, is_active)
            .await
    }

    pub async fn delete_material(&self, id: Uuid) -> Result<(), AppError> {
        self.material_repo.delete(&self.pool, id).await
    }
}
