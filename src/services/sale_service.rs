// src/services/sale_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CompanyRepository, MaterialRepository, SaleRepository},
    models::transaction::{Sale, TransactionKind, TransactionStatus},
    services::lifecycle::{self, TransitionAction},
};

// Dados de criação de uma venda. A venda carrega contrato e datas que a
// compra não tem, por isso o agrupamento num struct próprio.
#[derive(Debug, Clone)]
pub struct NewSale {
    pub contract_number: String,
    pub seller_id: Uuid,
    pub material_id: Uuid,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total_value: Decimal,
    pub sale_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub purchase_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default)]
pub struct SaleChanges {
    pub contract_number: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    pub total_value: Option<Decimal>,
    pub sale_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    pub payment_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Clone)]
pub struct SaleService {
    sale_repo: SaleRepository,
    material_repo: MaterialRepository,
    company_repo: CompanyRepository,
    pool: PgPool,
}

impl SaleService {
    pub fn new(
        sale_repo: SaleRepository,
        material_repo: MaterialRepository,
        company_repo: CompanyRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            sale_repo,
            material_repo,
            company_repo,
            pool,
        }
    }

    /// Cria uma venda PENDING.
    ///
    /// Diferente da compra, a criação só verifica que a empresa e o
    /// material EXISTEM: não há checagem de dono nem de saldo.
    pub async fn create_sale(&self, new_sale: NewSale) -> Result<Sale, AppError> {
        let mut tx = self.pool.begin().await?;

        self.company_repo
            .find_by_id(&mut *tx, new_sale.seller_id)
            .await?
            .ok_or(AppError::CompanyNotFound)?;
        self.material_repo
            .find_by_id(&mut *tx, new_sale.material_id)
            .await?
            .ok_or(AppError::MaterialNotFound)?;

        let sale = self
            .sale_repo
            .create(
                &mut *tx,
                &new_sale.contract_number,
                new_sale.seller_id,
                new_sale.material_id,
                new_sale.quantity,
                new_sale.unit_price,
                new_sale.total_value,
                new_sale.sale_date,
                new_sale.notes.as_deref(),
                new_sale.purchase_id,
            )
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Venda {} criada (contrato {})",
            sale.id,
            sale.contract_number
        );
        Ok(sale)
    }

    pub async fn approve_sale(&self, id: Uuid, acting: Uuid) -> Result<Sale, AppError> {
        self.apply_transition(id, acting, TransitionAction::Approve, None)
            .await
    }

    pub async fn deny_sale(
        &self,
        id: Uuid,
        acting: Uuid,
        reason: Option<&str>,
    ) -> Result<Sale, AppError> {
        self.apply_transition(id, acting, TransitionAction::Deny, reason)
            .await
    }

    pub async fn cancel_sale(
        &self,
        id: Uuid,
        acting: Uuid,
        reason: Option<&str>,
    ) -> Result<Sale, AppError> {
        self.apply_transition(id, acting, TransitionAction::Cancel, reason)
            .await
    }

    pub async fn complete_sale(&self, id: Uuid, acting: Uuid) -> Result<Sale, AppError> {
        self.apply_transition(id, acting, TransitionAction::Complete, None)
            .await
    }

    /// Mesmo desenho da transição de compras: leitura, guardas, escrita
    /// condicionada ao status lido e efeito de estoque no mesmo commit.
    async fn apply_transition(
        &self,
        id: Uuid,
        acting: Uuid,
        action: TransitionAction,
        reason: Option<&str>,
    ) -> Result<Sale, AppError> {
        let mut tx = self.pool.begin().await?;

        let sale = self
            .sale_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::SaleNotFound)?;

        let transition = lifecycle::guarded_transition(
            acting,
            sale.seller_id,
            TransactionKind::Sale,
            sale.status,
            action,
        )?;

        let reason = match action {
            TransitionAction::Deny => Some(lifecycle::denial_reason(reason)),
            TransitionAction::Cancel => reason,
            _ => None,
        };

        let updated = self
            .sale_repo
            .transition_status(&mut *tx, id, sale.status, transition.next, reason)
            .await?;

        let updated = match updated {
            Some(s) => s,
            None => {
                let fresh = self
                    .sale_repo
                    .find_by_id(&mut *tx, id)
                    .await?
                    .ok_or(AppError::SaleNotFound)?;
                return Err(AppError::InvalidTransition {
                    kind: TransactionKind::Sale,
                    current: fresh.status,
                });
            }
        };

        if let Some(delta) = transition.effect.delta(updated.quantity) {
            self.material_repo
                .adjust_quantity(&mut *tx, updated.material_id, delta)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(
            "Venda {} transicionou para '{}' (vendedor {})",
            updated.id,
            updated.status,
            acting
        );
        Ok(updated)
    }

    pub async fn get_company_sales(&self, seller_id: Uuid) -> Result<Vec<Sale>, AppError> {
        self.sale_repo.find_by_seller(seller_id).await
    }

    // ---
    // Escotilhas administrativas (sem a semântica de transição guardada)
    // ---

    pub async fn get_by_id(&self, id: Uuid) -> Result<Sale, AppError> {
        self.sale_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::SaleNotFound)
    }

    pub async fn get_all(&self) -> Result<Vec<Sale>, AppError> {
        self.sale_repo.get_all().await
    }

    pub async fn update(&self, id: Uuid, changes: SaleChanges) -> Result<Sale, AppError> {
        self.sale_repo
            .update(
                &self.pool,
                id,
                changes.contract_number.as_deref(),
                changes.quantity,
                changes.unit_price,
                changes.total_value,
                changes.sale_date,
                changes.delivery_date,
                changes.payment_date,
                changes.notes.as_deref(),
            )
            .await
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: TransactionStatus,
    ) -> Result<Sale, AppError> {
        self.sale_repo.set_status(&self.pool, id, status).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.sale_repo.delete(&self.pool, id).await
    }
}
