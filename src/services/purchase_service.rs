// src/services/purchase_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{MaterialRepository, PurchaseRepository},
    models::transaction::{
        PartyRole, Purchase, PurchaseWithRelations, TransactionKind, TransactionStatus,
    },
    services::lifecycle::{self, TransitionAction},
};

#[derive(Clone)]
pub struct PurchaseService {
    purchase_repo: PurchaseRepository,
    material_repo: MaterialRepository,
    pool: PgPool,
}

impl PurchaseService {
    pub fn new(
        purchase_repo: PurchaseRepository,
        material_repo: MaterialRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            purchase_repo,
            material_repo,
            pool,
        }
    }

    /// Cria uma compra PENDING.
    ///
    /// O `total_value` é gravado exatamente como veio (a negociação pode
    /// embutir desconto); o estoque NÃO é decrementado aqui, só na
    /// conclusão.
    pub async fn create_purchase(
        &self,
        buyer_id: Uuid,
        seller_id: Uuid,
        material_id: Uuid,
        quantity: Decimal,
        unit_price: Decimal,
        total_value: Decimal,
    ) -> Result<Purchase, AppError> {
        let mut tx = self.pool.begin().await?;

        let material = self
            .material_repo
            .find_by_id(&mut *tx, material_id)
            .await?
            .ok_or(AppError::MaterialNotFound)?;

        lifecycle::check_purchase_creation(&material, seller_id, quantity)?;

        let purchase = self
            .purchase_repo
            .create(
                &mut *tx,
                buyer_id,
                seller_id,
                material_id,
                quantity,
                unit_price,
                total_value,
            )
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Compra {} criada: {} x material {} (vendedor {})",
            purchase.id,
            purchase.quantity,
            material_id,
            seller_id
        );
        Ok(purchase)
    }

    pub async fn approve_purchase(&self, id: Uuid, acting: Uuid) -> Result<Purchase, AppError> {
        self.apply_transition(id, acting, TransitionAction::Approve, None)
            .await
    }

    pub async fn deny_purchase(
        &self,
        id: Uuid,
        acting: Uuid,
        reason: Option<&str>,
    ) -> Result<Purchase, AppError> {
        self.apply_transition(id, acting, TransitionAction::Deny, reason)
            .await
    }

    pub async fn cancel_purchase(
        &self,
        id: Uuid,
        acting: Uuid,
        reason: Option<&str>,
    ) -> Result<Purchase, AppError> {
        self.apply_transition(id, acting, TransitionAction::Cancel, reason)
            .await
    }

    pub async fn complete_purchase(&self, id: Uuid, acting: Uuid) -> Result<Purchase, AppError> {
        self.apply_transition(id, acting, TransitionAction::Complete, None)
            .await
    }

    /// Uma transição = uma transação de banco: a guarda é avaliada sobre
    /// a linha lida no início, a escrita do status é condicionada a esse
    /// mesmo status (se outra requisição chegou antes, vira Conflict) e o
    /// efeito de estoque entra no mesmo commit.
    async fn apply_transition(
        &self,
        id: Uuid,
        acting: Uuid,
        action: TransitionAction,
        reason: Option<&str>,
    ) -> Result<Purchase, AppError> {
        let mut tx = self.pool.begin().await?;

        let purchase = self
            .purchase_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::PurchaseNotFound)?;

        let transition = lifecycle::guarded_transition(
            acting,
            purchase.seller_id,
            TransactionKind::Purchase,
            purchase.status,
            action,
        )?;

        let denial_reason = match action {
            TransitionAction::Deny => Some(lifecycle::denial_reason(reason)),
            _ => None,
        };
        let cancellation_reason = match action {
            TransitionAction::Cancel => reason,
            _ => None,
        };

        let updated = self
            .purchase_repo
            .transition_status(
                &mut *tx,
                id,
                purchase.status,
                transition.next,
                denial_reason,
                cancellation_reason,
            )
            .await?;

        let updated = match updated {
            Some(p) => p,
            None => {
                // A linha mudou entre a leitura e a escrita. Reporta o
                // status fresco para o chamador.
                let fresh = self
                    .purchase_repo
                    .find_by_id(&mut *tx, id)
                    .await?
                    .ok_or(AppError::PurchaseNotFound)?;
                return Err(AppError::InvalidTransition {
                    kind: TransactionKind::Purchase,
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
            "Compra {} transicionou para '{}' (vendedor {})",
            updated.id,
            updated.status,
            acting
        );
        Ok(updated)
    }

    /// Compras da empresa no papel pedido, com comprador/vendedor/material
    /// carregados, da mais recente para a mais antiga.
    pub async fn get_company_purchases(
        &self,
        company_id: Uuid,
        role: PartyRole,
    ) -> Result<Vec<PurchaseWithRelations>, AppError> {
        let rows = self
            .purchase_repo
            .find_by_company(company_id, role == PartyRole::Seller)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    // ---
    // Escotilhas administrativas (sem a semântica de transição guardada)
    // ---

    pub async fn get_by_id(&self, id: Uuid) -> Result<Purchase, AppError> {
        self.purchase_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::PurchaseNotFound)
    }

    pub async fn get_all(&self) -> Result<Vec<Purchase>, AppError> {
        self.purchase_repo.get_all().await
    }

    pub async fn update(
        &self,
        id: Uuid,
        quantity: Option<Decimal>,
        unit_price: Option<Decimal>,
        total_value: Option<Decimal>,
        denial_reason: Option<&str>,
        cancellation_reason: Option<&str>,
    ) -> Result<Purchase, AppError> {
        self.purchase_repo
            .update(
                &self.pool,
                id,
                quantity,
                unit_price,
                total_value,
                denial_reason,
                cancellation_reason,
            )
            .await
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: TransactionStatus,
    ) -> Result<Purchase, AppError> {
        self.purchase_repo.set_status(&self.pool, id, status).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.purchase_repo.delete(&self.pool, id).await
    }
}
