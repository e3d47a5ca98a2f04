// src/services/lifecycle.rs
//
// Motor de ciclo de vida compartilhado por Compras e Vendas.
//
// O grafo de estados é um só:
//
//   PENDING -> APPROVED -> COMPLETED (consome estoque)
//   PENDING -> DENIED
//   APPROVED -> CANCELLED (repõe estoque)
//
// DENIED, CANCELLED e COMPLETED são terminais. O estoque NÃO é
// decrementado na criação nem na aprovação, apenas na conclusão;
// o cancelamento de uma transação aprovada devolve a quantidade.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        material::Material,
        transaction::{TransactionKind, TransactionStatus},
    },
};

/// Motivo gravado quando o vendedor nega sem informar um.
pub const DEFAULT_DENIAL_REASON: &str = "Motivo não informado";

/// Ações do vendedor sobre uma transação.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionAction {
    Approve,
    Deny,
    Cancel,
    Complete,
}

/// Efeito da transição sobre o saldo do material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryEffect {
    /// Nenhuma mudança de estoque.
    Nothing,
    /// Devolve a quantidade da transação ao material.
    Restock,
    /// Baixa a quantidade da transação do material.
    Consume,
}

impl InventoryEffect {
    /// Delta a aplicar em `material.quantity`, ou None se não há efeito.
    pub fn delta(&self, quantity: Decimal) -> Option<Decimal> {
        match self {
            InventoryEffect::Nothing => None,
            InventoryEffect::Restock => Some(quantity),
            InventoryEffect::Consume => Some(-quantity),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: TransactionStatus,
    pub effect: InventoryEffect,
}

/// Motivo efetivo de uma negação: nunca fica nulo ou vazio.
pub fn denial_reason(reason: Option<&str>) -> &str {
    match reason {
        Some(r) if !r.trim().is_empty() => r,
        _ => DEFAULT_DENIAL_REASON,
    }
}

/// Guarda de papel: toda transição é ação do vendedor da transação.
/// Avaliada ANTES da guarda de status.
pub fn check_seller(acting_company: Uuid, seller_id: Uuid) -> Result<(), AppError> {
    if acting_company != seller_id {
        return Err(AppError::NotTheSeller);
    }
    Ok(())
}

/// Guarda de criação de uma Compra: o material precisa pertencer ao
/// vendedor declarado e ter saldo suficiente. (A criação de Vendas não
/// passa por aqui: ela só exige que empresa e material existam.)
pub fn check_purchase_creation(
    material: &Material,
    declared_seller: Uuid,
    requested: Decimal,
) -> Result<(), AppError> {
    if material.company_id != declared_seller {
        return Err(AppError::MaterialNotOwnedBySeller);
    }
    if material.quantity < requested {
        return Err(AppError::InsufficientQuantity);
    }
    Ok(())
}

/// Avalia as duas guardas na ordem do contrato: papel primeiro, status
/// depois. Um ator errado recebe Forbidden mesmo que o status também
/// não permitisse a transição.
pub fn guarded_transition(
    acting_company: Uuid,
    seller_id: Uuid,
    kind: TransactionKind,
    current: TransactionStatus,
    action: TransitionAction,
) -> Result<Transition, AppError> {
    check_seller(acting_company, seller_id)?;
    transition(kind, current, action)
}

/// A tabela de transições. Qualquer par (status, ação) fora dela é
/// rejeitado com Conflict nomeando o status atual.
pub fn transition(
    kind: TransactionKind,
    current: TransactionStatus,
    action: TransitionAction,
) -> Result<Transition, AppError> {
    use InventoryEffect::*;
    use TransactionStatus::*;
    use TransitionAction::*;

    match (current, action) {
        (Pending, Approve) => Ok(Transition { next: Approved, effect: Nothing }),
        (Pending, Deny) => Ok(Transition { next: Denied, effect: Nothing }),
        (Approved, Cancel) => Ok(Transition { next: Cancelled, effect: Restock }),
        (Approved, Complete) => Ok(Transition { next: Completed, effect: Consume }),
        _ => Err(AppError::InvalidTransition { kind, current }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn material(owner: Uuid, quantity: Decimal) -> Material {
        Material {
            id: Uuid::new_v4(),
            company_id: owner,
            name: "Sucata de alumínio".into(),
            category: "Metais".into(),
            description: None,
            price: dec!(12.50),
            quantity,
            unit: "kg".into(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn transicoes_legais_e_seus_efeitos() {
        use InventoryEffect::*;
        use TransactionStatus::*;
        use TransitionAction::*;

        let casos = [
            (Pending, Approve, Approved, Nothing),
            (Pending, Deny, Denied, Nothing),
            (Approved, Cancel, Cancelled, Restock),
            (Approved, Complete, Completed, Consume),
        ];
        for (atual, acao, proximo, efeito) in casos {
            let t = transition(TransactionKind::Purchase, atual, acao).unwrap();
            assert_eq!(t.next, proximo);
            assert_eq!(t.effect, efeito);
        }
    }

    #[test]
    fn qualquer_outro_par_e_rejeitado_com_o_status_atual() {
        use TransactionStatus::*;
        use TransitionAction::*;

        let todos_status = [Pending, Approved, Denied, Cancelled, Completed];
        let todas_acoes = [Approve, Deny, Cancel, Complete];
        let legais = [
            (Pending, Approve),
            (Pending, Deny),
            (Approved, Cancel),
            (Approved, Complete),
        ];

        for atual in todos_status {
            for acao in todas_acoes {
                if legais.contains(&(atual, acao)) {
                    continue;
                }
                let err = transition(TransactionKind::Sale, atual, acao).unwrap_err();
                match err {
                    AppError::InvalidTransition { kind, current } => {
                        assert_eq!(kind, TransactionKind::Sale);
                        assert_eq!(current, atual);
                    }
                    outro => panic!("esperava InvalidTransition, veio {outro:?}"),
                }
            }
        }
    }

    #[test]
    fn estados_terminais_nao_saem_do_lugar() {
        use TransactionStatus::*;
        use TransitionAction::*;

        for terminal in [Denied, Cancelled, Completed] {
            for acao in [Approve, Deny, Cancel, Complete] {
                assert!(transition(TransactionKind::Purchase, terminal, acao).is_err());
            }
        }
    }

    #[test]
    fn pending_nao_pula_direto_para_completed() {
        let err = transition(
            TransactionKind::Purchase,
            TransactionStatus::Pending,
            TransitionAction::Complete,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition { .. }));
    }

    #[test]
    fn guarda_de_papel_exige_o_vendedor() {
        let vendedor = Uuid::new_v4();
        let intruso = Uuid::new_v4();

        assert!(check_seller(vendedor, vendedor).is_ok());
        assert!(matches!(
            check_seller(intruso, vendedor),
            Err(AppError::NotTheSeller)
        ));
    }

    #[test]
    fn guarda_de_papel_vem_antes_da_guarda_de_status() {
        let vendedor = Uuid::new_v4();
        let intruso = Uuid::new_v4();

        // Mesmo com a transação num estado terminal (que também seria
        // rejeitado), o ator errado recebe Forbidden, não Conflict.
        let err = guarded_transition(
            intruso,
            vendedor,
            TransactionKind::Purchase,
            TransactionStatus::Completed,
            TransitionAction::Complete,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::NotTheSeller));

        // Com o vendedor certo, a guarda de status volta a responder.
        let err = guarded_transition(
            vendedor,
            vendedor,
            TransactionKind::Purchase,
            TransactionStatus::Completed,
            TransitionAction::Complete,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition { .. }));
    }

    #[test]
    fn criacao_exige_que_o_material_pertenca_ao_vendedor() {
        let dono = Uuid::new_v4();
        let outro = Uuid::new_v4();
        let m = material(dono, dec!(10));

        // Dono errado falha mesmo com quantidade sobrando.
        assert!(matches!(
            check_purchase_creation(&m, outro, dec!(1)),
            Err(AppError::MaterialNotOwnedBySeller)
        ));
    }

    #[test]
    fn criacao_respeita_o_saldo_disponivel() {
        let dono = Uuid::new_v4();
        let m = material(dono, dec!(10));

        assert!(matches!(
            check_purchase_creation(&m, dono, dec!(11)),
            Err(AppError::InsufficientQuantity)
        ));
        // Pedir exatamente o saldo é permitido.
        assert!(check_purchase_creation(&m, dono, dec!(10)).is_ok());
    }

    #[test]
    fn negacao_sem_motivo_grava_o_placeholder() {
        assert_eq!(denial_reason(None), DEFAULT_DENIAL_REASON);
        assert_eq!(denial_reason(Some("")), DEFAULT_DENIAL_REASON);
        assert_eq!(denial_reason(Some("   ")), DEFAULT_DENIAL_REASON);
        assert_eq!(denial_reason(Some("fora de linha")), "fora de linha");
    }

    #[test]
    fn deltas_de_estoque() {
        assert_eq!(InventoryEffect::Nothing.delta(dec!(5)), None);
        assert_eq!(InventoryEffect::Restock.delta(dec!(5)), Some(dec!(5)));
        assert_eq!(InventoryEffect::Consume.delta(dec!(5)), Some(dec!(-5)));

        // Concluir 5 sobre um saldo de 20 deixa 15; cancelar 5 sobre 15
        // devolve os 20.
        let saldo = dec!(20);
        let apos_conclusao = saldo + InventoryEffect::Consume.delta(dec!(5)).unwrap();
        assert_eq!(apos_conclusao, dec!(15));
        let apos_cancelamento = apos_conclusao + InventoryEffect::Restock.delta(dec!(5)).unwrap();
        assert_eq!(apos_cancelamento, dec!(20));
    }
}
