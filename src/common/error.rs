use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::transaction::{TransactionKind, TransactionStatus};

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Empresa não encontrada")]
    CompanyNotFound,

    #[error("Material não encontrado")]
    MaterialNotFound,

    #[error("Compra não encontrada")]
    PurchaseNotFound,

    #[error("Venda não encontrada")]
    SaleNotFound,

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("CNPJ já existe")]
    CnpjAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    // O material anunciado não pertence ao vendedor declarado.
    #[error("O material não pertence ao vendedor informado")]
    MaterialNotOwnedBySeller,

    // Guarda de papel do motor de transações: só o vendedor transiciona.
    #[error("Apenas o vendedor pode executar esta ação")]
    NotTheSeller,

    // Transição fora do grafo de estados. A mensagem nomeia o status atual.
    #[error("Transição de status inválida: a {kind} está com status '{current}'")]
    InvalidTransition {
        kind: TransactionKind,
        current: TransactionStatus,
    },

    #[error("Quantidade indisponível em estoque")]
    InsufficientQuantity,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::CompanyNotFound => (StatusCode::NOT_FOUND, "Empresa não encontrada.".into()),
            AppError::MaterialNotFound => {
                (StatusCode::NOT_FOUND, "Material não encontrado.".into())
            }
            AppError::PurchaseNotFound => (StatusCode::NOT_FOUND, "Compra não encontrada.".into()),
            AppError::SaleNotFound => (StatusCode::NOT_FOUND, "Venda não encontrada.".into()),

            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "Este e-mail já está em uso.".into())
            }
            AppError::CnpjAlreadyExists => {
                (StatusCode::CONFLICT, "Este CNPJ já está cadastrado.".into())
            }

            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.".into())
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".into(),
            ),

            AppError::MaterialNotOwnedBySeller => (
                StatusCode::FORBIDDEN,
                "O material não pertence ao vendedor informado.".into(),
            ),
            AppError::NotTheSeller => (
                StatusCode::FORBIDDEN,
                "Apenas o vendedor pode executar esta ação.".into(),
            ),

            AppError::InvalidTransition { kind, current } => (
                StatusCode::CONFLICT,
                format!(
                    "Transição de status inválida: a {} está com status '{}'.",
                    kind, current
                ),
            ),

            AppError::InsufficientQuantity => (
                StatusCode::BAD_REQUEST,
                "Quantidade indisponível em estoque.".into(),
            ),

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` vai logar a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".into(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
