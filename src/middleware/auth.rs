// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::{common::error::AppError, config::AppState, models::company::Company};

// O middleware em si: valida o Bearer token e pendura a empresa
// autenticada nos "extensions" da requisição.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let headers = request.headers();
    let auth_header = headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok());

    if let Some(auth_header) = auth_header {
        if let Some(token) = auth_header.strip_prefix("Bearer ") {
            let company = app_state.auth_service.validate_token(token).await?;

            request.extensions_mut().insert(company);
            return Ok(next.run(request).await);
        }
    }

    Err(AppError::InvalidToken)
}

// Extrator para obter a empresa autenticada diretamente nos handlers.
// É o contexto de identidade explícito que percorre todas as operações
// de workflow — nada de papel "colado" na requisição por fora.
pub struct AuthenticatedCompany(pub Company);

impl<S> FromRequestParts<S> for AuthenticatedCompany
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Company>()
            .cloned()
            .map(AuthenticatedCompany)
            .ok_or(AppError::InvalidToken)
    }
}
