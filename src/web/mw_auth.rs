// src/web/mw_auth.rs
use crate::error::AppError;
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

pub const SESSION_USER_KEY: &str = "user_id";

/// Exige sessão autenticada; visitantes anónimos vão para /login.
pub async fn require_auth(
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match session.get::<String>(SESSION_USER_KEY).await {
        Ok(Some(user_id)) => {
            tracing::debug!("Autenticação MW: utilizador '{}' autenticado.", user_id);
            request.extensions_mut().insert(UserId(user_id));
            Ok(next.run(request).await)
        }
        Ok(None) => {
            tracing::debug!("Autenticação MW: sem user_id na sessão. Redirecionando para /login");
            Ok(Redirect::to("/login").into_response())
        }
        Err(e) => {
            tracing::error!("Autenticação MW: erro ao ler sessão: {:?}", e);
            Err(AppError::SessionError(format!("Erro ao verificar sessão: {}", e)))
        }
    }
}

// Id da identidade autenticada, posto nas extensões por `require_auth`
#[derive(Clone, Debug)]
pub struct UserId(pub String);
