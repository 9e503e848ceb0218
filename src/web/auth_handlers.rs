// src/web/auth_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::identity::{LoginForm, RegisterForm},
    services::{account_service, profile_service},
    state::AppState,
    templates::{render, LoginPage, RegisterPage},
    web::{landing::landing_path, mw_auth::SESSION_USER_KEY},
};
use axum::{
    extract::{Form, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

pub const SIGNUP_SUCCESS_MESSAGE: &str = "Cadastro realizado com sucesso! Faça login.";

#[derive(Debug, Deserialize)]
pub struct LoginParams {
    message: Option<String>,
}

async fn session_user(session: &Session) -> Option<String> {
    session.get::<String>(SESSION_USER_KEY).await.ok().flatten()
}

// GET /login
pub async fn show_login_form(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<LoginParams>,
) -> AppResult<Response> {
    if let Some(user_id) = session_user(&session).await {
        let profile = profile_service::find_profile(&state.db_pool, &user_id).await?;
        let destination = landing_path(profile.and_then(|p| p.role()));
        tracing::debug!("GET /login: {} já autenticado, redirecionando para {}", user_id, destination);
        return Ok(Redirect::to(destination).into_response());
    }

    let page = LoginPage {
        error: None,
        message: params.message.filter(|m| !m.is_empty()),
        email: String::new(),
    };
    Ok(render(&page)?.into_response())
}

// POST /login
pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    tracing::info!("Tentativa de login para: {}", form.email);

    let outcome = match account_service::login(&state.db_pool, &form.email, &form.password).await {
        Ok(outcome) => outcome,
        Err(e) if e.is_form_error() => {
            let page = LoginPage {
                error: Some(e.user_message()),
                message: None,
                email: form.email,
            };
            return Ok(render(&page)?.into_response());
        }
        Err(e) => return Err(e),
    };

    // O perfil já existe neste ponto; só agora a sessão é aberta
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao rodar ID: {}", e)))?;
    session
        .insert(SESSION_USER_KEY, &outcome.identity.id)
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao inserir na sessão: {}", e)))?;

    if outcome.profile_created {
        tracing::info!("Primeiro acesso de {}: perfil {} criado.", outcome.identity.email, outcome.profile.id);
    }
    let destination = landing_path(outcome.profile.role());
    tracing::info!("✅ Login bem-sucedido para {} ({})", outcome.identity.email, outcome.profile.role);
    Ok(Redirect::to(destination).into_response())
}

// GET /register
pub async fn show_register_form() -> AppResult<Response> {
    let page = RegisterPage {
        error: None,
        full_name: String::new(),
        email: String::new(),
    };
    Ok(render(&page)?.into_response())
}

// POST /register
pub async fn handle_register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    tracing::info!("Tentativa de cadastro para: {}", form.email);

    match account_service::signup(&state.db_pool, &form).await {
        Ok(outcome) => {
            tracing::info!(
                "Cadastro concluído: {} (papel: {}, empresa: {})",
                outcome.identity.id,
                outcome.role,
                outcome
                    .company
                    .as_ref()
                    .map(|c| c.name.as_str())
                    .unwrap_or("nenhuma")
            );
            let target = format!("/login?message={}", urlencoding::encode(SIGNUP_SUCCESS_MESSAGE));
            Ok(Redirect::to(&target).into_response())
        }
        Err(e) if e.is_form_error() => {
            let page = RegisterPage {
                error: Some(e.user_message()),
                full_name: form.full_name,
                email: form.email,
            };
            Ok(render(&page)?.into_response())
        }
        Err(e) => Err(e),
    }
}

// GET /logout
pub async fn handle_logout(session: Session) -> AppResult<Redirect> {
    let user_id = session_user(&session).await;

    session
        .delete()
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao apagar sessão: {}", e)))?;

    match user_id {
        Some(id) => tracing::info!("🚪 Utilizador '{}' desligado.", id),
        None => tracing::info!("🚪 Sessão anónima desligada."),
    }

    Ok(Redirect::to("/login"))
}
