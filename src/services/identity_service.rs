// src/services/identity_service.rs
//! Identity Store: credenciais, emissão de identidade e consulta por id.
use crate::{
    error::{AppError, AppResult},
    models::identity::{Credentials, Identity},
    services::auth_service,
};
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;
use validator::Validate;

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Cria uma identidade nova. Corre na conexão dada para que o chamador
/// possa incluí-la numa transação maior.
pub async fn sign_up(
    conn: &mut SqliteConnection,
    email: &str,
    password: &str,
    full_name: Option<&str>,
) -> AppResult<Identity> {
    let credentials = Credentials {
        email: normalize_email(email),
        password: password.to_string(),
    };
    credentials.validate()?;

    let password_hash = auth_service::hash_password(&credentials.password).await?;
    let identity = Identity {
        id: Uuid::new_v4().to_string(),
        email: credentials.email,
        password_hash,
        full_name: full_name.map(str::to_string),
        created_at: Utc::now().naive_utc(),
    };

    let result = sqlx::query(
        r#"
        INSERT INTO users (id, email, password_hash, full_name, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&identity.id)
    .bind(&identity.email)
    .bind(&identity.password_hash)
    .bind(&identity.full_name)
    .bind(identity.created_at)
    .execute(&mut *conn)
    .await;

    if let Err(sqlx::Error::Database(db_err)) = &result {
        if db_err.is_unique_violation() {
            tracing::warn!("Cadastro recusado: e-mail '{}' já existe.", identity.email);
            return Err(AppError::EmailAlreadyRegistered);
        }
    }
    result?;

    tracing::info!("Identidade {} criada para {}", identity.id, identity.email);
    Ok(identity)
}

/// Autentica por e-mail e senha.
pub async fn sign_in_with_password(
    db_pool: &SqlitePool,
    email: &str,
    password: &str,
) -> AppResult<Identity> {
    let email = normalize_email(email);
    let identity = sqlx::query_as::<_, Identity>(
        "SELECT id, email, password_hash, full_name, created_at FROM users WHERE email = ?1",
    )
    .bind(&email)
    .fetch_optional(db_pool)
    .await?;

    let Some(identity) = identity else {
        tracing::warn!("Login recusado: e-mail '{}' desconhecido.", email);
        return Err(AppError::InvalidCredentials);
    };

    if !auth_service::verify_password(password, &identity.password_hash).await? {
        tracing::warn!("Login recusado: senha incorreta para '{}'.", email);
        return Err(AppError::InvalidCredentials);
    }

    Ok(identity)
}

pub async fn get_user(db_pool: &SqlitePool, id: &str) -> AppResult<Option<Identity>> {
    tracing::debug!("Buscando identidade por ID: {}", id);
    let identity = sqlx::query_as::<_, Identity>(
        "SELECT id, email, password_hash, full_name, created_at FROM users WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(db_pool)
    .await?;
    Ok(identity)
}
