// src/services/profile_service.rs
use crate::{
    error::AppResult,
    models::profile::{NewProfile, Profile, Role},
};
use sqlx::{Executor, Sqlite, SqlitePool};

pub async fn find_profile(db_pool: &SqlitePool, id: &str) -> AppResult<Option<Profile>> {
    tracing::debug!("Buscando perfil para ID: {}", id);
    let profile = sqlx::query_as::<_, Profile>(
        "SELECT id, full_name, role, company_id FROM profiles WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(db_pool)
    .await?;
    Ok(profile)
}

pub async fn insert_profile<'e, E>(executor: E, profile: &NewProfile<'_>) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO profiles (id, full_name, role, company_id)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(profile.id)
    .bind(profile.full_name)
    .bind(profile.role.as_str())
    .bind(profile.company_id)
    .execute(executor)
    .await?;
    Ok(())
}

/// Cria o perfil padrão de motorista se ainda não existir nenhum.
/// Devolve `true` quando esta chamada criou o perfil.
pub async fn insert_default_profile(
    db_pool: &SqlitePool,
    id: &str,
    full_name: &str,
) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        INSERT INTO profiles (id, full_name, role, company_id)
        VALUES (?1, ?2, ?3, NULL)
        ON CONFLICT(id) DO NOTHING
        "#,
    )
    .bind(id)
    .bind(full_name)
    .bind(Role::Motorista.as_str())
    .execute(db_pool)
    .await?
    .rows_affected();
    Ok(rows == 1)
}
