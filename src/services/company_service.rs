// src/services/company_service.rs
use crate::{error::AppResult, models::company::Company};
use sqlx::{Executor, Sqlite, SqlitePool};
use uuid::Uuid;

pub async fn insert_company<'e, E>(executor: E, name: &str) -> Result<Company, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let company = Company {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
    };
    sqlx::query("INSERT INTO companies (id, name) VALUES (?1, ?2)")
        .bind(&company.id)
        .bind(&company.name)
        .execute(executor)
        .await?;
    Ok(company)
}

pub async fn find_company(db_pool: &SqlitePool, id: &str) -> AppResult<Option<Company>> {
    let company = sqlx::query_as::<_, Company>("SELECT id, name FROM companies WHERE id = ?1")
        .bind(id)
        .fetch_optional(db_pool)
        .await?;
    Ok(company)
}
