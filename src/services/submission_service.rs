// src/services/submission_service.rs
use crate::{error::AppResult, models::submission::SubmissionRow};
use sqlx::SqlitePool;

const SUBMISSION_COLUMNS: &str = r#"
    SELECT
        s.id,
        s.created_at,
        s.status,
        t.title AS template_title,
        p.full_name AS driver_name
    FROM submissions s
    JOIN checklists_templates t ON t.id = s.template_id
    LEFT JOIN profiles p ON p.id = s.driver_id
"#;

/// Submissões dos modelos da empresa, mais recentes primeiro.
pub async fn list_submissions(db_pool: &SqlitePool, company_id: &str) -> AppResult<Vec<SubmissionRow>> {
    let sql = format!(
        "{} WHERE t.company_id = ?1 ORDER BY s.created_at DESC",
        SUBMISSION_COLUMNS
    );
    let rows = sqlx::query_as::<_, SubmissionRow>(&sql)
        .bind(company_id)
        .fetch_all(db_pool)
        .await?;
    tracing::debug!("Encontradas {} submissões para empresa {}", rows.len(), company_id);
    Ok(rows)
}

/// Mantém as submissões cujo motorista ou título do modelo contém `term`
/// (sem diferenciar maiúsculas). Termo vazio devolve tudo, na mesma ordem.
pub fn filter_submissions(rows: Vec<SubmissionRow>, term: &str) -> Vec<SubmissionRow> {
    if term.is_empty() {
        return rows;
    }
    let term = term.to_lowercase();
    rows.into_iter()
        .filter(|s| {
            let driver = s.driver_name.as_deref().unwrap_or_default().to_lowercase();
            let title = s.template_title.as_deref().unwrap_or_default().to_lowercase();
            driver.contains(&term) || title.contains(&term)
        })
        .collect()
}

/// Listagem do painel: sem empresa não há submissões visíveis.
pub async fn search_submissions(
    db_pool: &SqlitePool,
    company_id: Option<&str>,
    term: Option<&str>,
) -> AppResult<Vec<SubmissionRow>> {
    let Some(company_id) = company_id else {
        return Ok(Vec::new());
    };
    let rows = list_submissions(db_pool, company_id).await?;
    Ok(filter_submissions(rows, term.unwrap_or_default()))
}

pub async fn find_submission(
    db_pool: &SqlitePool,
    company_id: &str,
    id: &str,
) -> AppResult<Option<SubmissionRow>> {
    let sql = format!("{} WHERE t.company_id = ?1 AND s.id = ?2", SUBMISSION_COLUMNS);
    let row = sqlx::query_as::<_, SubmissionRow>(&sql)
        .bind(company_id)
        .bind(id)
        .fetch_optional(db_pool)
        .await?;
    Ok(row)
}
