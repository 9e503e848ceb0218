// src/services/template_service.rs
use crate::{
    error::{AppError, AppResult},
    models::checklist::{ChecklistTemplate, CreateTemplateForm, Question},
    services::{identity_service, profile_service},
};
use chrono::Utc;
use sqlx::{types::Json, SqlitePool};
use std::collections::HashSet;
use uuid::Uuid;

/// Interpreta o payload JSON das perguntas enviado pelo formulário.
pub fn parse_questions(payload: &str) -> AppResult<Vec<Question>> {
    let questions: Vec<Question> = serde_json::from_str(payload).map_err(|e| {
        tracing::warn!("Payload de perguntas inválido: {}", e);
        AppError::QuestionsParse(e)
    })?;

    if questions.is_empty() {
        return Err(AppError::NoQuestions);
    }
    if questions.iter().any(|q| q.label.trim().is_empty()) {
        return Err(AppError::Validation(
            "Todas as perguntas precisam de um enunciado.".to_string(),
        ));
    }
    let mut seen = HashSet::new();
    if !questions.iter().all(|q| seen.insert(q.id.as_str())) {
        return Err(AppError::Validation("Perguntas com identificador repetido.".to_string()));
    }

    Ok(questions)
}

/// Cria um modelo de checklist na empresa de quem o cria.
pub async fn create_template(
    db_pool: &SqlitePool,
    user_id: &str,
    form: &CreateTemplateForm,
) -> AppResult<ChecklistTemplate> {
    if identity_service::get_user(db_pool, user_id).await?.is_none() {
        return Err(AppError::Unauthenticated);
    }
    let company_id = profile_service::find_profile(db_pool, user_id)
        .await?
        .and_then(|p| p.company_id)
        .ok_or_else(|| {
            tracing::warn!("Utilizador {} sem empresa tentou criar modelo.", user_id);
            AppError::NoCompany
        })?;

    let title = form.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("O título é obrigatório.".to_string()));
    }
    let questions = parse_questions(&form.questions)?;
    let description = form
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    let template = ChecklistTemplate {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        description,
        company_id,
        created_by: user_id.to_string(),
        fields: Json(questions),
        created_at: Utc::now().naive_utc(),
    };

    sqlx::query(
        r#"
        INSERT INTO checklists_templates (id, title, description, company_id, created_by, fields, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(&template.id)
    .bind(&template.title)
    .bind(&template.description)
    .bind(&template.company_id)
    .bind(&template.created_by)
    .bind(&template.fields)
    .bind(template.created_at)
    .execute(db_pool)
    .await
    .map_err(|e| {
        tracing::error!("Erro ao criar modelo '{}': {:?}", template.title, e);
        AppError::TemplateSave(e.to_string())
    })?;

    tracing::info!(
        "✅ Modelo '{}' criado com {} perguntas (empresa {})",
        template.title,
        template.question_count(),
        template.company_id
    );
    Ok(template)
}

/// Modelos da empresa, mais recentes primeiro.
pub async fn list_company_templates(
    db_pool: &SqlitePool,
    company_id: &str,
) -> AppResult<Vec<ChecklistTemplate>> {
    let templates = sqlx::query_as::<_, ChecklistTemplate>(
        r#"
        SELECT id, title, description, company_id, created_by, fields, created_at
        FROM checklists_templates
        WHERE company_id = ?1
        ORDER BY created_at DESC
        "#,
    )
    .bind(company_id)
    .fetch_all(db_pool)
    .await?;
    tracing::debug!("Encontrados {} modelos para empresa {}", templates.len(), company_id);
    Ok(templates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        checklist::QuestionKind,
        identity::RegisterForm,
    };
    use crate::services::account_service;

    const QUESTIONS: &str = r#"[
        {"id":"q1","label":"Pneus calibrados?","type":"yes_no"},
        {"id":"q2","label":"Foto do painel","type":"photo"},
        {"id":"q3","label":"Observações","type":"text"}
    ]"#;

    fn form(title: &str, questions: &str) -> CreateTemplateForm {
        CreateTemplateForm {
            title: title.to_string(),
            description: Some("  ".to_string()),
            questions: questions.to_string(),
        }
    }

    async fn admin(pool: &SqlitePool, email: &str) -> (String, String) {
        let outcome = account_service::signup(
            pool,
            &RegisterForm {
                full_name: "Frota Admin".into(),
                email: email.into(),
                password: "segredo1".into(),
                role: None,
            },
        )
        .await
        .unwrap();
        (outcome.identity.id, outcome.company.unwrap().id)
    }

    async fn template_count(pool: &SqlitePool) -> i64 {
        let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM checklists_templates")
            .fetch_one(pool)
            .await
            .unwrap();
        n
    }

    #[test]
    fn parse_keeps_question_order() {
        let questions = parse_questions(QUESTIONS).unwrap();
        let ids: Vec<_> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, ["q1", "q2", "q3"]);
        assert_eq!(questions[1].kind, QuestionKind::Photo);
    }

    #[test]
    fn parse_distinguishes_failure_kinds() {
        assert!(matches!(parse_questions("não é json"), Err(AppError::QuestionsParse(_))));
        assert!(matches!(parse_questions(""), Err(AppError::QuestionsParse(_))));
        assert!(matches!(
            parse_questions(r#"[{"id":"a","label":"x","type":"video"}]"#),
            Err(AppError::QuestionsParse(_))
        ));
        assert!(matches!(parse_questions("[]"), Err(AppError::NoQuestions)));
        assert!(matches!(
            parse_questions(r#"[{"id":"a","label":"  ","type":"text"}]"#),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            parse_questions(
                r#"[{"id":"a","label":"x","type":"text"},{"id":"a","label":"y","type":"text"}]"#
            ),
            Err(AppError::Validation(_))
        ));
    }

    #[sqlx::test]
    async fn create_scopes_template_to_caller_company(pool: SqlitePool) {
        let (user_id, company_id) = admin(&pool, "admin@frota.com").await;

        let created = create_template(&pool, &user_id, &form("  Inspeção Diária ", QUESTIONS))
            .await
            .unwrap();
        assert_eq!(created.company_id, company_id);
        assert_eq!(created.title, "Inspeção Diária");
        assert_eq!(created.description, None);

        let listed = list_company_templates(&pool, &company_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].created_by, user_id);
        assert_eq!(listed[0].company_id, company_id);
        assert_eq!(listed[0].fields.0, created.fields.0);
    }

    #[sqlx::test]
    async fn invalid_input_inserts_nothing(pool: SqlitePool) {
        let (user_id, _) = admin(&pool, "admin@frota.com").await;

        let cases = [
            form("", QUESTIONS),
            form("Inspeção", "[]"),
            form("Inspeção", r#"[{"id":"a","label":"","type":"text"}]"#),
            form("Inspeção", "{quebrado"),
        ];
        for case in &cases {
            let result = create_template(&pool, &user_id, case).await;
            assert!(result.is_err(), "esperado erro para {:?}", case);
        }
        assert_eq!(template_count(&pool).await, 0);
    }

    #[sqlx::test]
    async fn store_failure_is_reported_with_prefix(pool: SqlitePool) {
        let (user_id, _) = admin(&pool, "admin@frota.com").await;
        sqlx::query(
            "CREATE TRIGGER block_templates BEFORE INSERT ON checklists_templates \
             BEGIN SELECT RAISE(ABORT, 'modelos indisponíveis'); END;",
        )
        .execute(&pool)
        .await
        .unwrap();

        let err = create_template(&pool, &user_id, &form("Inspeção", QUESTIONS))
            .await
            .unwrap_err();
        match &err {
            AppError::TemplateSave(msg) => assert!(msg.contains("modelos indisponíveis")),
            other => panic!("esperado TemplateSave, obtido {:?}", other),
        }
        assert!(err.user_message().starts_with("Erro ao salvar o modelo: "));
        assert!(err.is_form_error());
        assert_eq!(template_count(&pool).await, 0);
    }

    #[sqlx::test]
    async fn caller_without_company_is_refused(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let identity = crate::services::identity_service::sign_up(
            &mut conn,
            "motorista@frota.com",
            "segredo1",
            None,
        )
        .await
        .unwrap();
        drop(conn);
        account_service::login(&pool, "motorista@frota.com", "segredo1").await.unwrap();

        let result = create_template(&pool, &identity.id, &form("Inspeção", QUESTIONS)).await;
        assert!(matches!(result, Err(AppError::NoCompany)));

        let unknown = create_template(&pool, "sem-identidade", &form("Inspeção", QUESTIONS)).await;
        assert!(matches!(unknown, Err(AppError::Unauthenticated)));
        assert_eq!(template_count(&pool).await, 0);
    }

    #[sqlx::test]
    async fn listing_is_per_company_newest_first(pool: SqlitePool) {
        let (ana, ana_company) = admin(&pool, "ana@frota.com").await;
        let (bob, bob_company) = admin(&pool, "bob@frota.com").await;

        create_template(&pool, &ana, &form("Primeiro", QUESTIONS)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        create_template(&pool, &ana, &form("Segundo", QUESTIONS)).await.unwrap();
        create_template(&pool, &bob, &form("Do Bob", QUESTIONS)).await.unwrap();

        let titles: Vec<_> = list_company_templates(&pool, &ana_company)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, ["Segundo", "Primeiro"]);
        assert_eq!(list_company_templates(&pool, &bob_company).await.unwrap().len(), 1);
    }
}
