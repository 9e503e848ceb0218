// src/web/dashboard_handlers.rs
use crate::{
    error::AppResult,
    services::{company_service, profile_service, submission_service, template_service},
    state::AppState,
    templates::{render, DashboardPage, SubmissionLine, TemplateCard},
    web::mw_auth::UserId,
};
use axum::{
    extract::{Extension, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DashboardParams {
    #[serde(default)]
    q: Option<String>,
}

// GET /dashboard?q=
pub async fn dashboard_page(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Query(params): Query<DashboardParams>,
) -> AppResult<Response> {
    let query = params.q.unwrap_or_default();
    tracing::debug!("GET /dashboard: {} (busca: '{}')", user_id, query);

    let profile = profile_service::find_profile(&state.db_pool, &user_id).await?;
    let company_id = profile.as_ref().and_then(|p| p.company_id.clone());

    let (company_name, templates) = match company_id.as_deref() {
        Some(id) => {
            let company = company_service::find_company(&state.db_pool, id).await?;
            let templates = template_service::list_company_templates(&state.db_pool, id).await?;
            (company.map(|c| c.name), templates)
        }
        None => (None, Vec::new()),
    };

    let submissions = submission_service::search_submissions(
        &state.db_pool,
        company_id.as_deref(),
        Some(query.as_str()),
    )
    .await?;

    let page = DashboardPage {
        user_name: profile
            .and_then(|p| p.full_name)
            .unwrap_or_else(|| "Utilizador".to_string()),
        company_name,
        query,
        templates: templates.iter().map(TemplateCard::from).collect(),
        submissions: submissions.iter().map(SubmissionLine::from).collect(),
    };
    Ok(render(&page)?.into_response())
}
