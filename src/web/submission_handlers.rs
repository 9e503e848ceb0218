// src/web/submission_handlers.rs
use crate::{
    error::{AppError, AppResult},
    services::{profile_service, submission_service},
    state::AppState,
    templates::{render, SubmissionDetailPage, SubmissionLine},
    web::mw_auth::UserId,
};
use axum::{
    extract::{Extension, Path, State},
    response::{IntoResponse, Response},
};

// GET /submissions/{id}
pub async fn submission_detail(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let company_id = profile_service::find_profile(&state.db_pool, &user_id)
        .await?
        .and_then(|p| p.company_id)
        .ok_or(AppError::NotFound)?;

    let submission = submission_service::find_submission(&state.db_pool, &company_id, &id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Submissão {} não visível para {}", id, user_id);
            AppError::NotFound
        })?;

    let page = SubmissionDetailPage {
        submission: SubmissionLine::from(&submission),
    };
    Ok(render(&page)?.into_response())
}
