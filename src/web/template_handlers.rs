// src/web/template_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::{
        checklist::{CreateTemplateForm, QuestionKind},
        draft::TemplateDraft,
    },
    services::template_service,
    state::AppState,
    templates::{render, NewTemplatePage, QuestionField},
    web::mw_auth::UserId,
};
use axum::{
    extract::{Extension, Form, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

const DRAFT_KEY: &str = "template_draft";

/// Botão usado para enviar o formulário "Novo Modelo".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    Save,
    AddQuestion,
    RemoveQuestion(String),
}

/// Campos do formulário: título, descrição e as edições de cada pergunta
/// (`label:{id}` e `type:{id}`), na ordem em que chegaram.
#[derive(Debug, Default)]
pub struct TemplateFormInput {
    pub title: String,
    pub description: String,
    pub labels: Vec<(String, String)>,
    pub kinds: Vec<(String, QuestionKind)>,
    pub action: Option<FormAction>,
}

impl TemplateFormInput {
    pub fn parse(fields: Vec<(String, String)>) -> Self {
        let mut input = Self::default();
        for (key, value) in fields {
            if let Some(id) = key.strip_prefix("label:") {
                input.labels.push((id.to_string(), value));
            } else if let Some(id) = key.strip_prefix("type:") {
                // Tipo desconhecido é ignorado e a pergunta mantém o seu
                if let Some(kind) = QuestionKind::parse(&value) {
                    input.kinds.push((id.to_string(), kind));
                }
            } else {
                match key.as_str() {
                    "title" => input.title = value,
                    "description" => input.description = value,
                    "action" => {
                        input.action = Some(match value.as_str() {
                            "add" => FormAction::AddQuestion,
                            other => match other.strip_prefix("remove:") {
                                Some(id) => FormAction::RemoveQuestion(id.to_string()),
                                None => FormAction::Save,
                            },
                        })
                    }
                    _ => {}
                }
            }
        }
        input
    }

    /// Aplica as edições de enunciado e tipo ao rascunho.
    pub fn apply_to(&self, draft: &mut TemplateDraft) {
        for (id, label) in &self.labels {
            draft.update_label(id, label);
        }
        for (id, kind) in &self.kinds {
            draft.update_kind(id, *kind);
        }
    }
}

async fn load_draft(session: &Session) -> AppResult<TemplateDraft> {
    let draft = session
        .get::<TemplateDraft>(DRAFT_KEY)
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao ler rascunho: {}", e)))?;
    Ok(draft.unwrap_or_default())
}

async fn store_draft(session: &Session, draft: &TemplateDraft) -> AppResult<()> {
    session
        .insert(DRAFT_KEY, draft)
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao gravar rascunho: {}", e)))
}

fn form_page(draft: &TemplateDraft, title: String, description: String, error: Option<String>) -> NewTemplatePage {
    NewTemplatePage {
        error,
        title,
        description,
        questions: draft
            .questions()
            .iter()
            .enumerate()
            .map(|(i, q)| QuestionField::from_question(i + 1, q))
            .collect(),
        can_remove: draft.questions().len() > 1,
    }
}

// GET /dashboard/templates/new
pub async fn show_new_template_form(session: Session) -> AppResult<Response> {
    let draft = load_draft(&session).await?;
    store_draft(&session, &draft).await?;
    let page = form_page(&draft, String::new(), String::new(), None);
    Ok(render(&page)?.into_response())
}

// POST /dashboard/templates/new
pub async fn handle_template_form(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    session: Session,
    Form(fields): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let input = TemplateFormInput::parse(fields);
    let mut draft = load_draft(&session).await?;
    input.apply_to(&mut draft);

    let action = input.action.clone().unwrap_or(FormAction::Save);
    tracing::debug!("POST /dashboard/templates/new: {} ({:?})", user_id, action);

    let error = match action {
        FormAction::AddQuestion => {
            draft.add_question();
            None
        }
        FormAction::RemoveQuestion(id) => {
            draft.remove_question(&id);
            None
        }
        FormAction::Save => {
            let form = CreateTemplateForm {
                title: input.title.clone(),
                description: Some(input.description.clone()),
                questions: draft.to_json(),
            };
            match template_service::create_template(&state.db_pool, &user_id, &form).await {
                Ok(_) => {
                    session
                        .remove::<TemplateDraft>(DRAFT_KEY)
                        .await
                        .map_err(|e| AppError::SessionError(format!("Falha ao limpar rascunho: {}", e)))?;
                    return Ok(Redirect::to("/dashboard").into_response());
                }
                Err(e) if e.is_form_error() => Some(e.user_message()),
                Err(e) => return Err(e),
            }
        }
    };

    store_draft(&session, &draft).await?;
    let page = form_page(&draft, input.title, input.description, error);
    Ok(render(&page)?.into_response())
}
