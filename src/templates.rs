// src/templates.rs
use crate::{
    error::{AppError, AppResult},
    models::{
        checklist::{ChecklistTemplate, Question, QuestionKind},
        submission::SubmissionRow,
    },
};
use askama::Template;
use axum::response::Html;

/// Renderiza um template Askama, registando falhas de renderização.
pub fn render<T: Template>(template: &T) -> AppResult<Html<String>> {
    template.render().map(Html).map_err(|e| {
        tracing::error!("Falha ao renderizar template: {}", e);
        AppError::InternalServerError
    })
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub error: Option<String>,
    // Aviso vindo de ?message= (ex: depois do cadastro)
    pub message: Option<String>,
    pub email: String,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterPage {
    pub error: Option<String>,
    pub full_name: String,
    pub email: String,
}

pub struct TemplateCard {
    pub title: String,
    pub description: String,
    pub question_count: usize,
    pub created_on: String,
}

impl From<&ChecklistTemplate> for TemplateCard {
    fn from(t: &ChecklistTemplate) -> Self {
        Self {
            title: t.title.clone(),
            description: t
                .description
                .clone()
                .unwrap_or_else(|| "Sem descrição.".to_string()),
            question_count: t.question_count(),
            created_on: t.created_at.format("%d/%m/%Y").to_string(),
        }
    }
}

pub struct SubmissionLine {
    pub id: String,
    pub driver_name: String,
    pub template_title: String,
    pub created_at: String,
    pub status: String,
    pub badge_class: &'static str,
}

// Rótulos para nomes ausentes na tabela de submissões
pub const MISSING_DRIVER: &str = "Desconhecido";
pub const MISSING_TEMPLATE: &str = "Sem título";

impl From<&SubmissionRow> for SubmissionLine {
    fn from(s: &SubmissionRow) -> Self {
        Self {
            id: s.id.clone(),
            driver_name: s.driver_name.clone().unwrap_or_else(|| MISSING_DRIVER.to_string()),
            template_title: s.template_title.clone().unwrap_or_else(|| MISSING_TEMPLATE.to_string()),
            created_at: s.created_at.format("%d/%m/%Y %H:%M").to_string(),
            status: s.display_status().to_string(),
            badge_class: s.badge().css_class(),
        }
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub user_name: String,
    pub company_name: Option<String>,
    pub query: String,
    pub templates: Vec<TemplateCard>,
    pub submissions: Vec<SubmissionLine>,
}

pub struct KindOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

pub struct QuestionField {
    pub id: String,
    pub position: usize,
    pub label: String,
    pub options: Vec<KindOption>,
}

impl QuestionField {
    pub fn from_question(position: usize, q: &Question) -> Self {
        Self {
            id: q.id.clone(),
            position,
            label: q.label.clone(),
            options: QuestionKind::ALL
                .into_iter()
                .map(|kind| KindOption {
                    value: kind.as_str(),
                    label: kind.label(),
                    selected: kind == q.kind,
                })
                .collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "template_new.html")]
pub struct NewTemplatePage {
    pub error: Option<String>,
    pub title: String,
    pub description: String,
    pub questions: Vec<QuestionField>,
    // Só há botão de remover quando existe mais de uma pergunta
    pub can_remove: bool,
}

#[derive(Template)]
#[template(path = "submission_detail.html")]
pub struct SubmissionDetailPage {
    pub submission: SubmissionLine,
}
