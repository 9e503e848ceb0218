// src/models/checklist.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};

/// Tipo de resposta esperado para uma pergunta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    #[default]
    Text,
    YesNo,
    Photo,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 3] = [QuestionKind::Text, QuestionKind::YesNo, QuestionKind::Photo];

    pub fn as_str(self) -> &'static str {
        match self {
            QuestionKind::Text => "text",
            QuestionKind::YesNo => "yes_no",
            QuestionKind::Photo => "photo",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QuestionKind::Text => "Texto",
            QuestionKind::YesNo => "Sim / Não",
            QuestionKind::Photo => "Foto",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == value)
    }
}

/// Uma pergunta do checklist, guardada dentro de `fields` do modelo.
/// A ordem no vetor é a ordem de apresentação.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
}

// Representa um modelo lido da tabela 'checklists_templates'
#[derive(Debug, Clone, FromRow)]
pub struct ChecklistTemplate {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub company_id: String,
    pub created_by: String,
    pub fields: Json<Vec<Question>>,
    pub created_at: NaiveDateTime,
}

impl ChecklistTemplate {
    pub fn question_count(&self) -> usize {
        self.fields.0.len()
    }
}

// Struct para dados do formulário "Novo Modelo"
#[derive(Debug, Deserialize)]
pub struct CreateTemplateForm {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    // Lista de perguntas serializada em JSON pelo construtor do formulário
    #[serde(default)]
    pub questions: String,
}
