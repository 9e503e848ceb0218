// src/models/draft.rs
use crate::models::checklist::{Question, QuestionKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lista de perguntas em edição no formulário "Novo Modelo".
///
/// Vive na sessão de quem está a editar e nunca é partilhada. A lista
/// nunca fica vazia: começa com uma pergunta e a última não pode ser
/// removida.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDraft {
    questions: Vec<Question>,
}

impl Default for TemplateDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateDraft {
    pub fn new() -> Self {
        Self {
            questions: vec![blank_question()],
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Acrescenta uma pergunta vazia do tipo texto e devolve o seu id.
    pub fn add_question(&mut self) -> String {
        let question = blank_question();
        let id = question.id.clone();
        self.questions.push(question);
        id
    }

    /// Remove a pergunta `id`. Não faz nada se for a única restante.
    pub fn remove_question(&mut self, id: &str) -> bool {
        if self.questions.len() == 1 {
            return false;
        }
        let before = self.questions.len();
        self.questions.retain(|q| q.id != id);
        self.questions.len() != before
    }

    pub fn update_label(&mut self, id: &str, label: &str) -> bool {
        match self.question_mut(id) {
            Some(q) => {
                q.label = label.to_string();
                true
            }
            None => false,
        }
    }

    pub fn update_kind(&mut self, id: &str, kind: QuestionKind) -> bool {
        match self.question_mut(id) {
            Some(q) => {
                q.kind = kind;
                true
            }
            None => false,
        }
    }

    /// Payload `questions` enviado junto com o formulário.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.questions).unwrap_or_else(|_| "[]".to_string())
    }

    fn question_mut(&mut self, id: &str) -> Option<&mut Question> {
        self.questions.iter_mut().find(|q| q.id == id)
    }
}

fn blank_question() -> Question {
    Question {
        id: Uuid::new_v4().to_string(),
        label: String::new(),
        kind: QuestionKind::Text,
    }
}
