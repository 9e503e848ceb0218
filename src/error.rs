// src/error.rs
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro na base de dados: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Erro de migração da base de dados: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Erro de variável de ambiente: {0}")]
    EnvVarError(#[from] std::env::VarError),

    #[error("Configuração inválida: {0}")]
    ConfigError(String),

    #[error("Erro ao processar password")]
    PasswordHashingError,

    // Mensagem devolvida tal como o Identity Store a produz
    #[error("Credenciais de login inválidas.")]
    InvalidCredentials,

    #[error("Usuário já cadastrado.")]
    EmailAlreadyRegistered,

    #[error("Usuário não autenticado.")]
    Unauthenticated,

    #[error("Usuário não vinculado a uma empresa. Contate o suporte.")]
    NoCompany,

    #[error("{0}")]
    Validation(String),

    #[error("Erro ao processar as questões.")]
    QuestionsParse(#[source] serde_json::Error),

    #[error("Adicione pelo menos uma pergunta ao checklist.")]
    NoQuestions,

    /// Falha ao gravar o perfil durante o cadastro. A transação é desfeita,
    /// por isso a conta também não fica criada.
    #[error("Erro ao criar perfil; o cadastro não foi concluído: {0}")]
    ProfileCreation(String),

    #[error("Erro ao criar perfil de usuário.")]
    DefaultProfileCreation(#[source] sqlx::Error),

    #[error("Erro ao salvar o modelo: {0}")]
    TemplateSave(String),

    #[error("Erro na sessão: {0}")]
    SessionError(String),

    #[error("Registo não encontrado")]
    NotFound,

    #[error("Erro interno inesperado")]
    InternalServerError,
}

impl AppError {
    /// Texto mostrado ao utilizador junto do formulário que originou o erro.
    pub fn user_message(&self) -> String {
        match self {
            AppError::SqlxError(_) | AppError::SqlxMigrateError(_) => {
                "Erro ao aceder aos dados.".to_string()
            }
            AppError::PasswordHashingError => "Erro ao processar credenciais.".to_string(),
            AppError::SessionError(_) => "Erro na gestão da sua sessão.".to_string(),
            AppError::EnvVarError(_) | AppError::ConfigError(_) | AppError::InternalServerError => {
                "Ocorreu um erro inesperado.".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Erros que voltam ao formulário em vez de virar página de erro.
    pub fn is_form_error(&self) -> bool {
        matches!(
            self,
            AppError::InvalidCredentials
                | AppError::EmailAlreadyRegistered
                | AppError::Unauthenticated
                | AppError::NoCompany
                | AppError::Validation(_)
                | AppError::QuestionsParse(_)
                | AppError::NoQuestions
                | AppError::ProfileCreation(_)
                | AppError::DefaultProfileCreation(_)
                | AppError::TemplateSave(_)
        )
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials | AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::NoCompany => StatusCode::FORBIDDEN,
            AppError::EmailAlreadyRegistered => StatusCode::CONFLICT,
            AppError::Validation(_) | AppError::QuestionsParse(_) | AppError::NoQuestions => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Apenas a primeira mensagem é mostrada no formulário
        let message = errors
            .field_errors()
            .into_values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Um ou mais campos são inválidos.".to_string());
        AppError::Validation(message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Erro processado: {:?}", self);
        } else {
            tracing::debug!("Erro processado: {:?}", self);
        }

        (
            status,
            Html(format!(
                r#"<!DOCTYPE html><html lang="pt-BR"><head><meta charset="utf-8"><title>Erro</title><style>body{{font-family:sans-serif;}}</style></head>
<body><h1>Erro {status_code}</h1><p>{message}</p><a href="/dashboard">Voltar</a></body></html>"#,
                status_code = status.as_u16(),
                message = html_escape(&self.user_message()),
            )),
        )
            .into_response()
    }
}

fn html_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub type AppResult<T = ()> = Result<T, AppError>;
