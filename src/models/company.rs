// src/models/company.rs
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Company {
    pub id: String,
    pub name: String,
}

impl Company {
    /// Nome da empresa criada automaticamente no cadastro.
    pub fn onboarding_name(full_name: &str) -> String {
        format!("{} Transportes", full_name.trim())
    }
}
