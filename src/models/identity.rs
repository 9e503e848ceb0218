// src/models/identity.rs
use chrono::NaiveDateTime;
use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

// Representa uma identidade (credencial de login) lida da tabela 'users'
#[derive(Debug, Clone, FromRow)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    // Metadado gravado no cadastro; pode faltar em contas antigas
    pub full_name: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Identity {
    /// Nome a usar num perfil novo: o metadado `full_name`, ou a parte
    /// local do e-mail quando o metadado não existe.
    pub fn display_name(&self) -> String {
        match self.full_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self
                .email
                .split('@')
                .next()
                .unwrap_or(&self.email)
                .to_string(),
        }
    }
}

/// Regras de credenciais do Identity Store.
#[derive(Debug, Validate)]
pub struct Credentials {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    pub password: String,
    // Campo oculto do formulário; ausente equivale a "admin"
    #[serde(default)]
    pub role: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(email: &str, full_name: Option<&str>) -> Identity {
        Identity {
            id: "id".into(),
            email: email.into(),
            password_hash: String::new(),
            full_name: full_name.map(Into::into),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[test]
    fn display_name_prefers_metadata() {
        assert_eq!(identity("ana@frota.com", Some("Ana Silva")).display_name(), "Ana Silva");
    }

    #[test]
    fn display_name_falls_back_to_email_local_part() {
        assert_eq!(identity("bob@frota.com", None).display_name(), "bob");
        assert_eq!(identity("bob@frota.com", Some("  ")).display_name(), "bob");
    }

    #[test]
    fn credentials_follow_store_rules() {
        let creds = |email: &str, password: &str| Credentials {
            email: email.into(),
            password: password.into(),
        };
        assert!(creds("ana@frota.com", "segredo").validate().is_ok());
        assert!(creds("ana", "segredo").validate().is_err());
        assert!(creds("ana@frota.com", "123").validate().is_err());
    }
}
