// src/models/profile.rs
use sqlx::FromRow;
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Supervisor,
    Motorista,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Supervisor => "supervisor",
            Role::Motorista => "motorista",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "supervisor" => Ok(Role::Supervisor),
            "motorista" => Ok(Role::Motorista),
            other => Err(format!("Perfil desconhecido: '{}'", other)),
        }
    }
}

// Representa um perfil lido da tabela 'profiles' (id = id da identidade)
#[derive(Debug, Clone, FromRow)]
pub struct Profile {
    pub id: String,
    pub full_name: Option<String>,
    pub role: String,
    pub company_id: Option<String>,
}

impl Profile {
    /// Papel do perfil; `None` quando o valor gravado não é reconhecido.
    pub fn role(&self) -> Option<Role> {
        self.role.parse().ok()
    }
}

/// Dados para inserir um perfil.
#[derive(Debug)]
pub struct NewProfile<'a> {
    pub id: &'a str,
    pub full_name: &'a str,
    pub role: Role,
    pub company_id: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parsing_is_case_insensitive() {
        assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(" Motorista ".parse::<Role>(), Ok(Role::Motorista));
        assert!("gerente".parse::<Role>().is_err());
    }

    #[test]
    fn unknown_stored_role_is_none() {
        let profile = Profile {
            id: "p".into(),
            full_name: None,
            role: "gerente".into(),
            company_id: None,
        };
        assert_eq!(profile.role(), None);
    }
}
