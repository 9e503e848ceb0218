// src/models/submission.rs
use chrono::NaiveDateTime;
use sqlx::FromRow;

// Status mostrado quando a submissão ainda não tem nenhum
pub const DEFAULT_STATUS: &str = "pendente";

/// Categoria visual de um status de submissão.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeKind {
    Completed,
    Pending,
    Failed,
    Unknown,
}

impl BadgeKind {
    /// Classifica um status (sem diferenciar maiúsculas).
    pub fn classify(status: &str) -> Self {
        match status.to_lowercase().as_str() {
            "completo" | "concluido" | "completed" => BadgeKind::Completed,
            "pendente" | "pending" => BadgeKind::Pending,
            "reprovado" | "failed" => BadgeKind::Failed,
            _ => BadgeKind::Unknown,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            BadgeKind::Completed => "badge badge-completed",
            BadgeKind::Pending => "badge badge-pending",
            BadgeKind::Failed => "badge badge-failed",
            BadgeKind::Unknown => "badge badge-unknown",
        }
    }
}

/// Submissão com o título do modelo e o nome do motorista já resolvidos.
#[derive(Debug, Clone, FromRow)]
pub struct SubmissionRow {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub status: Option<String>,
    pub template_title: Option<String>,
    pub driver_name: Option<String>,
}

impl SubmissionRow {
    /// Status a exibir; submissões sem status aparecem como pendentes.
    pub fn display_status(&self) -> &str {
        match self.status.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => DEFAULT_STATUS,
        }
    }

    pub fn badge(&self) -> BadgeKind {
        BadgeKind::classify(self.display_status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_classification_ignores_case() {
        assert_eq!(BadgeKind::classify("Completo"), BadgeKind::Completed);
        assert_eq!(BadgeKind::classify("concluido"), BadgeKind::Completed);
        assert_eq!(BadgeKind::classify("completed"), BadgeKind::Completed);
        assert_eq!(BadgeKind::classify("COMPLETED"), BadgeKind::Completed);
        assert_eq!(BadgeKind::classify("Pendente"), BadgeKind::Pending);
        assert_eq!(BadgeKind::classify("PENDING"), BadgeKind::Pending);
        assert_eq!(BadgeKind::classify("REPROVADO"), BadgeKind::Failed);
        assert_eq!(BadgeKind::classify("Failed"), BadgeKind::Failed);
        assert_eq!(BadgeKind::classify("xyz"), BadgeKind::Unknown);
        assert_eq!(BadgeKind::classify("XYZ"), BadgeKind::Unknown);
        assert_eq!(BadgeKind::classify(""), BadgeKind::Unknown);
    }

    #[test]
    fn missing_status_is_shown_as_pending() {
        let row = SubmissionRow {
            id: "s".into(),
            created_at: chrono::Utc::now().naive_utc(),
            status: None,
            template_title: None,
            driver_name: None,
        };
        assert_eq!(row.display_status(), "pendente");
        assert_eq!(row.badge(), BadgeKind::Pending);
    }
}
