// src/services/account_service.rs
//! Cadastro (identidade + empresa + perfil) e login com criação do perfil
//! padrão quando ele ainda não existe.
use crate::{
    error::{AppError, AppResult},
    models::{
        company::Company,
        identity::{Identity, RegisterForm},
        profile::{NewProfile, Profile, Role},
    },
    services::{company_service, identity_service, profile_service},
};
use sqlx::{Acquire, Sqlite, SqlitePool, Transaction};

#[derive(Debug)]
pub struct SignupOutcome {
    pub identity: Identity,
    // None quando a empresa não pôde ser criada
    pub company: Option<Company>,
    pub role: Role,
}

#[derive(Debug)]
pub struct LoginOutcome {
    pub identity: Identity,
    pub profile: Profile,
    pub profile_created: bool,
}

/// Cadastra uma conta nova.
///
/// Tudo corre numa única transação: a identidade, a empresa "{nome}
/// Transportes" e o perfil. Se a empresa falhar, o perfil fica sem
/// empresa e o cadastro continua. Se o perfil falhar, nada fica gravado.
pub async fn signup(db_pool: &SqlitePool, form: &RegisterForm) -> AppResult<SignupOutcome> {
    let full_name = form.full_name.trim();
    if full_name.is_empty() {
        return Err(AppError::Validation("O nome completo é obrigatório.".to_string()));
    }
    let role = match form.role.as_deref().map(str::trim) {
        None | Some("") => Role::Admin,
        Some(raw) => raw.parse::<Role>().map_err(AppError::Validation)?,
    };

    let mut tx = db_pool.begin().await?;

    let identity =
        identity_service::sign_up(&mut tx, &form.email, &form.password, Some(full_name)).await?;

    let company_name = Company::onboarding_name(full_name);
    let company = match create_company(&mut tx, &company_name).await {
        Ok(company) => Some(company),
        Err(e) => {
            tracing::warn!(
                "Empresa '{}' não criada para {}: {}. Perfil ficará sem empresa.",
                company_name,
                identity.id,
                e
            );
            None
        }
    };

    let new_profile = NewProfile {
        id: &identity.id,
        full_name,
        role,
        company_id: company.as_ref().map(|c| c.id.as_str()),
    };
    if let Err(e) = profile_service::insert_profile(&mut *tx, &new_profile).await {
        tracing::error!("Erro ao criar perfil para {}: {:?}", identity.id, e);
        // tx é descartada aqui: identidade e empresa são desfeitas
        return Err(AppError::ProfileCreation(e.to_string()));
    }

    tx.commit().await?;
    tracing::info!(
        "✅ Conta {} cadastrada (papel: {}, empresa: {:?})",
        identity.email,
        role,
        company.as_ref().map(|c| c.id.as_str())
    );

    Ok(SignupOutcome {
        identity,
        company,
        role,
    })
}

// Isolada num savepoint para que a falha não contamine a transação do cadastro
async fn create_company(tx: &mut Transaction<'_, Sqlite>, name: &str) -> Result<Company, sqlx::Error> {
    let mut savepoint = tx.begin().await?;
    let company = company_service::insert_company(&mut *savepoint, name).await?;
    savepoint.commit().await?;
    Ok(company)
}

/// Autentica e garante que a identidade tem perfil.
///
/// A sessão só deve ser aberta pelo chamador depois de isto devolver `Ok`.
pub async fn login(db_pool: &SqlitePool, email: &str, password: &str) -> AppResult<LoginOutcome> {
    let signed_in = identity_service::sign_in_with_password(db_pool, email, password).await?;

    let identity = identity_service::get_user(db_pool, &signed_in.id)
        .await?
        .ok_or_else(|| AppError::Validation("Usuário não encontrado.".to_string()))?;

    if let Some(profile) = profile_service::find_profile(db_pool, &identity.id).await? {
        return Ok(LoginOutcome {
            identity,
            profile,
            profile_created: false,
        });
    }

    let full_name = identity.display_name();
    let created = profile_service::insert_default_profile(db_pool, &identity.id, &full_name)
        .await
        .map_err(|e| {
            tracing::error!("Erro ao criar perfil padrão para {}: {:?}", identity.id, e);
            AppError::DefaultProfileCreation(e)
        })?;
    if created {
        tracing::info!("Perfil padrão (motorista) criado para {}", identity.id);
    }

    let profile = profile_service::find_profile(db_pool, &identity.id)
        .await?
        .ok_or(AppError::InternalServerError)?;

    Ok(LoginOutcome {
        identity,
        profile,
        profile_created: created,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_form(full_name: &str, email: &str) -> RegisterForm {
        RegisterForm {
            full_name: full_name.to_string(),
            email: email.to_string(),
            password: "segredo1".to_string(),
            role: None,
        }
    }

    async fn count(pool: &SqlitePool, table: &str) -> i64 {
        let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(pool)
            .await
            .unwrap();
        n
    }

    #[sqlx::test]
    async fn signup_provisions_company_and_admin_profile(pool: SqlitePool) {
        let outcome = signup(&pool, &register_form("João da Silva", "joao@frota.com"))
            .await
            .unwrap();

        let company = outcome.company.expect("empresa criada");
        assert_eq!(company.name, "João da Silva Transportes");
        assert_eq!(outcome.role, Role::Admin);

        let profile = profile_service::find_profile(&pool, &outcome.identity.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.role(), Some(Role::Admin));
        assert_eq!(profile.full_name.as_deref(), Some("João da Silva"));
        assert_eq!(profile.company_id.as_deref(), Some(company.id.as_str()));
    }

    #[sqlx::test]
    async fn signup_honours_explicit_role(pool: SqlitePool) {
        let mut form = register_form("Sara", "sara@frota.com");
        form.role = Some("supervisor".into());
        let outcome = signup(&pool, &form).await.unwrap();
        assert_eq!(outcome.role, Role::Supervisor);

        form.email = "outra@frota.com".into();
        form.role = Some("gerente".into());
        assert!(matches!(signup(&pool, &form).await, Err(AppError::Validation(_))));
    }

    #[sqlx::test]
    async fn signup_requires_full_name(pool: SqlitePool) {
        let result = signup(&pool, &register_form("  ", "joao@frota.com")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(count(&pool, "users").await, 0);
    }

    #[sqlx::test]
    async fn identity_failure_stops_before_company(pool: SqlitePool) {
        signup(&pool, &register_form("João", "joao@frota.com")).await.unwrap();
        let again = signup(&pool, &register_form("João", "joao@frota.com")).await;

        assert!(matches!(again, Err(AppError::EmailAlreadyRegistered)));
        assert_eq!(count(&pool, "companies").await, 1);
        assert_eq!(count(&pool, "profiles").await, 1);
    }

    #[sqlx::test]
    async fn failed_company_leaves_profile_without_company(pool: SqlitePool) {
        sqlx::query(
            "CREATE TRIGGER block_companies BEFORE INSERT ON companies \
             BEGIN SELECT RAISE(ABORT, 'empresas indisponíveis'); END;",
        )
        .execute(&pool)
        .await
        .unwrap();

        let outcome = signup(&pool, &register_form("Ana", "ana@frota.com")).await.unwrap();
        assert!(outcome.company.is_none());

        let profile = profile_service::find_profile(&pool, &outcome.identity.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.company_id, None);
        assert_eq!(count(&pool, "companies").await, 0);
    }

    #[sqlx::test]
    async fn failed_profile_rolls_back_identity_and_company(pool: SqlitePool) {
        sqlx::query(
            "CREATE TRIGGER block_profiles BEFORE INSERT ON profiles \
             BEGIN SELECT RAISE(ABORT, 'perfis indisponíveis'); END;",
        )
        .execute(&pool)
        .await
        .unwrap();

        let result = signup(&pool, &register_form("Ana", "ana@frota.com")).await;
        match result {
            Err(AppError::ProfileCreation(msg)) => assert!(msg.contains("perfis indisponíveis")),
            other => panic!("esperado ProfileCreation, obtido {:?}", other),
        }
        assert_eq!(count(&pool, "users").await, 0);
        assert_eq!(count(&pool, "companies").await, 0);
    }

    async fn bare_identity(pool: &SqlitePool, email: &str, full_name: Option<&str>) -> Identity {
        let mut conn = pool.acquire().await.unwrap();
        identity_service::sign_up(&mut conn, email, "segredo1", full_name)
            .await
            .unwrap()
    }

    #[sqlx::test]
    async fn first_login_creates_driver_profile_once(pool: SqlitePool) {
        let identity = bare_identity(&pool, "bia@frota.com", Some("Bia Souza")).await;

        let first = login(&pool, "bia@frota.com", "segredo1").await.unwrap();
        assert!(first.profile_created);
        assert_eq!(first.profile.id, identity.id);
        assert_eq!(first.profile.role(), Some(Role::Motorista));
        assert_eq!(first.profile.full_name.as_deref(), Some("Bia Souza"));
        assert_eq!(first.profile.company_id, None);

        let second = login(&pool, "bia@frota.com", "segredo1").await.unwrap();
        assert!(!second.profile_created);
        assert_eq!(count(&pool, "profiles").await, 1);
    }

    #[sqlx::test]
    async fn default_profile_name_falls_back_to_email(pool: SqlitePool) {
        bare_identity(&pool, "carlos.m@frota.com", None).await;
        let outcome = login(&pool, "carlos.m@frota.com", "segredo1").await.unwrap();
        assert_eq!(outcome.profile.full_name.as_deref(), Some("carlos.m"));
    }

    #[sqlx::test]
    async fn login_keeps_existing_profile(pool: SqlitePool) {
        signup(&pool, &register_form("João", "joao@frota.com")).await.unwrap();
        let outcome = login(&pool, "joao@frota.com", "segredo1").await.unwrap();
        assert!(!outcome.profile_created);
        assert_eq!(outcome.profile.role(), Some(Role::Admin));
    }

    #[sqlx::test]
    async fn login_fails_when_default_profile_cannot_be_created(pool: SqlitePool) {
        bare_identity(&pool, "bia@frota.com", None).await;
        sqlx::query(
            "CREATE TRIGGER block_profiles BEFORE INSERT ON profiles \
             BEGIN SELECT RAISE(ABORT, 'perfis indisponíveis'); END;",
        )
        .execute(&pool)
        .await
        .unwrap();

        let result = login(&pool, "bia@frota.com", "segredo1").await;
        assert!(matches!(result, Err(AppError::DefaultProfileCreation(_))));
    }

    #[sqlx::test]
    async fn wrong_password_is_reported_verbatim(pool: SqlitePool) {
        bare_identity(&pool, "bia@frota.com", None).await;
        let err = login(&pool, "bia@frota.com", "errada1").await.unwrap_err();
        assert_eq!(err.user_message(), "Credenciais de login inválidas.");
        assert_eq!(count(&pool, "profiles").await, 0);
    }
}
