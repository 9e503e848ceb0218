// src/web/landing.rs
use crate::models::profile::Role;

// Destinos por papel. Hoje todos apontam para o painel.
pub const ADMIN_HOME: &str = "/dashboard";
pub const SUPERVISOR_HOME: &str = "/dashboard";
pub const DRIVER_HOME: &str = "/dashboard";

/// Página inicial de quem acabou de entrar, a partir do papel do perfil.
/// Papel ausente ou desconhecido cai no destino do motorista.
pub fn landing_path(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::Admin) => ADMIN_HOME,
        Some(Role::Supervisor) => SUPERVISOR_HOME,
        Some(Role::Motorista) | None => DRIVER_HOME,
    }
}
