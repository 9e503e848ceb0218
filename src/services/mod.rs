// src/services/mod.rs
pub mod account_service;
pub mod auth_service;
pub mod company_service;
pub mod identity_service;
pub mod profile_service;
pub mod submission_service;
pub mod template_service;
