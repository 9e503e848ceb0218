// src/web/mod.rs
pub mod auth_handlers;
pub mod dashboard_handlers;
pub mod landing;
pub mod mw_auth;
pub mod routes;
pub mod submission_handlers;
pub mod template_handlers;
