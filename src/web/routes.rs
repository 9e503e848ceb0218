// src/web/routes.rs
use crate::{
    state::AppState,
    web::{auth_handlers, dashboard_handlers, mw_auth, submission_handlers, template_handlers},
};
use axum::{
    middleware,
    response::Redirect,
    routing::get,
    Router,
};

pub fn create_router(app_state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(|| async { Redirect::permanent("/login") }))
        .route(
            "/login",
            get(auth_handlers::show_login_form).post(auth_handlers::handle_login),
        )
        .route(
            "/register",
            get(auth_handlers::show_register_form).post(auth_handlers::handle_register),
        )
        .route("/logout", get(auth_handlers::handle_logout));

    let dashboard_routes = Router::new()
        .route("/", get(dashboard_handlers::dashboard_page))
        .route(
            "/templates/new",
            get(template_handlers::show_new_template_form)
                .post(template_handlers::handle_template_form),
        );

    // Tudo abaixo exige sessão autenticada
    let authenticated_routes = Router::new()
        .nest("/dashboard", dashboard_routes)
        .route("/submissions/{id}", get(submission_handlers::submission_detail))
        .route_layer(middleware::from_fn(mw_auth::require_auth));

    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .with_state(app_state)
}
