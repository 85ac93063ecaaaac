pub mod health;
pub mod project;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                                          liveness (GET)
///
/// /users                                           list, create
/// /users/{id}                                      get, replace, delete
///
/// /projects                                        list, create
/// /projects/{id}                                   get, replace, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/users", user::router())
        .nest("/projects", project::router())
}
