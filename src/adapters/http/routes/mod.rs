pub mod admin;
pub mod waitlist;

use axum::{Router, middleware};

use crate::adapters::http::{app_state::AppState, middleware::require_admin_token};

pub fn router(app_state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/waitlist", waitlist::router())
        .nest(
            "/admin/waitlist",
            admin::router().route_layer(middleware::from_fn_with_state(
                app_state,
                require_admin_token,
            )),
        )
}
