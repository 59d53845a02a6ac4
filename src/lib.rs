pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod notify;
pub mod services;
pub mod state;
pub mod uploads;

#[cfg(test)]
pub mod testing;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use state::AppState;

/// Headroom for the text fields and boundaries around an uploaded file
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the complete router over an already constructed state
pub fn app(state: AppState) -> Router {
    let body_limit = state.submissions.uploads().max_bytes() + MULTIPART_OVERHEAD_BYTES;

    let mut router = Router::new()
        // Public
        .route("/", get(handlers::public::root))
        .route("/health", get(handlers::public::health))
        .nest("/api", public_auth_routes())
        .nest("/users/staff", staff_routes(state.clone()))
        .nest("/users/admin", admin_routes(state.clone()))
        .layer(DefaultBodyLimit::max(body_limit));

    if state.config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    if state.config.security.enable_cors {
        router = router.layer(cors_layer(&state));
    }

    router.with_state(state)
}

fn public_auth_routes() -> Router<AppState> {
    use handlers::public::auth;

    Router::new()
        .route("/staff/signup", post(auth::staff_signup))
        .route("/staff/login", post(auth::staff_login))
        .route("/admin/signup", post(auth::admin_signup))
        .route("/admin/login", post(auth::admin_login))
}

fn staff_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::staff;

    Router::new()
        .route(
            "/profile",
            get(staff::profile_get).put(staff::profile_put).delete(staff::profile_delete),
        )
        .route("/leave", post(staff::leave_post))
        .route("/leaveResponce", get(staff::leave_responses_get))
        .route("/submitTLMs", post(staff::tlm_post))
        .route("/submitTALMs", post(staff::talm_post))
        .route("/suggestions", post(staff::suggestions_post))
        .route("/announcements", get(staff::announcements_get))
        .route_layer(ServiceBuilder::new().layer(from_fn_with_state(state, middleware::require_staff)))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    use axum::routing::delete;
    use handlers::elevated::admin;

    Router::new()
        .route("/addStaff", post(admin::staff_add_post))
        .route("/staffProfiles", get(admin::staff_list_get))
        .route("/staffProfiles/:id", get(admin::staff_show_get))
        .route("/leaveApplications", get(admin::leave_list_get))
        .route("/leaveApplications/:id", put(admin::leave_decide_put))
        .route("/LeaveApplication/approve", put(admin::leave_approve_put))
        .route("/LeaveApplication/reject", put(admin::leave_reject_put))
        .route("/viewTLMs", get(admin::tlm_list_get))
        .route("/viewTALMs", get(admin::talm_list_get))
        .route("/viewSuggestions", get(admin::suggestions_get))
        .route("/announcement", get(admin::announcement_get).post(admin::announcement_post))
        .route("/delete", delete(admin::staff_delete))
        .route("/stats", get(admin::stats_get))
        .route_layer(ServiceBuilder::new().layer(from_fn_with_state(state, middleware::require_admin)))
}

fn cors_layer(state: &AppState) -> CorsLayer {
    if state.config.is_development() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = state
        .config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new().allow_origin(origins).allow_methods(Any).allow_headers(Any)
}
