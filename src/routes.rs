// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{questions, students},
    state::AppState,
};

/// Assembles the main application router.
///
/// * One sub-router per screen (questions, students).
/// * Applies global middleware (Trace, CORS).
/// * Injects the screen controllers.
pub fn create_router(state: AppState) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:19006"),
        HeaderValue::from_static("http://localhost:8081"),
        HeaderValue::from_static("http://127.0.0.1:8081"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let question_routes = Router::new()
        .route(
            "/",
            get(questions::get_screen)
                .post(questions::create)
                .delete(questions::delete_all),
        )
        .route("/reload", post(questions::reload))
        .route("/filter", put(questions::set_filter))
        .route(
            "/selected",
            put(questions::update_selected).delete(questions::delete_selected),
        )
        .route("/{id}/select", post(questions::select))
        .route("/page/next", post(questions::next_page))
        .route("/page/prev", post(questions::previous_page));

    let student_routes = Router::new()
        .route("/", get(students::get_screen).post(students::create))
        .route("/reload", post(students::reload))
        .route(
            "/selected",
            put(students::update_selected).delete(students::delete_selected),
        )
        .route("/{id}/select", post(students::select))
        .route("/sort/{column}", post(students::sort))
        .route("/page/next", post(students::next_page))
        .route("/page/prev", post(students::previous_page));

    Router::new()
        .nest("/api/questions", question_routes)
        .nest("/api/students", student_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
