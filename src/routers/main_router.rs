use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    docs::ApiDoc,
    handlers::{
        admin::{
            blog::{admin_create_post, admin_delete_post, admin_list_posts, admin_update_post},
            careers::{
                admin_create_career, admin_delete_career, admin_list_careers, admin_update_career,
            },
            contact::admin_list_contact,
            events::{admin_create_event, admin_delete_event, admin_list_events, admin_update_event},
            get_stats::get_stats,
            partners::{
                admin_create_partner, admin_delete_partner, admin_list_partners,
                admin_update_partner,
            },
            projects::{
                admin_create_project, admin_delete_project, admin_list_projects,
                admin_update_project,
            },
            screenshots::{
                add_post_screenshot, delete_post_screenshot, edit_post_screenshot,
                list_screenshots, swap_post_screenshots,
            },
        },
        auth::{login::login, logout::logout, me::me},
        blog::{
            delete_post::delete_post, get_posts::get_posts, read_post::read_post,
            related_posts::related_posts, submit_post::submit_post, update_post::update_post,
        },
        career::{get_careers::get_careers, submit_career::submit_career},
        contact::submit_contact::submit_contact,
        event::upcoming_events::upcoming_events,
        partner::get_partners::get_partners,
        project::{
            featured_projects::featured_projects, get_projects::get_projects,
            read_project::read_project,
        },
        server::{fallback::fallback_handler, healthcheck::healthcheck},
    },
    init::state::ServerState,
};

use super::middleware::{
    auth::auth_middleware, is_logged_in::is_logged_in_middleware, logging::log_middleware,
};

const MAX_REQUEST_SIZE: usize = 1024 * 1024 * 2; // 2MB; content is JSON only

pub fn build_router(state: Arc<ServerState>) -> axum::Router {
    let auth_middleware = from_fn_with_state(state.clone(), auth_middleware);
    let log_middleware = from_fn_with_state(state.clone(), log_middleware);
    let is_logged_in_middleware = from_fn_with_state(state.clone(), is_logged_in_middleware);
    let compression_middleware = CompressionLayer::new().gzip(true).zstd(true);
    let cors_layer = CorsLayer::very_permissive();

    // Publicly accessible API routes
    let public_router = Router::new()
        .route("/api/healthcheck/server", get(healthcheck))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/blog", get(get_posts))
        .route("/api/blog/{slug}", get(read_post))
        .route("/api/blog/{slug}/related", get(related_posts))
        .route("/api/careers", get(get_careers).post(submit_career))
        .route("/api/projects", get(get_projects))
        .route("/api/projects/featured", get(featured_projects))
        .route("/api/projects/{id}", get(read_project))
        .route("/api/partners", get(get_partners))
        .route("/api/events/upcoming", get(upcoming_events))
        .route("/api/contact", post(submit_contact));

    // API routes requiring an admin session
    let protected_router = Router::new()
        .route("/api/auth/me", get(me))
        .route("/api/blog", post(submit_post))
        .route("/api/blog/{slug}", put(update_post).delete(delete_post))
        .route("/api/admin/stats", get(get_stats))
        .route(
            "/api/admin/projects",
            get(admin_list_projects).post(admin_create_project),
        )
        .route(
            "/api/admin/projects/{id}",
            put(admin_update_project).delete(admin_delete_project),
        )
        .route("/api/admin/blog", get(admin_list_posts).post(admin_create_post))
        .route(
            "/api/admin/blog/{id}",
            put(admin_update_post).delete(admin_delete_post),
        )
        .route(
            "/api/admin/blog/{id}/screenshots",
            get(list_screenshots).post(add_post_screenshot),
        )
        .route(
            "/api/admin/blog/{id}/screenshots/swap",
            post(swap_post_screenshots),
        )
        .route(
            "/api/admin/blog/{id}/screenshots/{index}",
            put(edit_post_screenshot).delete(delete_post_screenshot),
        )
        .route(
            "/api/admin/partners",
            get(admin_list_partners).post(admin_create_partner),
        )
        .route(
            "/api/admin/partners/{id}",
            put(admin_update_partner).delete(admin_delete_partner),
        )
        .route(
            "/api/admin/events",
            get(admin_list_events).post(admin_create_event),
        )
        .route(
            "/api/admin/events/{id}",
            put(admin_update_event).delete(admin_delete_event),
        )
        .route(
            "/api/admin/careers",
            get(admin_list_careers).post(admin_create_career),
        )
        .route(
            "/api/admin/careers/{id}",
            put(admin_update_career).delete(admin_delete_career),
        )
        .route("/api/admin/contact", get(admin_list_contact))
        .layer(auth_middleware);

    // Combine all API routes and apply shared middleware
    Router::new()
        .merge(public_router)
        .merge(protected_router)
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
        .fallback(fallback_handler)
        .layer(is_logged_in_middleware)
        .layer(compression_middleware)
        .layer(log_middleware)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_SIZE))
        .layer(cors_layer)
        .with_state(state)
}
