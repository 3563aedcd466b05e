//! OpenAPI documentation registration for Swagger UI.
//!
//! Important: Utoipa only exposes operations you list in `#[openapi(paths(...))]`.
//! Handler functions still need their own `#[utoipa::path(...)]` attributes.

use utoipa::OpenApi;

// ---- handlers (for `paths(...)`) ----
use crate::handlers::{
    admin::{blog, careers, contact, events, get_stats, partners, projects, screenshots},
    auth::{login, logout, me},
    blog::{delete_post, get_posts, read_post, related_posts, submit_post, update_post},
    career::{get_careers, submit_career},
    contact::submit_contact,
    event::upcoming_events,
    partner::get_partners,
    project::{featured_projects, get_projects, read_project},
    server::healthcheck,
};

// ---- schemas (for `components(schemas(...))`) ----
use crate::domain::{
    blog::blog::BlogPost,
    career::Career,
    contact::ContactSubmission,
    dashboard::DashboardStats,
    event::Event,
    partner::Partner,
    project::{Project, ProjectScreenshot, ProjectWithScreenshots, RealityType},
    screenshot::{Screenshot, ScreenshotEncoding},
};
use crate::dto::{
    requests::{
        auth::login_request::LoginRequest,
        blog::{
            screenshot_request::{ScreenshotRequest, SwapScreenshotsRequest},
            submit_post_request::SubmitPostRequest,
        },
        career::career_request::CareerRequest,
        contact::contact_request::ContactRequest,
        event::event_request::EventRequest,
        partner::partner_request::PartnerRequest,
        project::project_request::ProjectRequest,
    },
    responses::{
        auth::{login_response::LoginResponse, logout_response::LogoutResponse, me_response::MeResponse},
        delete_response::DeleteResponse,
        project::featured_projects_response::FeaturedProjectsResponse,
    },
};
use crate::errors::code_error::CodeErrorResp;
use crate::handlers::server::healthcheck::ServerHealthcheckResponse;
use crate::init::state::CurrentUser;

/// Central OpenAPI document for Swagger UI.
#[derive(OpenApi)]
#[openapi(
    // All public + protected API routes from `main_router.rs`.
    paths(
        // --- server ---
        healthcheck::healthcheck,

        // --- auth ---
        login::login,
        logout::logout,
        me::me,

        // --- blog ---
        get_posts::get_posts,
        submit_post::submit_post,
        read_post::read_post,
        update_post::update_post,
        delete_post::delete_post,
        related_posts::related_posts,

        // --- public pages ---
        get_careers::get_careers,
        submit_career::submit_career,
        get_projects::get_projects,
        featured_projects::featured_projects,
        read_project::read_project,
        get_partners::get_partners,
        upcoming_events::upcoming_events,
        submit_contact::submit_contact,

        // --- admin ---
        get_stats::get_stats,
        projects::admin_list_projects,
        projects::admin_create_project,
        projects::admin_update_project,
        projects::admin_delete_project,
        blog::admin_list_posts,
        blog::admin_create_post,
        blog::admin_update_post,
        blog::admin_delete_post,
        screenshots::list_screenshots,
        screenshots::add_post_screenshot,
        screenshots::edit_post_screenshot,
        screenshots::delete_post_screenshot,
        screenshots::swap_post_screenshots,
        partners::admin_list_partners,
        partners::admin_create_partner,
        partners::admin_update_partner,
        partners::admin_delete_partner,
        events::admin_list_events,
        events::admin_create_event,
        events::admin_update_event,
        events::admin_delete_event,
        careers::admin_list_careers,
        careers::admin_create_career,
        careers::admin_update_career,
        careers::admin_delete_career,
        contact::admin_list_contact,
    ),
    components(
        schemas(
            // shared error response
            CodeErrorResp,
            ServerHealthcheckResponse,

            // --- auth DTOs ---
            LoginRequest,
            LoginResponse,
            LogoutResponse,
            MeResponse,
            CurrentUser,

            // --- content DTOs ---
            SubmitPostRequest,
            ScreenshotRequest,
            SwapScreenshotsRequest,
            ProjectRequest,
            PartnerRequest,
            EventRequest,
            CareerRequest,
            ContactRequest,
            DeleteResponse,
            FeaturedProjectsResponse,

            // --- domain models used in responses ---
            BlogPost,
            Screenshot,
            ScreenshotEncoding,
            Project,
            ProjectScreenshot,
            ProjectWithScreenshots,
            RealityType,
            Partner,
            Event,
            Career,
            ContactSubmission,
            DashboardStats,
        )
    ),
    tags(
        (name = "server", description = "Server status endpoints"),
        (name = "auth", description = "Admin sign-in endpoints"),
        (name = "blog", description = "Blog endpoints"),
        (name = "projects", description = "Project showcase endpoints"),
        (name = "partners", description = "Partner endpoints"),
        (name = "events", description = "Event endpoints"),
        (name = "careers", description = "Career listing endpoints"),
        (name = "contact", description = "Contact form endpoints"),
        (name = "admin", description = "Admin content management endpoints")
    )
)]
pub struct ApiDoc;
