use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::init::state::DeploymentEnvironment;

pub const SESSION_COOKIE: &str = "session_id";

/// Login and logout must build the cookie with the same attributes, or the
/// browser keeps the old one.
pub fn session_cookie(value: String, env: DeploymentEnvironment) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(env.secure_cookies())
        .same_site(SameSite::Strict)
        .build()
}
