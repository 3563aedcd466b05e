use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use tracing::info;

use crate::{
    domain::auth::admin_user::find_admin_by_email,
    dto::{
        requests::auth::login_request::LoginRequest,
        responses::{auth::login_response::LoginResponse, response_data::http_resp_with_cookies},
    },
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err, store_err},
    init::state::{CurrentUser, ServerState},
    util::{crypto::verify_pw::verify_pw, time::now::tokio_now},
};

use super::session_cookie::session_cookie;

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful; sets the session cookie", body = LoginResponse),
        (status = 400, description = "Malformed email", body = CodeErrorResp),
        (status = 401, description = "Wrong email or password", body = CodeErrorResp),
        (status = 503, description = "Store unavailable", body = CodeErrorResp)
    )
)]
pub async fn login(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<LoginRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    if !email_address::EmailAddress::is_valid(request.email.trim()) {
        return Err(CodeError::EMAIL_INVALID.into());
    }

    let admin = find_admin_by_email(state.store(), &request.email)
        .await
        .map_err(|e| store_err(CodeError::DB_QUERY_ERROR, e))?
        .ok_or_else(|| code_err(CodeError::WRONG_CREDENTIALS, "no admin with that email"))?;

    match verify_pw(&request.password, &admin.password_hash).await {
        Ok(true) => (),
        Ok(false) => return Err(code_err(CodeError::WRONG_CREDENTIALS, "wrong password")),
        Err(e) => return Err(code_err(CodeError::COULD_NOT_VERIFY_PW, e)),
    }

    let session_id = state
        .new_session(&admin)
        .await
        .map_err(|e| code_err(CodeError::SESSION_ID_ALREADY_EXISTS, e))?;

    info!(admin_id = %admin.id, session_count = state.get_session_length(), "Admin logged in");

    let cookie = session_cookie(session_id.to_string(), state.get_deployment_environment());
    let current = CurrentUser {
        admin_id: admin.id,
        email: admin.email,
        name: admin.name,
    };

    Ok(http_resp_with_cookies(
        LoginResponse {
            message: "Login successful".to_owned(),
            admin: current,
        },
        (),
        start,
        Some(vec![cookie]),
        None,
    ))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::{
        domain::auth::admin_user::create_admin,
        handlers::test_support::{memory_state, read_json},
    };

    fn body(email: &str, password: &str) -> Json<LoginRequest> {
        Json(LoginRequest {
            email: email.to_owned(),
            password: password.to_owned(),
        })
    }

    #[tokio::test]
    async fn correct_credentials_open_a_session() {
        let state = memory_state();
        create_admin(state.store(), "Admin@LumenGaze.test", "Admin", "correct horse".to_owned())
            .await
            .unwrap();

        let response = login(State(state.clone()), body("admin@lumengaze.test", "correct horse"))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response.headers()["set-cookie"].to_str().unwrap().to_owned();
        assert!(set_cookie.starts_with("session_id="));
        assert!(set_cookie.contains("HttpOnly"));
        assert_eq!(state.get_session_length(), 1);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let state = memory_state();
        create_admin(state.store(), "admin@lumengaze.test", "Admin", "correct horse".to_owned())
            .await
            .unwrap();

        let (wrong_pw, a) = read_json(login(State(state.clone()), body("admin@lumengaze.test", "nope")).await).await;
        let (unknown, b) = read_json(login(State(state.clone()), body("who@lumengaze.test", "nope")).await).await;

        assert_eq!(wrong_pw, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown, StatusCode::UNAUTHORIZED);
        assert_eq!(a["message"], b["message"]);
        assert_eq!(state.get_session_length(), 0);
    }
}
