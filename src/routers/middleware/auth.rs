use std::{str::FromStr, sync::Arc};

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::{
    errors::code_error::{CodeError, HandlerResponse, code_err},
    handlers::auth::session_cookie::SESSION_COOKIE,
    init::state::ServerState,
};

/// Rejects requests without a live session. Handlers behind it can take
/// `Extension<CurrentUser>` and `Extension<Session>`.
pub async fn auth_middleware(
    State(state): State<Arc<ServerState>>,
    cookie_jar: CookieJar,
    mut request: Request<Body>,
    next: Next,
) -> HandlerResponse<impl IntoResponse> {
    let session_id = match cookie_jar.get(SESSION_COOKIE) {
        Some(session_cookie) => match Uuid::from_str(session_cookie.value()) {
            Ok(session_id) => session_id,
            Err(e) => return Err(code_err(CodeError::UNAUTHORIZED_ACCESS, e)),
        },
        None => return Err(CodeError::UNAUTHORIZED_ACCESS.into()),
    };

    let session = match state.get_session(&session_id).await {
        Ok(session) => session,
        Err(e) => return Err(code_err(CodeError::UNAUTHORIZED_ACCESS, e)),
    };

    if !session.is_valid() {
        return Err(code_err(CodeError::UNAUTHORIZED_ACCESS, "Session expired"));
    }

    request.extensions_mut().insert(session.current_user());
    request.extensions_mut().insert(session);

    let response = next.run(request).await;

    Ok(response)
}
