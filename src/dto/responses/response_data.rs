use axum::response::IntoResponse;
use axum_extra::extract::{CookieJar, cookie::Cookie};
use serde_derive::Serialize;

use super::response_meta::ResponseMeta;

#[derive(Serialize)]
pub struct Response<D: serde::Serialize, M: serde::Serialize> {
    success: bool,
    data: D,
    meta: ResponseMeta<M>,
}

impl<D: serde::Serialize, M: serde::Serialize> IntoResponse for Response<D, M> {
    fn into_response(self) -> axum::response::Response {
        axum::response::Json(self).into_response()
    }
}

pub fn http_resp<D: serde::Serialize, M: serde::Serialize>(
    data: D,
    meta: M,
    start: tokio::time::Instant,
) -> Response<D, M> {
    Response {
        success: true,
        data,
        meta: ResponseMeta::from(start, meta),
    }
}

/// Same envelope as `http_resp`, with cookies set and/or removed on the way out.
/// Removal cookies must carry the path and domain they were set with.
pub fn http_resp_with_cookies<D: serde::Serialize, M: serde::Serialize>(
    data: D,
    meta: M,
    start: tokio::time::Instant,
    cookies_to_set: Option<Vec<Cookie<'static>>>,
    cookies_to_unset: Option<Vec<Cookie<'static>>>,
) -> impl IntoResponse {
    let mut jar = CookieJar::new();

    for cookie in cookies_to_set.unwrap_or_default() {
        jar = jar.add(cookie);
    }
    // A fresh jar has no original cookies to remove, so removal cookies are added.
    for mut cookie in cookies_to_unset.unwrap_or_default() {
        cookie.make_removal();
        jar = jar.add(cookie);
    }

    (jar, http_resp(data, meta, start))
}
