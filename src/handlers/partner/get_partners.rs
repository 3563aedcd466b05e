use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
};

use crate::{
    domain::{
        domain_traits::{ContentKind, list_content},
        partner::Partner,
    },
    dto::{requests::partner::partner_request::GetPartnersQuery, responses::response_data::http_resp},
    errors::code_error::HandlerResponse,
    handlers::degrade::empty_on_error,
    init::state::ServerState,
    util::time::now::tokio_now,
};

pub const DEFAULT_PARTNERS_LIMIT: usize = 6;

#[utoipa::path(
    get,
    path = "/api/partners",
    tag = "partners",
    params(GetPartnersQuery),
    responses(
        (status = 200, description = "Newest partners, six unless `limit` says otherwise", body = Vec<Partner>)
    )
)]
pub async fn get_partners(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<GetPartnersQuery>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let limit = query.limit.unwrap_or(DEFAULT_PARTNERS_LIMIT);
    let partners = empty_on_error(
        list_content::<Partner>(state.store(), &Partner::default_query().limit(limit)).await,
        "partners",
    );

    Ok(http_resp(partners, (), start))
}
