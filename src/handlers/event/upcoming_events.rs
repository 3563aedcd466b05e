use std::sync::Arc;

use axum::{extract::State, response::IntoResponse};

use crate::{
    domain::{
        domain_traits::list_content,
        event::{Event, upcoming_events_query},
    },
    dto::responses::response_data::http_resp,
    errors::code_error::HandlerResponse,
    handlers::degrade::empty_on_error,
    init::state::ServerState,
    util::time::now::tokio_now,
};

pub const UPCOMING_EVENTS_LIMIT: usize = 3;

#[utoipa::path(
    get,
    path = "/api/events/upcoming",
    tag = "events",
    responses(
        (status = 200, description = "Next events, soonest first", body = Vec<Event>)
    )
)]
pub async fn upcoming_events(
    State(state): State<Arc<ServerState>>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let events = empty_on_error(
        list_content::<Event>(state.store(), &upcoming_events_query(UPCOMING_EVENTS_LIMIT)).await,
        "upcoming_events",
    );

    Ok(http_resp(events, (), start))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::handlers::test_support::{read_json, unavailable_state};

    #[tokio::test]
    async fn store_outage_degrades_to_an_empty_list() {
        let (status, body) = read_json(upcoming_events(State(unavailable_state())).await).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], serde_json::json!([]));
    }
}
