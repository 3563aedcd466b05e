use uuid::Uuid;

use crate::{
    store::{Collection, Filter, Query, StoreClient, StoreResult},
    util::string::generate_slug::is_valid_slug,
};

/// How many times a post write is retried when another writer took the slug
/// between our probe and our write.
pub const SLUG_WRITE_ATTEMPTS: u32 = 5;

/// Finds the first free slug in `base`, `base-1`, `base-2`, ...
///
/// A candidate is free when no post holds it, or when the only holder is
/// `exclude_id` (the post being edited keeps its own slug). Probes run one
/// after another, so `n` taken candidates cost `n + 1` round-trips.
pub async fn resolve_unique_slug(
    store: &StoreClient,
    base: &str,
    exclude_id: Option<Uuid>,
) -> StoreResult<String> {
    let mut candidate = base.to_owned();
    let mut suffix: u64 = 1;

    loop {
        let query = Query::new().filter(Filter::eq("slug", candidate.as_str()));
        let holders = store.find(Collection::BlogPosts, &query).await?;

        if holders.iter().all(|holder| Some(holder.id) == exclude_id) {
            debug_assert!(is_valid_slug(&candidate), "resolved slug {candidate:?} is malformed");
            return Ok(candidate);
        }

        candidate = format!("{base}-{suffix}");
        suffix += 1;
    }
}
