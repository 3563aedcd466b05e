use tracing::warn;

use crate::store::StoreResult;

/// Public page sections render empty rather than failing the page.
pub fn empty_on_error<T>(result: StoreResult<Vec<T>>, section: &'static str) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(e) => {
            warn!(section, error = %e, "Store read failed; serving an empty list");
            Vec::new()
        }
    }
}
