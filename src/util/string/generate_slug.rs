/// Turns a post title into its base slug.
///
/// Lowercases and trims the title, collapses every run of characters outside
/// `[a-z0-9]` into a single `-`, then strips `-` from both ends. The result
/// may be empty when the title has no ASCII letters or digits at all.
pub fn generate_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut in_gap = false;

    for c in lowered.trim().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if in_gap && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c);
            in_gap = false;
        } else {
            in_gap = true;
        }
    }

    slug
}

/// True when `slug` only holds `[a-z0-9]` groups joined by single hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .split('-')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()))
}
