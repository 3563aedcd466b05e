use super::domain_traits::Filterable;

/// Selector value that turns an `Exact` filter off.
pub const ALL: &str = "All";

#[derive(Clone, Debug, PartialEq)]
pub enum RecordFilter {
    /// Case-insensitive substring match on any of `fields`. Blank terms match everything.
    Search {
        term: String,
        fields: Vec<&'static str>,
    },
    /// Exact match on `field`. A missing field reads as `default` when one is given.
    Exact {
        field: &'static str,
        value: String,
        default: Option<&'static str>,
    },
}

impl RecordFilter {
    pub fn search(term: Option<&str>, fields: &[&'static str]) -> Self {
        RecordFilter::Search {
            term: term.unwrap_or_default().trim().to_lowercase(),
            fields: fields.to_vec(),
        }
    }

    pub fn exact(field: &'static str, value: Option<&str>, default: Option<&'static str>) -> Self {
        RecordFilter::Exact {
            field,
            value: value.unwrap_or(ALL).trim().to_owned(),
            default,
        }
    }

    pub fn is_noop(&self) -> bool {
        match self {
            RecordFilter::Search { term, .. } => term.is_empty(),
            RecordFilter::Exact { value, .. } => value.is_empty() || value == ALL,
        }
    }

    pub fn matches<T: Filterable>(&self, item: &T) -> bool {
        if self.is_noop() {
            return true;
        }
        match self {
            RecordFilter::Search { term, fields } => fields.iter().any(|field| {
                item.filter_field(field)
                    .is_some_and(|text| text.to_lowercase().contains(term.as_str()))
            }),
            RecordFilter::Exact {
                field,
                value,
                default,
            } => item.filter_field(field).or(*default) == Some(value.as_str()),
        }
    }
}

/// Keeps the items every filter accepts, in their original order.
pub fn apply_filters<T: Filterable>(items: Vec<T>, filters: &[RecordFilter]) -> Vec<T> {
    items
        .into_iter()
        .filter(|item| filters.iter().all(|f| f.matches(item)))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    struct Item(HashMap<&'static str, &'static str>);

    impl Filterable for Item {
        fn filter_field(&self, field: &str) -> Option<&str> {
            self.0.get(field).copied()
        }
    }

    fn item(pairs: &[(&'static str, &'static str)]) -> Item {
        Item(pairs.iter().copied().collect())
    }

    fn titles(items: &[Item]) -> Vec<&str> {
        items.iter().filter_map(|i| i.filter_field("title")).collect()
    }

    fn catalog() -> Vec<Item> {
        vec![
            item(&[("title", "Museum Guide"), ("category", "Education"), ("reality_type", "AR")]),
            item(&[("title", "Space Walk"), ("category", "Games"), ("reality_type", "VR")]),
            item(&[("title", "Factory Twin"), ("category", "Industry")]),
            item(&[("title", "Moon Museum"), ("category", "Games"), ("reality_type", "MR")]),
        ]
    }

    #[test]
    fn search_is_case_insensitive_over_any_field() {
        let filters = [RecordFilter::search(Some("MUSEUM"), &["title", "description"])];
        let out = apply_filters(catalog(), &filters);
        assert_eq!(titles(&out), vec!["Museum Guide", "Moon Museum"]);
    }

    #[test]
    fn blank_search_and_all_selector_match_everything() {
        let filters = [
            RecordFilter::search(Some("   "), &["title"]),
            RecordFilter::exact("category", Some(ALL), None),
            RecordFilter::exact("reality_type", None, Some("AR")),
        ];
        assert_eq!(apply_filters(catalog(), &filters).len(), 4);
    }

    #[test]
    fn missing_field_reads_as_default() {
        let filters = [RecordFilter::exact("reality_type", Some("AR"), Some("AR"))];
        let out = apply_filters(catalog(), &filters);
        assert_eq!(titles(&out), vec!["Museum Guide", "Factory Twin"]);
    }

    #[test]
    fn filters_compose_like_sequential_application() {
        let p1 = RecordFilter::exact("category", Some("Games"), None);
        let p2 = RecordFilter::search(Some("moon"), &["title"]);

        let both = apply_filters(catalog(), &[p1.clone(), p2.clone()]);
        let chained = apply_filters(apply_filters(catalog(), &[p1]), &[p2]);

        assert_eq!(titles(&both), titles(&chained));
        assert_eq!(titles(&both), vec!["Moon Museum"]);
    }

    #[test]
    fn order_is_preserved() {
        let filters = [RecordFilter::search(Some("m"), &["title"])];
        let out = apply_filters(catalog(), &filters);
        assert_eq!(titles(&out), vec!["Museum Guide", "Moon Museum"]);
    }
}
