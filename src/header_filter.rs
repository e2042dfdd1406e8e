use crate::{
    config::{self, HeaderPolicy, MASK},
    data::Headers,
};

/// Applies the process-wide header policy: headers outside the allow-list are
/// dropped, sensitive header values are masked, keys come out lowercase.
pub fn filter_headers(headers: &Headers) -> Headers {
    filter_headers_with(&config::header_policy(), headers)
}

pub fn filter_headers_with(policy: &HeaderPolicy, headers: &Headers) -> Headers {
    headers
        .iter()
        .filter(|(name, _)| policy.includes(name))
        .map(|(name, value)| {
            let name = name.to_lowercase();
            let value = if policy.is_sensitive(&name) {
                MASK.to_string()
            } else {
                value.clone()
            };
            (name, value)
        })
        .collect()
}
