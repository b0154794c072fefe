//! HTTP span helpers.

use uuid::Uuid;

/// Collections whose next path segment is a slug.
const SLUG_COLLECTIONS: [&str; 2] = ["categories", "products"];

/// Static routes that share a prefix with a slug route.
const STATIC_SEGMENTS: [&str; 1] = ["featured"];

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) otel_path: String,
    pub(super) otel_span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let otel_path = normalise_path_for_span_name(path);
    let otel_span_name = format!("{method} {otel_path}");

    RequestSpanName {
        otel_path,
        otel_span_name,
    }
}

/// Replace identifiers with placeholders so spans and metric labels stay low-cardinality.
fn normalise_path_for_span_name(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");
    let mut previous: Option<&str> = None;

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if Uuid::parse_str(segment).is_ok() {
            normalised.push_str("{uuid}");
        } else if index == 1
            && previous.is_some_and(|collection| SLUG_COLLECTIONS.contains(&collection))
            && !STATIC_SEGMENTS.contains(&segment)
        {
            normalised.push_str("{slug}");
        } else {
            normalised.push_str(segment);
        }

        previous = Some(segment);
    }

    normalised
}
