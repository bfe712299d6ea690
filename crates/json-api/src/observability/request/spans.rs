//! HTTP span helpers.

use portal_app::domain::portal::token::ACCESS_TOKEN_HEX_CHARS;
use uuid::Uuid;

const TOKEN_PLACEHOLDER: &str = "{token}";

/// Path segment that precedes an access token in emailed links.
const ACCESS_LINK_PREFIX: &str = "client";

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

/// Replace access tokens in a request path so they never reach logs or traces.
///
/// Whatever follows `/client/` is treated as a token, even when it is padded or
/// percent-encoded, because the validator still accepts those forms.
pub(super) fn redact_path(path: &str) -> String {
    map_segments(path, |previous, segment| {
        is_token_position(previous, segment).then_some(TOKEN_PLACEHOLDER)
    })
}

fn normalise_path_for_span_name(path: &str) -> String {
    map_segments(path, |previous, segment| {
        if is_token_position(previous, segment) || segment == TOKEN_PLACEHOLDER {
            Some(TOKEN_PLACEHOLDER)
        } else if Uuid::parse_str(segment).is_ok() {
            Some("{uuid}")
        } else {
            None
        }
    })
}

fn map_segments(
    path: &str,
    replace: impl Fn(Option<&str>, &str) -> Option<&'static str>,
) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut mapped = String::from("/");
    let mut previous = None;

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            mapped.push('/');
        }

        mapped.push_str(replace(previous, segment).unwrap_or(segment));
        previous = Some(segment);
    }

    mapped
}

fn is_token_position(previous: Option<&str>, segment: &str) -> bool {
    let follows_link_prefix = previous == Some(ACCESS_LINK_PREFIX) && !segment.is_empty();

    follows_link_prefix || looks_like_access_token(segment)
}

fn looks_like_access_token(segment: &str) -> bool {
    segment.len() == ACCESS_TOKEN_HEX_CHARS && segment.bytes().all(|byte| byte.is_ascii_hexdigit())
}
