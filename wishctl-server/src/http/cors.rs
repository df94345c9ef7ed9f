//! Cross-origin access control
//!
//! Origins come from `CORS_ORIGINS` (see [`crate::config::parse_origins`]).
//! An entry of `*` admits any origin and anything else must match exactly.
//! On top of that, an entry with one `*` inside, such as
//! `https://*.example.com`, is a pattern: the `*` stands for any non-empty
//! text in that spot.
//! Credentials are allowed, so the matching origin is echoed back instead of
//! a literal `*`.

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

/// One compiled allow-list entry
#[derive(Debug, Clone, PartialEq, Eq)]
enum OriginRule {
    Any,
    Exact(String),
    Pattern { prefix: String, suffix: String },
}

impl OriginRule {
    fn parse(entry: &str) -> Option<Self> {
        let entry = entry.trim().trim_end_matches('/');
        if entry == "*" {
            return Some(Self::Any);
        }

        match entry.split_once('*') {
            None => Some(Self::Exact(entry.to_owned())),
            Some((prefix, suffix)) if !suffix.contains('*') => Some(Self::Pattern {
                prefix: prefix.to_owned(),
                suffix: suffix.to_owned(),
            }),
            Some(_) => None,
        }
    }

    fn matches(&self, origin: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(allowed) => allowed == origin,
            Self::Pattern { prefix, suffix } => {
                origin.len() > prefix.len() + suffix.len()
                    && origin.starts_with(prefix.as_str())
                    && origin.ends_with(suffix.as_str())
            }
        }
    }
}

fn compile(origins: &[String]) -> Vec<OriginRule> {
    origins
        .iter()
        .filter_map(|entry| {
            let rule = OriginRule::parse(entry);
            if rule.is_none() {
                tracing::warn!(origin = %entry, "CORS: ignoring origin with more than one wildcard");
            }
            rule
        })
        .collect()
}

/// Build the CORS layer applied to every route.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let rules = compile(origins);
    if rules.contains(&OriginRule::Any) {
        tracing::info!("CORS: all origins allowed");
    } else {
        tracing::info!(?origins, "CORS: restricted origin list");
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            origin
                .to_str()
                .map(|o| rules.iter().any(|rule| rule.matches(o)))
                .unwrap_or(false)
        }))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
