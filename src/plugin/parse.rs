use async_trait::async_trait;

use crate::{context::ResolveContext, hook::{Step, StepOutcome}, hooks, request::ResolveRequest, resolver::Resolver};

/// Splits a raw request into path, query (`?...`), and fragment (`#...`).
/// A leading `#` is left alone: that marks an internal specifier
/// (§3 `PathKind::Internal`), not a fragment.
pub struct ParsePlugin;

#[async_trait]
impl Step for ParsePlugin {
    fn name(&self) -> &'static str {
        "ParsePlugin"
    }

    async fn apply(&self, resolver: &Resolver, request: ResolveRequest, ctx: &mut ResolveContext) -> StepOutcome {
        let (path, query, fragment) = split(&request.request);
        let mut next = request.with_target(path);
        next.query = query;
        next.fragment = fragment;
        resolver
            .do_resolve(hooks::PARSED_RESOLVE, next, "parsed request".to_string(), ctx)
            .await
    }
}

fn split(raw: &str) -> (String, String, String) {
    if let Some(rest) = raw.strip_prefix('#') {
        let (path, query) = split_query(rest);
        (format!("#{path}"), query, String::new())
    } else if let Some(hash) = raw.find('#') {
        let (before, after) = raw.split_at(hash);
        let (path, query) = split_query(before);
        (path, query, after[1..].to_string())
    } else {
        let (path, query) = split_query(raw);
        (path, query, String::new())
    }
}

fn split_query(s: &str) -> (String, String) {
    match s.find('?') {
        Some(idx) => (s[..idx].to_string(), s[idx + 1..].to_string()),
        None => (s.to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_query_and_fragment() {
        assert_eq!(
            split("./foo.js?bar#baz"),
            ("./foo.js".to_string(), "bar".to_string(), "baz".to_string())
        );
        assert_eq!(split("#internal/thing"), ("#internal/thing".to_string(), String::new(), String::new()));
        assert_eq!(split("lodash"), ("lodash".to_string(), String::new(), String::new()));
    }
}
