use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::QueryPairs;

/// Unreserved characters stay as-is inside the `{id}` path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid origin {value:?}: {reason}")]
    InvalidOrigin { value: String, reason: String },
}

/// Protocol and host of the context the playground is served from, in the
/// same shape a browser reports them (`"https:"`, `"example.com:8080"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub protocol: String,
    pub host: String,
}

impl Origin {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidOrigin {
            value: value.to_string(),
            reason,
        };
        let url = url::Url::parse(value.trim()).map_err(|err| invalid(err.to_string()))?;
        let host = url
            .host_str()
            .ok_or_else(|| invalid("missing host".to_string()))?;
        let host = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        Ok(Self {
            protocol: format!("{}:", url.scheme()),
            host,
        })
    }
}

/// Where the externally visible API lives.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ApiBase {
    /// Absolute base configured at startup, without a trailing slash.
    Configured(String),
    /// Same-origin deployment.
    SameOrigin(Origin),
    /// Neither a base nor an origin is known; URLs stay relative.
    #[default]
    Relative,
}

impl ApiBase {
    /// Resolves the base once from the optional configured value and the
    /// optional serving origin. A configured value without an `http(s)://`
    /// scheme and a host counts as absent.
    pub fn resolve(configured: Option<&str>, origin: Option<Origin>) -> Self {
        let configured = configured
            .map(str::trim)
            .filter(|value| has_recognized_scheme(value));
        match (configured, origin) {
            (Some(host), _) => ApiBase::Configured(host.trim_end_matches('/').to_string()),
            (None, Some(origin)) => ApiBase::SameOrigin(origin),
            (None, None) => ApiBase::Relative,
        }
    }

    /// Absolute prefix placed before `/sheet/...`; empty for [`ApiBase::Relative`].
    pub fn prefix(&self) -> String {
        match self {
            ApiBase::Configured(host) => host.clone(),
            ApiBase::SameOrigin(origin) => format!("{}//{}", origin.protocol, origin.host),
            ApiBase::Relative => String::new(),
        }
    }

    /// Base that backend requests can be sent to, if one is known.
    pub fn request_base(&self) -> Option<String> {
        match self {
            ApiBase::Relative => None,
            _ => Some(self.prefix()),
        }
    }
}

fn has_recognized_scheme(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return false;
    }
    url::Url::parse(value)
        .map(|url| url.host_str().is_some_and(|host| !host.is_empty()))
        .unwrap_or(false)
}

/// Process-wide settings, built once at startup and handed to the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaygroundConfig {
    pub api_base: ApiBase,
}

impl PlaygroundConfig {
    pub fn new(configured_base: Option<&str>, origin: Option<Origin>) -> Self {
        Self {
            api_base: ApiBase::resolve(configured_base, origin),
        }
    }
}

/// `/sheet/{id}` followed by the serialized query, if any. The id is
/// percent-encoded as a single path segment.
pub fn sheet_path(spreadsheet_id: &str, query: &QueryPairs) -> String {
    let spreadsheet_id = utf8_percent_encode(spreadsheet_id, PATH_SEGMENT);
    let query = query.to_query_string();
    if query.is_empty() {
        format!("/sheet/{spreadsheet_id}")
    } else {
        format!("/sheet/{spreadsheet_id}?{query}")
    }
}

/// The API URL shown to the user for a spreadsheet and query.
pub fn build_api_url(base: &ApiBase, spreadsheet_id: &str, query: &QueryPairs) -> String {
    format!("{}{}", base.prefix(), sheet_path(spreadsheet_id, query))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{build_api_url, sheet_path, ApiBase, ConfigError, Origin};
    use crate::{QueryPairs, QueryParams, SheetReference, SheetSelector};

    fn sample_query() -> QueryPairs {
        let reference = SheetReference::new("abc", SheetSelector::ById(5));
        QueryPairs::for_sheet(
            &reference,
            &QueryParams {
                offset: Some(20),
                limit: None,
                row: Some(3),
            },
        )
    }

    #[test]
    fn configured_host_is_used_as_prefix() {
        let base = ApiBase::resolve(Some("https://api.example.com/"), None);
        assert_eq!(base, ApiBase::Configured("https://api.example.com".to_string()));
        assert_eq!(
            build_api_url(&base, "abc", &sample_query()),
            "https://api.example.com/sheet/abc?sheet_id=5&offset=20&row=3"
        );
    }

    #[test]
    fn unrecognized_scheme_falls_back_to_origin() {
        let origin = Origin::parse("http://localhost:4000").unwrap();
        let base = ApiBase::resolve(Some("api.example.com"), Some(origin));
        assert_eq!(
            build_api_url(&base, "abc", &sample_query()),
            "http://localhost:4000/sheet/abc?sheet_id=5&offset=20&row=3"
        );
    }

    #[test]
    fn configured_base_without_host_is_ignored() {
        assert_eq!(ApiBase::resolve(Some("http://"), None), ApiBase::Relative);
        assert_eq!(ApiBase::resolve(Some("https:///"), None), ApiBase::Relative);

        let origin = Origin::parse("http://localhost:4000").unwrap();
        let base = ApiBase::resolve(Some("http://"), Some(origin));
        assert_eq!(
            build_api_url(&base, "abc", &QueryPairs::new()),
            "http://localhost:4000/sheet/abc"
        );
    }

    #[test]
    fn spreadsheet_id_is_escaped_in_path() {
        assert_eq!(sheet_path("1AbC-x_9", &QueryPairs::new()), "/sheet/1AbC-x_9");
        assert_eq!(
            sheet_path("a?b#c/d", &sample_query()),
            "/sheet/a%3Fb%23c%2Fd?sheet_id=5&offset=20&row=3"
        );
    }

    #[test]
    fn no_context_gives_relative_path() {
        let base = ApiBase::resolve(None, None);
        assert_eq!(base.request_base(), None);
        assert_eq!(
            build_api_url(&base, "abc", &QueryPairs::new()),
            "/sheet/abc"
        );
    }

    #[test]
    fn identical_inputs_give_identical_urls() {
        let base = ApiBase::resolve(Some("HTTPS://Api.Example.com"), None);
        let first = build_api_url(&base, "abc", &sample_query());
        let second = build_api_url(&base, "abc", &sample_query());
        assert_eq!(first, second);
    }

    #[test]
    fn origin_keeps_browser_shape() {
        let origin = Origin::parse("https://play.example.com").unwrap();
        assert_eq!(origin.protocol, "https:");
        assert_eq!(origin.host, "play.example.com");
        assert!(matches!(
            Origin::parse("not a url"),
            Err(ConfigError::InvalidOrigin { .. })
        ));
    }
}
