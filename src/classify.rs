use serde::{Deserialize, Serialize};
use url::Url;

/// One input line's analysis result.
///
/// Exactly one of {the success fields, `error`} is populated per row; `raw`,
/// `normalized` and `length` are always present regardless of validity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRow {
    pub id: String,
    pub raw: String,
    pub normalized: String,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tld: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pathname: Option<String>,
    pub query_params: usize,
    pub has_hash: bool,
    pub length: usize,
}

/// Strictly parse a normalized candidate and extract its structured fields.
///
/// Validity is syntactic only: `https://nota-url` is a well-formed host-only
/// URL and classifies as valid even though nothing answers there. A parse
/// failure is captured as the row's `error` and never aborts the batch.
pub fn classify(id: String, raw: String, normalized: String) -> LinkRow {
    let length = normalized.chars().count();

    match Url::parse(&normalized) {
        Ok(url) => {
            let hostname = url.host_str().map(str::to_string);
            let domain = hostname.as_deref().map(strip_www);
            let tld = domain.as_deref().and_then(extract_tld);
            LinkRow {
                id,
                raw,
                is_valid: true,
                error: None,
                protocol: Some(url.scheme().to_string()),
                hostname,
                domain,
                tld,
                // The parser yields "/" for an empty path on http(s) URLs.
                pathname: Some(url.path().to_string()),
                // Raw key/value pair count in iteration order; repeated keys
                // are counted once per occurrence, not deduplicated.
                query_params: url.query_pairs().count(),
                has_hash: url.fragment().is_some_and(|f| !f.is_empty()),
                length,
                normalized,
            }
        }
        Err(e) => LinkRow {
            id,
            raw,
            normalized,
            is_valid: false,
            error: Some(e.to_string()),
            protocol: None,
            hostname: None,
            domain: None,
            tld: None,
            pathname: None,
            query_params: 0,
            has_hash: false,
            length,
        },
    }
}

/// Strip a single leading `www.` (case-insensitive). Falls back to the full
/// hostname if stripping would leave nothing.
fn strip_www(hostname: &str) -> String {
    let stripped = if hostname.len() >= 4 && hostname[..4].eq_ignore_ascii_case("www.") {
        &hostname[4..]
    } else {
        hostname
    };

    if stripped.is_empty() {
        hostname.to_string()
    } else {
        stripped.to_string()
    }
}

/// Lowercase text after the last `.`; absent when the domain has no dot.
fn extract_tld(domain: &str) -> Option<String> {
    domain
        .rfind('.')
        .map(|idx| domain[idx + 1..].to_lowercase())
}
