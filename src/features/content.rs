//! Lexical/keyword features over the raw URL string.

use super::{is_dotted_numeric, FeatureMap};
use crate::normalize::NormalizedUrl;

/// Hostnames of known URL shorteners, matched by substring against the
/// lowercased hostname.
const SHORTENER_HOSTS: &[&str] = &["bit.ly", "t.co", "tinyurl", "goo.gl", "ow.ly"];

/// Sensitive keywords matched case-insensitively anywhere in the URL.
const SENSITIVE_KEYWORDS: &[(&str, &str)] = &[
    ("url_has_login", "login"),
    ("url_has_client", "client"),
    ("url_has_server", "server"),
    ("url_has_admin", "admin"),
];

pub fn extract(url: &NormalizedUrl) -> FeatureMap {
    let raw_lower = url.raw.to_lowercase();
    let host_lower = url.hostname.to_lowercase();

    let mut features = FeatureMap::new();
    features.insert("url_len".to_string(), url.raw.len() as f64);
    for (name, keyword) in SENSITIVE_KEYWORDS {
        let present = if raw_lower.contains(keyword) { 1.0 } else { 0.0 };
        features.insert((*name).to_string(), present);
    }
    features.insert(
        "url_has_ip".to_string(),
        if is_dotted_numeric(&url.hostname) { 1.0 } else { 0.0 },
    );
    features.insert(
        "url_isshorted".to_string(),
        if SHORTENER_HOSTS.iter().any(|s| host_lower.contains(s)) {
            1.0
        } else {
            0.0
        },
    );
    // url_entropy is a fixed zero: the shipped model artifacts were trained
    // against this constant, so emitting a computed value would silently
    // shift their input distribution.
    features.insert("url_entropy".to_string(), 0.0);

    features
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_raw(raw: &str) -> FeatureMap {
        extract(&NormalizedUrl::parse(raw))
    }

    #[test]
    fn test_keyword_indicators() {
        let features = extract_raw("http://login-secure-update.example.tk/admin");
        assert_eq!(features["url_has_login"], 1.0);
        assert_eq!(features["url_has_admin"], 1.0);
        assert_eq!(features["url_has_client"], 0.0);
        assert_eq!(features["url_has_server"], 0.0);
    }

    #[test]
    fn test_keywords_case_insensitive() {
        let features = extract_raw("http://example.com/LOGIN");
        assert_eq!(features["url_has_login"], 1.0);
    }

    #[test]
    fn test_ip_literal_indicator() {
        let features = extract_raw("192.168.0.1/path");
        assert_eq!(features["url_has_ip"], 1.0);

        let features = extract_raw("http://example.com/path");
        assert_eq!(features["url_has_ip"], 0.0);
    }

    #[test]
    fn test_shortener_indicator() {
        assert_eq!(extract_raw("https://bit.ly/3xYz")["url_isshorted"], 1.0);
        assert_eq!(extract_raw("https://tinyurl.com/abc")["url_isshorted"], 1.0);
        assert_eq!(extract_raw("https://example.com/abc")["url_isshorted"], 0.0);
    }

    #[test]
    fn test_url_len_counts_raw_input() {
        let raw = "example.com";
        assert_eq!(extract_raw(raw)["url_len"], raw.len() as f64);
    }

    #[test]
    fn test_entropy_is_fixed_zero() {
        assert_eq!(extract_raw("http://zqxjkvbwpf.example/r4nd0m")["url_entropy"], 0.0);
    }

    #[test]
    fn test_empty_input_yields_defaults() {
        let features = extract(&NormalizedUrl::parse(""));
        assert_eq!(features["url_has_ip"], 0.0);
        assert_eq!(features["url_isshorted"], 0.0);
        assert_eq!(features["url_len"], 0.0);
    }
}
