use tracing::debug;
use url::Url;

/// A URL broken into the parts the feature extractors and signal collectors
/// consume. Parsing never fails: input that the parser rejects degrades to
/// empty fields, and a missing scheme gets `http://` prepended first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUrl {
    pub scheme: String,
    pub hostname: String,
    pub path: String,
    pub query: String,
    /// The input string exactly as submitted.
    pub raw: String,
}

impl NormalizedUrl {
    pub fn parse(raw: &str) -> Self {
        let candidate = if raw.starts_with("http://") || raw.starts_with("https://") {
            raw.to_string()
        } else {
            format!("http://{}", raw)
        };

        match Url::parse(&candidate) {
            Ok(parsed) => {
                let path = parsed.path().to_string();
                let hostname = match parsed.host_str() {
                    Some(host) if !host.is_empty() => host.to_string(),
                    // Path-only input: the first path segment stands in for
                    // the hostname.
                    _ => path
                        .trim_start_matches('/')
                        .split('/')
                        .next()
                        .unwrap_or("")
                        .to_string(),
                };
                Self {
                    scheme: parsed.scheme().to_string(),
                    hostname,
                    path,
                    query: parsed.query().unwrap_or("").to_string(),
                    raw: raw.to_string(),
                }
            }
            Err(e) => {
                debug!("unparseable URL '{}': {}", raw, e);
                Self {
                    scheme: String::new(),
                    hostname: String::new(),
                    path: String::new(),
                    query: String::new(),
                    raw: raw.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_prepended_when_missing() {
        let url = NormalizedUrl::parse("example.com/login");
        assert_eq!(url.scheme, "http");
        assert_eq!(url.hostname, "example.com");
        assert_eq!(url.path, "/login");
        assert_eq!(url.raw, "example.com/login");
    }

    #[test]
    fn test_existing_scheme_preserved() {
        let url = NormalizedUrl::parse("https://example.com/a?b=c");
        assert_eq!(url.scheme, "https");
        assert_eq!(url.hostname, "example.com");
        assert_eq!(url.path, "/a");
        assert_eq!(url.query, "b=c");
    }

    #[test]
    fn test_bare_hostname() {
        let url = NormalizedUrl::parse("example.com");
        assert_eq!(url.hostname, "example.com");
        assert_eq!(url.path, "/");
        assert_eq!(url.query, "");
    }

    #[test]
    fn test_ip_literal_host() {
        let url = NormalizedUrl::parse("192.168.0.1/path");
        assert_eq!(url.hostname, "192.168.0.1");
        assert_eq!(url.path, "/path");
    }

    #[test]
    fn test_unparseable_input_degrades_to_empty() {
        let url = NormalizedUrl::parse("http://[not-a-host");
        assert_eq!(url.hostname, "");
        assert_eq!(url.path, "");
        assert_eq!(url.raw, "http://[not-a-host");
    }

    #[test]
    fn test_host_is_lowercased_by_parser() {
        let url = NormalizedUrl::parse("https://EXAMPLE.COM/Path");
        // The raw string is untouched; parsed fields are canonical.
        assert_eq!(url.raw, "https://EXAMPLE.COM/Path");
        assert_eq!(url.hostname, "example.com");
        assert_eq!(url.path, "/Path");
    }
}
