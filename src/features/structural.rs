//! Character-class counts and token-length statistics over the URL.

use super::{is_dotted_numeric, FeatureMap};
use crate::normalize::NormalizedUrl;

/// Counted characters, in schema naming. Counts run over the raw input so
/// scheme separators contribute, matching the training data.
const COUNTED_CHARS: &[(&str, char)] = &[
    ("nb_dots", '.'),
    ("nb_hyphens", '-'),
    ("nb_at", '@'),
    ("nb_qm", '?'),
    ("nb_and", '&'),
    ("nb_or", '|'),
    ("nb_eq", '='),
    ("nb_underscore", '_'),
    ("nb_percent", '%'),
    ("nb_slash", '/'),
    ("nb_star", '*'),
    ("nb_colon", ':'),
    ("nb_dollar", '$'),
    ("nb_comma", ','),
    ("nb_semicolon", ';'),
    ("nb_space", ' '),
];

pub fn extract(url: &NormalizedUrl) -> FeatureMap {
    let mut features = FeatureMap::new();
    features.insert("length_url".to_string(), url.raw.len() as f64);
    features.insert("length_hostname".to_string(), url.hostname.len() as f64);
    features.insert(
        "ip".to_string(),
        if is_dotted_numeric(&url.hostname) { 1.0 } else { 0.0 },
    );

    for (name, ch) in COUNTED_CHARS {
        let count = url.raw.chars().filter(|c| c == ch).count();
        features.insert((*name).to_string(), count as f64);
    }

    features.insert(
        "nb_www".to_string(),
        if url.hostname.to_lowercase().contains("www.") { 1.0 } else { 0.0 },
    );

    let (longest_path, shortest_path) = word_length_bounds(url.path.split('/'));
    let (longest_host, shortest_host) = word_length_bounds(url.hostname.split('.'));
    features.insert("longest_word_path".to_string(), longest_path as f64);
    features.insert("shortest_word_path".to_string(), shortest_path as f64);
    features.insert("longest_word_host".to_string(), longest_host as f64);
    features.insert("shortest_word_host".to_string(), shortest_host as f64);

    features
}

/// Longest and shortest token lengths, ignoring empty tokens; (0, 0) when
/// nothing remains.
fn word_length_bounds<'a>(tokens: impl Iterator<Item = &'a str>) -> (usize, usize) {
    let lengths: Vec<usize> = tokens.filter(|t| !t.is_empty()).map(|t| t.len()).collect();
    match (lengths.iter().max(), lengths.iter().min()) {
        (Some(max), Some(min)) => (*max, *min),
        _ => (0, 0),
    }
}
