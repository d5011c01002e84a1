//! Feature extraction from a normalized URL.
//!
//! Extractors are pure functions producing a named feature mapping. Which
//! columns a model actually consumes, and in what order, is decided by the
//! schema artifact at alignment time — extractors may emit more or fewer
//! keys than a schema lists.

use std::collections::HashMap;

use serde::Deserialize;

use crate::normalize::NormalizedUrl;

pub mod content;
pub mod structural;

pub type FeatureMap = HashMap<String, f64>;

/// Which extractor feeds a configured model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorKind {
    Content,
    Structural,
}

impl ExtractorKind {
    pub fn extract(&self, url: &NormalizedUrl) -> FeatureMap {
        match self {
            ExtractorKind::Content => content::extract(url),
            ExtractorKind::Structural => structural::extract(url),
        }
    }
}

/// Dotted-numeric check shared by both extractors: the hostname with its
/// dots removed must be all ASCII digits. The trained models saw this exact
/// crude test, not a full address parse.
pub(crate) fn is_dotted_numeric(hostname: &str) -> bool {
    let digits: String = hostname.chars().filter(|c| *c != '.').collect();
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}
