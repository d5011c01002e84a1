//! Per-request orchestration.
//!
//! One URL submission triggers one pipeline run: normalize, score every
//! configured model, collect external signals, compose. Scoring and signal
//! collection overlap so a slow network check never delays the models; the
//! composer joins both before producing the final verdict.

use thiserror::Error;
use tracing::debug;

use crate::config::AppConfig;
use crate::ensemble::{self, ModelScore};
use crate::model::ScoreError;
use crate::normalize::NormalizedUrl;
use crate::registry::ModelRegistry;
use crate::signals::{self, SignalReport};
use crate::verdict::{self, FinalVerdict};

#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("Please enter a URL (e.g. https://example.com)")]
    EmptyInput,

    #[error("Scoring failed for model '{model}': {source}")]
    Scoring { model: String, source: ScoreError },
}

/// Run the full pipeline for one URL.
///
/// `with_signals = false` skips network collection entirely and composes
/// against a neutral report, so the resolution override cannot fire on a
/// check that never ran.
pub async fn analyze(
    raw_url: &str,
    registry: &ModelRegistry,
    config: &AppConfig,
    with_signals: bool,
) -> Result<FinalVerdict, AnalyzeError> {
    let trimmed = raw_url.trim();
    if trimmed.is_empty() {
        return Err(AnalyzeError::EmptyInput);
    }

    let url = NormalizedUrl::parse(trimmed);
    debug!("normalized '{}' -> host '{}'", trimmed, url.hostname);

    let scoring = async { score_models(&url, registry) };
    let collection = async {
        if with_signals {
            signals::collect(&url.hostname, config).await
        } else {
            SignalReport::skipped()
        }
    };

    let (scores, report) = tokio::join!(scoring, collection);
    let ensemble = ensemble::combine(scores?);
    Ok(verdict::compose(ensemble, report))
}

fn score_models(
    url: &NormalizedUrl,
    registry: &ModelRegistry,
) -> Result<Vec<ModelScore>, AnalyzeError> {
    registry
        .scorers()
        .iter()
        .map(|scorer| {
            scorer.score_url(url).map_err(|source| AnalyzeError::Scoring {
                model: scorer.name.clone(),
                source,
            })
        })
        .collect()
}
