//! Final verdict composition: model ensemble plus external signals.

use serde::Serialize;

use crate::ensemble::{EnsembleVerdict, Label, ModelScore};
use crate::signals::SignalReport;

#[derive(Debug, Clone, Serialize)]
pub struct FinalVerdict {
    pub label: Label,
    pub aggregate_probability: f64,
    pub component_scores: Vec<ModelScore>,
    pub signal_report: SignalReport,
    /// Set when a signal override replaced the ensemble label.
    pub override_reason: Option<String>,
}

/// Merge the ensemble verdict with the collected signals.
///
/// A non-resolving domain outranks the models: defunct or never-registered
/// hosts classify as phishing regardless of score. The aggregate probability
/// and component scores pass through untouched either way, so a caller can
/// still see what the models said.
pub fn compose(ensemble: EnsembleVerdict, signals: SignalReport) -> FinalVerdict {
    let (label, override_reason) = if !signals.domain_resolves {
        (Label::Phishing, Some("domain does not resolve".to_string()))
    } else {
        (ensemble.label, None)
    };

    FinalVerdict {
        label,
        aggregate_probability: ensemble.aggregate_probability,
        component_scores: ensemble.component_scores,
        signal_report: signals,
        override_reason,
    }
}
