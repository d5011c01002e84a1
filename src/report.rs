//! User-facing rendering of a final verdict.

use std::fmt::Write;

use anyhow::Result;

use crate::normalize::NormalizedUrl;
use crate::registry::ModelRegistry;
use crate::verdict::FinalVerdict;

pub fn render_json(verdict: &FinalVerdict) -> Result<String> {
    Ok(serde_json::to_string_pretty(verdict)?)
}

pub fn render_text(raw_url: &str, verdict: &FinalVerdict) -> String {
    let url = NormalizedUrl::parse(raw_url.trim());
    let signals = &verdict.signal_report;
    let mut out = String::new();

    match &verdict.override_reason {
        Some(reason) => {
            let _ = writeln!(
                out,
                "Result: {} ({}) - score: {:.3}",
                verdict.label, reason, verdict.aggregate_probability
            );
        }
        None => {
            let _ = writeln!(
                out,
                "Result: {} - score: {:.3}",
                verdict.label, verdict.aggregate_probability
            );
        }
    }
    for score in &verdict.component_scores {
        let _ = writeln!(out, "  {}: {:.3}", score.model, score.probability);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Additional checks");
    let _ = writeln!(out, "  Domain:           {}", url.hostname);
    let _ = writeln!(
        out,
        "  DNS A record:     {}",
        match signals.resolved_ip {
            Some(ip) => ip.to_string(),
            None => "none / does not resolve".to_string(),
        }
    );
    let _ = writeln!(
        out,
        "  Domain exists:    {}",
        if signals.domain_resolves { "yes" } else { "no" }
    );
    let _ = writeln!(out, "  TLS:              {}", signals.tls);
    let _ = writeln!(
        out,
        "  WHOIS domain age: {}",
        match signals.domain_age_days {
            Some(days) => format!("{} days", days),
            None => "Unknown".to_string(),
        }
    );
    let _ = writeln!(out, "  Country:          {}", signals.country);
    let _ = writeln!(out, "  Reputation:       {}", signals.reputation);

    out
}

/// The aligned feature vector each model would receive, one block per model.
pub fn render_features(raw_url: &str, registry: &ModelRegistry) -> String {
    let url = NormalizedUrl::parse(raw_url.trim());
    let mut out = String::new();

    for scorer in registry.scorers() {
        let vector = scorer.feature_vector(&url);
        let _ = writeln!(out, "Feature vector ({}):", scorer.name);
        for (column, value) in scorer.schema.columns().iter().zip(vector.iter()) {
            let _ = writeln!(out, "  {} = {}", column, value);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ensemble::{combine, ModelScore};
    use crate::signals::SignalReport;
    use crate::verdict::compose;

    fn verdict_for(probabilities: &[f64], resolves: bool) -> FinalVerdict {
        let scores = probabilities
            .iter()
            .enumerate()
            .map(|(i, p)| ModelScore::new(format!("m{}", i), *p))
            .collect();
        let mut report = SignalReport::skipped();
        report.domain_resolves = resolves;
        compose(combine(scores), report)
    }

    #[test]
    fn test_text_report_lists_components() {
        let text = render_text("http://example.com/", &verdict_for(&[0.2, 0.8], true));
        assert!(text.contains("m0: 0.200"));
        assert!(text.contains("m1: 0.800"));
        assert!(text.contains("Domain:           example.com"));
    }

    #[test]
    fn test_text_report_annotates_override() {
        let text = render_text("http://gone.example/", &verdict_for(&[0.1], false));
        assert!(text.contains("Phishing (domain does not resolve)"));
        assert!(text.contains("Domain exists:    no"));
    }

    #[test]
    fn test_json_report_round_trips() {
        let verdict = verdict_for(&[0.9], true);
        let json = render_json(&verdict).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["label"], "Phishing");
        assert_eq!(value["component_scores"][0]["probability"], 0.9);
    }
}
