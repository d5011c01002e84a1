use std::fs;
use std::path::Path;

use phishscout::config::{AppConfig, HttpConfig, ModelConfig, SignalsConfig};
use phishscout::features::ExtractorKind;

/// Write a single-leaf model artifact that scores every URL at exactly
/// `probability`, plus a schema with the given columns. The leaf holds the
/// logit of the target probability, so the sigmoid recovers it (up to float
/// rounding).
pub fn write_constant_model(
    dir: &Path,
    name: &str,
    probability: f64,
    columns: &[&str],
) -> ModelConfig {
    let margin = (probability / (1.0 - probability)).ln();
    let schema_path = dir.join(format!("{}_schema.json", name));
    let artifact_path = dir.join(format!("{}_model.json", name));

    fs::write(&schema_path, serde_json::to_string(&columns).unwrap()).unwrap();
    let artifact = serde_json::json!({
        "name": name,
        "feature_count": columns.len(),
        "base_score": 0.0,
        "output": "probability",
        "trees": [{ "nodes": [{ "leaf": margin }] }]
    });
    fs::write(&artifact_path, serde_json::to_string_pretty(&artifact).unwrap()).unwrap();

    ModelConfig {
        name: name.to_string(),
        artifact: artifact_path.to_string_lossy().to_string(),
        schema: schema_path.to_string_lossy().to_string(),
        features: ExtractorKind::Content,
    }
}

/// Config whose signal endpoints point at the discard port, so network
/// collectors fail fast and degrade to their sentinels.
pub fn offline_config(models: Vec<ModelConfig>) -> AppConfig {
    AppConfig {
        http: HttpConfig {
            user_agent: "phishscout-test/0.1".to_string(),
            request_timeout_secs: 2,
        },
        signals: SignalsConfig {
            dns_timeout_secs: 2,
            tls_timeout_secs: 1,
            tls_port: 443,
            whois_timeout_secs: 1,
            geo_timeout_secs: 1,
            reputation_timeout_secs: 1,
            geo_endpoint: "http://127.0.0.1:9/json".to_string(),
            reputation_endpoint: "http://127.0.0.1:9/v1/host/".to_string(),
        },
        models,
    }
}
