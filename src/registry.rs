//! Process-lifetime model registry.
//!
//! Models and their schemas load once at startup and are immutable
//! afterwards; the registry is passed by reference into the pipeline rather
//! than living in global state. Any artifact problem is fatal before the
//! first request, including a schema whose column count disagrees with its
//! model's input width.

use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::config::ModelConfig;
use crate::ensemble::ModelScore;
use crate::features::ExtractorKind;
use crate::model::{ModelLoadError, ScoreError, TreeEnsembleModel};
use crate::normalize::NormalizedUrl;
use crate::schema::{FeatureSchema, SchemaError};

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error(transparent)]
    Model(#[from] ModelLoadError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("No models configured - at least one [[models]] entry is required")]
    NoModels,

    #[error("Model '{name}': schema lists {schema_len} columns but the artifact expects {model_width} inputs")]
    WidthMismatch {
        name: String,
        schema_len: usize,
        model_width: usize,
    },
}

/// One loaded classifier with everything needed to score a URL.
pub struct LoadedScorer {
    pub name: String,
    pub extractor: ExtractorKind,
    pub schema: FeatureSchema,
    pub model: TreeEnsembleModel,
}

impl LoadedScorer {
    /// Extract, align and score one URL.
    pub fn score_url(&self, url: &NormalizedUrl) -> Result<ModelScore, ScoreError> {
        let vector = self.feature_vector(url);
        let probability = self.model.score(&vector)?;
        Ok(ModelScore::new(self.name.clone(), probability))
    }

    /// The aligned vector this scorer would hand to its model.
    pub fn feature_vector(&self, url: &NormalizedUrl) -> Vec<f64> {
        let features = self.extractor.extract(url);
        self.schema.align(&features)
    }
}

pub struct ModelRegistry {
    scorers: Vec<LoadedScorer>,
}

impl ModelRegistry {
    pub fn load(entries: &[ModelConfig]) -> Result<Self, RegistryError> {
        if entries.is_empty() {
            return Err(RegistryError::NoModels);
        }

        let mut scorers = Vec::with_capacity(entries.len());
        for entry in entries {
            let schema = FeatureSchema::load(Path::new(&entry.schema))?;
            let model = TreeEnsembleModel::load(Path::new(&entry.artifact))?;
            if schema.len() != model.input_width() {
                return Err(RegistryError::WidthMismatch {
                    name: entry.name.clone(),
                    schema_len: schema.len(),
                    model_width: model.input_width(),
                });
            }
            info!(
                "loaded model '{}' ({} input columns, {:?} features)",
                entry.name,
                schema.len(),
                entry.features
            );
            scorers.push(LoadedScorer {
                name: entry.name.clone(),
                extractor: entry.features,
                schema,
                model,
            });
        }

        Ok(Self { scorers })
    }

    pub fn scorers(&self) -> &[LoadedScorer] {
        &self.scorers
    }

    pub fn len(&self) -> usize {
        self.scorers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scorers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_entry(
        dir: &Path,
        name: &str,
        columns: &[&str],
        feature_count: usize,
    ) -> ModelConfig {
        let schema_path = dir.join(format!("{}_schema.json", name));
        let artifact_path = dir.join(format!("{}_model.json", name));
        let columns_json: Vec<String> = columns.iter().map(|c| format!("\"{}\"", c)).collect();
        fs::write(&schema_path, format!("[{}]", columns_json.join(","))).unwrap();
        fs::write(
            &artifact_path,
            format!(
                r#"{{"name": "{}", "feature_count": {}, "output": "probability", "trees": [{{"nodes": [{{"leaf": 0.5}}]}}]}}"#,
                name, feature_count
            ),
        )
        .unwrap();
        ModelConfig {
            name: name.to_string(),
            artifact: artifact_path.to_string_lossy().to_string(),
            schema: schema_path.to_string_lossy().to_string(),
            features: ExtractorKind::Content,
        }
    }

    #[test]
    fn test_load_accepts_matching_widths() {
        let dir = tempfile::tempdir().unwrap();
        let entry = write_entry(dir.path(), "ok", &["url_len", "url_has_login"], 2);

        let registry = ModelRegistry::load(&[entry]).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.scorers()[0].name, "ok");
    }

    #[test]
    fn test_load_rejects_width_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let entry = write_entry(dir.path(), "bad", &["url_len"], 2);

        assert!(matches!(
            ModelRegistry::load(&[entry]),
            Err(RegistryError::WidthMismatch { .. })
        ));
    }

    #[test]
    fn test_load_rejects_empty_entry_list() {
        assert!(matches!(
            ModelRegistry::load(&[]),
            Err(RegistryError::NoModels)
        ));
    }

    #[test]
    fn test_load_rejects_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let mut entry = write_entry(dir.path(), "gone", &["url_len"], 1);
        entry.artifact = dir.path().join("nonexistent.json").to_string_lossy().to_string();

        assert!(matches!(
            ModelRegistry::load(&[entry]),
            Err(RegistryError::Model(ModelLoadError::Io { .. }))
        ));
    }

    #[test]
    fn test_scorer_produces_probability_for_url() {
        let dir = tempfile::tempdir().unwrap();
        let entry = write_entry(dir.path(), "scored", &["url_len", "url_has_login"], 2);
        let registry = ModelRegistry::load(&[entry]).unwrap();

        let url = NormalizedUrl::parse("http://example.com/login");
        let score = registry.scorers()[0].score_url(&url).unwrap();
        assert_eq!(score.model, "scored");
        assert!((0.0..=1.0).contains(&score.probability));
    }
}
