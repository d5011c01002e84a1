//! Trained tree-ensemble classifiers.
//!
//! A model artifact is a JSON-serialized ensemble of binary decision trees.
//! The artifact is opaque to the rest of the pipeline: once loaded, a model
//! is a function from an aligned feature vector to a probability in [0, 1].
//!
//! Artifacts declare an `output` mode. `probability` models sum their leaf
//! margins through a sigmoid; `label` models only expose a predicted class,
//! which is cast to 0.0/1.0. The branch is resolved once at load time.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ModelLoadError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse model artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("model artifact {0} declares no trees")]
    NoTrees(PathBuf),

    #[error("model artifact {0} declares zero input width")]
    ZeroWidth(PathBuf),

    #[error("unknown output mode '{mode}' in model artifact {path} (expected 'probability' or 'label')")]
    UnknownOutput { path: PathBuf, mode: String },

    #[error("model artifact {path}, tree {tree}, node {node}: {reason}")]
    InvalidNode {
        path: PathBuf,
        tree: usize,
        node: usize,
        reason: String,
    },
}

#[derive(Error, Debug, PartialEq)]
pub enum ScoreError {
    #[error("feature vector has {got} values but the model expects {expected}")]
    ShapeMismatch { expected: usize, got: usize },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        leaf: f64,
    },
}

#[derive(Debug, Deserialize)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Walk from the root to a leaf. Child indices are validated at load
    /// time to point strictly forward, so this terminates and stays in
    /// bounds.
    fn evaluate(&self, vector: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { leaf } => return *leaf,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if vector[*feature] < *threshold { *left } else { *right };
                }
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ModelArtifact {
    name: String,
    feature_count: usize,
    #[serde(default)]
    base_score: f64,
    output: String,
    trees: Vec<Tree>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Probability,
    Label,
}

#[derive(Debug)]
pub struct TreeEnsembleModel {
    name: String,
    feature_count: usize,
    base_score: f64,
    output: OutputMode,
    trees: Vec<Tree>,
}

impl TreeEnsembleModel {
    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        let content = fs::read_to_string(path).map_err(|source| ModelLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: ModelArtifact =
            serde_json::from_str(&content).map_err(|source| ModelLoadError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_artifact(artifact, path)
    }

    fn from_artifact(artifact: ModelArtifact, path: &Path) -> Result<Self, ModelLoadError> {
        if artifact.feature_count == 0 {
            return Err(ModelLoadError::ZeroWidth(path.to_path_buf()));
        }
        if artifact.trees.is_empty() {
            return Err(ModelLoadError::NoTrees(path.to_path_buf()));
        }

        let output = match artifact.output.as_str() {
            "probability" => OutputMode::Probability,
            "label" => OutputMode::Label,
            other => {
                return Err(ModelLoadError::UnknownOutput {
                    path: path.to_path_buf(),
                    mode: other.to_string(),
                })
            }
        };

        for (tree_index, tree) in artifact.trees.iter().enumerate() {
            validate_tree(tree, tree_index, artifact.feature_count, path)?;
        }

        debug!(
            "loaded model '{}' ({} trees, {} inputs, {:?} output)",
            artifact.name,
            artifact.trees.len(),
            artifact.feature_count,
            output
        );

        Ok(Self {
            name: artifact.name,
            feature_count: artifact.feature_count,
            base_score: artifact.base_score,
            output,
            trees: artifact.trees,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of inputs the model expects; must equal the schema length.
    pub fn input_width(&self) -> usize {
        self.feature_count
    }

    /// Score an aligned feature vector. A vector whose length disagrees with
    /// the model's input width is rejected, never truncated or padded.
    pub fn score(&self, vector: &[f64]) -> Result<f64, ScoreError> {
        if vector.len() != self.feature_count {
            return Err(ScoreError::ShapeMismatch {
                expected: self.feature_count,
                got: vector.len(),
            });
        }

        let margin: f64 =
            self.base_score + self.trees.iter().map(|tree| tree.evaluate(vector)).sum::<f64>();
        let probability = sigmoid(margin);

        Ok(match self.output {
            OutputMode::Probability => probability,
            OutputMode::Label => {
                if probability > 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
        })
    }
}

fn validate_tree(
    tree: &Tree,
    tree_index: usize,
    feature_count: usize,
    path: &Path,
) -> Result<(), ModelLoadError> {
    let invalid = |node: usize, reason: String| ModelLoadError::InvalidNode {
        path: path.to_path_buf(),
        tree: tree_index,
        node,
        reason,
    };

    if tree.nodes.is_empty() {
        return Err(invalid(0, "tree has no nodes".to_string()));
    }

    for (node_index, node) in tree.nodes.iter().enumerate() {
        if let Node::Split {
            feature,
            left,
            right,
            ..
        } = node
        {
            if *feature >= feature_count {
                return Err(invalid(
                    node_index,
                    format!("feature index {} out of range (width {})", feature, feature_count),
                ));
            }
            // Children must point strictly forward: traversal is then cycle
            // free and bounded by the node count.
            for (side, child) in [("left", *left), ("right", *right)] {
                if child <= node_index || child >= tree.nodes.len() {
                    return Err(invalid(
                        node_index,
                        format!("{} child index {} out of range", side, child),
                    ));
                }
            }
        }
    }

    Ok(())
}

fn sigmoid(margin: f64) -> f64 {
    1.0 / (1.0 + (-margin).exp())
}
