//! Regression trees and averaged forests.
//!
//! Trees are stored as a flat node array with node 0 as the root. Child
//! indices always point forward (`child > parent`), which [`RegressionTree::check`]
//! enforces at load time so traversal always terminates.

use serde::{Deserialize, Serialize};

use super::{finite, FeatureVector, PredictionError, PredictiveModel, NUM_FEATURES};

/// One node of a regression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Go to `left` when `features[feature] <= threshold`, else `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf { value: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    /// Validate node references and parameters.
    pub fn check(&self) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        let len = self.nodes.len();
        for (idx, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= NUM_FEATURES {
                        return Err(format!(
                            "node {idx}: split feature {feature} out of range (0..{NUM_FEATURES})"
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {idx}: threshold must be finite"));
                    }
                    for child in [left, right] {
                        if child >= len {
                            return Err(format!(
                                "node {idx}: child {child} out of range (tree has {len} nodes)"
                            ));
                        }
                        if child <= idx {
                            return Err(format!(
                                "node {idx}: child {child} must come after its parent"
                            ));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!("node {idx}: leaf value must be finite"));
                    }
                }
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf.
    ///
    /// A tree that never went through [`check`](Self::check) may be malformed;
    /// dangling references and cycles yield NaN instead of panicking or looping.
    fn leaf_value(&self, features: &FeatureVector) -> f64 {
        let mut idx = 0;
        for _ in 0..self.nodes.len() {
            match self.nodes.get(idx) {
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let Some(x) = features.get(*feature) else {
                        return f64::NAN;
                    };
                    idx = if *x <= *threshold { *left } else { *right };
                }
                Some(TreeNode::Leaf { value }) => return *value,
                None => return f64::NAN,
            }
        }
        f64::NAN
    }
}

impl PredictiveModel for RegressionTree {
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        finite(self.leaf_value(features))
    }

    fn kind(&self) -> &'static str {
        "tree"
    }
}

/// Bagged ensemble: the prediction is the mean of its trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestRegressor {
    pub trees: Vec<RegressionTree>,
}

impl ForestRegressor {
    pub fn new(trees: Vec<RegressionTree>) -> Self {
        Self { trees }
    }

    pub fn check(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.check().map_err(|e| format!("tree {i}: {e}"))?;
        }
        Ok(())
    }
}

impl PredictiveModel for ForestRegressor {
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        let sum: f64 = self.trees.iter().map(|t| t.leaf_value(features)).sum();
        finite(sum / self.trees.len() as f64)
    }

    fn kind(&self) -> &'static str {
        "forest"
    }
}
