//! Regression Tree - array-based tree inference
//!
//! Trees are exported from the training side in sklearn's parallel-array
//! form (`feature`, `threshold`, `left_child`, `right_child`, `value`).
//! A negative feature index marks a leaf.
//!
//! Structure is validated when the tree is deserialized: every child index
//! must point forward and stay in bounds, so traversal always terminates.

use serde::{Deserialize, Serialize};

/// Which side a sample equal to the threshold goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitRule {
    /// `x <= threshold` goes left (sklearn)
    LessOrEqual,
    /// `x < threshold` goes left (xgboost)
    Less,
}

/// Node in a regression tree
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    /// Feature index to split on (negative = leaf node)
    pub feature: i32,
    pub threshold: f64,
    pub left_child: usize,
    pub right_child: usize,
    /// Leaf output
    pub value: f64,
}

impl TreeNode {
    pub fn leaf(value: f64) -> Self {
        Self {
            feature: -2,
            threshold: 0.0,
            left_child: 0,
            right_child: 0,
            value,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.feature < 0
    }
}

/// Wire form of a tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeArrays {
    pub feature: Vec<i32>,
    pub threshold: Vec<f64>,
    pub left_child: Vec<i64>,
    pub right_child: Vec<i64>,
    pub value: Vec<f64>,
}

/// Validated regression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TreeArrays", into = "TreeArrays")]
pub struct RegressionTree {
    nodes: Vec<TreeNode>,
}

impl RegressionTree {
    /// Single-leaf tree
    pub fn leaf(value: f64) -> Self {
        Self {
            nodes: vec![TreeNode::leaf(value)],
        }
    }

    /// One split on `feature`: left leaf if the sample goes left, right leaf otherwise
    pub fn stump(feature: usize, threshold: f64, left: f64, right: f64) -> Self {
        Self {
            nodes: vec![
                TreeNode {
                    feature: feature as i32,
                    threshold,
                    left_child: 1,
                    right_child: 2,
                    value: 0.0,
                },
                TreeNode::leaf(left),
                TreeNode::leaf(right),
            ],
        }
    }

    /// Predict the leaf value for a single sample
    ///
    /// `None` if a split on the path reads past the end of `features`.
    pub fn predict(&self, features: &[f64], rule: SplitRule) -> Option<f64> {
        let mut idx = 0usize;
        loop {
            let node = &self.nodes[idx];
            if node.is_leaf() {
                return Some(node.value);
            }
            let x = *features.get(node.feature as usize)?;
            let go_left = match rule {
                SplitRule::LessOrEqual => x <= node.threshold,
                SplitRule::Less => x < node.threshold,
            };
            idx = if go_left { node.left_child } else { node.right_child };
        }
    }

    /// Highest feature index any split reads
    pub fn max_feature(&self) -> Option<usize> {
        self.nodes
            .iter()
            .filter(|n| !n.is_leaf())
            .map(|n| n.feature as usize)
            .max()
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Tree depth (longest root-to-leaf path)
    pub fn depth(&self) -> usize {
        // children always have larger indices, so one forward pass suffices
        let mut depth = vec![0usize; self.nodes.len()];
        let mut max_depth = 0;
        for (i, node) in self.nodes.iter().enumerate() {
            max_depth = max_depth.max(depth[i]);
            if !node.is_leaf() {
                depth[node.left_child] = depth[i] + 1;
                depth[node.right_child] = depth[i] + 1;
            }
        }
        max_depth
    }
}

impl TryFrom<TreeArrays> for RegressionTree {
    type Error = String;

    fn try_from(arrays: TreeArrays) -> Result<Self, Self::Error> {
        let n = arrays.feature.len();
        if n == 0 {
            return Err("empty tree".into());
        }
        if arrays.threshold.len() != n
            || arrays.left_child.len() != n
            || arrays.right_child.len() != n
            || arrays.value.len() != n
        {
            return Err("inconsistent array lengths".into());
        }

        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            let feature = arrays.feature[i];
            if feature < 0 {
                if !arrays.value[i].is_finite() {
                    return Err(format!("leaf {} has non-finite value", i));
                }
                nodes.push(TreeNode {
                    feature,
                    threshold: arrays.threshold[i],
                    left_child: 0,
                    right_child: 0,
                    value: arrays.value[i],
                });
                continue;
            }

            if arrays.threshold[i].is_nan() {
                return Err(format!("node {} has NaN threshold", i));
            }
            let left = forward_child(i, arrays.left_child[i], n)?;
            let right = forward_child(i, arrays.right_child[i], n)?;
            nodes.push(TreeNode {
                feature,
                threshold: arrays.threshold[i],
                left_child: left,
                right_child: right,
                value: arrays.value[i],
            });
        }

        Ok(Self { nodes })
    }
}

fn forward_child(parent: usize, child: i64, n: usize) -> Result<usize, String> {
    if child <= parent as i64 || child >= n as i64 {
        return Err(format!("node {} has invalid child index {}", parent, child));
    }
    Ok(child as usize)
}

impl From<RegressionTree> for TreeArrays {
    fn from(tree: RegressionTree) -> Self {
        let n = tree.nodes.len();
        let mut arrays = TreeArrays {
            feature: Vec::with_capacity(n),
            threshold: Vec::with_capacity(n),
            left_child: Vec::with_capacity(n),
            right_child: Vec::with_capacity(n),
            value: Vec::with_capacity(n),
        };
        for node in tree.nodes {
            arrays.feature.push(node.feature);
            arrays.threshold.push(node.threshold);
            if node.is_leaf() {
                arrays.left_child.push(-1);
                arrays.right_child.push(-1);
            } else {
                arrays.left_child.push(node.left_child as i64);
                arrays.right_child.push(node.right_child as i64);
            }
            arrays.value.push(node.value);
        }
        arrays
    }
}
