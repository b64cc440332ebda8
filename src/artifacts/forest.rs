use serde::{Deserialize, Serialize};

use crate::artifacts::{ArtifactKind, Classifier, check_row};
use crate::error::{ArtifactError, ModelError};

/// Flat CART node. Children always sit at larger indices than their parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeParams {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTreeParams {
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub n_features: usize,
    pub classes: Vec<i64>,
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestParams {
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub n_features: usize,
    pub classes: Vec<i64>,
    pub trees: Vec<TreeParams>,
}

fn invalid(reason: impl Into<String>) -> ArtifactError {
    ArtifactError::Invalid {
        kind: ArtifactKind::Classifier,
        reason: reason.into(),
    }
}

#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
}

impl DecisionTree {
    fn build(nodes: Vec<TreeNode>, n_features: usize, n_classes: usize) -> Result<Self, ArtifactError> {
        if nodes.is_empty() {
            return Err(invalid("tree has no nodes"));
        }
        for (i, node) in nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(invalid(format!(
                            "node {i} splits on feature {feature}, model has {n_features}"
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(invalid(format!("node {i} has a non-finite threshold")));
                    }
                    for child in [*left, *right] {
                        if child <= i || child >= nodes.len() {
                            return Err(invalid(format!(
                                "node {i} points to child {child} out of order"
                            )));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if value.len() != n_classes {
                        return Err(invalid(format!(
                            "leaf {i} has {} class counts, model has {n_classes} classes",
                            value.len()
                        )));
                    }
                    if value.iter().any(|v| !v.is_finite() || *v < 0.0) {
                        return Err(invalid(format!("leaf {i} has a negative or non-finite count")));
                    }
                }
            }
        }
        Ok(Self { nodes })
    }

    fn leaf_for(&self, row: &[f64]) -> &[f64] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[*feature] <= *threshold { *left } else { *right };
                }
                TreeNode::Leaf { value } => return value,
            }
        }
    }

    /// Adds this tree's normalized leaf distribution into `acc`.
    fn accumulate(&self, row: &[f64], acc: &mut [f64]) {
        let leaf = self.leaf_for(row);
        let total: f64 = leaf.iter().sum();
        if total <= 0.0 {
            return;
        }
        for (a, v) in acc.iter_mut().zip(leaf.iter()) {
            *a += v / total;
        }
    }
}

/// Averages leaf class distributions across trees, like a fitted random forest.
#[derive(Debug, Clone)]
pub struct RandomForest {
    feature_names: Option<Vec<String>>,
    n_features: usize,
    classes: Vec<i64>,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    fn build(
        feature_names: Option<Vec<String>>,
        n_features: usize,
        classes: Vec<i64>,
        trees: Vec<Vec<TreeNode>>,
    ) -> Result<Self, ArtifactError> {
        if n_features == 0 {
            return Err(invalid("model expects zero features"));
        }
        if classes.is_empty() {
            return Err(invalid("model has no classes"));
        }
        if let Some(names) = &feature_names {
            if names.len() != n_features {
                return Err(invalid(format!(
                    "{} feature names for {} features",
                    names.len(),
                    n_features
                )));
            }
        }
        if trees.is_empty() {
            return Err(invalid("forest has no trees"));
        }

        let trees = trees
            .into_iter()
            .map(|nodes| DecisionTree::build(nodes, n_features, classes.len()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            feature_names,
            n_features,
            classes,
            trees,
        })
    }
}

impl TryFrom<RandomForestParams> for RandomForest {
    type Error = ArtifactError;

    fn try_from(p: RandomForestParams) -> Result<Self, Self::Error> {
        let trees = p.trees.into_iter().map(|t| t.nodes).collect();
        Self::build(p.feature_names, p.n_features, p.classes, trees)
    }
}

impl TryFrom<DecisionTreeParams> for RandomForest {
    type Error = ArtifactError;

    fn try_from(p: DecisionTreeParams) -> Result<Self, Self::Error> {
        Self::build(p.feature_names, p.n_features, p.classes, vec![p.nodes])
    }
}

impl Classifier for RandomForest {
    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn get_votes_for_instance(&self, row: &[f64]) -> Result<Vec<f64>, ModelError> {
        check_row(row, self.n_features)?;
        let mut votes = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            tree.accumulate(row, &mut votes);
        }
        let n = self.trees.len() as f64;
        for v in votes.iter_mut() {
            *v /= n;
        }
        Ok(votes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(feature: usize, threshold: f64, left: [f64; 2], right: [f64; 2]) -> Vec<TreeNode> {
        vec![
            TreeNode::Split {
                feature,
                threshold,
                left: 1,
                right: 2,
            },
            TreeNode::Leaf {
                value: left.to_vec(),
            },
            TreeNode::Leaf {
                value: right.to_vec(),
            },
        ]
    }

    fn forest(trees: Vec<Vec<TreeNode>>) -> RandomForest {
        RandomForest::build(None, 3, vec![0, 1], trees).unwrap()
    }

    #[test]
    fn goes_left_on_equal_threshold() {
        let f = forest(vec![stump(0, 0.5, [10.0, 0.0], [0.0, 10.0])]);
        assert_eq!(f.predict(&[0.5, 0.0, 0.0]).unwrap().code, 0);
        assert_eq!(f.predict(&[0.51, 0.0, 0.0]).unwrap().code, 1);
    }

    #[test]
    fn forest_averages_normalized_leaves() {
        let f = forest(vec![
            stump(0, 0.5, [3.0, 1.0], [0.0, 4.0]),
            stump(1, 0.5, [1.0, 1.0], [0.0, 2.0]),
        ]);
        let votes = f.get_votes_for_instance(&[0.2, 0.2, 0.0]).unwrap();
        assert!((votes[0] - 0.625).abs() < 1e-12);
        assert!((votes[1] - 0.375).abs() < 1e-12);

        let p = f.predict(&[0.2, 0.2, 0.0]).unwrap();
        assert_eq!(p.code, 0);
        assert!((p.confidence - 0.625).abs() < 1e-12);
    }

    #[test]
    fn ties_go_to_lowest_class_index() {
        let f = forest(vec![vec![TreeNode::Leaf {
            value: vec![5.0, 5.0],
        }]]);
        assert_eq!(f.predict(&[0.0, 0.0, 0.0]).unwrap().code, 0);
    }

    #[test]
    fn class_codes_are_reported_not_indices() {
        let f = RandomForest::build(
            None,
            1,
            vec![7, 9],
            vec![vec![TreeNode::Leaf {
                value: vec![0.0, 1.0],
            }]],
        )
        .unwrap();
        assert_eq!(f.predict(&[0.0]).unwrap().code, 9);
    }

    #[test]
    fn rejects_backward_or_dangling_children() {
        let nodes = vec![
            TreeNode::Split {
                feature: 0,
                threshold: 0.5,
                left: 0,
                right: 1,
            },
            TreeNode::Leaf {
                value: vec![1.0, 0.0],
            },
        ];
        assert!(RandomForest::build(None, 3, vec![0, 1], vec![nodes]).is_err());

        let nodes = vec![TreeNode::Split {
            feature: 0,
            threshold: 0.5,
            left: 1,
            right: 5,
        }];
        assert!(RandomForest::build(None, 3, vec![0, 1], vec![nodes]).is_err());
    }

    #[test]
    fn rejects_unknown_feature_and_wrong_leaf_width() {
        assert!(
            RandomForest::build(None, 3, vec![0, 1], vec![stump(3, 0.0, [1.0, 0.0], [0.0, 1.0])])
                .is_err()
        );
        let nodes = vec![TreeNode::Leaf {
            value: vec![1.0, 0.0, 0.0],
        }];
        assert!(RandomForest::build(None, 3, vec![0, 1], vec![nodes]).is_err());
    }

    #[test]
    fn votes_reject_wrong_arity() {
        let f = forest(vec![stump(0, 0.5, [1.0, 0.0], [0.0, 1.0])]);
        assert_eq!(
            f.get_votes_for_instance(&[0.1, 0.2]),
            Err(ModelError::ArityMismatch {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn nodes_decode_from_json() {
        let json = r#"[
            {"feature": 2, "threshold": 0.25, "left": 1, "right": 2},
            {"value": [4, 0]},
            {"value": [1, 3]}
        ]"#;
        let nodes: Vec<TreeNode> = serde_json::from_str(json).unwrap();
        assert_eq!(nodes.len(), 3);
        assert!(matches!(nodes[0], TreeNode::Split { feature: 2, .. }));
        assert!(matches!(&nodes[2], TreeNode::Leaf { value } if value == &vec![1.0, 3.0]));
    }
}
