use super::encoder::ColumnEncoder;
use super::tree::DecisionTree;
use crate::config::TreeParams;
use crate::data::model::{FeatureRow, FeatureTable, Tier, CATEGORICAL_COLUMNS};
use crate::error::TrainError;

/// Fitted encoder + tree. Immutable once trained.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedModel {
    encoder: ColumnEncoder,
    tree: DecisionTree,
}

/// Fit the one-hot encoder and the decision tree on the whole table.
/// There is no held-out split.
pub fn train(
    features: &FeatureTable,
    labels: &[Tier],
    params: &TreeParams,
) -> Result<TrainedModel, TrainError> {
    if features.is_empty() {
        return Err(TrainError::EmptyDataset);
    }
    if features.len() != labels.len() {
        return Err(TrainError::LengthMismatch {
            rows: features.len(),
            labels: labels.len(),
        });
    }

    let encoder = ColumnEncoder::fit(features, &CATEGORICAL_COLUMNS);
    let x = encoder.transform(features);
    log::trace!("Encoded features: {:?}", encoder.feature_names());
    let tree = DecisionTree::fit(&x, labels, params);

    log::info!(
        "Trained decision tree on {} rows x {} encoded features (depth {}, {} leaves)",
        x.len(),
        tree.n_features(),
        tree.depth(),
        tree.n_leaves()
    );

    Ok(TrainedModel { encoder, tree })
}

impl TrainedModel {
    /// Predict the tier of one row laid out like the training table.
    pub fn predict_row(&self, row: &FeatureRow) -> Tier {
        self.tree.predict(&self.encoder.transform_row(row))
    }
}
