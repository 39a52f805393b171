//! Cluster assignment.
//!
//! Inference-only K-Means: the centroids are fit offline and arrive as an
//! artifact; this module resolves an encoded feature vector to the nearest
//! centroid. Nothing here mutates state, so repeated predictions over the
//! same vector always yield the same cluster.

use serde::{Deserialize, Serialize};

use crate::error::{RecomendarError, Result};

/// Opaque cluster label; used only as a grouping key into the catalog.
pub type ClusterId = usize;

/// Pre-trained K-Means model, reduced to what prediction needs: the
/// centroid matrix and, optionally, the feature names the model was
/// trained on.
///
/// # Examples
///
/// ```
/// use recomendar::cluster::KMeansModel;
///
/// let model = KMeansModel::new(
///     vec![vec![0.0, 0.0], vec![10.0, 10.0]],
///     None,
/// ).expect("consistent centroid widths");
///
/// assert_eq!(model.predict(&[1.0, 2.0]).expect("2 features"), 0);
/// assert_eq!(model.predict(&[9.0, 8.0]).expect("2 features"), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KMeansModel {
    /// Cluster centroids, one row per cluster.
    centroids: Vec<Vec<f32>>,
    /// Feature names the model expects, in order, when the training run
    /// recorded them. `None` means callers fall back to the reference
    /// table's columns.
    #[serde(default)]
    feature_names_in: Option<Vec<String>>,
}

impl KMeansModel {
    /// Creates a model from fitted centroids.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no centroids, centroid widths
    /// disagree, or a declared feature-name list does not match the
    /// centroid width.
    pub fn new(centroids: Vec<Vec<f32>>, feature_names_in: Option<Vec<String>>) -> Result<Self> {
        let model = Self {
            centroids,
            feature_names_in,
        };
        model.validate()?;
        Ok(model)
    }

    /// Checks internal consistency after deserialization.
    ///
    /// # Errors
    ///
    /// Returns an error on empty or ragged centroids, or on a declared
    /// schema whose length disagrees with the centroid width.
    pub fn validate(&self) -> Result<()> {
        let Some(first) = self.centroids.first() else {
            return Err("cluster model has no centroids".into());
        };
        let width = first.len();
        if width == 0 {
            return Err("cluster model centroids have no features".into());
        }
        for (k, centroid) in self.centroids.iter().enumerate() {
            if centroid.len() != width {
                return Err(RecomendarError::schema_mismatch(
                    &format!("centroid {k}"),
                    width,
                    centroid.len(),
                ));
            }
        }
        if let Some(names) = &self.feature_names_in {
            if names.len() != width {
                return Err(RecomendarError::schema_mismatch(
                    "declared feature names",
                    width,
                    names.len(),
                ));
            }
        }
        Ok(())
    }

    /// Returns the number of clusters.
    #[must_use]
    pub fn n_clusters(&self) -> usize {
        self.centroids.len()
    }

    /// Returns the trained feature dimensionality.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.centroids.first().map_or(0, Vec::len)
    }

    /// Returns the declared expected feature names, if the training run
    /// recorded them.
    #[must_use]
    pub fn feature_names_in(&self) -> Option<&[String]> {
        self.feature_names_in.as_deref()
    }

    /// Assigns `x` to the nearest centroid by squared Euclidean distance.
    ///
    /// Deterministic: ties resolve to the lowest centroid index, and no
    /// state is mutated.
    ///
    /// # Errors
    ///
    /// Returns `SchemaMismatch` if `x` does not match the trained
    /// dimensionality.
    pub fn predict(&self, x: &[f32]) -> Result<ClusterId> {
        if x.len() != self.n_features() {
            return Err(RecomendarError::schema_mismatch(
                "cluster model input",
                self.n_features(),
                x.len(),
            ));
        }

        let mut min_dist = f32::INFINITY;
        let mut min_cluster = 0;

        for (k, centroid) in self.centroids.iter().enumerate() {
            let mut dist_sq = 0.0;
            for (xi, ci) in x.iter().zip(centroid.iter()) {
                let diff = xi - ci;
                dist_sq += diff * diff;
            }
            if dist_sq < min_dist {
                min_dist = dist_sq;
                min_cluster = k;
            }
        }

        Ok(min_cluster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> KMeansModel {
        KMeansModel::new(
            vec![vec![0.0, 0.0], vec![10.0, 10.0], vec![0.0, 10.0]],
            None,
        )
        .expect("valid model")
    }

    #[test]
    fn test_predict_nearest_centroid() {
        let m = model();
        assert_eq!(m.predict(&[1.0, 1.0]).expect("2 features"), 0);
        assert_eq!(m.predict(&[9.0, 9.5]).expect("2 features"), 1);
        assert_eq!(m.predict(&[0.5, 9.0]).expect("2 features"), 2);
    }

    #[test]
    fn test_predict_is_idempotent() {
        let m = model();
        let first = m.predict(&[3.0, 4.0]).expect("2 features");
        let second = m.predict(&[3.0, 4.0]).expect("2 features");
        assert_eq!(first, second);
    }

    #[test]
    fn test_predict_tie_takes_lowest_index() {
        let m = KMeansModel::new(vec![vec![-1.0, 0.0], vec![1.0, 0.0]], None).expect("valid model");
        // Equidistant from both centroids.
        assert_eq!(m.predict(&[0.0, 0.0]).expect("2 features"), 0);
    }

    #[test]
    fn test_predict_wrong_dimensionality_errors() {
        let err = model().predict(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(
            err,
            RecomendarError::SchemaMismatch {
                expected: 2,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_label_always_below_n_clusters() {
        let m = model();
        for point in [[-5.0, -5.0], [50.0, 50.0], [5.0, 5.0]] {
            let label = m.predict(&point).expect("2 features");
            assert!(label < m.n_clusters());
        }
    }

    #[test]
    fn test_new_rejects_empty_centroids() {
        assert!(KMeansModel::new(vec![], None).is_err());
    }

    #[test]
    fn test_new_rejects_ragged_centroids() {
        let result = KMeansModel::new(vec![vec![0.0, 0.0], vec![1.0]], None);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_rejects_mismatched_feature_names() {
        let result = KMeansModel::new(
            vec![vec![0.0, 0.0]],
            Some(vec!["only_one".to_string()]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_feature_names_in_round_trip() {
        let m = KMeansModel::new(
            vec![vec![0.0, 0.0]],
            Some(vec!["rating".to_string(), "cost".to_string()]),
        )
        .expect("valid model");

        let json = serde_json::to_string(&m).expect("serialize");
        let back: KMeansModel = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.feature_names_in().expect("declared names").len(), 2);
    }

    #[test]
    fn test_feature_names_in_defaults_to_none() {
        let json = r#"{"centroids": [[0.0, 1.0]]}"#;
        let m: KMeansModel = serde_json::from_str(json).expect("deserialize");
        assert!(m.feature_names_in().is_none());
        assert_eq!(m.n_features(), 2);
    }
}
