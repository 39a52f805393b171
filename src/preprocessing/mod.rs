//! Inference-side preprocessing transformers.
//!
//! Both transformers arrive pre-fit as artifacts of the offline training
//! run; this module only applies them. Training is out of scope.
//!
//! # Example
//!
//! ```
//! use recomendar::preprocessing::StandardScaler;
//!
//! let scaler = StandardScaler::new(
//!     vec!["rating".to_string(), "rating_count".to_string(), "cost".to_string()],
//!     vec![3.5, 100.0, 350.0],
//!     vec![0.5, 50.0, 150.0],
//! ).expect("consistent parameter arity");
//!
//! let scaled = scaler.transform(&[4.0, 150.0, 500.0]).expect("3 features");
//! assert!((scaled[0] - 1.0).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{RecomendarError, Result};

/// Per-feature affine normalization: z = (x - mean) / scale.
///
/// Mean and scale are fit during training and applied unchanged at
/// inference. The standard score of a sample x is: z = (x - mean) / scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Names of the numeric features, in transform order.
    feature_names: Vec<String>,
    /// Mean of each feature (fit during training).
    mean: Vec<f32>,
    /// Scale (standard deviation) of each feature.
    scale: Vec<f32>,
}

impl StandardScaler {
    /// Creates a pre-fit scaler from stored parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if `feature_names`, `mean`, and `scale` differ in
    /// length or are empty.
    pub fn new(feature_names: Vec<String>, mean: Vec<f32>, scale: Vec<f32>) -> Result<Self> {
        let scaler = Self {
            feature_names,
            mean,
            scale,
        };
        scaler.validate()?;
        Ok(scaler)
    }

    /// Checks internal parameter consistency.
    ///
    /// Called by the artifact store after deserialization, since serde
    /// bypasses [`StandardScaler::new`].
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter vectors are empty or disagree in
    /// length.
    pub fn validate(&self) -> Result<()> {
        if self.feature_names.is_empty() {
            return Err("scaler has no features".into());
        }
        if self.mean.len() != self.feature_names.len() {
            return Err(RecomendarError::schema_mismatch(
                "scaler mean",
                self.feature_names.len(),
                self.mean.len(),
            ));
        }
        if self.scale.len() != self.feature_names.len() {
            return Err(RecomendarError::schema_mismatch(
                "scaler scale",
                self.feature_names.len(),
                self.scale.len(),
            ));
        }
        Ok(())
    }

    /// Returns the feature names in transform order.
    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Returns the mean of each feature.
    #[must_use]
    pub fn mean(&self) -> &[f32] {
        &self.mean
    }

    /// Returns the scale of each feature.
    #[must_use]
    pub fn scale(&self) -> &[f32] {
        &self.scale
    }

    /// Returns the number of features the scaler was fit on.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Standardizes one sample using the stored mean and scale.
    ///
    /// Deterministic; near-zero scales leave the centered value undivided
    /// to avoid blowing up constant features.
    ///
    /// # Errors
    ///
    /// Returns `SchemaMismatch` if `x` does not have one value per fitted
    /// feature.
    pub fn transform(&self, x: &[f32]) -> Result<Vec<f32>> {
        if x.len() != self.n_features() {
            return Err(RecomendarError::schema_mismatch(
                "scaler input",
                self.n_features(),
                x.len(),
            ));
        }

        let mut result = Vec::with_capacity(x.len());
        for (j, &value) in x.iter().enumerate() {
            let mut val = value - self.mean[j];
            if self.scale[j] > 1e-10 {
                val /= self.scale[j];
            }
            result.push(val);
        }
        Ok(result)
    }
}

/// One-hot encoder over a fixed, ordered class list.
///
/// Carries the user-facing field name ("city" or "cuisine") so rejections
/// can name the offending field.
///
/// # Examples
///
/// ```
/// use recomendar::preprocessing::OneHotEncoder;
///
/// let encoder = OneHotEncoder::new(
///     "city",
///     vec!["Delhi".to_string(), "Mumbai".to_string()],
/// ).expect("non-empty classes");
///
/// assert_eq!(encoder.transform("Mumbai").expect("known city"), vec![0.0, 1.0]);
/// assert!(encoder.transform("Atlantis").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    /// User-facing field this encoder covers.
    field: String,
    /// Known classes, in training column order.
    classes: Vec<String>,
}

impl OneHotEncoder {
    /// Creates an encoder from a field name and its known classes.
    ///
    /// # Errors
    ///
    /// Returns an error if the class list is empty or contains duplicates.
    pub fn new(field: impl Into<String>, classes: Vec<String>) -> Result<Self> {
        let encoder = Self {
            field: field.into(),
            classes,
        };
        encoder.validate()?;
        Ok(encoder)
    }

    /// Checks internal consistency after deserialization.
    ///
    /// # Errors
    ///
    /// Returns an error if the class list is empty or contains duplicates.
    pub fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(format!("{} encoder has no classes", self.field).into());
        }
        let mut seen = std::collections::HashSet::new();
        for class in &self.classes {
            if !seen.insert(class.as_str()) {
                return Err(format!("{} encoder has duplicate class '{class}'", self.field).into());
            }
        }
        Ok(())
    }

    /// Returns the field name this encoder covers.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the known classes, in training column order.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Returns true if `value` is a known class.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.classes.iter().any(|c| c == value)
    }

    /// One-hot encodes `value` over all known classes: exactly one 1.0 at
    /// the class position, 0.0 elsewhere.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCategory` naming the field and value if `value` is
    /// not a known class.
    pub fn transform(&self, value: &str) -> Result<Vec<f32>> {
        let position = self
            .classes
            .iter()
            .position(|c| c == value)
            .ok_or_else(|| RecomendarError::unknown_category(&self.field, value))?;

        let mut row = vec![0.0; self.classes.len()];
        row[position] = 1.0;
        Ok(row)
    }
}
