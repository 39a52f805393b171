//! Feature encoding: raw query to model-ready vector.
//!
//! Turns a [`Query`](crate::recommend::Query) into a numeric vector matching
//! the cluster model's expected schema. The subtle part is the final
//! reconciliation: features the model expects but the raw vector lacks are
//! zero-filled, extras are dropped, and the result is reordered to the
//! schema exactly. Get the column alignment wrong and cluster predictions
//! become silently meaningless rather than erroring, so that step carries
//! its own property tests.

use std::collections::HashMap;

use crate::error::{RecomendarError, Result};
use crate::preprocessing::{OneHotEncoder, StandardScaler};
use crate::recommend::Query;

/// Ordered mapping from feature name to value.
///
/// After [`FeatureVector::align_to`], the names equal the target schema
/// exactly, in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureVector {
    names: Vec<String>,
    values: Vec<f32>,
}

impl FeatureVector {
    /// Creates an empty vector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a vector from (name, value) pairs, preserving order.
    #[must_use]
    pub fn from_pairs(pairs: Vec<(String, f32)>) -> Self {
        let mut fv = Self::new();
        for (name, value) in pairs {
            fv.push(name, value);
        }
        fv
    }

    /// Appends a named feature.
    pub fn push(&mut self, name: impl Into<String>, value: f32) {
        self.names.push(name.into());
        self.values.push(value);
    }

    /// Returns the feature names, in order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the feature values, in name order.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Returns the value of `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f32> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.values[i])
    }

    /// Returns the number of features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the vector holds no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Reconciles the vector against a target schema: expected features
    /// absent here are zero-filled, features not in the schema are dropped,
    /// and the output order is the schema's order exactly.
    #[must_use]
    pub fn align_to(&self, schema: &[String]) -> FeatureVector {
        let by_name: HashMap<&str, f32> = self
            .names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
            .collect();

        let mut aligned = FeatureVector::new();
        for name in schema {
            aligned.push(name.clone(), by_name.get(name.as_str()).copied().unwrap_or(0.0));
        }
        aligned
    }
}

/// Encodes a query into a vector matching `expected_schema`.
///
/// Steps, in order: validate city against the city encoder's classes,
/// validate cuisine likewise, scale the numeric fields with the pre-fit
/// scaler, one-hot both categoricals over their full class lists (one-hot
/// feature names are the raw class strings, as in the training frame),
/// concatenate, then [`FeatureVector::align_to`] the schema.
///
/// Validation is eager: an unknown category stops the pipeline before the
/// cluster model is ever consulted.
///
/// # Errors
///
/// Returns `UnknownCategory` for a city or cuisine outside the encoder
/// vocabularies, or `SchemaMismatch` if the scaler arity disagrees with the
/// query's numeric fields.
pub fn encode(
    query: &Query,
    scaler: &StandardScaler,
    city_encoder: &OneHotEncoder,
    cuisine_encoder: &OneHotEncoder,
    expected_schema: &[String],
) -> Result<FeatureVector> {
    if !city_encoder.contains(&query.city) {
        return Err(RecomendarError::unknown_category(
            city_encoder.field(),
            &query.city,
        ));
    }
    if !cuisine_encoder.contains(&query.cuisine) {
        return Err(RecomendarError::unknown_category(
            cuisine_encoder.field(),
            &query.cuisine,
        ));
    }

    #[allow(clippy::cast_precision_loss)]
    let numeric = [query.rating, query.rating_count as f32, query.cost];
    let scaled = scaler.transform(&numeric)?;

    let mut raw = FeatureVector::new();
    for (name, value) in scaler.feature_names().iter().zip(scaled) {
        raw.push(name.clone(), value);
    }
    for (name, value) in city_encoder
        .classes()
        .iter()
        .zip(city_encoder.transform(&query.city)?)
    {
        raw.push(name.clone(), value);
    }
    for (name, value) in cuisine_encoder
        .classes()
        .iter()
        .zip(cuisine_encoder.transform(&query.cuisine)?)
    {
        raw.push(name.clone(), value);
    }

    Ok(raw.align_to(expected_schema))
}
