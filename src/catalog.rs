//! Clustered restaurant catalog and category vocabularies.
//!
//! The catalog is a read-only table of restaurants, each row tagged with the
//! cluster label assigned by the paired training run. Vocabularies are
//! derived from the comma-separated `city`/`cuisine` columns and feed the
//! selectable choices of a presentation layer.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::cluster::ClusterId;

/// A single catalog row. Immutable once loaded.
///
/// `cuisine` (and, in multi-branch datasets, `city`) may hold several
/// comma-separated values, e.g. `"North Indian, Chinese"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantRecord {
    /// Restaurant name.
    pub name: String,
    /// City the restaurant operates in.
    pub city: String,
    /// Comma-separated cuisine labels.
    pub cuisine: String,
    /// Approximate cost for two.
    pub cost: f32,
    /// Average rating in [0.0, 5.0].
    pub rating: f32,
    /// Number of ratings received (>= 1).
    pub rating_count: u32,
    /// Cluster label from the paired training run.
    pub cluster: ClusterId,
}

/// The clustered catalog: every row carries a cluster label produced by the
/// same model version used at resolution time (a deployment invariant, not
/// checked here).
///
/// # Examples
///
/// ```
/// use recomendar::catalog::{Catalog, RestaurantRecord};
///
/// let catalog = Catalog::new(vec![RestaurantRecord {
///     name: "Spice Route".to_string(),
///     city: "Mumbai".to_string(),
///     cuisine: "North Indian, Chinese".to_string(),
///     cost: 400.0,
///     rating: 4.5,
///     rating_count: 120,
///     cluster: 3,
/// }]);
///
/// assert_eq!(catalog.len(), 1);
/// assert_eq!(catalog.members_of(3).len(), 1);
/// assert!(catalog.members_of(7).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    records: Vec<RestaurantRecord>,
}

impl Catalog {
    /// Creates a catalog from loaded records.
    #[must_use]
    pub fn new(records: Vec<RestaurantRecord>) -> Self {
        Self { records }
    }

    /// Returns all records in original catalog order.
    #[must_use]
    pub fn records(&self) -> &[RestaurantRecord] {
        &self.records
    }

    /// Returns the number of catalog rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the catalog holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the rows tagged with `cluster`, in original catalog order.
    #[must_use]
    pub fn members_of(&self, cluster: ClusterId) -> Vec<&RestaurantRecord> {
        self.records
            .iter()
            .filter(|r| r.cluster == cluster)
            .collect()
    }

    /// Distinct city tokens across the catalog, for selectable choices.
    ///
    /// This is a superset of what the city encoder accepts: tokens present
    /// in the catalog but absent from the encoder's classes are selectable
    /// yet rejected at encoding time (preserved source behavior).
    #[must_use]
    pub fn city_vocabulary(&self) -> CategoryVocabulary {
        CategoryVocabulary::from_delimited(self.records.iter().map(|r| r.city.as_str()))
    }

    /// Distinct cuisine tokens across the catalog, for selectable choices.
    #[must_use]
    pub fn cuisine_vocabulary(&self) -> CategoryVocabulary {
        CategoryVocabulary::from_delimited(self.records.iter().map(|r| r.cuisine.as_str()))
    }
}

/// An ordered, deduplicated set of category strings.
///
/// Built either from an encoder's known classes or from the distinct
/// comma-separated tokens of a catalog column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryVocabulary {
    values: Vec<String>,
}

impl CategoryVocabulary {
    /// Builds a vocabulary from raw values: trims whitespace, drops empty
    /// entries, deduplicates, and sorts.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set: BTreeSet<String> = values
            .into_iter()
            .map(|v| v.as_ref().trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();
        Self {
            values: set.into_iter().collect(),
        }
    }

    /// Builds a vocabulary from comma-separated column cells.
    pub fn from_delimited<'a, I>(cells: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::from_values(cells.into_iter().flat_map(|cell| cell.split(',')))
    }

    /// Returns the vocabulary values, sorted and deduplicated.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Returns true if `value` is a member of the vocabulary.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.values.binary_search_by(|v| v.as_str().cmp(value)).is_ok()
    }

    /// Returns the number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the vocabulary is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, city: &str, cuisine: &str, rating: f32, cluster: ClusterId) -> RestaurantRecord {
        RestaurantRecord {
            name: name.to_string(),
            city: city.to_string(),
            cuisine: cuisine.to_string(),
            cost: 300.0,
            rating,
            rating_count: 50,
            cluster,
        }
    }

    #[test]
    fn test_members_of_filters_by_cluster() {
        let catalog = Catalog::new(vec![
            record("A", "Mumbai", "Chinese", 4.0, 1),
            record("B", "Delhi", "North Indian", 4.5, 2),
            record("C", "Mumbai", "Chinese", 3.9, 1),
        ]);

        let members = catalog.members_of(1);
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].name, "A");
        assert_eq!(members[1].name, "C");
    }

    #[test]
    fn test_members_of_missing_cluster_is_empty() {
        let catalog = Catalog::new(vec![record("A", "Mumbai", "Chinese", 4.0, 1)]);
        assert!(catalog.members_of(99).is_empty());
    }

    #[test]
    fn test_cuisine_vocabulary_splits_and_trims() {
        let catalog = Catalog::new(vec![
            record("A", "Mumbai", "North Indian, Chinese", 4.0, 1),
            record("B", "Delhi", "Chinese,  Biryani", 4.5, 2),
        ]);

        let vocab = catalog.cuisine_vocabulary();
        assert_eq!(vocab.values(), &["Biryani", "Chinese", "North Indian"]);
    }

    #[test]
    fn test_city_vocabulary_deduplicates() {
        let catalog = Catalog::new(vec![
            record("A", "Mumbai", "Chinese", 4.0, 1),
            record("B", "Mumbai", "Biryani", 4.5, 2),
            record("C", "Delhi", "Chinese", 3.5, 1),
        ]);

        let vocab = catalog.city_vocabulary();
        assert_eq!(vocab.values(), &["Delhi", "Mumbai"]);
        assert!(vocab.contains("Mumbai"));
        assert!(!vocab.contains("Atlantis"));
    }

    #[test]
    fn test_vocabulary_drops_empty_tokens() {
        let vocab = CategoryVocabulary::from_delimited(vec!["Chinese, , Thai", ""]);
        assert_eq!(vocab.values(), &["Chinese", "Thai"]);
    }

    #[test]
    fn test_vocabulary_is_sorted() {
        let vocab = CategoryVocabulary::from_values(vec!["b", "a", "c", "a"]);
        assert_eq!(vocab.values(), &["a", "b", "c"]);
        assert_eq!(vocab.len(), 3);
        assert!(!vocab.is_empty());
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let rec = record("Spice Route", "Mumbai", "North Indian, Chinese", 4.5, 3);
        let json = serde_json::to_string(&rec).expect("serialize");
        let back: RestaurantRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, rec);
    }

    #[test]
    fn test_catalog_transparent_json_shape() {
        let json = r#"[{
            "name": "A", "city": "Mumbai", "cuisine": "Chinese",
            "cost": 300.0, "rating": 4.0, "rating_count": 50, "cluster": 1
        }]"#;
        let catalog: Catalog = serde_json::from_str(json).expect("deserialize");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.records()[0].city, "Mumbai");
    }
}
