//! Recommendation pipeline: query → encode → resolve → select.
//!
//! [`Recommender`] is the facade a presentation layer talks to. Each call
//! is a pure computation over the immutable loaded artifacts; per-query
//! state lives on the call stack, so concurrent callers need no locking.
//!
//! Empty outcomes are not errors. A resolved cluster with no catalog
//! members and a populated cluster whose members all fail the city/cuisine
//! filters are signaled as distinct [`Recommendation`] variants so callers
//! can present different messaging.

use std::sync::Arc;

use crate::artifacts::{ArtifactStore, Artifacts};
use crate::catalog::{Catalog, RestaurantRecord};
use crate::cluster::ClusterId;
use crate::encoding::encode;
use crate::error::Result;

/// Default cap on returned rows.
pub const DEFAULT_RESULT_CAP: usize = 30;

/// One user request.
///
/// `city` and `cuisine` must belong to the encoder vocabularies; anything
/// else is rejected with `UnknownCategory` before the cluster model runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Requested city.
    pub city: String,
    /// Requested cuisine.
    pub cuisine: String,
    /// Desired rating, in [0.0, 5.0].
    pub rating: f32,
    /// Desired rating count (>= 1).
    pub rating_count: u32,
    /// Desired cost for two.
    pub cost: f32,
}

impl Query {
    /// Creates a query.
    #[must_use]
    pub fn new(
        city: impl Into<String>,
        cuisine: impl Into<String>,
        rating: f32,
        rating_count: u32,
        cost: f32,
    ) -> Self {
        Self {
            city: city.into(),
            cuisine: cuisine.into(),
            rating,
            rating_count,
            cost,
        }
    }
}

/// Outcome of a recommendation request.
///
/// Carries no guarantee of non-emptiness; each empty stage is signaled
/// distinctly.
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    /// Matching restaurants, rating-descending, at most the requested cap.
    Ranked(Vec<RestaurantRecord>),
    /// The resolved cluster has no catalog members.
    EmptyCluster(ClusterId),
    /// The cluster has members, but none survived the city/cuisine
    /// substring filters.
    NoFilterMatch(ClusterId),
}

impl Recommendation {
    /// Returns the ranked records, or an empty slice for the empty
    /// outcomes.
    #[must_use]
    pub fn records(&self) -> &[RestaurantRecord] {
        match self {
            Recommendation::Ranked(records) => records,
            _ => &[],
        }
    }

    /// Returns true for either empty outcome.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

/// Retrieves the resolved cluster's members, narrows them by case-folded
/// substring match on cuisine then city, ranks by rating descending
/// (stable, ties keep original catalog order), and truncates to `cap`.
///
/// Substring containment, not equality: `"chinese"` matches a record whose
/// cuisine is `"North Indian, Chinese"`. A deliberate looseness for
/// multi-valued comma-joined fields.
#[must_use]
pub fn select(
    cluster: ClusterId,
    query: &Query,
    catalog: &Catalog,
    cap: usize,
) -> Recommendation {
    let members = catalog.members_of(cluster);
    if members.is_empty() {
        return Recommendation::EmptyCluster(cluster);
    }

    let cuisine_needle = query.cuisine.to_lowercase();
    let city_needle = query.city.to_lowercase();

    let mut matches: Vec<&RestaurantRecord> = members
        .into_iter()
        .filter(|r| r.cuisine.to_lowercase().contains(&cuisine_needle))
        .filter(|r| r.city.to_lowercase().contains(&city_needle))
        .collect();

    if matches.is_empty() {
        return Recommendation::NoFilterMatch(cluster);
    }

    matches.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    matches.truncate(cap);

    Recommendation::Ranked(matches.into_iter().cloned().collect())
}

/// The recommendation engine facade.
///
/// # Examples
///
/// ```no_run
/// use recomendar::artifacts::{ArtifactStore, FsArtifactSource};
/// use recomendar::recommend::{Query, Recommendation, Recommender};
///
/// let store = ArtifactStore::new(FsArtifactSource::new("/var/lib/recomendar"));
/// let recommender = Recommender::load(&store)?;
///
/// let query = Query::new("Mumbai", "Chinese", 4.0, 100, 300.0);
/// match recommender.recommend(&query)? {
///     Recommendation::Ranked(records) => println!("{} matches", records.len()),
///     Recommendation::EmptyCluster(_) => println!("no cluster match"),
///     Recommendation::NoFilterMatch(_) => println!("no match after filtering"),
/// }
/// # Ok::<(), recomendar::error::RecomendarError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Recommender {
    artifacts: Arc<Artifacts>,
}

impl Recommender {
    /// Creates a recommender over already-loaded artifacts.
    #[must_use]
    pub fn new(artifacts: Arc<Artifacts>) -> Self {
        Self { artifacts }
    }

    /// Loads artifacts from `store` (a no-op if already loaded) and wraps
    /// them in a recommender.
    ///
    /// # Errors
    ///
    /// Returns `ArtifactLoad` if any artifact is unreachable or unparsable.
    pub fn load(store: &ArtifactStore) -> Result<Self> {
        Ok(Self::new(store.artifacts()?))
    }

    /// Returns the loaded artifacts.
    #[must_use]
    pub fn artifacts(&self) -> &Artifacts {
        &self.artifacts
    }

    /// Runs the full pipeline with the default result cap of
    /// [`DEFAULT_RESULT_CAP`].
    ///
    /// # Errors
    ///
    /// Returns `UnknownCategory` for a city/cuisine outside the encoder
    /// vocabularies (checked before the cluster model runs) or
    /// `SchemaMismatch` on a mispaired model artifact.
    pub fn recommend(&self, query: &Query) -> Result<Recommendation> {
        self.recommend_with_cap(query, DEFAULT_RESULT_CAP)
    }

    /// Runs the full pipeline, returning at most `cap` rows.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Recommender::recommend`].
    pub fn recommend_with_cap(&self, query: &Query, cap: usize) -> Result<Recommendation> {
        let artifacts = &self.artifacts;
        let vector = encode(
            query,
            artifacts.scaler(),
            artifacts.city_encoder(),
            artifacts.cuisine_encoder(),
            artifacts.expected_schema(),
        )?;
        let cluster = artifacts.model().predict(vector.values())?;
        Ok(select(cluster, query, artifacts.catalog(), cap))
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

    fn query(city: &str, cuisine: &str) -> Query {
        Query::new(city, cuisine, 4.0, 100, 300.0)
    }

    #[test]
    fn test_select_empty_cluster_signal() {
        let catalog = Catalog::new(vec![record("A", "Mumbai", "Chinese", 4.0, 1)]);
        let result = select(7, &query("Mumbai", "Chinese"), &catalog, 30);
        assert_eq!(result, Recommendation::EmptyCluster(7));
        assert!(result.is_empty());
    }

    #[test]
    fn test_select_no_filter_match_signal() {
        let catalog = Catalog::new(vec![record("A", "Delhi", "Biryani", 4.0, 1)]);
        let result = select(1, &query("Mumbai", "Chinese"), &catalog, 30);
        assert_eq!(result, Recommendation::NoFilterMatch(1));
        assert!(result.is_empty());
    }

    #[test]
    fn test_select_case_insensitive_substring_match() {
        let catalog = Catalog::new(vec![record(
            "Spice Route",
            "Mumbai",
            "North Indian, Chinese",
            4.5,
            3,
        )]);
        let result = select(3, &query("mumbai", "chinese"), &catalog, 30);
        assert_eq!(result.records().len(), 1);
        assert_eq!(result.records()[0].name, "Spice Route");
    }

    #[test]
    fn test_select_sorts_by_rating_descending() {
        let catalog = Catalog::new(vec![
            record("Low", "Mumbai", "Chinese", 3.1, 1),
            record("High", "Mumbai", "Chinese", 4.8, 1),
            record("Mid", "Mumbai", "Chinese", 4.0, 1),
        ]);
        let result = select(1, &query("Mumbai", "Chinese"), &catalog, 30);
        let names: Vec<&str> = result.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["High", "Mid", "Low"]);
    }

    #[test]
    fn test_select_ties_keep_catalog_order() {
        let catalog = Catalog::new(vec![
            record("First", "Mumbai", "Chinese", 4.0, 1),
            record("Second", "Mumbai", "Chinese", 4.0, 1),
        ]);
        let result = select(1, &query("Mumbai", "Chinese"), &catalog, 30);
        let names: Vec<&str> = result.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn test_select_truncates_to_cap() {
        let records: Vec<RestaurantRecord> = (0..45)
            .map(|i| record(&format!("R{i}"), "Mumbai", "Chinese", (i as f32) / 10.0, 1))
            .collect();
        let catalog = Catalog::new(records);

        let result = select(1, &query("Mumbai", "Chinese"), &catalog, 30);
        let returned = result.records();
        assert_eq!(returned.len(), 30);
        // The 30 highest-rated survive: R44 down to R15.
        assert_eq!(returned[0].name, "R44");
        assert_eq!(returned[29].name, "R15");
    }

    #[test]
    fn test_select_filters_city_within_cluster() {
        let catalog = Catalog::new(vec![
            record("A", "Mumbai", "Chinese", 4.0, 1),
            record("B", "Delhi", "Chinese", 4.9, 1),
        ]);
        let result = select(1, &query("Mumbai", "Chinese"), &catalog, 30);
        assert_eq!(result.records().len(), 1);
        assert_eq!(result.records()[0].name, "A");
    }

    #[test]
    fn test_records_empty_for_empty_outcomes() {
        assert!(Recommendation::EmptyCluster(1).records().is_empty());
        assert!(Recommendation::NoFilterMatch(2).records().is_empty());
        assert!(!Recommendation::Ranked(vec![record("A", "X", "Y", 4.0, 1)]).is_empty());
    }
}
