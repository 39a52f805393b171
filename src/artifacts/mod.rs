//! Artifact store: load-once access to the pre-trained objects.
//!
//! Six artifacts come out of the offline training run: the reference
//! feature table, the clustered catalog, the numeric scaler, the cluster
//! model, and the two categorical encoders. They are fetched through an
//! injectable [`ArtifactSource`] (filesystem in deployment, in-memory
//! fixtures in tests), deserialized from JSON once, and shared read-only
//! for the rest of the process lifetime. Load failures are fatal to the
//! session and are surfaced directly, never retried.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::cluster::KMeansModel;
use crate::error::{RecomendarError, Result};
use crate::preprocessing::{OneHotEncoder, StandardScaler};

/// Identifies one of the six pre-trained artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactId {
    /// Feature table the model was trained on; its columns are the
    /// fallback expected schema.
    ReferenceTable,
    /// Clustered restaurant catalog.
    Catalog,
    /// Pre-fit numeric scaler.
    Scaler,
    /// Pre-trained cluster assignment model.
    ClusterModel,
    /// City one-hot encoder.
    CityEncoder,
    /// Cuisine one-hot encoder.
    CuisineEncoder,
}

impl ArtifactId {
    /// All artifact identities, in load order.
    pub const ALL: [ArtifactId; 6] = [
        ArtifactId::ReferenceTable,
        ArtifactId::Catalog,
        ArtifactId::Scaler,
        ArtifactId::ClusterModel,
        ArtifactId::CityEncoder,
        ArtifactId::CuisineEncoder,
    ];

    /// Stable name, used for file names and error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ArtifactId::ReferenceTable => "reference_table",
            ArtifactId::Catalog => "clustered_catalog",
            ArtifactId::Scaler => "scaler",
            ArtifactId::ClusterModel => "kmeans_model",
            ArtifactId::CityEncoder => "city_encoder",
            ArtifactId::CuisineEncoder => "cuisine_encoder",
        }
    }
}

/// Byte source for artifacts. The seam that keeps the core format-agnostic
/// and testable without network or disk.
pub trait ArtifactSource: Send + Sync {
    /// Fetches the raw bytes of `id`.
    ///
    /// # Errors
    ///
    /// Returns `ArtifactLoad` (or `Io`) if the artifact is unreachable.
    fn fetch(&self, id: ArtifactId) -> Result<Vec<u8>>;
}

/// Filesystem-backed source: one `<name>.json` file per artifact under a
/// root directory.
#[derive(Debug, Clone)]
pub struct FsArtifactSource {
    root: PathBuf,
}

impl FsArtifactSource {
    /// Creates a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the path an artifact is read from.
    #[must_use]
    pub fn path_for(&self, id: ArtifactId) -> PathBuf {
        self.root.join(format!("{}.json", id.name()))
    }
}

impl ArtifactSource for FsArtifactSource {
    fn fetch(&self, id: ArtifactId) -> Result<Vec<u8>> {
        std::fs::read(self.path_for(id))
            .map_err(|e| RecomendarError::artifact_load(id.name(), e))
    }
}

/// In-memory source for tests and embedded fixtures.
#[derive(Debug, Clone, Default)]
pub struct InMemoryArtifactSource {
    payloads: HashMap<ArtifactId, Vec<u8>>,
}

impl InMemoryArtifactSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores raw bytes for `id`.
    pub fn insert(&mut self, id: ArtifactId, bytes: Vec<u8>) {
        self.payloads.insert(id, bytes);
    }

    /// Serializes `value` as the JSON payload for `id`.
    ///
    /// # Errors
    ///
    /// Returns `ArtifactLoad` if serialization fails.
    pub fn insert_json<T: Serialize>(&mut self, id: ArtifactId, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec(value)
            .map_err(|e| RecomendarError::artifact_load(id.name(), e))?;
        self.insert(id, bytes);
        Ok(())
    }
}

impl ArtifactSource for InMemoryArtifactSource {
    fn fetch(&self, id: ArtifactId) -> Result<Vec<u8>> {
        self.payloads
            .get(&id)
            .cloned()
            .ok_or_else(|| RecomendarError::artifact_load(id.name(), "artifact not provided"))
    }
}

/// The feature table the cluster model was trained on.
///
/// Only its column list participates in recommendation: it is the fallback
/// expected schema when the model artifact declares no feature names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTable {
    /// Training-frame column names, in order.
    columns: Vec<String>,
    /// Training-frame rows; retained for diagnostics, unused at inference.
    #[serde(default)]
    rows: Vec<Vec<f32>>,
}

impl ReferenceTable {
    /// Creates a reference table from its column list.
    ///
    /// # Errors
    ///
    /// Returns an error if the column list is empty or any row disagrees
    /// with it in width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f32>>) -> Result<Self> {
        let table = Self { columns, rows };
        table.validate()?;
        Ok(table)
    }

    /// Checks internal consistency after deserialization.
    ///
    /// # Errors
    ///
    /// Returns an error on an empty column list or ragged rows.
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err("reference table has no columns".into());
        }
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != self.columns.len() {
                return Err(RecomendarError::schema_mismatch(
                    &format!("reference table row {i}"),
                    self.columns.len(),
                    row.len(),
                ));
            }
        }
        Ok(())
    }

    /// Returns the column names, in order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the number of retained rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }
}

/// The six loaded artifacts, read-only for the process lifetime.
#[derive(Debug, Clone)]
pub struct Artifacts {
    reference: ReferenceTable,
    catalog: Catalog,
    scaler: StandardScaler,
    model: KMeansModel,
    city_encoder: OneHotEncoder,
    cuisine_encoder: OneHotEncoder,
}

impl Artifacts {
    /// Assembles artifacts directly, validating cross-artifact consistency.
    /// Intended for in-process fixtures; deployments go through
    /// [`ArtifactStore`].
    ///
    /// # Errors
    ///
    /// Returns an error if any artifact fails its own validation.
    pub fn new(
        reference: ReferenceTable,
        catalog: Catalog,
        scaler: StandardScaler,
        model: KMeansModel,
        city_encoder: OneHotEncoder,
        cuisine_encoder: OneHotEncoder,
    ) -> Result<Self> {
        let artifacts = Self {
            reference,
            catalog,
            scaler,
            model,
            city_encoder,
            cuisine_encoder,
        };
        artifacts.validate()?;
        Ok(artifacts)
    }

    fn validate(&self) -> Result<()> {
        self.reference.validate()?;
        self.scaler.validate()?;
        self.model.validate()?;
        self.city_encoder.validate()?;
        self.cuisine_encoder.validate()?;
        Ok(())
    }

    /// Returns the reference feature table.
    #[must_use]
    pub fn reference(&self) -> &ReferenceTable {
        &self.reference
    }

    /// Returns the clustered catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the pre-fit numeric scaler.
    #[must_use]
    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    /// Returns the cluster assignment model.
    #[must_use]
    pub fn model(&self) -> &KMeansModel {
        &self.model
    }

    /// Returns the city encoder.
    #[must_use]
    pub fn city_encoder(&self) -> &OneHotEncoder {
        &self.city_encoder
    }

    /// Returns the cuisine encoder.
    #[must_use]
    pub fn cuisine_encoder(&self) -> &OneHotEncoder {
        &self.cuisine_encoder
    }

    /// The feature names the cluster model expects, in order: the model's
    /// declared list when the training run recorded one, else the
    /// reference table's columns.
    #[must_use]
    pub fn expected_schema(&self) -> &[String] {
        self.model
            .feature_names_in()
            .unwrap_or_else(|| self.reference.columns())
    }
}

/// Load-once cache over an [`ArtifactSource`].
///
/// The first [`ArtifactStore::artifacts`] call fetches and deserializes all
/// six artifacts; every later call returns the same shared instance with no
/// re-fetch. Safe to share across threads: the cache is write-once and the
/// artifacts are immutable.
///
/// # Examples
///
/// ```no_run
/// use recomendar::artifacts::{ArtifactStore, FsArtifactSource};
///
/// let store = ArtifactStore::new(FsArtifactSource::new("/var/lib/recomendar"));
/// let artifacts = store.artifacts()?;
/// println!("{} catalog rows", artifacts.catalog().len());
/// # Ok::<(), recomendar::error::RecomendarError>(())
/// ```
pub struct ArtifactStore {
    source: Box<dyn ArtifactSource>,
    cache: OnceLock<Arc<Artifacts>>,
}

impl std::fmt::Debug for ArtifactStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactStore")
            .field("loaded", &self.cache.get().is_some())
            .finish()
    }
}

impl ArtifactStore {
    /// Creates a store over `source`. Nothing is fetched until the first
    /// [`ArtifactStore::artifacts`] call.
    pub fn new(source: impl ArtifactSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            cache: OnceLock::new(),
        }
    }

    /// Returns the loaded artifacts, fetching and deserializing them on the
    /// first call only.
    ///
    /// # Errors
    ///
    /// Returns `ArtifactLoad` if any artifact is unreachable or unparsable.
    /// A failed load is not cached; the next call retries from scratch
    /// (the caller decides whether the session survives).
    pub fn artifacts(&self) -> Result<Arc<Artifacts>> {
        if let Some(loaded) = self.cache.get() {
            return Ok(Arc::clone(loaded));
        }
        let loaded = Arc::new(self.load_all()?);
        // A concurrent loader may have won the race; either value is
        // equivalent, keep whichever landed first.
        let _ = self.cache.set(Arc::clone(&loaded));
        Ok(self
            .cache
            .get()
            .map(Arc::clone)
            .unwrap_or(loaded))
    }

    /// Returns true if the artifacts have been loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.cache.get().is_some()
    }

    fn load_all(&self) -> Result<Artifacts> {
        let reference: ReferenceTable = self.parse(ArtifactId::ReferenceTable)?;
        let catalog: Catalog = self.parse(ArtifactId::Catalog)?;
        let scaler: StandardScaler = self.parse(ArtifactId::Scaler)?;
        let model: KMeansModel = self.parse(ArtifactId::ClusterModel)?;
        let city_encoder: OneHotEncoder = self.parse(ArtifactId::CityEncoder)?;
        let cuisine_encoder: OneHotEncoder = self.parse(ArtifactId::CuisineEncoder)?;

        Artifacts::new(
            reference,
            catalog,
            scaler,
            model,
            city_encoder,
            cuisine_encoder,
        )
    }

    fn parse<T: DeserializeOwned>(&self, id: ArtifactId) -> Result<T> {
        let bytes = self.source.fetch(id)?;
        serde_json::from_slice(&bytes).map_err(|e| RecomendarError::artifact_load(id.name(), e))
    }
}
