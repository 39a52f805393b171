//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use recomendar::prelude::*;
//! ```

pub use crate::artifacts::{
    ArtifactId, ArtifactSource, ArtifactStore, Artifacts, FsArtifactSource,
    InMemoryArtifactSource, ReferenceTable,
};
pub use crate::catalog::{Catalog, CategoryVocabulary, RestaurantRecord};
pub use crate::cluster::{ClusterId, KMeansModel};
pub use crate::encoding::{encode, FeatureVector};
pub use crate::error::{RecomendarError, Result};
pub use crate::preprocessing::{OneHotEncoder, StandardScaler};
pub use crate::recommend::{Query, Recommendation, Recommender, DEFAULT_RESULT_CAP};
