//! Recomendar: cluster-based restaurant recommendation engine.
//!
//! Maps a query (city, cuisine, rating, rating count, cost) onto a
//! pre-computed cluster of similar restaurants, then filters and ranks
//! that cluster's members. The scaler, categorical encoders, cluster
//! model, and catalog are pre-trained, immutable artifacts loaded once per
//! process; training them is out of scope.
//!
//! Control flow: query → feature encoder → cluster resolver → candidate
//! selector → ranked result set.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use recomendar::prelude::*;
//!
//! // Deployments load these six artifacts through an ArtifactStore; a
//! // fixture works the same way.
//! let artifacts = Artifacts::new(
//!     ReferenceTable::new(
//!         vec![
//!             "rating".to_string(),
//!             "rating_count".to_string(),
//!             "cost".to_string(),
//!             "Mumbai".to_string(),
//!             "Chinese".to_string(),
//!         ],
//!         vec![],
//!     )?,
//!     Catalog::new(vec![RestaurantRecord {
//!         name: "Spice Route".to_string(),
//!         city: "Mumbai".to_string(),
//!         cuisine: "North Indian, Chinese".to_string(),
//!         cost: 400.0,
//!         rating: 4.5,
//!         rating_count: 120,
//!         cluster: 0,
//!     }]),
//!     StandardScaler::new(
//!         vec![
//!             "rating".to_string(),
//!             "rating_count".to_string(),
//!             "cost".to_string(),
//!         ],
//!         vec![0.0, 0.0, 0.0],
//!         vec![1.0, 1.0, 1.0],
//!     )?,
//!     KMeansModel::new(vec![vec![0.0; 5]], None)?,
//!     OneHotEncoder::new("city", vec!["Mumbai".to_string()])?,
//!     OneHotEncoder::new("cuisine", vec!["Chinese".to_string()])?,
//! )?;
//!
//! let recommender = Recommender::new(Arc::new(artifacts));
//! let query = Query::new("Mumbai", "Chinese", 4.5, 120, 400.0);
//!
//! let result = recommender.recommend(&query)?;
//! assert_eq!(result.records()[0].name, "Spice Route");
//! # Ok::<(), RecomendarError>(())
//! ```
//!
//! # Modules
//!
//! - [`artifacts`]: load-once store for the six pre-trained artifacts
//! - [`catalog`]: clustered catalog and category vocabularies
//! - [`preprocessing`]: pre-fit scaler and one-hot encoders
//! - [`cluster`]: nearest-centroid cluster assignment
//! - [`encoding`]: feature vectors and schema reconciliation
//! - [`recommend`]: the query pipeline and candidate selector
//! - [`error`]: error taxonomy

#![forbid(unsafe_code)]

pub mod artifacts;
pub mod catalog;
pub mod cluster;
pub mod encoding;
pub mod error;
pub mod prelude;
pub mod preprocessing;
pub mod recommend;
