//! Similarity scoring and connected-component clustering of hunk records.
//!
//! Records form the vertices of an undirected graph; an edge joins every
//! pair whose score reaches the threshold. Clusters are the connected
//! components, so membership is transitive: A~B and B~C put A, B and C
//! together even when A and C score low.

pub mod cluster;
pub mod ratio;

pub use cluster::{cluster_records, cluster_records_with, Cluster, DEFAULT_SIMILARITY_THRESHOLD};
pub use ratio::{sequence_ratio, MatchBlock, MatchTarget};
