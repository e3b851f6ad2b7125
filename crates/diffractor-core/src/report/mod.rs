//! Cluster report model and its renderers.
//!
//! The report owns copies of everything it shows, so a renderer holding a
//! report cannot affect clustering state.

pub mod breadcrumb;
pub mod human_summary;
pub mod model;

pub use breadcrumb::root_breadcrumb;
pub use human_summary::{render_cluster_detail, render_human_summary};
pub use model::{build_report, ClusterEntry, ClusterMember, ClusterReport};
