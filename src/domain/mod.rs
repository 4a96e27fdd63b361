//! Domain layer: the organization-chart transformation engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod classifier;
pub mod entities;
pub mod error;
pub mod ordering;
pub mod organization;
pub mod reporting;
pub mod search;
pub mod summary;
pub mod view;

pub use arena::{ArenaNode, NodeArena};
pub use classifier::{RecordClassifier, DEFAULT_COMPANY};
pub use entities::*;
pub use error::DomainError;
pub use organization::{OrganizationTreeBuilder, UNASSIGNED_GROUP};
pub use reporting::ReportingTreeBuilder;
pub use search::{filter_forest, node_matches, normalize, tokens, SearchFilter, StructuralFilter};
pub use summary::{describe_filters, FilterOptions, Summary, TitleCount};
pub use view::{ChartOptions, OrgChart};
