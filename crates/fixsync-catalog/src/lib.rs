//! # fixsync-catalog
//!
//! The issue catalog for fixsync.
//!
//! An analyzer (the external "issue source") reports [`Issue`]s, each with a
//! source range and one or more candidate [`Fix`]es. The rest of the system
//! only ever reads an [`IssueCatalog`] snapshot; resolving a patch produces a
//! new snapshot rather than mutating a shared list.
//!
//! ## Key components
//!
//! - [`IssueSource`] — async trait for fetching issues; [`JsonIssueSource`]
//!   reads them from a JSON file.
//! - [`IssueCatalog`] — immutable, cheaply cloned snapshot of the issue list.
//! - [`IssueTree`] — arena tree (root → issues → fixes) for list views.

pub mod catalog;
pub mod error;
pub mod issue;
pub mod source;
pub mod tree;

pub use catalog::IssueCatalog;
pub use error::CatalogError;
pub use issue::{Fix, Issue, TextRange};
pub use source::{load_catalog, IssueSource, JsonIssueSource, StaticIssueSource};
pub use tree::{IssueTree, NodeId, NodeKind, TreeItem, TreeNode};
