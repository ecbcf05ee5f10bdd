//! Version-control client adapters
//!
//! This module holds the subprocess adapters for the two systems being
//! bridged and the status model they share:
//!
//! - `git`: the distributed side (branching, staging, merging)
//! - `tfs`: the centralized side (workspace operations, check-in)
//! - `status`: porcelain-style status reports parsed into change categories

pub mod git;
pub mod status;
pub mod tfs;

pub use git::Git;
pub use status::ChangeStatus;
pub use tfs::Tfs;
