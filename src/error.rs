use std::io;

use thiserror::Error;

/// Failure modes surfaced by the pull and push protocols.
///
/// Every variant maps to exit code 1; the distinction matters for what the
/// workspace looks like afterwards. `Aborted` and `Validation` guarantee
/// that neither system has been modified, while `AmbiguousCheckin` leaves
/// the integration branch checked out for manual follow-up.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An external invocation exited nonzero where success was required.
    #[error("`{command}` failed with exit code {code}")]
    Process { command: String, code: i32 },

    /// The binding validation gate rejected the change-set.
    #[error("validation failed, fix the reported files and try again")]
    Validation,

    /// The operator declined a confirmation, or there was nothing to do.
    #[error("{0}")]
    Aborted(String),

    /// The final check-in exited with a code outside the two known-good
    /// values. The change-set is merged into the integration branch but its
    /// registration state in TFS is unknown.
    #[error(
        "tf checkin exited with code {code}; the changes are merged into '{branch}', \
         resolve the check-in from there manually"
    )]
    AmbiguousCheckin { code: i32, branch: String },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SyncError>;
