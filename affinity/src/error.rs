//! Error types for affinity operations.

use {std::io, thiserror::Error};

/// Errors that can occur while changing the calling thread's affinity.
///
/// Reads never produce one of these; a failed read collapses to an empty
/// core list.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AffinityError {
    /// The OS rejected the request (permission denied, nonexistent core, ...)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// No affinity backend exists for this platform
    #[error("thread affinity is not supported on this platform")]
    NotSupported,

    /// Core ID cannot be represented in the affinity mask
    #[error("core {core} is out of range (max representable core is {max})")]
    InvalidCoreId { core: usize, max: usize },

    /// The requested core set has no usable core in it
    #[error("core set cannot be empty")]
    EmptyCoreSet,
}
