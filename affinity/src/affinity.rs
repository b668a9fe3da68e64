//! Portable affinity operations for the calling thread.

use {
    crate::{
        backend::{MaskBackend, NativeBackend},
        error::AffinityError,
        mask,
    },
    log::warn,
};

/// Get the logical cores the calling thread is allowed to run on.
///
/// Core IDs come back in ascending order, each below
/// [`MAX_CORES`](crate::MAX_CORES). An empty vector is the only failure
/// signal: it means the platform has no affinity support or the underlying
/// query failed, and the two cannot be told apart.
///
/// On macOS the result is always the full set of logical cores; the OS
/// offers no thread-affinity introspection, not even of a restriction
/// installed through [`set_for_current`].
///
/// # Examples
///
/// ```no_run
/// let cores = corepin_affinity::get_core_ids();
/// println!("thread may run on: {cores:?}");
/// ```
pub fn get_core_ids() -> Vec<usize> {
    core_ids_with(&NativeBackend)
}

/// Restrict the calling thread to the given cores.
///
/// Duplicate IDs are allowed and input order is irrelevant. Returns whether
/// the request was (believed to be) applied. macOS reports success whenever
/// it defers to its scheduler instead of pinning, which is the normal case
/// there; see the crate docs for the per-platform rules.
///
/// Failure detail is collapsed into the boolean; use
/// [`try_set_for_current`] to tell an invalid request apart from an OS
/// rejection.
///
/// # Examples
///
/// ```no_run
/// use corepin_affinity::set_for_current;
///
/// assert!(set_for_current([0]));
/// ```
pub fn set_for_current(ids: impl IntoIterator<Item = usize>) -> bool {
    match try_set_for_current(ids) {
        Ok(()) => true,
        Err(err) => {
            warn!("failed to set thread affinity: {err}");
            false
        }
    }
}

/// Restrict the calling thread to the given cores, with error detail.
///
/// # Errors
///
/// Returns [`AffinityError::InvalidCoreId`] if any ID is 64 or above.
/// Returns [`AffinityError::Io`] if the OS rejected the request, including
/// for a set with no existing core on Linux and Windows.
/// Returns [`AffinityError::EmptyCoreSet`] where the backend itself requires
/// a core to pin to (Intel macOS).
/// Returns [`AffinityError::NotSupported`] on platforms without a backend.
pub fn try_set_for_current(ids: impl IntoIterator<Item = usize>) -> Result<(), AffinityError> {
    try_set_with(&NativeBackend, ids)
}

fn core_ids_with<B: MaskBackend>(backend: &B) -> Vec<usize> {
    mask::core_ids(backend.read_mask())
}

// An empty requested set is not rejected here: the all-zero mask goes to the
// backend so each platform's own failure policy decides.
fn try_set_with<B: MaskBackend>(
    backend: &B,
    ids: impl IntoIterator<Item = usize>,
) -> Result<(), AffinityError> {
    backend.write_mask(mask::mask_from_ids(ids)?)
}
