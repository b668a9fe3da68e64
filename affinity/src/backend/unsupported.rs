//! Fallback for targets without an affinity backend.

use {
    super::MaskBackend,
    crate::{error::AffinityError, mask::AffinityMask},
};

pub(crate) struct NativeBackend;

impl MaskBackend for NativeBackend {
    fn read_mask(&self) -> AffinityMask {
        0
    }

    fn write_mask(&self, _mask: AffinityMask) -> Result<(), AffinityError> {
        Err(AffinityError::NotSupported)
    }
}
