//! Windows backend.
//!
//! Writes are per thread via `SetThreadAffinityMask`. Windows only exposes
//! reads at process granularity, so `read_mask` reports the process mask as
//! a stand-in for the thread mask.

use {
    super::MaskBackend,
    crate::{error::AffinityError, mask::AffinityMask},
    log::warn,
    std::io,
    windows_sys::Win32::System::Threading::{
        GetCurrentProcess, GetCurrentThread, GetProcessAffinityMask, SetThreadAffinityMask,
    },
};

pub(crate) struct NativeBackend;

impl MaskBackend for NativeBackend {
    fn read_mask(&self) -> AffinityMask {
        let mut process_mask: usize = 0;
        let mut system_mask: usize = 0;
        // safety: both out-pointers are valid for the duration of the call
        let ok = unsafe {
            GetProcessAffinityMask(GetCurrentProcess(), &mut process_mask, &mut system_mask)
        };
        if ok == 0 {
            warn!(
                "GetProcessAffinityMask failed: {}",
                io::Error::last_os_error()
            );
            return 0;
        }
        process_mask as AffinityMask
    }

    fn write_mask(&self, mask: AffinityMask) -> Result<(), AffinityError> {
        // Returns the previous mask on success and 0 on failure; a mask with
        // no valid processor bits fails with ERROR_INVALID_PARAMETER.
        // safety: GetCurrentThread is a pseudo handle, no cleanup required
        let previous = unsafe { SetThreadAffinityMask(GetCurrentThread(), mask as usize) };
        if previous == 0 {
            return Err(AffinityError::Io(io::Error::last_os_error()));
        }
        Ok(())
    }
}
