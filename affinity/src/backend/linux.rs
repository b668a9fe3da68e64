//! Linux backend: `sched_getaffinity`/`sched_setaffinity` for the calling
//! thread (pid 0).

use {
    super::MaskBackend,
    crate::{
        error::AffinityError,
        mask::{AffinityMask, MAX_CORES},
    },
    log::warn,
    std::{io, mem},
};

/// Maximum CPU ID that can be used with CPU_SET.
///
/// This is the standard Linux value defined in glibc. The kernel itself
/// supports more CPUs, but the cpu_set_t structure in glibc is fixed at this
/// size.
const CPU_SETSIZE: usize = 1024;

pub(crate) struct NativeBackend;

impl MaskBackend for NativeBackend {
    fn read_mask(&self) -> AffinityMask {
        // safety: cpu_set_t is a POD type, zero-initialization is standard
        let mut cpu_set: libc::cpu_set_t = unsafe { mem::zeroed() };

        // safety: sched_getaffinity is safe with valid parameters
        let result = unsafe {
            libc::sched_getaffinity(
                0, // 0 means current thread
                mem::size_of::<libc::cpu_set_t>(),
                &mut cpu_set,
            )
        };
        if result != 0 {
            warn!("sched_getaffinity failed: {}", io::Error::last_os_error());
            return 0;
        }

        // Translate the settable cores into mask bits, capped at the first
        // MAX_CORES of them.
        let mut mask: AffinityMask = 0;
        for cpu in 0..MAX_CORES.min(CPU_SETSIZE) {
            // safety: CPU_ISSET is safe with a valid cpu_set_t and cpu < CPU_SETSIZE
            if unsafe { libc::CPU_ISSET(cpu, &cpu_set) } {
                mask |= 1u64 << cpu;
            }
        }
        mask
    }

    fn write_mask(&self, mask: AffinityMask) -> Result<(), AffinityError> {
        // safety: cpu_set_t is a POD type, zero-initialization is standard
        let mut cpu_set: libc::cpu_set_t = unsafe { mem::zeroed() };
        for cpu in 0..MAX_CORES {
            if mask & (1u64 << cpu) != 0 {
                // safety: cpu is below both MAX_CORES and CPU_SETSIZE
                unsafe { libc::CPU_SET(cpu, &mut cpu_set) };
            }
        }

        // An all-zero set goes to the kernel as-is; it answers EINVAL.
        // safety: sched_setaffinity is safe with valid parameters
        let result =
            unsafe { libc::sched_setaffinity(0, mem::size_of::<libc::cpu_set_t>(), &cpu_set) };
        if result != 0 {
            return Err(AffinityError::Io(io::Error::last_os_error()));
        }
        Ok(())
    }
}
