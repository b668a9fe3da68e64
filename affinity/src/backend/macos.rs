//! macOS backend.
//!
//! Affinity on macOS is advisory at best. Reads synthesize "every logical
//! core" from `hw.logicalcpu` and never reflect a restriction installed by a
//! previous write. Writes defer to the scheduler: Apple silicon forbids
//! thread pinning outright, and on Intel hosts the Mach affinity-tag policy
//! pins to a single core at most.

use {
    super::MaskBackend,
    crate::{
        error::AffinityError,
        mask::{AffinityMask, MAX_CORES},
    },
    log::{debug, warn},
    std::io,
};

pub(crate) struct NativeBackend;

fn logical_cpu_count() -> Option<u32> {
    let mut count: libc::c_int = 0;
    let mut size = std::mem::size_of::<libc::c_int>();
    // safety: the name is NUL-terminated and the out-buffer matches `size`
    let result = unsafe {
        libc::sysctlbyname(
            b"hw.logicalcpu\0".as_ptr().cast(),
            (&mut count as *mut libc::c_int).cast(),
            &mut size,
            std::ptr::null_mut(),
            0,
        )
    };
    if result != 0 {
        warn!("sysctl hw.logicalcpu failed: {}", io::Error::last_os_error());
        return None;
    }
    u32::try_from(count).ok()
}

impl MaskBackend for NativeBackend {
    /// Always reports full availability, capped at the mask width. There is
    /// no thread-affinity introspection on this platform, so a restriction
    /// installed by [`MaskBackend::write_mask`] is invisible here.
    fn read_mask(&self) -> AffinityMask {
        match logical_cpu_count() {
            Some(count) if count as usize >= MAX_CORES => AffinityMask::MAX,
            Some(count) => (1u64 << count) - 1,
            None => 0,
        }
    }

    #[cfg(target_arch = "aarch64")]
    fn write_mask(&self, _mask: AffinityMask) -> Result<(), AffinityError> {
        // The kernel rejects thread affinity tags on Apple silicon; the
        // scheduler keeps the thread on a valid core either way.
        debug!("ignoring thread affinity request on Apple silicon");
        Ok(())
    }

    #[cfg(not(target_arch = "aarch64"))]
    fn write_mask(&self, mask: AffinityMask) -> Result<(), AffinityError> {
        use libc::{
            integer_t, kern_return_t, mach_msg_type_number_t, pthread_mach_thread_np,
            pthread_self, thread_policy_flavor_t, thread_policy_t, thread_t, KERN_SUCCESS,
            THREAD_AFFINITY_POLICY, THREAD_AFFINITY_POLICY_COUNT,
        };

        #[repr(C)]
        #[allow(non_camel_case_types)]
        struct thread_affinity_policy_data_t {
            affinity_tag: integer_t,
        }

        #[link(name = "System", kind = "framework")]
        extern "C" {
            fn thread_policy_set(
                thread: thread_t,
                flavor: thread_policy_flavor_t,
                policy_info: thread_policy_t,
                count: mach_msg_type_number_t,
            ) -> kern_return_t;
        }

        if mask == 0 {
            return Err(AffinityError::EmptyCoreSet);
        }

        // The affinity-tag policy takes one core, so pin to the lowest
        // requested one.
        let core = mask.trailing_zeros();
        let mut policy = thread_affinity_policy_data_t {
            affinity_tag: core as integer_t,
        };

        // safety: the policy struct outlives the call and the count matches
        // its flavor
        let result = unsafe {
            thread_policy_set(
                pthread_mach_thread_np(pthread_self()),
                THREAD_AFFINITY_POLICY as thread_policy_flavor_t,
                (&mut policy as *mut thread_affinity_policy_data_t).cast(),
                THREAD_AFFINITY_POLICY_COUNT,
            )
        };
        if result != KERN_SUCCESS {
            // Modern macOS routinely declines the policy; the scheduler
            // still runs the thread on a valid core, so report success.
            debug!("thread_policy_set declined affinity tag {core}: {result}");
        }
        Ok(())
    }
}
