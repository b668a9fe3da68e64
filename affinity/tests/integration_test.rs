//! Integration tests against the live kernel scheduler.
//!
//! The affinity-changing tests are Linux-only and tolerate EPERM so they can
//! run in restricted containers. Affinity is thread-local, so the parallel
//! test harness needs no serialization here.

use corepin_affinity::*;

#[cfg(target_os = "linux")]
fn is_permission_denied(err: &AffinityError) -> bool {
    matches!(err, AffinityError::Io(err) if err.raw_os_error() == Some(1)) // EPERM = 1
}

/// Highest online CPU ID, read the same way the kernel publishes it.
/// Returns None when sysfs is unavailable (unusual, but possible in
/// minimal containers).
#[cfg(target_os = "linux")]
fn max_online_cpu() -> Option<usize> {
    let content = std::fs::read_to_string("/sys/devices/system/cpu/online").ok()?;
    // e.g. "0-7", "0", or "0,2-7"
    let last_part = content.trim().split(',').next_back()?;
    last_part.split('-').next_back()?.parse().ok()
}

#[test]
fn test_core_ids_are_sorted_unique_and_bounded() {
    let cores = get_core_ids();
    assert!(cores.len() <= MAX_CORES);
    assert!(cores.iter().all(|&core| core < MAX_CORES));

    let mut deduped = cores.clone();
    deduped.sort_unstable();
    deduped.dedup();
    assert_eq!(cores, deduped, "core ids should be sorted and unique");
}

#[test]
#[cfg(any(target_os = "linux", target_os = "windows", target_os = "macos"))]
fn test_core_ids_nonempty_on_supported_platforms() {
    assert!(!get_core_ids().is_empty());
}

#[test]
fn test_out_of_range_core_id_is_rejected() {
    // One past the highest representable core; must fail cleanly everywhere.
    assert!(!set_for_current([MAX_CORES]));
    assert!(matches!(
        try_set_for_current([MAX_CORES]),
        Err(AffinityError::InvalidCoreId { .. })
    ));
}

#[test]
#[cfg(any(target_os = "linux", target_os = "windows"))]
fn test_empty_core_set_is_rejected() {
    assert!(!set_for_current([]));
}

#[test]
#[cfg(target_os = "linux")]
fn test_set_and_restore_round_trip() {
    let original = get_core_ids();
    assert!(!original.is_empty(), "Failed to get original affinity");
    let lowest = original[0];

    match try_set_for_current([lowest]) {
        Ok(()) => {
            assert_eq!(get_core_ids(), vec![lowest], "Affinity should be pinned");

            assert!(
                set_for_current(original.clone()),
                "Failed to restore original affinity"
            );
            assert_eq!(get_core_ids(), original, "Affinity should be restored");
        }
        Err(err) if is_permission_denied(&err) => {
            eprintln!("Skipping affinity test: insufficient permissions");
        }
        Err(err) => panic!("Unexpected error: {err:?}"),
    }
}

#[test]
#[cfg(target_os = "linux")]
fn test_subset_round_trip() {
    let original = get_core_ids();
    if original.len() < 2 {
        eprintln!("Skipping subset test: fewer than 2 allowed cores");
        return;
    }

    let subset = vec![original[0], original[original.len() - 1]];
    match try_set_for_current(subset.clone()) {
        Ok(()) => {
            assert_eq!(get_core_ids(), subset, "Should be pinned to the subset");
            assert!(set_for_current(original), "Failed to restore affinity");
        }
        Err(err) if is_permission_denied(&err) => {
            eprintln!("Skipping subset test: insufficient permissions");
        }
        Err(err) => panic!("Unexpected error: {err:?}"),
    }
}

#[test]
#[cfg(target_os = "linux")]
fn test_repeated_set_gives_same_result() {
    let original = get_core_ids();
    assert!(!original.is_empty());
    let target = vec![original[0]];

    let first = try_set_for_current(target.clone());
    if first.as_ref().is_err_and(is_permission_denied) {
        eprintln!("Skipping idempotence test: insufficient permissions");
        return;
    }
    let snapshot = get_core_ids();

    let second = try_set_for_current(target);
    assert_eq!(first.is_ok(), second.is_ok());
    assert_eq!(get_core_ids(), snapshot);

    set_for_current(original);
}

#[test]
#[cfg(target_os = "linux")]
fn test_nonexistent_core_is_rejected_by_kernel() {
    let Some(max_online) = max_online_cpu() else {
        eprintln!("Skipping nonexistent-core test: no sysfs");
        return;
    };
    let past_last = max_online + 1;
    if past_last >= MAX_CORES {
        // every representable bit is a real CPU on this host
        return;
    }

    assert!(!set_for_current([past_last]));
    assert!(matches!(
        try_set_for_current([past_last]),
        Err(AffinityError::Io(_))
    ));
}

#[test]
#[cfg(target_os = "macos")]
fn test_reads_ignore_writes_on_macos() {
    let before = get_core_ids();
    assert!(!before.is_empty());

    // Pinning is advisory here and reads always report full availability.
    assert!(set_for_current([before[0]]));
    assert_eq!(get_core_ids(), before);
}

#[test]
#[cfg(target_os = "windows")]
fn test_set_thread_affinity_on_windows() {
    let cores = get_core_ids();
    assert!(!cores.is_empty());

    // Reads are process-wide on Windows, so only the write result can be
    // asserted per thread.
    assert!(set_for_current([cores[0]]));
    assert!(set_for_current(cores));
}
