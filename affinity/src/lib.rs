// Activate some of the Rust 2024 lints to make the future migration easier.
#![warn(if_let_rescope)]
#![warn(keyword_idents_2024)]
#![warn(rust_2024_incompatible_pat)]
#![warn(tail_expr_drop_order)]
#![warn(unsafe_attr_outside_unsafe)]
#![warn(unsafe_op_in_unsafe_fn)]

//! CPU affinity for the calling thread.
//!
//! This crate reads and restricts the set of logical cores the current
//! thread may be scheduled on, behind one portable API. Core sets are
//! exchanged with the OS as a 64-bit mask, so cores with index 64 or above
//! are out of reach by design.
//!
//! # Platform Support
//!
//! * **Linux** — `sched_getaffinity`/`sched_setaffinity` on the calling
//!   thread; reads and writes are both exact.
//! * **Windows** — writes are per thread via `SetThreadAffinityMask`; reads
//!   go through `GetProcessAffinityMask` and therefore report the process
//!   mask as a stand-in for the thread mask.
//! * **macOS** — best effort. Reads always report every logical core (the OS
//!   has no thread-affinity introspection), and writes either defer entirely
//!   to the scheduler (Apple silicon) or pin to a single core at most
//!   (Intel). See [`set_for_current`].
//! * Anything else — [`get_core_ids`] returns an empty vector and
//!   [`set_for_current`] returns `false`.
//!
//! # Examples
//!
//! ```no_run
//! use corepin_affinity::{get_core_ids, set_for_current};
//!
//! // Pin this thread to the lowest core it is currently allowed on.
//! let cores = get_core_ids();
//! if let Some(&core) = cores.first() {
//!     set_for_current([core]);
//! }
//! ```

mod affinity;
mod backend;
mod error;
mod mask;

pub use {
    affinity::{get_core_ids, set_for_current, try_set_for_current},
    error::AffinityError,
    mask::{AffinityMask, MAX_CORES},
};
