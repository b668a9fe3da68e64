//! Spawns one thread per allowed core and pins each thread to its core.
//!
//! Run with `RUST_LOG=debug` to see why a pin was refused or ignored.

use {
    corepin_affinity::{get_core_ids, set_for_current},
    std::thread,
};

fn main() {
    env_logger::init();

    let cores = get_core_ids();
    if cores.is_empty() {
        eprintln!("no affinity information available on this platform");
        return;
    }
    println!("allowed cores: {cores:?}");

    let handles: Vec<_> = cores
        .into_iter()
        .map(|core| {
            thread::spawn(move || {
                let pinned = set_for_current([core]);
                println!(
                    "core {core}: pinned={pinned}, thread now allowed on {:?}",
                    get_core_ids()
                );
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
