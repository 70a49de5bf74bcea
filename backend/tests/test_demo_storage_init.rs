//! Concurrent first initialization of the demo storage
//!
//! Lives in its own test binary so the singleton is still empty when the
//! threads start.

use std::thread;

use toto_core_rs::api::produce_view;
use toto_core_rs::{DemoConfig, DemoStorage};

#[test]
fn test_concurrent_init_agrees_on_one_storage() {
    let _ = env_logger::builder().is_test(true).try_init();

    let configs: Vec<DemoConfig> = (0..8)
        .map(|i| DemoConfig {
            extents: [2, 3, 4],
            fill: f64::from(i),
        })
        .collect();

    let addresses: Vec<usize> = thread::scope(|scope| {
        let handles: Vec<_> = configs
            .iter()
            .map(|config| {
                let config = config.clone();
                scope.spawn(move || DemoStorage::init(config).unwrap().view().as_ptr() as usize)
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    let winner = DemoStorage::get();
    assert!(addresses.iter().all(|&addr| addr == winner.view().as_ptr() as usize));
    assert!(configs.contains(winner.config()));

    // Every element carries the winner's fill, not a mix of contenders
    let fill = winner.config().fill;
    assert!(produce_view().iter().all(|&value| value == fill));
    assert_eq!(produce_view().as_ptr(), winner.view().as_ptr());
}
