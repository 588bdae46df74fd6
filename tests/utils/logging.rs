use std::sync::Once;

static INIT: Once = Once::new();

/// Routes the crate's debug output to the test harness. Run with
/// `RUST_LOG=brokerconf=debug` to see which rule rejected a configuration.
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}
